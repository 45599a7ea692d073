//! Metadata projections of discovered C# types.
//!
//! These are read-only views produced by the source parser and consumed by
//! template helper functions; nothing in the generator mutates them after
//! discovery.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A public property of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    pub type_name: String,
}

impl PropertyInfo {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    /// Type as written in source
    pub type_name: String,
    /// Type with C# aliases expanded to their `System.*` names
    pub full_type: String,
}

impl ParameterInfo {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            name: name.into(),
            full_type: super::catalog::full_type_name(&type_name),
            type_name,
        }
    }
}

/// A method signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub return_type: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
}

impl MethodInfo {
    pub fn new(
        return_type: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
    ) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            parameters,
        }
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// A type declared in a C# source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    /// Base class and interfaces as written after `:`
    #[serde(default)]
    pub base_types: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
}

impl TypeInfo {
    /// Namespace-qualified name
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Generic argument of the first base type, e.g. `Guid` for
    /// `AggregateRoot<Guid>`.
    pub fn primary_key_type(&self) -> Option<String> {
        let base = self.base_types.first()?;
        let start = base.find('<')?;
        let end = base.rfind('>')?;
        let key = base.get(start + 1..end)?.trim();
        (!key.is_empty() && !key.contains(',')).then(|| key.to_string())
    }
}

/// A type located in a source file of one layer project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceType {
    pub path: PathBuf,
    /// Directory of the file relative to its layer project, `/`-separated
    pub relative_directory: String,
    /// Key type of an entity, e.g. `Guid`
    pub primary_key: Option<String>,
    pub info: TypeInfo,
}

impl SourceType {
    pub fn new(path: PathBuf, relative_directory: String, info: TypeInfo) -> Self {
        Self {
            path,
            relative_directory,
            primary_key: info.primary_key_type(),
            info,
        }
    }
}

/// An ABP layer project within the solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    /// Project name, e.g. `Acme.BookStore.Application`
    pub name: String,
    /// Directory holding the `.csproj` file
    pub directory: PathBuf,
}

/// Layout of the ABP solution being generated into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub base_directory: PathBuf,
    /// Full project name, e.g. `Acme.BookStore`
    pub full_name: String,
    /// Last segment of the full name, e.g. `BookStore`
    pub name: String,
    /// Layer suffix (`Domain`, `Application`, ...) to project
    pub layers: BTreeMap<String, LayerInfo>,
}

impl ProjectInfo {
    pub fn layer(&self, suffix: &str) -> Option<&LayerInfo> {
        self.layers.get(suffix)
    }
}

/// A rendered template ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}
