//! Catalog of types discovered in the solution.
//!
//! Used to decide whether a parameter type is primitive-like (bound as a
//! single route segment) or a composite key whose properties each become a
//! segment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::{PropertyInfo, TypeInfo, TypeKind};

/// C# keyword aliases and their framework type names
const TYPE_ALIASES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("char", "System.Char"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("float", "System.Single"),
    ("double", "System.Double"),
    ("decimal", "System.Decimal"),
    ("string", "System.String"),
    ("object", "System.Object"),
    ("Guid", "System.Guid"),
    ("DateTime", "System.DateTime"),
    ("DateTimeOffset", "System.DateTimeOffset"),
    ("TimeSpan", "System.TimeSpan"),
];

/// Framework types bound as a single value
const PRIMITIVE_TYPES: &[&str] = &[
    "System.Boolean",
    "System.Byte",
    "System.SByte",
    "System.Char",
    "System.Int16",
    "System.UInt16",
    "System.Int32",
    "System.UInt32",
    "System.Int64",
    "System.UInt64",
    "System.Single",
    "System.Double",
    "System.Decimal",
    "System.String",
    "System.Guid",
    "System.DateTime",
    "System.DateTimeOffset",
    "System.TimeSpan",
];

/// Bases followed when collecting inherited properties
const MAX_INHERITANCE_DEPTH: usize = 8;

/// Expand a C# alias (keeping a nullable marker) to its `System.*` name
pub fn full_type_name(type_name: &str) -> String {
    let trimmed = type_name.trim();
    let (bare, nullable) = match trimmed.strip_suffix('?') {
        Some(bare) => (bare, "?"),
        None => (trimmed, ""),
    };

    TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == bare)
        .map(|(_, full)| format!("{full}{nullable}"))
        .unwrap_or_else(|| trimmed.to_string())
}

/// Whether the type is a framework primitive, string, Guid or date/time,
/// ignoring a nullable marker. Enums are not known here; see
/// [`TypeCatalog::resolve`].
pub fn is_primitive(type_name: &str) -> bool {
    let full = full_type_name(type_name);
    let bare = full.strip_suffix('?').unwrap_or(&full);
    let bare = bare.strip_prefix("global::").unwrap_or(bare);
    if PRIMITIVE_TYPES.contains(&bare) {
        return true;
    }

    bare.strip_prefix("System.Nullable<")
        .and_then(|rest| rest.strip_suffix('>'))
        .is_some_and(is_primitive)
}

/// How a type binds to route segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// Primitive or enum: one segment
    Primitive,
    /// Known composite: one segment per public instance property
    Composite(Vec<PropertyInfo>),
    /// Not primitive and not found in the catalog
    Unknown,
}

/// Types discovered in the solution, keyed by full name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeInfo>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: TypeInfo) {
        self.types.insert(info.full_name(), info);
    }

    pub fn extend(&mut self, infos: impl IntoIterator<Item = TypeInfo>) {
        for info in infos {
            self.insert(info);
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Find by full name, falling back to the simple name
    pub fn find(&self, type_name: &str) -> Option<&TypeInfo> {
        let name = strip_generic(type_name.trim().trim_end_matches('?'));
        let name = name.strip_prefix("global::").unwrap_or(name);

        self.types.get(name).or_else(|| {
            let simple = name.rsplit('.').next().unwrap_or(name);
            self.types.values().find(|t| t.name == simple)
        })
    }

    /// Classify a parameter type for route building
    pub fn resolve(&self, type_name: &str) -> TypeShape {
        if is_primitive(type_name) {
            return TypeShape::Primitive;
        }

        match self.find(type_name) {
            Some(info) if info.kind == TypeKind::Enum => TypeShape::Primitive,
            Some(info) => TypeShape::Composite(self.instance_properties(info)),
            None => TypeShape::Unknown,
        }
    }

    /// Declared properties followed by those inherited from catalogued bases
    fn instance_properties(&self, info: &TypeInfo) -> Vec<PropertyInfo> {
        let mut properties = info.properties.clone();
        let mut current = info;

        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(base) = current
                .base_types
                .iter()
                .filter_map(|b| self.find(b))
                .find(|t| t.kind == TypeKind::Class)
            else {
                break;
            };
            for property in &base.properties {
                if !properties.iter().any(|p| p.name == property.name) {
                    properties.push(property.clone());
                }
            }
            current = base;
        }

        properties
    }
}

fn strip_generic(type_name: &str) -> &str {
    type_name.split('<').next().unwrap_or(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, bases: &[&str], props: &[(&str, &str)]) -> TypeInfo {
        TypeInfo {
            namespace: "Acme.BookStore".into(),
            name: name.into(),
            kind: TypeKind::Class,
            base_types: bases.iter().map(|b| b.to_string()).collect(),
            properties: props
                .iter()
                .map(|(t, n)| PropertyInfo::new(*t, *n))
                .collect(),
            methods: vec![],
        }
    }

    #[test]
    fn test_full_type_name() {
        assert_eq!(full_type_name("Guid"), "System.Guid");
        assert_eq!(full_type_name("int?"), "System.Int32?");
        assert_eq!(full_type_name("BookKey"), "BookKey");
    }

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive("string"));
        assert!(is_primitive("Guid?"));
        assert!(is_primitive("System.DateTime"));
        assert!(is_primitive("System.Nullable<System.Int32>"));
        assert!(!is_primitive("BookKey"));
        assert!(!is_primitive("List<int>"));
    }

    #[test]
    fn test_resolve_enum_as_primitive() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeInfo {
            kind: TypeKind::Enum,
            ..class("BookType", &[], &[])
        });

        assert_eq!(catalog.resolve("BookType"), TypeShape::Primitive);
        assert_eq!(catalog.resolve("Acme.BookStore.BookType?"), TypeShape::Primitive);
    }

    #[test]
    fn test_resolve_composite_includes_inherited_properties() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(class("KeyBase", &[], &[("Guid", "TenantKey")]));
        catalog.insert(class(
            "BookKey",
            &["KeyBase", "IEquatable<BookKey>"],
            &[("Guid", "StoreId"), ("string", "Isbn")],
        ));

        let TypeShape::Composite(props) = catalog.resolve("BookKey") else {
            panic!("expected composite");
        };
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["StoreId", "Isbn", "TenantKey"]);
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(TypeCatalog::new().resolve("Missing"), TypeShape::Unknown);
    }
}
