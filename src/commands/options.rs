//! Options shared by every generator command.

use serde::{Deserialize, Serialize};

use crate::cli::{FieldDescriptor, OptionAttr, OptionSchema, OptionValues};
use crate::config::{EXCLUDE_DIRECTORIES_FIELD, NO_OVERWRITE_FIELD};
use crate::errors::AppResult;

/// Serialized name of `BaseOptions::directory`
pub const DIRECTORY_FIELD: &str = "directory";

/// Options every generator accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseOptions {
    /// Solution root; empty means the current directory until resolved
    pub directory: String,
    /// Glob patterns of directories skipped while searching sources
    pub exclude_directories: Vec<String>,
    /// Keep existing files instead of replacing them
    pub no_overwrite: bool,
}

impl BaseOptions {
    pub fn schema() -> OptionSchema {
        OptionSchema::new()
            .field(
                FieldDescriptor::text(DIRECTORY_FIELD).option(
                    OptionAttr::long("directory")
                        .with_short('d')
                        .description("The ABP project root directory. Defaults to the current directory"),
                ),
            )
            .field(
                FieldDescriptor::list(EXCLUDE_DIRECTORIES_FIELD).option(
                    OptionAttr::long("exclude")
                        .description("Glob pattern of directories to skip when searching source files"),
                ),
            )
            .field(
                FieldDescriptor::flag(NO_OVERWRITE_FIELD).option(
                    OptionAttr::long("no-overwrite").description("Keep files that already exist"),
                ),
            )
    }

    pub fn from_values(values: &OptionValues<'_>) -> AppResult<Self> {
        Ok(Self {
            directory: values.text(DIRECTORY_FIELD)?.unwrap_or_default(),
            exclude_directories: values.list(EXCLUDE_DIRECTORIES_FIELD)?,
            no_overwrite: values.flag(NO_OVERWRITE_FIELD)?,
        })
    }
}

/// A command's options type: its schema, how it is read back from parsed
/// matches, and access to the shared base fields.
///
/// Implementations flatten [`BaseOptions`] into their serialized form so the
/// `Option` workflow variable exposes `excludeDirectories` and `noOverwrite`
/// at the top level.
pub trait CommandOptions: Serialize + Send + Sync + Sized {
    fn schema() -> OptionSchema;

    fn from_values(values: &OptionValues<'_>) -> AppResult<Self>;

    fn base(&self) -> &BaseOptions;

    fn base_mut(&mut self) -> &mut BaseOptions;
}

impl CommandOptions for BaseOptions {
    fn schema() -> OptionSchema {
        BaseOptions::schema()
    }

    fn from_values(values: &OptionValues<'_>) -> AppResult<Self> {
        BaseOptions::from_values(values)
    }

    fn base(&self) -> &BaseOptions {
        self
    }

    fn base_mut(&mut self) -> &mut BaseOptions {
        self
    }
}
