//! Well-known workflow variables.
//!
//! The first four are bound by every command's base pipeline; generation
//! stages read them and bind the rest.

use std::path::PathBuf;

use serde_json::Value;

use super::slot::Slot;
use crate::config::{
    BASE_DIRECTORY_VARIABLE_NAME, EXCLUDE_DIRECTORIES_VARIABLE_NAME, OPTION_VARIABLE_NAME,
    OVERWRITE_VARIABLE_NAME,
};
use crate::generator::{GeneratedFile, ProjectInfo, SourceType, TypeCatalog};

/// Serialized command options
pub const OPTION: Slot<Value> = Slot::new(OPTION_VARIABLE_NAME);

/// Resolved base directory
pub const BASE_DIRECTORY: Slot<String> = Slot::new(BASE_DIRECTORY_VARIABLE_NAME);

/// Exclude patterns, read from [`OPTION`]
pub const EXCLUDE_DIRECTORIES: Slot<Vec<String>> = Slot::new(EXCLUDE_DIRECTORIES_VARIABLE_NAME);

/// Whether existing files are replaced, negated from [`OPTION`]
pub const OVERWRITE: Slot<bool> = Slot::new(OVERWRITE_VARIABLE_NAME);

/// Located layer projects
pub const PROJECT_INFO: Slot<ProjectInfo> = Slot::new("ProjectInfo");

/// Entity class a CRUD is generated for
pub const ENTITY_INFO: Slot<SourceType> = Slot::new("EntityInfo");

/// Application service interface a controller is generated for
pub const INTERFACE_INFO: Slot<SourceType> = Slot::new("InterfaceInfo");

/// Every type declared in the solution
pub const TYPE_CATALOG: Slot<TypeCatalog> = Slot::new("TypeCatalog");

/// Rendered templates
pub const GENERATED_FILES: Slot<Vec<GeneratedFile>> = Slot::new("GeneratedFiles");

/// Files actually written to disk
pub const WRITTEN_FILES: Slot<Vec<PathBuf>> = Slot::new("WrittenFiles");

/// Name and folder of a new application service
pub const SERVICE_INFO: Slot<Value> = Slot::new("ServiceInfo");

/// Name of the controller being generated
pub const CONTROLLER_INFO: Slot<Value> = Slot::new("ControllerInfo");
