//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Workflow variables
// =============================================================================

/// Variable holding the serialized command options
pub const OPTION_VARIABLE_NAME: &str = "Option";

/// Variable holding the resolved base directory
pub const BASE_DIRECTORY_VARIABLE_NAME: &str = "BaseDirectory";

/// Variable holding the exclude patterns, derived from the option blob
pub const EXCLUDE_DIRECTORIES_VARIABLE_NAME: &str = "ExcludeDirectories";

/// Variable holding the overwrite flag, derived from the option blob
pub const OVERWRITE_VARIABLE_NAME: &str = "Overwrite";

/// Names that generation stages may read but never redefine
pub const RESERVED_VARIABLE_NAMES: &[&str] = &[
    OPTION_VARIABLE_NAME,
    BASE_DIRECTORY_VARIABLE_NAME,
    EXCLUDE_DIRECTORIES_VARIABLE_NAME,
    OVERWRITE_VARIABLE_NAME,
];

// =============================================================================
// Option blob fields
// =============================================================================

/// Serialized name of `BaseOptions::exclude_directories`
pub const EXCLUDE_DIRECTORIES_FIELD: &str = "excludeDirectories";

/// Serialized name of `BaseOptions::no_overwrite`
pub const NO_OVERWRITE_FIELD: &str = "noOverwrite";

// =============================================================================
// Directory scanning
// =============================================================================

/// Directory names never descended into, regardless of user excludes
pub const IGNORED_DIRECTORY_NAMES: &[&str] = &["bin", "obj", "node_modules", ".git", ".vs"];

/// Extension of C# source files
pub const SOURCE_FILE_EXTENSION: &str = "cs";

/// Extension of C# project files
pub const PROJECT_FILE_EXTENSION: &str = "csproj";

// =============================================================================
// ABP solution layout
// =============================================================================

/// Project name suffix of the domain layer
pub const DOMAIN_LAYER: &str = "Domain";

/// Project name suffix of the contracts layer
pub const APPLICATION_CONTRACTS_LAYER: &str = "Application.Contracts";

/// Project name suffix of the application layer
pub const APPLICATION_LAYER: &str = "Application";

/// Project name suffix of the HTTP API layer
pub const HTTP_API_LAYER: &str = "HttpApi";

/// Suffix of application service interfaces and classes
pub const APP_SERVICE_SUFFIX: &str = "AppService";

// =============================================================================
// Environment
// =============================================================================

/// Directory holding template overrides
pub const ENV_TEMPLATE_DIR: &str = "ABPHELPER_TEMPLATE_DIR";

/// Comma-separated exclude patterns applied to every command
pub const ENV_EXCLUDE: &str = "ABPHELPER_EXCLUDE";

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
