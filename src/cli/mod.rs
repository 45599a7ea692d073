//! CLI module - Command-line interface for the application.
//!
//! - `args` - root command and global flags
//! - `schema` - declarative option schemas
//! - `binder` - schema to clap binding and typed value readers

pub mod args;
pub mod binder;
pub mod schema;

pub use args::Cli;
pub use binder::{bind_options, OptionValues};
pub use schema::{ArgumentAttr, FieldDescriptor, OptionAttr, OptionSchema, ValueType};
