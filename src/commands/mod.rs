//! Commands module - CLI command implementations.
//!
//! `runner` holds the shared driver; each generator lives in its own module.

pub mod controller;
pub mod crud;
pub mod generate;
pub mod options;
pub mod runner;
pub mod service;

pub use options::{BaseOptions, CommandOptions};
pub use runner::{create_basic_workflow, resolve_base_directory, CommandRunner, GeneratorCommand};
