//! ABP Helper - Code generator for ABP framework solutions
//!
//! Each generator command reads its options from a declarative schema,
//! builds a short linear pipeline on top of a common four-stage base and
//! executes it once: locate the solution's layer projects, read C# sources,
//! render templates and write the results.
//!
//! # Modules
//!
//! - **cli**: Root command, option schemas and the clap binder
//! - **commands**: Command runner and the `crud`, `service`, `controller` generators
//! - **config**: Application configuration and constants
//! - **workflow**: Typed variables, stages and the pipeline builder
//! - **generator**: Source metadata, naming/route helpers and templates
//! - **utils**: Directory scanning
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # CRUD services for an entity
//! abphelper generate crud Book -d ./src
//!
//! # An empty application service in a folder
//! abphelper generate service Project -f Projects
//!
//! # A controller for IBookAppService
//! abphelper generate controller Book --no-overwrite
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod generator;
pub mod utils;
pub mod workflow;

// Re-export commonly used types at crate root
pub use config::Config;
pub use errors::{AppError, AppResult};
