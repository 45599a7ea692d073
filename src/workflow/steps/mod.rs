//! Built-in pipeline stages.

mod project;
mod render;
mod set_variable;
mod source;
mod write;

pub use project::{locate_project, FindProject};
pub use render::RenderTemplates;
pub use set_variable::SetVariable;
pub use source::{BuildTypeCatalog, FindType};
pub use write::WriteFiles;
