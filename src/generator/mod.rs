//! Code generation: source metadata, naming and route conventions, and
//! template rendering.

pub mod catalog;
pub mod conventions;
pub mod functions;
pub mod models;
pub mod parser;
pub mod templates;

pub use catalog::{TypeCatalog, TypeShape};
pub use conventions::HttpVerb;
pub use models::{
    GeneratedFile, LayerInfo, MethodInfo, ParameterInfo, ProjectInfo, PropertyInfo, SourceType,
    TypeInfo, TypeKind,
};
pub use templates::{TemplateFile, TemplateGroup, TemplateStore};
