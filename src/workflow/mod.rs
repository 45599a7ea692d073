//! Linear workflow engine.
//!
//! Commands describe their work as a [`Pipeline`]: an ordered list of
//! [`Stage`]s communicating through typed [`Slot`] variables. A pipeline is
//! built once per invocation, executed once and then dropped.

pub mod builder;
pub mod expr;
pub mod pipeline;
pub mod slot;
pub mod stage;
pub mod steps;
pub mod variables;

pub use builder::{DefaultPipelineBuilderFactory, PipelineBuilder, PipelineBuilderFactory};
pub use expr::ValueExpr;
pub use pipeline::{Pipeline, PipelineOutcome, PipelineStatus, StageFault};
pub use slot::{Slot, WorkflowContext};
pub use stage::Stage;
