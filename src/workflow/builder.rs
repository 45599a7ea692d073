//! Pipeline assembly and the factory commands obtain builders from.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use super::expr::ValueExpr;
use super::pipeline::Pipeline;
use super::slot::Slot;
use super::stage::Stage;
use super::steps::SetVariable;
use crate::config::RESERVED_VARIABLE_NAMES;
use crate::errors::{AppError, AppResult};
use crate::generator::TemplateStore;

/// Collects stages in order and checks their variable wiring on build
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Stage>>,
    templates: Arc<TemplateStore>,
}

impl PipelineBuilder {
    pub fn new(templates: Arc<TemplateStore>) -> Self {
        Self {
            stages: Vec::new(),
            templates,
        }
    }

    /// Append a stage
    pub fn then<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append a stage binding `slot` to `expr`
    pub fn set_variable<T>(self, slot: &Slot<T>, expr: ValueExpr) -> Self {
        self.then(SetVariable::new(slot, expr))
    }

    /// Templates available to rendering stages
    pub fn templates(&self) -> Arc<TemplateStore> {
        Arc::clone(&self.templates)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Validate variable wiring and produce a runnable pipeline.
    ///
    /// Fails when a stage reads a variable no earlier stage binds, or when
    /// two stages bind the same variable.
    pub fn build(self) -> AppResult<Pipeline> {
        let mut bound: Vec<&'static str> = Vec::new();

        for stage in &self.stages {
            for input in stage.inputs() {
                if !bound.contains(&input) {
                    return Err(AppError::configuration(format!(
                        "stage {} reads variable '{}' before it is set",
                        stage.label(),
                        input
                    )));
                }
            }

            if let Some(output) = stage.output() {
                if bound.contains(&output) {
                    let reason = if RESERVED_VARIABLE_NAMES.contains(&output) {
                        "is reserved and cannot be redefined"
                    } else {
                        "is set more than once"
                    };
                    return Err(AppError::configuration(format!(
                        "variable '{}' {}",
                        output, reason
                    )));
                }
                bound.push(output);
            }
        }

        Ok(Pipeline::new(self.stages))
    }
}

/// Source of fresh builders, one per command invocation
#[cfg_attr(test, automock)]
pub trait PipelineBuilderFactory: Send + Sync {
    fn create(&self) -> PipelineBuilder;
}

/// Factory handing every builder the same template store
pub struct DefaultPipelineBuilderFactory {
    templates: Arc<TemplateStore>,
}

impl DefaultPipelineBuilderFactory {
    pub fn new(templates: Arc<TemplateStore>) -> Self {
        Self { templates }
    }
}

impl PipelineBuilderFactory for DefaultPipelineBuilderFactory {
    fn create(&self) -> PipelineBuilder {
        PipelineBuilder::new(Arc::clone(&self.templates))
    }
}
