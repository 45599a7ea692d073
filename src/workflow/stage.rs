//! The unit of work a pipeline is made of.

use async_trait::async_trait;

use super::expr::ValueExpr;
use super::slot::WorkflowContext;
use crate::errors::AppResult;

/// One step of a pipeline.
///
/// A stage reads the variables named by [`Stage::inputs`] and may bind the
/// variable named by [`Stage::output`]. The builder rejects pipelines where
/// an input is read before it is bound or an output is bound twice.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stage kind, used in logs and fault reports
    fn name(&self) -> &'static str;

    /// Variable bound by this stage
    fn output(&self) -> Option<&'static str>;

    /// Variables that must be bound by earlier stages
    fn inputs(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Expression assigned by variable-setting stages
    fn expression(&self) -> Option<&ValueExpr> {
        None
    }

    async fn execute(&self, ctx: &mut WorkflowContext) -> AppResult<()>;

    /// `Name(Output)` label for log lines
    fn label(&self) -> String {
        match self.output() {
            Some(output) => format!("{}({})", self.name(), output),
            None => self.name().to_string(),
        }
    }
}
