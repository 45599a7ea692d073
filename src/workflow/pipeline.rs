//! A built, ready-to-run sequence of stages.

use std::fmt;

use super::slot::WorkflowContext;
use super::stage::Stage;
use crate::errors::AppError;

/// Terminal status of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Finished,
    Faulted,
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStatus::Finished => f.write_str("Finished"),
            PipelineStatus::Faulted => f.write_str("Faulted"),
        }
    }
}

/// The stage that stopped a run and why
#[derive(Debug)]
pub struct StageFault {
    pub stage: String,
    pub error: AppError,
}

/// Result of executing a pipeline
#[derive(Debug)]
pub struct PipelineOutcome {
    pub status: PipelineStatus,
    pub context: WorkflowContext,
    pub fault: Option<StageFault>,
}

/// Ordered stages, executed once
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub(crate) fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Box<dyn Stage>] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order, stopping at the first failure
    pub async fn execute(self) -> PipelineOutcome {
        let mut context = WorkflowContext::new();

        for stage in &self.stages {
            let label = stage.label();
            tracing::debug!("Executing stage {}", label);

            if let Err(error) = stage.execute(&mut context).await {
                tracing::debug!("Stage {} failed: {}", label, error);
                return PipelineOutcome {
                    status: PipelineStatus::Faulted,
                    context,
                    fault: Some(StageFault { stage: label, error }),
                };
            }
        }

        PipelineOutcome {
            status: PipelineStatus::Finished,
            context,
            fault: None,
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.label()))
            .finish()
    }
}
