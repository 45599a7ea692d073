use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::generator::GeneratedFile;
use crate::workflow::slot::{Slot, WorkflowContext};
use crate::workflow::stage::Stage;
use crate::workflow::variables::OVERWRITE;

/// Writes rendered files, leaving existing ones alone unless overwriting
pub struct WriteFiles {
    input: &'static str,
    output: &'static str,
}

impl WriteFiles {
    pub fn new(input: &Slot<Vec<GeneratedFile>>, output: &Slot<Vec<PathBuf>>) -> Self {
        Self {
            input: input.name(),
            output: output.name(),
        }
    }
}

#[async_trait]
impl Stage for WriteFiles {
    fn name(&self) -> &'static str {
        "WriteFiles"
    }

    fn output(&self) -> Option<&'static str> {
        Some(self.output)
    }

    fn inputs(&self) -> Vec<&'static str> {
        vec![self.input, OVERWRITE.name()]
    }

    async fn execute(&self, ctx: &mut WorkflowContext) -> AppResult<()> {
        let files = ctx.get(&Slot::<Vec<GeneratedFile>>::new(self.input))?;
        let overwrite = ctx.get(&OVERWRITE)?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            if !overwrite && tokio::fs::try_exists(&file.path).await? {
                tracing::info!("Skipped existing file: {}", file.path.display());
                continue;
            }

            if let Some(parent) = file.path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&file.path, &file.content).await?;

            tracing::info!("Generated: {}", file.path.display());
            written.push(file.path);
        }

        ctx.set(&Slot::<Vec<PathBuf>>::new(self.output), &written)
    }
}
