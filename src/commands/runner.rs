//! Shared command driver.
//!
//! Every generator goes through the same steps: read its options, resolve
//! the base directory, emit the base pipeline, let the generator append its
//! own stages, then execute the pipeline once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgMatches, Command};

use super::options::CommandOptions;
use crate::cli::{bind_options, OptionValues};
use crate::config::{Config, EXCLUDE_DIRECTORIES_FIELD, NO_OVERWRITE_FIELD};
use crate::errors::{AppError, AppResult};
use crate::workflow::variables::{BASE_DIRECTORY, EXCLUDE_DIRECTORIES, OPTION, OVERWRITE};
use crate::workflow::{
    Pipeline, PipelineBuilder, PipelineBuilderFactory, PipelineStatus, ValueExpr, WorkflowContext,
};

/// A generator subcommand
pub trait GeneratorCommand: Send + Sync {
    type Options: CommandOptions;

    fn name(&self) -> &'static str;

    fn about(&self) -> &'static str;

    /// Append generation stages to the base pipeline
    fn configure_build(
        &self,
        builder: PipelineBuilder,
        options: &Self::Options,
    ) -> AppResult<PipelineBuilder>;

    /// Clap command with the options schema bound
    fn command(&self) -> AppResult<Command> {
        bind_options(
            Command::new(self.name()).about(self.about()),
            &Self::Options::schema(),
        )
    }
}

/// Runs commands against pipelines obtained from a factory
pub struct CommandRunner {
    factory: Arc<dyn PipelineBuilderFactory>,
    config: Config,
}

impl CommandRunner {
    pub fn new(factory: Arc<dyn PipelineBuilderFactory>, config: Config) -> Self {
        Self { factory, config }
    }

    /// Read options for `command` from `matches` and run it
    pub async fn execute<C: GeneratorCommand>(
        &self,
        command: &C,
        matches: &ArgMatches,
    ) -> AppResult<WorkflowContext> {
        let schema = C::Options::schema();
        let mut options = C::Options::from_values(&OptionValues::new(matches, &schema))?;

        let base = options.base_mut();
        base.directory = resolve_base_directory(&base.directory)?
            .to_string_lossy()
            .into_owned();
        base.exclude_directories
            .extend(self.config.exclude_directories.iter().cloned());

        self.run(command.name(), |builder| {
            let builder = create_basic_workflow(builder, &options)?;
            command.configure_build(builder, &options)?.build()
        })
        .await
    }

    /// Build a pipeline from a fresh builder and execute it.
    ///
    /// Completion is only logged for a `Finished` run; any other status is
    /// returned as [`AppError::PipelineFaulted`].
    pub async fn run<F>(&self, name: &str, build: F) -> AppResult<WorkflowContext>
    where
        F: FnOnce(PipelineBuilder) -> AppResult<Pipeline>,
    {
        let pipeline = build(self.factory.create())?;
        tracing::debug!("Pipeline for '{}': {:?}", name, pipeline);

        tracing::info!("Command '{}' started.", name);
        let outcome = pipeline.execute().await;

        match (outcome.status, outcome.fault) {
            (PipelineStatus::Finished, _) => {
                tracing::info!("Command '{}' finished successfully.", name);
                Ok(outcome.context)
            }
            (status, fault) => {
                let (stage, reason) = match fault {
                    Some(fault) => (fault.stage, fault.error.to_string()),
                    None => (String::from("<unknown>"), status.to_string()),
                };
                tracing::error!("Command '{}' faulted at {}: {}", name, stage, reason);
                Err(AppError::PipelineFaulted {
                    command: name.to_string(),
                    stage,
                    reason,
                })
            }
        }
    }
}

/// The directory a command works in.
///
/// Empty means the current working directory; anything else must exist.
pub fn resolve_base_directory(directory: &str) -> AppResult<PathBuf> {
    let path = if directory.is_empty() {
        std::env::current_dir()?
    } else {
        let path = Path::new(directory);
        if !path.is_dir() {
            let err = AppError::DirectoryNotFound(path.to_path_buf());
            tracing::error!("{}", err);
            return Err(err);
        }
        path.to_path_buf()
    };

    tracing::info!("Use directory: `{}`", path.display());
    Ok(path)
}

/// Bind the four variables every generator relies on: the option blob, the
/// base directory, and the exclude list and overwrite flag read from the
/// blob.
pub fn create_basic_workflow<O: CommandOptions>(
    builder: PipelineBuilder,
    options: &O,
) -> AppResult<PipelineBuilder> {
    Ok(builder
        .set_variable(&OPTION, ValueExpr::literal(options)?)
        .set_variable(&BASE_DIRECTORY, ValueExpr::literal(&options.base().directory)?)
        .set_variable(
            &EXCLUDE_DIRECTORIES,
            ValueExpr::field(&OPTION, EXCLUDE_DIRECTORIES_FIELD),
        )
        .set_variable(&OVERWRITE, ValueExpr::field(&OPTION, NO_OVERWRITE_FIELD).not()))
}
