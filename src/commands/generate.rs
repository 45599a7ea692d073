//! Generate command - Code generation for ABP solutions.

use clap::{ArgMatches, Command};

use super::controller::ControllerCommand;
use super::crud::CrudCommand;
use super::runner::{CommandRunner, GeneratorCommand};
use super::service::ServiceCommand;
use crate::errors::{AppError, AppResult};
use crate::workflow::WorkflowContext;

pub const NAME: &str = "generate";

/// The `generate` command with every generator attached
pub fn command() -> AppResult<Command> {
    Ok(Command::new(NAME)
        .about("Generate code for an ABP solution")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(CrudCommand.command()?)
        .subcommand(ServiceCommand.command()?)
        .subcommand(ControllerCommand.command()?))
}

/// Execute the generate command
pub async fn execute(matches: &ArgMatches, runner: &CommandRunner) -> AppResult<WorkflowContext> {
    match matches.subcommand() {
        Some(("crud", sub)) => runner.execute(&CrudCommand, sub).await,
        Some(("service", sub)) => runner.execute(&ServiceCommand, sub).await,
        Some(("controller", sub)) => runner.execute(&ControllerCommand, sub).await,
        Some((name, _)) => Err(AppError::invalid_input(format!("Unknown generator '{}'", name))),
        None => Err(AppError::invalid_input("No generator given")),
    }
}
