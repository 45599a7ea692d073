//! CLI argument definitions.
//!
//! The root command is declared with clap derive; generator subcommands are
//! attached at startup from their option schemas.

use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};

use crate::errors::AppResult;

/// ABP Helper - Code generator for ABP framework solutions
#[derive(Parser, Debug)]
#[command(name = "abphelper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Root command with the given subcommands attached
    pub fn build(subcommands: impl IntoIterator<Item = Command>) -> Command {
        Self::command()
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommands(subcommands)
    }

    /// Global flags from parsed matches
    pub fn from_matches(matches: &ArgMatches) -> AppResult<Self> {
        Ok(Self::from_arg_matches(matches)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_is_global() {
        let cmd = Cli::build([Command::new("generate")]);
        let matches = cmd
            .try_get_matches_from(["abphelper", "generate", "--verbose"])
            .unwrap();
        assert!(Cli::from_matches(&matches).unwrap().verbose);
    }

    #[test]
    fn test_subcommand_required() {
        let cmd = Cli::build([Command::new("generate")]);
        assert!(cmd.try_get_matches_from(["abphelper"]).is_err());
    }
}
