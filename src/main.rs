//! ABP Helper - Application entry point
//!
//! CLI-based entry point that dispatches to the generator commands.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abp_helper::{
    cli::Cli,
    commands::{self, CommandRunner},
    config::{Config, DEFAULT_LOG_FILTER},
    generator::TemplateStore,
    workflow::DefaultPipelineBuilderFactory,
};

#[tokio::main]
async fn main() {
    // Register commands; a malformed option schema aborts here
    let generate = match commands::generate::command() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Command registration failed: {}", e);
            std::process::exit(1);
        }
    };

    // Parse CLI arguments
    let matches = Cli::build([generate]).get_matches();
    let verbose = Cli::from_matches(&matches).map(|cli| cli.verbose).unwrap_or(false);

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(verbose);

    // Load configuration
    let config = Config::from_env();
    tracing::debug!("Configuration loaded");

    let templates = match &config.template_dir {
        Some(dir) if dir.is_dir() => TemplateStore::with_overrides(dir),
        _ => TemplateStore::embedded(),
    };
    let factory = Arc::new(DefaultPipelineBuilderFactory::new(Arc::new(templates)));
    let runner = CommandRunner::new(factory, config);

    // Execute command
    let result = match matches.subcommand() {
        Some((commands::generate::NAME, sub)) => commands::generate::execute(sub, &runner)
            .await
            .map(|_| ()),
        _ => Ok(()),
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
