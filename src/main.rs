//! CLI entry point for the declarative HTTP call runner.

use apirun::{loader, workflow};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Execute declarative API calls and workflows.
#[derive(Debug, Parser)]
#[command(name = "apirun", version, about)]
struct Cli {
    /// Call file to execute once, with no overrides or captures
    #[arg(short = 'f', long = "file", conflicts_with = "workflow")]
    file: Option<PathBuf>,

    /// Workflow file to execute step by step
    #[arg(short = 'w', long = "workflow")]
    workflow: Option<PathBuf>,

    /// Runner configuration file
    #[arg(short = 'c', long = "config", default_value = ".apirun.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = loader::load_config(&cli.config).map_err(|e| e.to_string())?;

    match (&cli.file, &cli.workflow) {
        (Some(file), None) => workflow::run_single(file, &config)
            .await
            .map_err(|e| e.to_string()),
        (None, Some(wf)) => workflow::run_workflow(wf, &config)
            .await
            .map_err(|e| e.to_string()),
        _ => Err("specify one of --file or --workflow".to_string()),
    }
}
