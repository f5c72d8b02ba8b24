use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use stagecraft::abstractions::ClientRegistry;
use stagecraft::wizard::{NextStageSpec, WizardEngine, WizardParser};

/// Run declarative interactive wizards from JSON specifications
#[derive(Parser)]
#[command(name = "stagecraft")]
#[command(about = "Declarative, data-driven interactive wizard engine", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a wizard specification
    Run {
        /// Path to the wizard spec JSON file
        spec: PathBuf,
    },
    /// Parse and validate a wizard specification without executing it
    Check {
        /// Path to the wizard spec JSON file
        spec: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("stagecraft started with verbosity level: {}", cli.verbose);

    let result = match cli.command {
        Commands::Run { spec } => run_wizard(spec).await,
        Commands::Check { spec } => check_wizard(spec),
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_wizard(spec_path: PathBuf) -> anyhow::Result<()> {
    let spec = WizardParser::parse_file(&spec_path)?;
    let clients = Arc::new(ClientRegistry::new());
    let mut engine = WizardEngine::new(spec, clients)?;
    engine.execute().await
}

fn check_wizard(spec_path: PathBuf) -> anyhow::Result<()> {
    let spec = WizardParser::parse_file(&spec_path)?;

    println!("Wizard spec is valid");
    println!("Start stage: {}", spec.start_stage.as_deref().unwrap_or(""));
    println!("Stages:");
    for stage in &spec.stages {
        let next = match &stage.next_stage {
            Some(NextStageSpec::Name { name }) => format!(" -> {name}"),
            Some(NextStageSpec::Variable { name }) => format!(" -> ${name}"),
            None => " (terminal)".to_string(),
        };
        println!("  {}{}", stage.name, next);
    }
    Ok(())
}
