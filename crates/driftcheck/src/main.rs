mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "drift")]
#[command(
    about = "Declarative resource-lifecycle verification against a remote management API",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute scenario files against the remote API
    Run {
        /// Scenario files (JSON)
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Extra run parameters as name=value pairs
        #[arg(short, long)]
        param: Vec<String>,

        /// Run scenario files one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
    /// Parse and check scenario files without touching the network
    Validate {
        /// Scenario files (JSON)
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if matches!(cli.command, Commands::Version) {
        println!("driftcheck {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match cli.command {
        Commands::Run {
            scenarios,
            param,
            sequential,
        } => {
            commands::run::handle(scenarios, param, sequential).await?;
        }
        Commands::Validate { scenarios } => {
            commands::validate::handle(&scenarios)?;
        }
        Commands::Version => {
            unreachable!("Version is handled before dispatch");
        }
    }

    Ok(())
}
