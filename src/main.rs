use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flowrelay")]
#[command(about = "Flow-log to message-broker relay", long_about = None)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process flow-log blobs and forward their records to the broker
    Ingest {
        /// Blob files to process, in order
        inputs: Vec<PathBuf>,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Init {
        #[arg(long)]
        stdout: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowrelay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config_path = flowrelay::config::resolve_config_path(cli.config.as_deref());

    match cli.command {
        Commands::Ingest { inputs } => {
            flowrelay::cli::run::run(config_path, inputs).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { stdout } => {
                flowrelay::cli::config::init(stdout)?;
            }
        },
    }

    Ok(())
}
