//! quizscore CLI: serve the API and manage quiz definitions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizscore", version, about = "Quiz answer-evaluation service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind, overriding the config
        #[arg(short, long, env = "QUIZSCORE_ADDRESS")]
        address: Option<String>,
    },

    /// Import quiz definition files into the configured store
    Import {
        /// Path to a quiz .toml file or directory
        #[arg(long)]
        file: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz definition files
    Validate {
        /// Path to a quiz .toml file or directory
        #[arg(long)]
        file: PathBuf,
    },

    /// List stored quizzes with their question counts
    List {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, address } => commands::serve::execute(config, address).await,
        Commands::Import { file, config } => commands::import::execute(file, config).await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::List { config } => commands::list::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
