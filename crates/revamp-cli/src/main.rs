use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analyze;

#[derive(Debug, Parser)]
#[command(name = "revamp-cli")]
#[command(about = "Analyze public profiles for brand colors and business signals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one or more profiles and emit the results as JSON.
    Analyze {
        /// Profile identifiers, with or without a leading `@`.
        #[arg(required = true)]
        usernames: Vec<String>,
        /// Write JSON to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Emit compact single-line JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Print the effective configuration (secrets redacted).
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = revamp_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            usernames,
            output,
            compact,
        } => {
            let options = analyze::OutputOptions { output, compact };
            analyze::run_analyze(&config, &usernames, &options).await?;
        }
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}
