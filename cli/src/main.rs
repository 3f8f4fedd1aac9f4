//! Blockwright command line
//!
//! `blockwright run "<request>"` turns a natural-language UI request into an
//! HTML block, printing progress events as JSON lines on stderr and the
//! result on stdout.

mod commands;
mod config;
mod constants;
mod error;
mod event_adapter;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use config::{default_data_dir, AppConfig};
use error::CliError;

#[derive(Parser)]
#[command(name = "blockwright")]
#[command(version)]
#[command(about = "Generate reusable UI blocks from natural-language requests", long_about = None)]
struct Cli {
    /// Data directory holding config.json and the template store
    #[arg(long, global = true, env = constants::env::DATA_DIR)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a request through the pipeline
    Run {
        /// The request, e.g. "create a contact form with name and email"
        command: String,
        /// Print only the generated block instead of the full result
        #[arg(long)]
        block_only: bool,
    },
    /// Replace stored templates with the starter set
    Seed,
    /// List stored templates and their saved variants
    List,
    /// Save a user-edited copy of a template's markup
    Save {
        /// Id of the template the markup was generated from
        #[arg(long)]
        parent: String,
        /// Who made the edit
        #[arg(long)]
        user: String,
        /// File holding the edited HTML; read from stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List the completion backends this build knows about
    Backends,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr alongside the event stream
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let mut config = AppConfig::load(&data_dir).await?;
    config.apply_env_overrides();
    log::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::Run {
            command,
            block_only,
        } => commands::run(&config, &data_dir, &command, block_only).await,
        Commands::Seed => commands::seed(&config, &data_dir).await,
        Commands::List => commands::list(&config, &data_dir).await,
        Commands::Save { parent, user, file } => {
            commands::save(&config, &data_dir, &parent, &user, file.as_deref()).await
        }
        Commands::Backends => commands::backends(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from(["blockwright", "run", "a login form", "--block-only"]);
        match cli.command {
            Commands::Run {
                command,
                block_only,
            } => {
                assert_eq!(command, "a login form");
                assert!(block_only);
            }
            _ => panic!("Expected run"),
        }
    }

    #[test]
    fn test_parse_save() {
        let cli = Cli::parse_from([
            "blockwright",
            "save",
            "--parent",
            "t-1",
            "--user",
            "demo_user",
            "--file",
            "edited.html",
        ]);
        match cli.command {
            Commands::Save { parent, user, file } => {
                assert_eq!(parent, "t-1");
                assert_eq!(user, "demo_user");
                assert_eq!(file, Some(PathBuf::from("edited.html")));
            }
            _ => panic!("Expected save"),
        }
    }
}
