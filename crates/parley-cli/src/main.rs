//! Parley CLI — inspect and manage profile pictures and conversation icons.
//!
//! Storage is selected through the environment (STORAGE_BACKEND, S3_BUCKET,
//! LOCAL_STORAGE_PATH, ...); a `.env` file in the working directory is honored.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parley_core::{
    AppError, AssetContent, AssetFolder, Config, ErrorMetadata, LogLevel, StorageKey,
};
use parley_infra::{init_telemetry, shutdown_telemetry, LogFormat};
use parley_storage::{create_storage, locate, AssetService};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "parley", about = "Parley asset storage CLI")]
struct Cli {
    /// Log format: pretty or json (defaults to json in production)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storage path of a key's asset
    Locate {
        /// Folder: avatars or group-icons
        folder: AssetFolder,
        /// Owner key, e.g. a user id
        key: StorageKey,
    },
    /// Resolve a key's asset URL, falling back to the folder default
    Resolve {
        folder: AssetFolder,
        key: StorageKey,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a local file as a key's asset
    Upload {
        folder: AssetFolder,
        key: StorageKey,
        /// Path to the file to upload
        file: PathBuf,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn connect(config: &Config) -> Result<AssetService, AppError> {
    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;
    let store = create_storage(config).await?;
    Ok(AssetService::new(store))
}

async fn run(command: Commands, config: &Config) -> Result<(), AppError> {
    match command {
        Commands::Locate { folder, key } => {
            println!("{}", locate(folder, &key));
        }
        Commands::Resolve { folder, key, json } => {
            let service = connect(config).await?;
            let resolved = service.resolve(folder, &key).await?;
            if json {
                print_json(&resolved)?;
            } else {
                println!("{}", resolved.handle);
            }
        }
        Commands::Upload { folder, key, file } => {
            let service = connect(config).await?;
            let content = AssetContent::from_file(&file).await?;
            let size = content.len();
            let path = service.upload(folder, &key, content).await?;
            print_json(&serde_json::json!({
                "path": path.as_str(),
                "size_bytes": size,
                "backend": service.backend_type(),
            }))?;
        }
    }

    Ok(())
}

fn report(err: &AppError) {
    let details = err.detailed_message();
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, code = err.error_code(), "Command failed")
        }
        LogLevel::Warn => {
            tracing::warn!(error = %details, code = err.error_code(), "Command failed")
        }
        LogLevel::Error => {
            tracing::error!(error = %details, code = err.error_code(), "Command failed")
        }
    }

    eprintln!("error: {}", err.client_message());
    if let Some(action) = err.suggested_action() {
        eprintln!("hint: {}", action);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_telemetry(&config, cli.log_format) {
        eprintln!("warning: {:#}", e);
    }

    let outcome = run(cli.command, &config).await;
    shutdown_telemetry().await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            if err.is_recoverable() {
                ExitCode::from(75)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
