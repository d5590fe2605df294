//! Nura check-up service.

use std::fs::File;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use database::{initialize_pool, run_migrations};
use nura::commands;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

/// Mental-health check-up service
#[derive(Parser)]
#[command(name = "nura")]
#[command(about = "Mental-health check-ups backed by an external prediction model")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (defaults to `BIND_ADDRESS`)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Run database migrations
    Migrate,

    /// Submit one check-up from a JSON answers file
    CheckUp {
        /// User the check-up belongs to
        #[arg(short, long)]
        user_id: String,

        /// Email that must match the user
        #[arg(short, long)]
        email: Option<String>,

        /// Path to a JSON object with the answers
        #[arg(short, long)]
        answers: PathBuf,
    },
}

/// `RUST_LOG` wins when it is set and valid, otherwise `--verbose` picks the level.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = log_filter(verbose, rust_log.as_deref());

    // Console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stdout);

    // File layer
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(cli.verbose, config.log_file.as_deref())?;

    initialize_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Serve { bind } => {
            commands::serve::run(&config, bind).await?;
        }
        Commands::Migrate => {
            run_migrations().await?;
            info!("Migrations completed successfully");
        }
        Commands::CheckUp {
            user_id,
            email,
            answers,
        } => {
            commands::check_up::run(&config, &user_id, email.as_deref(), &answers).await?;
        }
    }

    Ok(())
}
