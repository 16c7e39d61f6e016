mod config;
mod forms;
mod http;
mod views;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use platform_obs::init_tracing;
use products_hr::EmployeeStore;
use tracing::{info, warn};

use crate::{config::AppConfig, http::AppState};

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee records server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Verify the database is reachable and exit.
    Check,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_tracing(config.obs.clone())?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Check => run_check(config).await,
    }
}

async fn open_store(config: &AppConfig) -> Result<EmployeeStore> {
    EmployeeStore::connect(&config.database)
        .await
        .context("failed to open database pool")
}

async fn run_server(cmd: ServeCommand, config: AppConfig) -> Result<()> {
    let store = open_store(&config).await?;
    if let Err(err) = platform_db::ping(store.pool()).await {
        warn!(error = %err, "database not reachable at startup; requests will fail until it is");
    }
    let state = AppState::new(store, config.title);
    http::serve(cmd.bind, state).await
}

async fn run_check(config: AppConfig) -> Result<()> {
    let store = open_store(&config).await?;
    platform_db::ping(store.pool())
        .await
        .context("database ping failed")?;
    let count = store
        .list_all()
        .await
        .context("employees table is not readable")?
        .len();
    info!(count, "database reachable; employees table readable");
    Ok(())
}
