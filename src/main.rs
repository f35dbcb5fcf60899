//! Server entry point: file-backed storage behind the REST API.

use anyhow::Context;
use clap::Parser;
use corkboard::api::{self, AppState};
use corkboard::auth::{AuthConfig, User};
use corkboard::storage::file_storage::FileStorage;
use corkboard::storage::Storage;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "corkboard")]
#[command(about = "Kanban board server")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Directory holding the JSON entity store
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// JWT signing secret; falls back to CORKBOARD_JWT_SECRET
    #[arg(long)]
    jwt_secret: Option<String>,

    /// Create or update the `admin` user with this password
    #[arg(long)]
    admin_password: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())),
        )
        .init();

    let jwt_secret = args
        .jwt_secret
        .or_else(|| std::env::var("CORKBOARD_JWT_SECRET").ok())
        .context("JWT secret required: pass --jwt-secret or set CORKBOARD_JWT_SECRET")?;

    let storage = Arc::new(FileStorage::new(&args.data_dir));
    storage
        .initialize()
        .await
        .context("failed to initialize storage")?;
    tracing::info!(data_dir = %args.data_dir.display(), "Storage initialized");

    if let Some(password) = args.admin_password {
        seed_admin(storage.as_ref(), &password).await?;
    }

    let state = AppState::new(storage, AuthConfig::new(jwt_secret));
    let app = api::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Corkboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Corkboard stopped");
    Ok(())
}

/// Creates the `admin` user, or resets its password if it already exists
async fn seed_admin(storage: &dyn Storage, password: &str) -> anyhow::Result<()> {
    let user = match storage.find_user("admin").await? {
        Some(mut existing) => {
            existing.password_hash = corkboard::auth::hash_password(password);
            existing
        }
        None => User::new("admin@localhost".to_string(), "admin".to_string(), password),
    };
    storage.save_user(&user).await?;
    tracing::info!(username = %user.username, "Admin user seeded");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
        Err(err) => tracing::error!(error = %err, "Signal handling failed"),
    }
}
