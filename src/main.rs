//! Aroma explorer binary: HTTP server and CSV bulk importer

use anyhow::Context;
use aroma_explorer::api::rest::auth::AuthState;
use aroma_explorer::api::rest::routes::build_router;
use aroma_explorer::config::Config;
use aroma_explorer::domain::Service;
use aroma_explorer::import;
use aroma_explorer::infra::storage::migrations::Migrator;
use aroma_explorer::infra::storage::repositories::{
    SeaOrmGroupRepository, SeaOrmIngredientRepository, SeaOrmMatchRepository,
    SeaOrmMoleculeRepository, SeaOrmTemperatureRepository,
};
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aroma-explorer", about = "Flavor/aroma reference dataset service")]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Bulk-import master data from a wide CSV file
    Import {
        /// CSV file, one ingredient per row
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let db = Database::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.database_url))?;
    Migrator::up(&db, None).await.context("migration failed")?;

    let service = Arc::new(build_service(Arc::new(db)));

    match cli.command {
        Command::Serve => serve(config, service).await,
        Command::Import { file } => import::run(&service, &file).await,
    }
}

fn build_service(db: Arc<DatabaseConnection>) -> Service {
    Service::new(
        Arc::new(SeaOrmIngredientRepository::new(db.clone())),
        Arc::new(SeaOrmGroupRepository::new(db.clone())),
        Arc::new(SeaOrmMoleculeRepository::new(db.clone())),
        Arc::new(SeaOrmTemperatureRepository::new(db.clone())),
        Arc::new(SeaOrmMatchRepository::new(db)),
    )
}

async fn serve(config: Config, service: Arc<Service>) -> anyhow::Result<()> {
    let auth = Arc::new(AuthState::new(config.admin_tokens.clone()));
    if config.admin_tokens.is_empty() {
        tracing::warn!("no admin tokens configured, write operations will be rejected");
    }

    let router = build_router(service, auth);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to install sigterm handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received sigterm, shutting down"),
    }
}
