//! Gamecast - main entry point.
//!
//! Prepares a deployment: connects to the database, applies migrations,
//! initializes blob storage and analytics delivery, then reports which
//! public builds are downloadable.

use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use gamecast_lib::config::Config;
use gamecast_lib::db::DbPool;
use gamecast_lib::models::Platform;
use gamecast_lib::services::{build_blob_store, build_notifier, catalog};

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

#[tokio::main]
async fn main() {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and the S3_* variables must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Gamecast");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = pool.ping().await {
        error!("Database is not reachable after migrations: {}", e);
        std::process::exit(1);
    }

    let storage = match build_blob_store(&config).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to initialize blob storage: {}", e);
            std::process::exit(1);
        }
    };

    let analytics = build_notifier(&config.analytics);
    if !analytics.is_enabled() {
        info!("Analytics disabled (GAMECAST_ANALYTICS_URL not set)");
    }

    let games = match pool.list_public_games().await {
        Ok(games) => games,
        Err(e) => {
            error!("Catalog check failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut downloadable = 0;
    for game in &games {
        for platform in Platform::ALL {
            match catalog::resolve_download(&pool, storage.as_ref(), game, platform).await {
                Ok(Some(_)) => downloadable += 1,
                Ok(None) => {}
                Err(e) => warn!(
                    "Cannot resolve {} build for '{}': {}",
                    platform.label(),
                    game.slug,
                    e
                ),
            }
        }
    }

    info!(
        "Catalog ready: {} public games, {} platform builds, download links under {}",
        games.len(),
        downloadable,
        config.public_url
    );

    analytics.shutdown().await;
}
