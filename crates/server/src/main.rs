use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launchpad_core::{
    load_config, validate_config, BootstrapOutcome, CatalogSynchronizer, LaunchProvider,
    LaunchStore, PlanetStore, SpaceXClient, SqliteLaunchStore, SqlitePlanetStore,
};
use launchpad_server::{create_router, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("LAUNCHPAD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!("Launch provider: {}", config.provider.base_url);

    // Create SQLite launch store
    let launch_store: Arc<dyn LaunchStore> = Arc::new(
        SqliteLaunchStore::new(&config.database.path).context("Failed to create launch store")?,
    );
    info!("Launch store initialized");

    // Create SQLite planet store and seed it
    let planet_store: Arc<dyn PlanetStore> = Arc::new(
        SqlitePlanetStore::new(&config.database.path).context("Failed to create planet store")?,
    );
    let mut seeded = 0;
    for seed in &config.planets {
        if planet_store
            .upsert(&seed.kepler_name)
            .context("Failed to seed planets")?
        {
            seeded += 1;
        }
    }
    info!(
        "Planet store initialized ({} configured, {} new)",
        config.planets.len(),
        seeded
    );

    // Bootstrap the catalog before accepting requests
    let provider: Arc<dyn LaunchProvider> = Arc::new(
        SpaceXClient::new(&config.provider).context("Failed to create launch provider client")?,
    );
    let synchronizer = CatalogSynchronizer::new(Arc::clone(&launch_store), provider);
    match synchronizer
        .ensure_bootstrapped()
        .await
        .context("Failed to bootstrap launch catalog")?
    {
        BootstrapOutcome::AlreadyLoaded => info!("Launch catalog already bootstrapped"),
        BootstrapOutcome::Populated { launches } => {
            info!("Launch catalog bootstrapped with {} launches", launches)
        }
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), launch_store, planet_store));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
