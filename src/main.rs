use anyhow::Context;

use denguemaps_report::app::{router, AppState};
use denguemaps_report::config;
use denguemaps_report::database::DatabaseManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();
    denguemaps_report::init_tracing();

    let config = config::config();
    tracing::info!("Starting DengueMaps report service in {:?} mode", config.environment);

    let database = DatabaseManager::connect_lazy(&config.database).context("database configuration")?;
    if config.database.run_migrations {
        database.migrate().await.context("applying migrations")?;
    }

    let state = AppState::postgres(database.clone(), config).context("application state")?;
    let app = router(state, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("DengueMaps report service listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
