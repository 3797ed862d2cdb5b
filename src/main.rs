use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use delivery_dispatch::api;
use delivery_dispatch::config::Config;
use delivery_dispatch::error::AppError;
use delivery_dispatch::seed;
use delivery_dispatch::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let shared_state = Arc::new(AppState::from_config(&config)?);

    if config.seed_demo_data {
        seed::load_demo_fixture(&shared_state.store)
            .map_err(|err| AppError::Internal(format!("failed to seed demo data: {err}")))?;
        let counts = shared_state.store.counts();
        tracing::info!(
            cities = counts.cities,
            drivers = counts.drivers,
            customers = counts.customers,
            restaurants = counts.restaurants,
            "demo data loaded"
        );
    }

    let app = api::rest::router(shared_state.clone());

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        conflict_window_minutes = config.conflict_window_minutes,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
