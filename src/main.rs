//! Raffle bot binary entrypoint wiring the webhook server, dispatcher and participant store.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use raffle_bot::{
    config::AppConfig,
    dao::participant_store::ParticipantStore,
    routes,
    services::{authorization::SingleAdmin, update_dispatcher},
    state::{AppState, SharedState},
    telegram::HttpTelegramClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;
    let store = connect_store(&config).await?;
    let telegram = HttpTelegramClient::new(&config.telegram_api_url, &config.telegram_token)
        .context("building Telegram client")?;
    let admin_policy = SingleAdmin::new(config.admin_id);
    let port = config.port;

    let (app_state, updates) =
        AppState::new(config, store, Arc::new(telegram), Arc::new(admin_policy));

    tokio::spawn(update_dispatcher::run(app_state.clone(), updates));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

#[cfg(feature = "postgres-store")]
async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ParticipantStore>> {
    use raffle_bot::dao::participant_store::postgres::{PostgresConfig, PostgresParticipantStore};

    let store = PostgresParticipantStore::connect(PostgresConfig::from_url(&config.database_url))
        .await
        .context("connecting to PostgreSQL")?;
    info!("connected to PostgreSQL");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres-store"))]
async fn connect_store(_config: &AppConfig) -> anyhow::Result<Arc<dyn ParticipantStore>> {
    use raffle_bot::dao::participant_store::memory::MemoryParticipantStore;

    warn!("built without `postgres-store`; participants are kept in memory only");
    Ok(Arc::new(MemoryParticipantStore::new()))
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "cannot install SIGTERM handler; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
