use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{app, AppState};
use wayfare_core::{FlightStore, ReservationStore};
use wayfare_store::app_config::Config;
use wayfare_store::{
    DbClient, InMemoryFlightStore, InMemoryReservationStore, PostgresFlightStore,
    PostgresReservationStore, RedisClient, SchipholClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,wayfare_core=debug,wayfare_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(?config, "Starting Wayfare API on port {}", config.server.port);

    let flights: Arc<dyn FlightStore>;
    let reservations: Arc<dyn ReservationStore>;
    if config.has_database() {
        let db = DbClient::new(config.database.url.expose(), config.database.max_connections)
            .await
            .context("Failed to connect to database")?;
        db.migrate().await.context("Failed to run migrations")?;
        flights = Arc::new(PostgresFlightStore::new(db.pool.clone()));
        reservations = Arc::new(PostgresReservationStore::new(db.pool.clone()));
    } else {
        tracing::warn!("No database configured, data will not survive a restart");
        flights = Arc::new(InMemoryFlightStore::new());
        reservations = Arc::new(InMemoryReservationStore::new());
    }

    let source = SchipholClient::from_config(&config.provider).context("Failed to build provider client")?;

    let mut app_state = AppState::new(Arc::new(source), flights, reservations);

    if let Some(redis) = &config.redis {
        let redis_client = RedisClient::new(&redis.url).context("Invalid Redis URL")?;
        app_state = app_state.with_rate_limit(Arc::new(redis_client), config.rate_limit.clone());
        tracing::info!("Rate limiting enabled");
    }

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
