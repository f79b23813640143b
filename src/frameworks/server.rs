// Framework bootstrap for the matchmaking service.

use crate::frameworks::config::{self, ServerConfig};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock, UuidGenerator};
use crate::use_cases::{Matchmaker, RequestVerifier, sweep_task};
use std::io::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serve the matchmaking API on an already-bound listener until the server stops.
pub async fn run(listener: tokio::net::TcpListener, config: ServerConfig) -> Result<()> {
    let address = listener.local_addr()?;

    let verifier = RequestVerifier::new(&config.secret, config.request_ttl_seconds)
        .map_err(|e| std::io::Error::other(format!("invalid shared secret: {e}")))?;
    let matchmaker = Arc::new(Mutex::new(Matchmaker::new(
        config.matchmaker_settings(),
        Arc::new(UuidGenerator),
    )));
    let state = Arc::new(AppState {
        matchmaker: matchmaker.clone(),
        verifier,
        clock: Arc::new(SystemClock),
    });

    // The sweeper shares the same lock as the request handlers.
    let shutdown = Arc::new(Notify::new());
    let sweeper = tokio::spawn(sweep_task(
        matchmaker,
        state.clock.clone(),
        config.sweep_interval,
        shutdown.clone(),
    ));

    let app = routes::app(state);

    tracing::info!(
        %address,
        match_size = config.match_size,
        ticket_ttl_seconds = config.ticket_ttl_seconds,
        request_ttl_seconds = config.request_ttl_seconds,
        sweep_interval_ms = config.sweep_interval.as_millis(),
        "listening"
    );

    // Serve app and report errors rather than panicking.
    let served = axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    });

    shutdown.notify_one();
    let _ = sweeper.await;

    served
}

pub async fn run_with_config() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = config::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;
    let address = config.addr;

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}
