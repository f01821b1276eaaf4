use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_api::config::ServerConfig;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_api::{background, ws};
use marquee_events::ContactNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "marquee_api=debug,marquee_site=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        admin_emails = config.admin_emails.len(),
        router_mode = ?config.router_mode,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = marquee_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    marquee_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    marquee_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Contact notifications ---
    let notifier = ContactNotifier::from_env().context("Invalid email configuration")?;
    tracing::info!(channel = notifier.channel(), "Contact notifier configured");

    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    // --- App state ---
    let state = AppState::new(pool.clone(), config, notifier);
    let content = Arc::clone(&state.content);
    let realtime = Arc::clone(&state.realtime);

    // --- Background tasks ---
    let cancel = CancellationToken::new();

    let listener_handle = tokio::spawn(background::change_listener::run(
        pool.clone(),
        Arc::clone(&state.change_bus),
        cancel.clone(),
    ));
    let relay_handle = tokio::spawn(ws::relay::run(
        Arc::clone(&realtime),
        state.change_bus.subscribe(),
        cancel.clone(),
    ));
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&realtime), cancel.clone());
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(pool, cancel.clone()));
    tracing::info!("Background tasks started (change listener, relay, heartbeat, session cleanup)");

    // Writes that landed before the listener subscribed are picked up here.
    state.content.refresh();

    // --- Router ---
    let app = build_app_router(state)?;

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    for (name, handle) in [
        ("change listener", listener_handle),
        ("realtime relay", relay_handle),
        ("heartbeat", heartbeat_handle),
        ("session cleanup", cleanup_handle),
    ] {
        if tokio::time::timeout(shutdown_timeout, handle).await.is_err() {
            tracing::warn!(task = name, "Background task did not stop in time");
        }
    }

    let ws_count = realtime.connection_count().await;
    tracing::info!(ws_count, "Closing remaining realtime connections");
    realtime.shutdown_all().await;

    // Open connections may still hold the state briefly; the context also
    // stops when its last handle drops.
    match Arc::try_unwrap(content) {
        Ok(content) => content.unmount().await,
        Err(_) => tracing::debug!("Hydration context still shared, stopping on drop"),
    }
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
