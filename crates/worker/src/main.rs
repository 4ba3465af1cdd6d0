use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowline_broker::ConnectionChannelProvider;
use flowline_engine::Engine;
use flowline_worker::config::WorkerConfig;
use flowline_worker::listener::CreateWorkflowListener;
use flowline_worker::runner::JobRunner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowline_worker=debug,flowline_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();
    tracing::info!("Loaded worker configuration");

    // --- Database ---
    let pool = flowline_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    flowline_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool created");

    // --- Broker ---
    let connection = flowline_broker::connect(&config.broker_url)
        .await
        .expect("Failed to connect to message broker");
    let provider = Arc::new(ConnectionChannelProvider::new(connection));
    tracing::info!("Broker connection established");

    // --- Execution engine ---
    let engine = Arc::new(Engine::new(pool.clone(), config.textgen.clone()));

    // --- Consumers ---
    let runner = Arc::new(JobRunner::new(pool, engine));
    let consumer_tag = runner
        .start(provider.clone())
        .await
        .expect("Failed to start job consumer");
    tracing::info!(%consumer_tag, "Job consumer started");

    let listener_tag = CreateWorkflowListener::start(provider)
        .await
        .expect("Failed to start create-workflow listener");
    tracing::info!(consumer_tag = %listener_tag, "Create-workflow listener started");

    tracing::info!("Worker running");
    shutdown_signal().await;
    tracing::info!("Worker shutting down");
}

/// Wait for a termination signal.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the worker stops
/// cleanly whether interrupted interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C)");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM");
        }
    }
}
