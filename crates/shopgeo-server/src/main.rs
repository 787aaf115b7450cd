mod api;
mod middleware;

use std::sync::Arc;

use shopgeo_ingest::{load_engine, DataFiles};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, SearchSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shopgeo_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        data_path = %config.data_path.display(),
        precision = config.geohash_precision,
        "loading search index"
    );
    let files = DataFiles::in_dir(&config.data_path);
    let precision = config.geohash_precision;
    let engine = tokio::task::spawn_blocking(move || load_engine(&files, precision)).await??;

    let state = AppState {
        engine: Arc::new(engine),
        search: SearchSettings::from_config(&config),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
