mod app;
mod config;
mod routes;
mod state;

use atlas_shared::CountryCatalog;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let catalog = match config::countries_path() {
        Some(path) => match CountryCatalog::from_path(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "failed to load country dataset");
                return;
            }
        },
        None => {
            tracing::info!("ATLAS_COUNTRIES_PATH not set, using built-in countries");
            CountryCatalog::builtin()
        }
    };

    let view = config::view_config();
    tracing::info!(
        basemap = %view.basemap,
        lon = view.center[0],
        lat = view.center[1],
        zoom = view.zoom,
        "initializing map view"
    );

    let state = match AppState::build(catalog, &view) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "map initialization failed");
            return;
        }
    };

    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("Atlas server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
