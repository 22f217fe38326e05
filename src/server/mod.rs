pub mod handlers;
pub mod types;

pub use handlers::AppState;

use crate::{
    Result,
    config::Config,
    recognition::{Recognizer, TesseractRecognizer},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/recognize", post(handlers::recognize))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let recognizer: Arc<dyn Recognizer> = Arc::new(TesseractRecognizer::new(config.ocr.clone()));

    // A missing engine is an environment problem: serve anyway and let
    // requests report it.
    let probe = recognizer.clone();
    match tokio::task::spawn_blocking(move || probe.version()).await {
        Ok(Ok(version)) => info!("Using {} {}", recognizer.name(), version),
        Ok(Err(e)) => warn!("{} is not available, requests will fail: {}", recognizer.name(), e),
        Err(e) => warn!("Engine probe did not complete: {}", e),
    }

    let app_state = AppState::new(recognizer, config.ocr.allowed_extensions.clone());
    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
