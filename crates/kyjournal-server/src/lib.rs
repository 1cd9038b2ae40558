//! kyjournal-server: HTTP surface for the journal report pipeline.
//!
//! Provides:
//! - GET  /             — submission form
//! - POST /generate     — multipart form submission, HTML report page back
//! - POST /api/generate — JSON draft in, JSON report out
//! - POST /download     — report text back as a text/plain attachment
//! - GET  /health       — HTTP health check
//!
//! The only shared state is the generator handle; no business data lives in
//! the server between requests.

pub mod error;
pub mod handlers;
pub mod html;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use tracing::info;

use kyjournal_config::JournalConfig;
use kyjournal_gemini::GeminiApi;
use kyjournal_report::ReportGenerator;

/// Shared server state.
pub struct AppState {
    pub generator: ReportGenerator,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(handlers::generate_form))
        .route("/api/generate", post(handlers::generate_api))
        .route("/download", post(handlers::download))
        .route("/health", get(health_handler))
        // Uploads can carry short videos; the axum default limit is 2MB
        .layer(axum::extract::DefaultBodyLimit::max(32 * 1024 * 1024))
        .with_state(state)
}

/// Start the HTTP server.
///
/// Binds to the configured address and serves requests until shutdown. The
/// server starts even without an API key; generation requests then fail
/// with a configuration error until the key is supplied.
pub async fn start_server(
    config: JournalConfig,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let port = port_override.unwrap_or(config.server.port);
    let host = config.server.host.clone();

    if kyjournal_config::api_key_from_env().is_none() {
        tracing::warn!(
            "no model API key configured; generation will fail until GOOGLE_API_KEY is set"
        );
    }

    let client = Arc::new(GeminiApi::from_env(&config.model));
    let state = Arc::new(AppState {
        generator: ReportGenerator::new(client),
    });

    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("kyjournal listening on {addr}");
    info!("  Form:   http://{addr}/");
    info!("  API:    http://{addr}/api/generate");
    info!("  Health: http://{addr}/health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET / — the submission form.
async fn index_handler() -> impl IntoResponse {
    Html(html::form_page())
}

/// GET /health — simple HTTP health check.
async fn health_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
