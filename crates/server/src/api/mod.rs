use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use yokatlas_core::ApiSurface;
use yokatlas_mcp::McpServer;

pub const SESSION_HEADER: &str = "mcp-session-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: McpServer,
    pub search_surface: ApiSurface,
}

/// Start the HTTP server and run until Ctrl-C
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("MCP endpoint listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(mcp_message).get(mcp_stream_unsupported))
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// One JSON-RPC message per POST; notifications are acknowledged with 202
async fn mcp_message(State(state): State<Arc<AppState>>, body: String) -> Response {
    let is_initialize = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("method").and_then(|m| m.as_str()).map(|m| m == "initialize"))
        .unwrap_or(false);

    let Some(response) = state.mcp.handle_message(&body).await else {
        return StatusCode::ACCEPTED.into_response();
    };

    let start_session = is_initialize && response.error.is_none();
    let mut http_response = Json(response).into_response();

    if start_session {
        let session_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(session_id = %session_id, "MCP session started");
        if let Ok(value) = HeaderValue::from_str(&session_id) {
            http_response.headers_mut().insert(SESSION_HEADER, value);
        }
    }

    http_response
}

/// Server-initiated streams are not offered
async fn mcp_stream_unsupported() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
    )
        .into_response()
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "yokatlas-mcp-server",
        "version": env!("CARGO_PKG_VERSION"),
        "search_surface": state.search_surface,
    }))
}
