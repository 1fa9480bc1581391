use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hk_health_mcp::McpServer;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub server: Arc<McpServer>,
}

/// Start the HTTP transport
pub async fn serve(addr: &str, server: McpServer) -> Result<()> {
    let app = create_router(AppState {
        server: Arc::new(server),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("MCP HTTP transport listening on http://{}/mcp", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mcp", post(mcp_handler))
        .route("/mcp/", post(mcp_handler))
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": hk_health_mcp::server::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "tools": state.server.registry().len(),
    }))
}

/// One JSON-RPC message per POST. The raw body is taken so malformed JSON
/// still gets a JSON-RPC parse error rather than an HTTP rejection.
async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    match state.server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
