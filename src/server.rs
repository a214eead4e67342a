//! HTTP surface for [`AskHandler`].
//!
//! Routes accept every method so the handler, not the router, decides what a
//! wrong verb looks like.

use crate::handler::AskHandler;
use crate::models::{Config, IncomingRequest, OutgoingResponse};
use crate::{Error, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Path the function is served under on Netlify.
pub const FUNCTION_PATH: &str = "/.netlify/functions/ask-gemini";
pub const API_PATH: &str = "/api/ask";

pub fn router(handler: AskHandler) -> Router {
    Router::new()
        .route(FUNCTION_PATH, any(ask))
        .route(API_PATH, any(ask))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

async fn ask(State(handler): State<AskHandler>, method: Method, body: Bytes) -> Response {
    let body = match String::from_utf8(body.to_vec()) {
        Ok(text) => (!text.is_empty()).then_some(text),
        // Only a POST body is ever read; other verbs still get the 405.
        Err(e) if method == Method::POST => {
            return reply(Error::InvalidBody(e.to_string()).into());
        }
        Err(_) => None,
    };

    reply(
        handler
            .handle(IncomingRequest::new(method.as_str(), body))
            .await,
    )
}

fn reply(response: OutgoingResponse) -> Response {
    (response.status, Json(response.body)).into_response()
}

/// Bind `config.bind_addr` and serve until the process is stopped.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr;
    let model = config.gemini_model.clone();
    let has_key = config.api_key().is_some();
    let handler = AskHandler::from_config(config);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Generic(format!("Failed to bind {}: {}", addr, e)))?;

    info!(%addr, model = %model, "Listening on {}{}", addr, FUNCTION_PATH);
    if !has_key {
        warn!("GEMINI_API_KEY is not set; requests will fail until it is configured");
    }

    axum::serve(listener, router(handler))
        .await
        .map_err(|e| Error::Generic(format!("Server error: {}", e)))
}
