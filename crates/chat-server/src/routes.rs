//! HTTP routes: status, health and the chat endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use chat_core::resolver::Reply;
use chat_types::api::{
    iso_now, ChatRequest, ChatResponse, HealthResponse, StatusResponse, STATUS_MESSAGE, STATUS_OK,
};

use crate::error::{panic_response, ApiError};
use crate::state::AppState;

pub const STATUS_PATH: &str = "/";
pub const HEALTH_PATH: &str = "/health";
pub const CHAT_PATH: &str = "/chat";

/// Assemble the full application router.
pub fn build(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route(STATUS_PATH, get(status))
        .route(HEALTH_PATH, get(health))
        .route(CHAT_PATH, post(chat))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE.to_owned(),
        status: STATUS_OK.to_owned(),
        timestamp: iso_now(),
    })
}

async fn health(State(st): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_OK.to_owned(),
        uptime: st.uptime().as_secs_f64(),
    })
}

async fn chat(
    State(st): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(error = %rejection, "undecodable chat body");
        ApiError::EmptyMessage
    })?;

    let reply = st.resolver.resolve(&req.message).await?;
    match &reply {
        Reply::Provider(_) => debug!("reply generated by provider"),
        Reply::Fallback { category, cause, .. } => debug!(
            ?category,
            cause = cause.kind(),
            "reply generated by local fallback"
        ),
    }

    if !st.reply_delay.is_zero() {
        tokio::time::sleep(st.reply_delay).await;
    }

    Ok(Json(ChatResponse::now(reply.into_text())))
}
