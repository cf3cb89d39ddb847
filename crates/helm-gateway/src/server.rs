//! Ingestion server: `POST /event` and `POST /interaction`, wired to one
//! shared dispatch engine.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use helm_dispatch::{DispatchEngine, InitialResponse, SurfaceKind};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

use crate::envelopes::{
    EventEnvelope, InteractionEnvelope, INTERACTION_APPLICATION_COMMAND,
    INTERACTION_AUTOCOMPLETE, INTERACTION_MESSAGE_COMPONENT, INTERACTION_MODAL_SUBMIT,
};
use crate::interaction_response::{
    autocomplete_response, deferred_message_response, deferred_update_response, message_response,
};

pub const EVENT_ENDPOINT: &str = "/event";
pub const INTERACTION_ENDPOINT: &str = "/interaction";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: String,
}

struct GatewayState {
    engine: Arc<DispatchEngine>,
}

/// Binds the listener and serves until ctrl-c.
pub async fn run_gateway_server(config: GatewayConfig, engine: Arc<DispatchEngine>) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind gateway server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound gateway server address")?;
    info!(addr = %local_addr, "gateway server listening");

    let app = build_gateway_router(engine);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("gateway server exited unexpectedly")
}

pub fn build_gateway_router(engine: Arc<DispatchEngine>) -> Router {
    Router::new()
        .route(EVENT_ENDPOINT, post(handle_event))
        .route(INTERACTION_ENDPOINT, post(handle_interaction))
        .with_state(Arc::new(GatewayState { engine }))
}

/// Event ingestion acknowledges as soon as the envelope decodes; the command
/// pipeline runs on its own task.
async fn handle_event(State(state): State<Arc<GatewayState>>, body: String) -> Response {
    let envelope = match serde_json::from_str::<EventEnvelope>(&body) {
        Ok(envelope) => envelope,
        Err(error) => return malformed(error.to_string()),
    };

    let engine = state.engine.clone();
    tokio::spawn(async move {
        engine
            .handle_free_text_message(
                SurfaceKind::from_whitelabel_flag(envelope.is_whitelabel),
                envelope.bot_id,
                envelope.event,
            )
            .await;
    });

    (StatusCode::OK, Json(json!({"success": true}))).into_response()
}

/// Interaction ingestion blocks on the broker's synchronous reply decision;
/// the body returned here is the platform-visible initial response.
async fn handle_interaction(State(state): State<Arc<GatewayState>>, body: String) -> Response {
    let envelope = match serde_json::from_str::<InteractionEnvelope>(&body) {
        Ok(envelope) => envelope,
        Err(error) => return malformed(error.to_string()),
    };
    let surface = SurfaceKind::from_whitelabel_flag(envelope.is_whitelabel);

    match envelope.interaction_type {
        INTERACTION_APPLICATION_COMMAND => {
            let invocation = match serde_json::from_value(envelope.event) {
                Ok(invocation) => invocation,
                Err(error) => return malformed(error.to_string()),
            };
            match state.engine.handle_application_command(surface, invocation).await {
                Some((InitialResponse::Immediate(reply), _)) => {
                    (StatusCode::OK, Json(message_response(&reply))).into_response()
                }
                Some((InitialResponse::Deferred { ephemeral }, _)) => {
                    (StatusCode::OK, Json(deferred_message_response(ephemeral))).into_response()
                }
                None => no_response(),
            }
        }
        INTERACTION_MESSAGE_COMPONENT => {
            let invocation = match serde_json::from_value(envelope.event) {
                Ok(invocation) => invocation,
                Err(error) => return malformed(error.to_string()),
            };
            match state.engine.handle_message_component(invocation).await {
                Some((InitialResponse::Immediate(reply), _)) => {
                    (StatusCode::OK, Json(message_response(&reply))).into_response()
                }
                Some((InitialResponse::Deferred { .. }, _)) => {
                    (StatusCode::OK, Json(deferred_update_response())).into_response()
                }
                None => no_response(),
            }
        }
        INTERACTION_AUTOCOMPLETE => {
            let invocation = match serde_json::from_value(envelope.event) {
                Ok(invocation) => invocation,
                Err(error) => return malformed(error.to_string()),
            };
            match state.engine.handle_autocomplete(&invocation).await {
                Some(choices) => {
                    (StatusCode::OK, Json(autocomplete_response(&choices))).into_response()
                }
                None => no_response(),
            }
        }
        INTERACTION_MODAL_SUBMIT => {
            let invocation = match serde_json::from_value(envelope.event) {
                Ok(invocation) => invocation,
                Err(error) => return malformed(error.to_string()),
            };
            match state.engine.handle_modal_submit(invocation).await {
                Some(reply) => {
                    (StatusCode::OK, Json(message_response(&reply))).into_response()
                }
                None => no_response(),
            }
        }
        other => malformed(format!("unsupported interaction type {other}")),
    }
}

/// A well-formed envelope always answers 200; an invocation that produces
/// no platform response carries a null body.
fn no_response() -> Response {
    (StatusCode::OK, Json(serde_json::Value::Null)).into_response()
}

fn malformed(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": error})),
    )
        .into_response()
}
