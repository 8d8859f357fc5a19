use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    extract::rejection::{ExtensionRejection, JsonRejection},
    http::HeaderMap,
};
use serde_json::Value;

use crate::error::GatewayError;
use crate::metrics::{
    COOLDOWN_ENTRIES, RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL, UPSTREAM_FAILURES,
};
use crate::models::{ChatReply, ChatRequest};
use crate::state::AppState;

// Best-effort client key for throttling. The forwarded-for header is only
// honored when the deployment opted in (trusted reverse proxy); otherwise
// the peer address wins, and "unknown" is the sentinel of last resort.
fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
                return first.to_string();
            }
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn message_text(request: ChatRequest) -> Result<String, GatewayError> {
    match request.message {
        None => Err(GatewayError::InvalidRequest("message is required")),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(GatewayError::InvalidRequest("message must be a string")),
    }
}

// POST /api/ai-chat
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    peer: Result<ConnectInfo<SocketAddr>, ExtensionRejection>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, GatewayError> {
    REQUEST_TOTAL.inc();

    let key = client_key(
        &headers,
        peer.ok().map(|ConnectInfo(addr)| addr),
        state.trust_forwarded_for,
    );

    // A throttled caller is turned away before its payload is inspected
    if state.limiter.is_limited(&key) {
        RATE_LIMITED_TOTAL.inc();
        return Err(GatewayError::RateLimited);
    }

    let Json(request) = payload
        .map_err(|_| GatewayError::InvalidRequest("request body must be a JSON object"))?;
    let message = message_text(request)?;

    // The slot is committed only for valid requests; the original service
    // recorded it before validating, so malformed input burned the
    // client's slot. try_acquire re-checks under the entry lock, closing
    // the race between the check above and this commit. A request that
    // fails upstream still keeps its slot consumed.
    if !state.limiter.try_acquire(&key) {
        RATE_LIMITED_TOTAL.inc();
        return Err(GatewayError::RateLimited);
    }
    COOLDOWN_ENTRIES.set(state.limiter.len() as f64);

    let start = Instant::now();
    let result = state.upstream.complete(&message).await;
    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());

    match result {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(e) => {
            UPSTREAM_FAILURES.inc();
            Err(e)
        }
    }
}
