use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, routing::post};
use serde_json::Value;

use lettrblack_gateway::app;
use lettrblack_gateway::config::GatewayConfig;
use lettrblack_gateway::state::AppState;

// Short window so tests can wait out the cooldown
pub const TEST_COOLDOWN: Duration = Duration::from_millis(300);

pub async fn spawn_gateway(upstream_url: String) -> String {
    spawn_gateway_with(upstream_url, false).await
}

pub async fn spawn_gateway_with(upstream_url: String, trust_forwarded_for: bool) -> String {
    let state = Arc::new(AppState::new(GatewayConfig {
        upstream_url,
        api_key: "test-key".to_string(),
        cooldown: TEST_COOLDOWN,
        trust_forwarded_for,
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind gateway listener");
    let addr = listener.local_addr().expect("Failed to read gateway addr");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app(state).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Gateway server failed");
    });

    format!("http://{}", addr)
}

// Stub chat-completion provider that answers every POST with a canned
// body and records the last request it saw.
pub async fn spawn_recording_upstream(canned: Value) -> (String, Arc<Mutex<Option<Value>>>) {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    let handler = move |Json(body): Json<Value>| {
        let canned = canned.clone();
        let recorded = recorded.clone();
        async move {
            *recorded.lock().expect("Recorder lock poisoned") = Some(body);
            Json(canned)
        }
    };
    let router = Router::new().route("/v1/chat/completions", post(handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().expect("Failed to read upstream addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub upstream failed");
    });

    (format!("http://{}/v1/chat/completions", addr), seen)
}

pub async fn spawn_upstream(canned: Value) -> String {
    let (url, _seen) = spawn_recording_upstream(canned).await;
    url
}

// An endpoint nothing is listening on
pub async fn dead_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Failed to read throwaway addr");
    drop(listener);

    format!("http://{}/v1/chat/completions", addr)
}
