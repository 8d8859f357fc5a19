use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lettrblack_gateway::app;
use lettrblack_gateway::config::{Args, GatewayConfig};
use lettrblack_gateway::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lettrblack_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let api_key =
        std::env::var("OPENAI_API_KEY").expect("Env variable `OPENAI_API_KEY` should be set");

    let state = Arc::new(AppState::new(GatewayConfig::from_args(&args, api_key)));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Forwarding to {}", args.upstream_url);
    info!("Cooldown: {:?} per client", state.limiter.window());

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
