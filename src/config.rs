use std::time::Duration;

use clap::Parser;

// Minimum interval between two accepted requests from the same client.
// Fixed at build time; tests construct the limiter with shorter windows
// through the library API.
pub const COOLDOWN_WINDOW: Duration = Duration::from_millis(5000);

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "lettrblack-gateway")]
#[command(about = "Rate-limited proxy for the LettrBlack AI study assistant")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Chat-completion endpoint to forward to
    #[arg(
        short,
        long,
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub upstream_url: String,

    // Trust the first X-Forwarded-For value as the client key.
    // Leave off unless a reverse proxy in front of the gateway is known
    // to sanitize that header; otherwise the cooldown is trivially
    // bypassable by spoofing it.
    #[arg(long, default_value_t = false)]
    pub trust_forwarded_for: bool,
}

// Resolved runtime configuration: CLI args plus environment secrets.
pub struct GatewayConfig {
    pub upstream_url: String,
    pub api_key: String,
    pub cooldown: Duration,
    pub trust_forwarded_for: bool,
}

impl GatewayConfig {
    pub fn from_args(args: &Args, api_key: String) -> Self {
        Self {
            upstream_url: args.upstream_url.clone(),
            api_key,
            cooldown: COOLDOWN_WINDOW,
            trust_forwarded_for: args.trust_forwarded_for,
        }
    }
}
