use crate::config::GatewayConfig;
use crate::rate_limit::CooldownLimiter;
use crate::upstream::UpstreamClient;

// App's shared state
pub struct AppState {
    pub upstream: UpstreamClient,
    pub limiter: CooldownLimiter,
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            upstream: UpstreamClient::new(config.upstream_url, config.api_key),
            limiter: CooldownLimiter::new(config.cooldown),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}
