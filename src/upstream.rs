use std::time::Duration;

use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::models::{CompletionRequest, CompletionResponse, CompletionTurn};

// Persona preamble sent as the system turn of every conversation
pub const SYSTEM_PREAMBLE: &str = "You are a helpful EdTech assistant for LettrBlack, \
an educational platform for students. Act as a smart study buddy: explain concepts \
clearly, suggest study strategies, and keep answers concise and encouraging.";

// Fixed generation parameters
const MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.7;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Client for the chat-completion provider. One reqwest client reused
// across requests; no retries, failures surface as-is.
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }

    // Forward one user message and normalize the provider's answer.
    // Transport failures, timeouts, error statuses, and unparseable bodies
    // come back as UpstreamUnavailable; a parseable body without a first
    // completion choice comes back as UpstreamEmpty.
    pub async fn complete(&self, message: &str) -> Result<String, GatewayError> {
        let body = CompletionRequest {
            model: MODEL.to_string(),
            messages: vec![
                CompletionTurn {
                    role: "system",
                    content: SYSTEM_PREAMBLE.to_string(),
                },
                CompletionTurn {
                    role: "user",
                    content: message.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "upstream call failed");
                GatewayError::UpstreamUnavailable
            })?;

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "upstream body was not parseable");
            GatewayError::UpstreamUnavailable
        })?;

        match parsed.into_reply_text() {
            Some(text) => {
                debug!("upstream returned a completion");
                Ok(text)
            }
            None => Err(GatewayError::UpstreamEmpty),
        }
    }
}
