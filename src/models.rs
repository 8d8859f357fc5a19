use serde::{Deserialize, Serialize};
use serde_json::Value;

// Inbound request body. `message` stays a raw JSON value so the handler
// can tell "missing" from "wrong type" instead of bouncing both at the
// extractor.
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

// Inbound response body
#[derive(Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

// Chat-completion API request format
#[derive(Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionTurn>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct CompletionTurn {
    pub role: &'static str,
    pub content: String,
}

// Chat-completion API response format. Every level is optional so a
// well-formed body with a surprising shape parses instead of erroring.
#[derive(Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
pub struct CompletionChoice {
    pub message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    // First choice's message content, if the response carries one
    pub fn into_reply_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}
