use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

// One variant per terminal outcome of a chat request. No kind is retried;
// each maps straight to an HTTP status. Upstream details are logged where
// the failure is detected, never echoed to the caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GatewayError {
    #[error("bad request: {0}")]
    InvalidRequest(&'static str),

    #[error("too many requests")]
    RateLimited,

    #[error("upstream request failed")]
    UpstreamUnavailable,

    #[error("upstream response carried no completion")]
    UpstreamEmpty,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::UpstreamUnavailable | GatewayError::UpstreamEmpty => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = match &self {
            GatewayError::InvalidRequest(msg) => *msg,
            GatewayError::RateLimited => {
                "You're sending messages too quickly. Please wait a moment and try again."
            }
            GatewayError::UpstreamUnavailable | GatewayError::UpstreamEmpty => {
                warn!(kind = %self, "chat request failed upstream");
                "The assistant is unavailable right now. Please try again later."
            }
        };

        (self.status(), Json(ErrorBody { error: message })).into_response()
    }
}
