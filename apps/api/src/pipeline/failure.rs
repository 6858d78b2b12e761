//! Maps stage failures onto user-facing categories and HTTP statuses.

use axum::http::StatusCode;

use crate::llm_client::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input rejected before any network call.
    Validation,
    Timeout,
    Network,
    /// Rate limit, quota, or provider overload.
    RateLimited,
    AuthFailed,
    /// The provider rejected the request as malformed.
    InvalidInput,
    Unexpected,
}

impl FailureKind {
    pub fn classify(err: &LlmError) -> Self {
        match err {
            LlmError::Timeout { .. } => FailureKind::Timeout,
            LlmError::Http(e) if e.is_timeout() => FailureKind::Timeout,
            LlmError::Http(_) => FailureKind::Network,
            LlmError::Api { status, message } => {
                let message = message.to_lowercase();
                match status {
                    429 | 529 => FailureKind::RateLimited,
                    _ if message.contains("rate limit") || message.contains("quota") => {
                        FailureKind::RateLimited
                    }
                    401 | 403 => FailureKind::AuthFailed,
                    400 | 404 | 422 => FailureKind::InvalidInput,
                    _ => FailureKind::Unexpected,
                }
            }
            LlmError::Parse(_) | LlmError::EmptyContent => FailureKind::Unexpected,
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            FailureKind::Validation | FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
            FailureKind::AuthFailed => StatusCode::UNAUTHORIZED,
            FailureKind::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
            FailureKind::Timeout | FailureKind::Network | FailureKind::Unexpected => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to end users. `service` is the stage name, e.g. "Translation".
    pub fn user_message(self, service: &str) -> String {
        match self {
            FailureKind::Timeout => {
                format!("{service} request timed out. Please try again with a shorter text.")
            }
            FailureKind::Network => {
                "Network error occurred. Please check your connection and try again.".to_string()
            }
            FailureKind::RateLimited => format!(
                "{service} service is temporarily unavailable due to high demand. Please try again later."
            ),
            FailureKind::AuthFailed => {
                format!("{service} service authentication failed. Please contact support.")
            }
            FailureKind::InvalidInput => {
                format!("Invalid input provided for {}.", service.to_lowercase())
            }
            FailureKind::Validation | FailureKind::Unexpected => {
                format!("{service} failed due to an unexpected error")
            }
        }
    }
}
