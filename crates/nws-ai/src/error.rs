//! AI service error types.
//!
//! Every failure a provider can produce maps onto one of these variants, and
//! every variant has a user-facing message: callers surface AI failures as
//! notifications, never as crashes, and the document is only touched after a
//! successful response.

use thiserror::Error;

use crate::capability::Capability;
use crate::settings::ProviderKind;

/// Errors from the AI completion service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    /// The service is not usable with the current settings.
    #[error("AI configuration error: {reason}")]
    Configuration { reason: String },

    /// The HTTP request itself failed (DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The provider rejected the request with a rate limit.
    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited {
        /// Seconds to wait before the next attempt.
        retry_after: u64,
    },

    /// The provider answered with a non-success status.
    #[error("provider error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The provider answered, but the payload did not have the expected
    /// shape (missing reply text, malformed JSON in an extraction).
    #[error("invalid provider response: {reason}")]
    InvalidResponse { reason: String },

    /// The selected provider does not implement this capability.
    #[error("{provider} does not support {capability}")]
    Unsupported {
        provider: ProviderKind,
        capability: Capability,
    },
}

impl AiError {
    /// A message suitable for a dismissible notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { reason } => {
                format!("AI assistance is not configured: {reason}")
            }
            Self::Network(_) => {
                "Could not reach the AI provider. Check your connection and try again."
                    .to_string()
            }
            Self::RateLimited { retry_after } => {
                format!(
                    "The AI provider is rate limiting requests. Try again in {retry_after} seconds."
                )
            }
            Self::Api { status, .. } => {
                format!("The AI provider returned an error (HTTP {status}).")
            }
            Self::InvalidResponse { .. } => {
                "The AI provider returned an unexpected response. Try again.".to_string()
            }
            Self::Unsupported {
                provider,
                capability,
            } => {
                format!("{provider} does not support {capability}. Switch providers in settings.")
            }
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// Result type alias for AI operations.
pub type Result<T> = std::result::Result<T, AiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_provider_and_capability() {
        let err = AiError::Unsupported {
            provider: ProviderKind::Gemini,
            capability: Capability::Synonyms,
        };
        let message = err.user_message();
        assert!(message.contains("Gemini"));
        assert!(message.contains("synonym"));
    }

    #[test]
    fn test_rate_limited_message_carries_delay() {
        let err = AiError::RateLimited { retry_after: 30 };
        assert!(err.user_message().contains("30"));
    }
}
