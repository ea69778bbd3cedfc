//! The three backend implementations.
//!
//! Each provider speaks its own wire shape but shares the HTTP plumbing
//! here: client construction, rate-limit mapping, and non-success status
//! handling. Reply extraction is a pure function per shape so it can be
//! tested against canned JSON without a network.

mod claude;
mod gemini;
mod openai;

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use std::time::Duration;

use crate::error::{AiError, Result};

/// Build the HTTP client all providers use.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AiError::Configuration {
            reason: format!("could not build HTTP client: {e}"),
        })
}

/// Map a non-success response onto the error taxonomy.
///
/// 429 becomes [`AiError::RateLimited`] (honoring a `retry-after` header in
/// seconds); everything else carries status and body.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(AiError::RateLimited { retry_after });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
