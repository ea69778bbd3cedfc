//! Anthropic-shaped messages backend.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::capability::CompletionProvider;
use crate::dto::{
    CharacterSketch, NarrativeReport, PlaceSketch, RelationshipSketch, TimelineSketch,
};
use crate::error::{AiError, Result};
use crate::settings::{AiSettings, ProviderKind};
use crate::{parse, prompt};

use super::{build_client, check_status};

/// Protocol version header required by the messages API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upper bound on reply length; the messages API requires it.
const MAX_TOKENS: u32 = 4096;

/// `POST {base}/v1/messages` with `x-api-key` auth. Full capability set.
#[derive(Debug, Clone)]
pub struct ClaudeProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeProvider {
    /// Build a provider from settings.
    pub fn new(settings: &AiSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.timeout_secs)?,
            api_key: settings.api_key.clone(),
            model: settings.model().to_string(),
            base_url: settings.base_url(),
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{"role": "user", "content": prompt}],
        });

        tracing::debug!(model = %self.model, "claude completion request");
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;
        let payload: Value = check_status(response).await?.json().await?;
        extract_reply(&payload)
    }
}

/// Pull the reply text out of a messages payload.
fn extract_reply(payload: &Value) -> Result<String> {
    payload["content"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| AiError::InvalidResponse {
            reason: "missing content[0].text".to_string(),
        })
}

#[async_trait]
impl CompletionProvider for ClaudeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    async fn enhance(&self, text: &str, language: &str) -> Result<String> {
        parse::reply_text(self.complete(&prompt::enhance(text, language)).await?)
    }

    async fn continue_story(&self, text: &str, language: &str) -> Result<String> {
        parse::reply_text(self.complete(&prompt::continue_story(text, language)).await?)
    }

    async fn proofread(&self, text: &str, language: &str) -> Result<String> {
        parse::reply_text(self.complete(&prompt::proofread(text, language)).await?)
    }

    async fn synonyms(&self, word: &str, language: &str) -> Result<Vec<String>> {
        let reply = self.complete(&prompt::synonyms(word, language)).await?;
        parse::json_payload(&reply)
    }

    async fn extract_characters(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<CharacterSketch>> {
        let reply = self
            .complete(&prompt::extract_characters(text, language))
            .await?;
        parse::json_payload(&reply)
    }

    async fn extract_places(&self, text: &str, language: &str) -> Result<Vec<PlaceSketch>> {
        let reply = self
            .complete(&prompt::extract_places(text, language))
            .await?;
        parse::json_payload(&reply)
    }

    async fn extract_timeline(&self, text: &str, language: &str) -> Result<Vec<TimelineSketch>> {
        let reply = self
            .complete(&prompt::extract_timeline(text, language))
            .await?;
        parse::json_payload(&reply)
    }

    async fn extract_relationships(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<RelationshipSketch>> {
        let reply = self
            .complete(&prompt::extract_relationships(text, language))
            .await?;
        parse::json_payload(&reply)
    }

    async fn analyze_narrative(&self, text: &str, language: &str) -> Result<NarrativeReport> {
        let reply = self
            .complete(&prompt::analyze_narrative(text, language))
            .await?;
        parse::json_payload(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply_happy_path() {
        let payload = json!({
            "content": [{"type": "text", "text": "The rain stopped."}]
        });
        assert_eq!(extract_reply(&payload).unwrap(), "The rain stopped.");
    }

    #[test]
    fn test_extract_reply_missing_text() {
        let payload = json!({"content": [{"type": "tool_use"}]});
        assert!(matches!(
            extract_reply(&payload),
            Err(AiError::InvalidResponse { .. })
        ));
    }
}
