//! OpenAI-shaped chat completions backend.

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

/// `POST {base}/v1/chat/completions` with bearer auth. Full capability set.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
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
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        tracing::debug!(model = %self.model, "openai completion request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let payload: Value = check_status(response).await?.json().await?;
        extract_reply(&payload)
    }
}

/// Pull the reply text out of a chat-completions payload.
fn extract_reply(payload: &Value) -> Result<String> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| AiError::InvalidResponse {
            reason: "missing choices[0].message.content".to_string(),
        })
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
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
            "choices": [{"message": {"role": "assistant", "content": "Once more."}}]
        });
        assert_eq!(extract_reply(&payload).unwrap(), "Once more.");
    }

    #[test]
    fn test_extract_reply_missing_content() {
        let payload = json!({"choices": []});
        assert!(matches!(
            extract_reply(&payload),
            Err(AiError::InvalidResponse { .. })
        ));
    }
}
