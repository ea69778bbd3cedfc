//! Gemini-shaped generateContent backend.
//!
//! Serves the prose and extraction capabilities. Synonym lookup and
//! narrative analysis are not offered on this backend; those calls return
//! explicit unsupported errors through the trait defaults.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::capability::CompletionProvider;
use crate::dto::{CharacterSketch, PlaceSketch, RelationshipSketch, TimelineSketch};
use crate::error::{AiError, Result};
use crate::settings::{AiSettings, ProviderKind};
use crate::{parse, prompt};

use super::{build_client, check_status};

/// `POST {base}/v1beta/models/{model}:generateContent` with key query auth.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
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
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });

        tracing::debug!(model = %self.model, "gemini completion request");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let payload: Value = check_status(response).await?.json().await?;
        extract_reply(&payload)
    }
}

/// Pull the reply text out of a generateContent payload.
fn extract_reply(payload: &Value) -> Result<String> {
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| AiError::InvalidResponse {
            reason: "missing candidates[0].content.parts[0].text".to_string(),
        })
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
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
}
