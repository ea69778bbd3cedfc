//! The service facade the studio talks to.

use crate::capability::CompletionProvider;
use crate::dto::{
    CharacterSketch, NarrativeReport, PlaceSketch, RelationshipSketch, TimelineSketch,
};
use crate::error::{AiError, Result};
use crate::providers::{ClaudeProvider, GeminiProvider, OpenAiProvider};
use crate::settings::{AiSettings, ProviderKind};

/// AI completion service: one of the three backends behind a uniform surface.
///
/// Built from settings at startup; the backend is chosen by
/// [`AiSettings::provider`]. Tests inject a fake backend through
/// [`AiService::with_provider`].
pub struct AiService {
    provider: Box<dyn CompletionProvider>,
    kind: ProviderKind,
}

impl AiService {
    /// Build the service from settings.
    ///
    /// A missing API key is a configuration error: the studio surfaces it as
    /// a notification pointing at the settings panel.
    pub fn from_settings(settings: &AiSettings) -> Result<Self> {
        if !settings.is_configured() {
            return Err(AiError::Configuration {
                reason: format!("no API key set for {}", settings.provider),
            });
        }
        let provider: Box<dyn CompletionProvider> = match settings.provider {
            ProviderKind::OpenAi => Box::new(OpenAiProvider::new(settings)?),
            ProviderKind::Claude => Box::new(ClaudeProvider::new(settings)?),
            ProviderKind::Gemini => Box::new(GeminiProvider::new(settings)?),
        };
        tracing::info!(provider = %settings.provider, model = settings.model(), "AI service ready");
        Ok(Self {
            kind: settings.provider,
            provider,
        })
    }

    /// Wrap an already-built backend (used by tests).
    pub fn with_provider(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            kind: provider.kind(),
            provider,
        }
    }

    /// Which backend serves requests.
    pub fn provider_kind(&self) -> ProviderKind {
        self.kind
    }

    /// Polish prose without changing its meaning.
    pub async fn enhance(&self, text: &str, language: &str) -> Result<String> {
        self.provider.enhance(text, language).await
    }

    /// Continue the story from where the text leaves off.
    pub async fn continue_story(&self, text: &str, language: &str) -> Result<String> {
        self.provider.continue_story(text, language).await
    }

    /// Correct spelling, grammar, and punctuation only.
    pub async fn proofread(&self, text: &str, language: &str) -> Result<String> {
        self.provider.proofread(text, language).await
    }

    /// Synonyms for a word or short phrase.
    pub async fn synonyms(&self, word: &str, language: &str) -> Result<Vec<String>> {
        self.provider.synonyms(word, language).await
    }

    /// Characters mentioned in the text.
    pub async fn extract_characters(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<CharacterSketch>> {
        self.provider.extract_characters(text, language).await
    }

    /// Places and settings mentioned in the text.
    pub async fn extract_places(&self, text: &str, language: &str) -> Result<Vec<PlaceSketch>> {
        self.provider.extract_places(text, language).await
    }

    /// Story events in narrative order.
    pub async fn extract_timeline(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<TimelineSketch>> {
        self.provider.extract_timeline(text, language).await
    }

    /// Relationships between characters named in the text.
    pub async fn extract_relationships(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<RelationshipSketch>> {
        self.provider.extract_relationships(text, language).await
    }

    /// Multi-axis narrative quality report.
    pub async fn analyze_narrative(&self, text: &str, language: &str) -> Result<NarrativeReport> {
        self.provider.analyze_narrative(text, language).await
    }
}

impl std::fmt::Debug for AiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiService").field("kind", &self.kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_requires_api_key() {
        let err = AiService::from_settings(&AiSettings::default()).unwrap_err();
        assert!(matches!(err, AiError::Configuration { .. }));
    }

    #[test]
    fn test_from_settings_selects_configured_backend() {
        let service = AiService::from_settings(&AiSettings {
            provider: ProviderKind::Claude,
            api_key: "key".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(service.provider_kind(), ProviderKind::Claude);
    }
}
