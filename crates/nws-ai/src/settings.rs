//! AI provider settings.
//!
//! Selected by configuration at startup and persisted with the studio
//! settings (as TOML, by the studio crate).

use serde::{Deserialize, Serialize};

/// Which backend implementation serves completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-shaped chat completions API.
    #[default]
    OpenAi,
    /// Anthropic-shaped messages API.
    Claude,
    /// Google Gemini-shaped generateContent API.
    Gemini,
}

impl ProviderKind {
    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
        }
    }

    /// Model used when the settings do not name one.
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Claude => "claude-3-5-haiku-latest",
            Self::Gemini => "gemini-1.5-flash",
        }
    }

    /// API endpoint base used when the settings do not override it.
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Claude => "https://api.anthropic.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// User-configurable AI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Which backend to use.
    pub provider: ProviderKind,

    /// API key for the selected provider. Empty means unconfigured.
    pub api_key: String,

    /// Model override; the provider default is used when empty.
    pub model: String,

    /// Endpoint base override (self-hosted gateways, proxies).
    pub base_url: Option<String>,

    /// Language code threaded into every prompt (e.g., "en", "nl").
    pub language: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: String::new(),
            model: String::new(),
            base_url: None,
            language: "en".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AiSettings {
    /// The model to request: the configured override, or the provider default.
    pub fn model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    /// The endpoint base, with any trailing slash removed.
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(self.provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AiSettings::default();
        assert_eq!(settings.provider, ProviderKind::OpenAi);
        assert_eq!(settings.model(), "gpt-4o-mini");
        assert_eq!(settings.language, "en");
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let settings = AiSettings {
            base_url: Some("https://gateway.example/".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.base_url(), "https://gateway.example");
    }

    #[test]
    fn test_model_override_wins() {
        let settings = AiSettings {
            provider: ProviderKind::Claude,
            model: "claude-custom".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.model(), "claude-custom");
    }

    #[test]
    fn test_provider_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ProviderKind::Claude).unwrap();
        assert_eq!(json, "\"claude\"");
    }
}
