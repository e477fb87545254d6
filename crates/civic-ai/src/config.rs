use tracing::{info, warn};

use crate::assistant::{Assistant, CannedAssistant};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Provider settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AssistantConfig {
    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Pick the assistant strategy: a live provider when a credential is
    /// configured, the canned fallback otherwise.
    pub fn build(&self) -> Box<dyn Assistant> {
        #[cfg(feature = "gemini")]
        if let Some(key) = self.api_key() {
            info!(model = %self.model, base_url = %self.base_url, "using live Gemini assistant");
            let client = crate::gemini::GeminiClient::new(
                self.base_url.clone(),
                self.model.clone(),
                key.to_string(),
            );
            return Box::new(crate::assistant::LiveAssistant::new(client));
        }

        #[cfg(not(feature = "gemini"))]
        if self.api_key().is_some() {
            info!("API key ignored: built without the `gemini` feature");
        }

        warn!("no provider API key configured; using canned AI responses");
        Box::new(CannedAssistant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::AssistantMode;

    #[test]
    fn missing_key_selects_canned() {
        let config = AssistantConfig::default();
        assert_eq!(config.build().mode(), AssistantMode::Canned);
    }

    #[test]
    fn defaults_point_at_public_endpoint() {
        let config = AssistantConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AssistantConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
        assert_eq!(config.build().mode(), AssistantMode::Canned);
    }

    #[test]
    fn key_is_trimmed() {
        let config = AssistantConfig {
            api_key: Some(" abc123\n".into()),
            ..Default::default()
        };
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn key_selects_live() {
        let config = AssistantConfig {
            api_key: Some("abc123".into()),
            ..Default::default()
        };
        assert_eq!(config.build().mode(), AssistantMode::Live);
    }
}
