// Configuration for the synthesis provider client

/// Default chat-completions endpoint the gateway exposes.
pub const DEFAULT_ENDPOINT: &str = "https://api.speechrelay.dev/v1/chat/completions";

/// Voice model the embedded payload requests.
pub const DEFAULT_VOICE_MODEL: &str = "eleven_multilingual_v2";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub voice_model: String,
    pub max_tokens: u16,
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: "tts-relay-1".to_string(),
            voice_model: DEFAULT_VOICE_MODEL.to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let endpoint = std::env::var("SYNTH_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.endpoint);

        let api_key = std::env::var("SYNTH_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let model = std::env::var("SYNTH_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.model);

        let voice_model = std::env::var("SYNTH_VOICE_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.voice_model);

        let max_tokens = std::env::var("SYNTH_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_tokens);

        let temperature = std::env::var("SYNTH_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.temperature);

        Self {
            endpoint,
            api_key,
            model,
            voice_model,
            max_tokens,
            temperature,
        }
    }

    /// Point the client at a different endpoint (test servers, self-hosted
    /// gateways).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
