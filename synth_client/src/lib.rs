pub mod config;
mod decode;
mod error;

use serde::Serialize;

pub use config::ProviderConfig;
pub use decode::ResponseKind;
pub use error::{ClientError, DecodeError};

/// Fixed style strength sent with every request.
const STYLE: f32 = 0.0;
/// Speaker boost is always requested.
const USE_SPEAKER_BOOST: bool = true;

/// One synthesis request, with defaults already resolved by the caller.
#[derive(Debug, Clone)]
pub struct SynthesisSpec<'a> {
    pub text: &'a str,
    pub voice: &'a str,
    pub stability: f32,
    pub clarity: f32,
}

/// Raw provider response with the status already verified OK.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Structure for the gateway chat-completions request
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u16,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Synthesis payload carried as a JSON string inside the user message.
#[derive(Serialize)]
struct SynthesisPayload<'a> {
    text: &'a str,
    voice: &'a str,
    model_id: &'a str,
    voice_settings: VoiceParams,
    pronunciation_dictionary_locators: Vec<String>,
    seed: Option<u64>,
    previous_text: Option<&'a str>,
    next_text: Option<&'a str>,
    previous_request_ids: Vec<String>,
    next_request_ids: Vec<String>,
}

#[derive(Serialize)]
struct VoiceParams {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Send one synthesis request and return the raw response.
    ///
    /// A non-OK status aborts with the code; the body is not inspected in
    /// that case.
    pub async fn synthesize(
        &self,
        spec: &SynthesisSpec<'_>,
    ) -> Result<ProviderResponse, ClientError> {
        tracing::info!(voice = spec.voice, chars = spec.text.len(), "requesting synthesis");

        let response = self.build_request(spec)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("provider returned status {status}");
            return Err(ClientError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.bytes().await?.to_vec();

        Ok(ProviderResponse { content_type, body })
    }

    fn build_request(
        &self,
        spec: &SynthesisSpec<'_>,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let payload = SynthesisPayload {
            text: spec.text,
            voice: spec.voice,
            model_id: &self.config.voice_model,
            voice_settings: VoiceParams {
                stability: spec.stability,
                similarity_boost: spec.clarity,
                style: STYLE,
                use_speaker_boost: USE_SPEAKER_BOOST,
            },
            pronunciation_dictionary_locators: Vec::new(),
            seed: None,
            previous_text: None,
            next_text: None,
            previous_request_ids: Vec::new(),
            next_request_ids: Vec::new(),
        };
        let content = serde_json::to_string(&payload)?;

        let req_body = ChatRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: &content,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut request = self.http.post(&self.config.endpoint).json(&req_body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        Ok(request)
    }

    /// Second-hop fetch for envelopes that answer with an audio URL.
    pub(crate) async fn fetch_audio(
        &self,
        url: &str,
    ) -> Result<(Vec<u8>, Option<String>), ClientError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.bytes().await?.to_vec();

        Ok((body, mime))
    }
}
