use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use audio_core::AudioClip;

use crate::error::DecodeError;
use crate::{ProviderClient, ProviderResponse};

/// What the gateway sent back, decided once from the content-type header.
/// Body inspection only happens inside the `JsonEnvelope` arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    JsonEnvelope,
    DirectAudio,
    Unknown,
}

impl ResponseKind {
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_ascii_lowercase();
        if essence.contains("json") {
            ResponseKind::JsonEnvelope
        } else if essence.starts_with("audio/") {
            ResponseKind::DirectAudio
        } else {
            ResponseKind::Unknown
        }
    }
}

// Chat-completion envelope, the same shape the gateway uses for text models.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl ProviderClient {
    /// Turn a provider response (status already verified OK) into a playable
    /// clip, handling the three payload shapes the gateway produces.
    pub async fn decode(&self, response: ProviderResponse) -> Result<AudioClip, DecodeError> {
        match ResponseKind::from_content_type(&response.content_type) {
            ResponseKind::JsonEnvelope => {
                let content = envelope_content(&response.body)?;
                self.decode_envelope_content(&content).await
            }
            ResponseKind::DirectAudio => {
                Ok(AudioClip::new(response.body, response.content_type))
            }
            ResponseKind::Unknown => {
                // Some gateways serve audio without a usable content-type;
                // take the body as-is and only reject when there is nothing.
                if response.body.is_empty() {
                    Err(DecodeError::EmptyResponse)
                } else {
                    tracing::debug!(
                        "treating {} response as opaque audio ({} bytes)",
                        response.content_type,
                        response.body.len()
                    );
                    Ok(AudioClip::new(response.body, "application/octet-stream"))
                }
            }
        }
    }

    async fn decode_envelope_content(&self, content: &str) -> Result<AudioClip, DecodeError> {
        if content.starts_with("data:audio") {
            decode_data_uri(content)
        } else if content.starts_with("http://") || content.starts_with("https://") {
            tracing::debug!("following indirect audio url");
            let (bytes, mime) = self
                .fetch_audio(content)
                .await
                .map_err(|e| {
                    tracing::warn!("indirect audio fetch failed: {e}");
                    DecodeError::IndirectFetch
                })?;
            Ok(AudioClip::new(
                bytes,
                mime.unwrap_or_else(|| "audio/mpeg".to_string()),
            ))
        } else {
            Err(DecodeError::UnrecognizedFormat)
        }
    }
}

fn envelope_content(body: &[u8]) -> Result<String, DecodeError> {
    serde_json::from_slice::<ChatResponse>(body)
        .ok()
        .and_then(|r| r.choices.into_iter().next())
        .map(|c| c.message.content)
        .ok_or(DecodeError::MissingAudio)
}

fn decode_data_uri(content: &str) -> Result<AudioClip, DecodeError> {
    let (header, b64) = content
        .split_once("base64,")
        .ok_or(DecodeError::UnrecognizedFormat)?;
    let bytes = general_purpose::STANDARD.decode(b64.trim())?;

    // "data:audio/mpeg;base64," -> "audio/mpeg"
    let mime = header
        .strip_prefix("data:")
        .map(|rest| rest.trim_end_matches(';'))
        .filter(|m| !m.is_empty())
        .unwrap_or("audio/mpeg");

    Ok(AudioClip::new(bytes, mime))
}
