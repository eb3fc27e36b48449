use thiserror::Error;

/// Transport-level failures talking to the synthesis provider.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("provider returned status {0}")]
    Status(u16),

    #[error("provider request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status code, when the failure was a non-OK response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status(code) => Some(*code),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            ClientError::Encode(_) => None,
        }
    }
}

/// Failures turning a provider response into a playable clip.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no audio data in response")]
    MissingAudio,

    #[error("unrecognized response format")]
    UnrecognizedFormat,

    #[error("indirect audio fetch failed")]
    IndirectFetch,

    #[error("empty response")]
    EmptyResponse,

    #[error("invalid base64 audio payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
