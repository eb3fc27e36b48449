use thiserror::Error;

use synth_client::{ClientError, DecodeError};

/// One generic notice covers every failure kind, matching the
/// collapsed-by-policy user messaging. The typed variants stay available to
/// embedders that want to distinguish.
pub const GENERIC_FAILURE_NOTICE: &str = "Audio generation failed. Please try again.";

/// Why a generation produced no `GeneratedAudio`.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport failure: {0}")]
    Transport(#[from] ClientError),

    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),
}

impl GenerationError {
    /// The user-visible notice. Deliberately identical for transport and
    /// decode failures.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_NOTICE
    }

    /// HTTP status code, when the failure was a non-OK provider response.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenerationError::Transport(e) => e.status(),
            GenerationError::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_failure_kinds_collapse_to_one_notice() {
        let transport = GenerationError::Transport(ClientError::Status(500));
        let decode = GenerationError::Decode(DecodeError::EmptyResponse);
        assert_eq!(transport.user_message(), decode.user_message());
    }

    #[test]
    fn transport_failures_carry_their_status() {
        let err = GenerationError::Transport(ClientError::Status(429));
        assert_eq!(err.status(), Some(429));
        assert_eq!(GenerationError::Decode(DecodeError::MissingAudio).status(), None);
    }
}
