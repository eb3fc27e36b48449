mod probe;
pub mod playback;
pub mod wav;

use base64::Engine; // for STANDARD.encode()

pub use playback::AudioSink;
#[cfg(feature = "playback")]
pub use playback::RodioSink;

/// A decoded, playable audio payload.
///
/// Owns the raw container bytes (MP3, WAV, OGG, ...) exactly as the provider
/// delivered them, tagged with the MIME type they arrived under. Clips are
/// shared between the current-audio slot and the history list behind an
/// `Arc`; the bytes are freed when the last reference drops.
#[derive(Debug, Clone)]
pub struct AudioClip {
    bytes: Vec<u8>,
    mime: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Natural duration in seconds, read from container metadata.
    ///
    /// Returns `None` when the container cannot be probed or carries no frame
    /// count; callers fall back to an estimate in that case.
    pub fn duration_secs(&self) -> Option<f32> {
        match probe::probe_duration(&self.bytes, &self.mime) {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("duration probe failed ({}): {e}", self.mime);
                None
            }
        }
    }

    /// `data:<mime>;base64,...` form for embedding in a UI audio element.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
