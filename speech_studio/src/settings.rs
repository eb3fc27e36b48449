use serde::{Deserialize, Serialize};

use crate::voices;

pub const DEFAULT_VOICE: &str = "rachel";
pub const DEFAULT_STABILITY: f32 = 0.75;
pub const DEFAULT_CLARITY: f32 = 0.75;

/// Voice parameters for one generation.
///
/// A value object: the coordinator clones it at request time, so later edits
/// in the UI never touch a historical record. Defaulting is a first-class
/// rule here: `voice()` and `clarity()` resolve unset fields to fixed
/// defaults instead of failing validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    voice_id: Option<String>,
    speed: f32,
    pitch: f32,
    stability: f32,
    clarity: Option<f32>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_id: None,
            speed: 1.0,
            pitch: 1.0,
            stability: DEFAULT_STABILITY,
            clarity: None,
        }
    }
}

impl VoiceSettings {
    /// Voice to synthesize with; unset falls back to the default voice.
    pub fn voice(&self) -> &str {
        self.voice_id.as_deref().unwrap_or(DEFAULT_VOICE)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn stability(&self) -> f32 {
        self.stability
    }

    /// Similarity boost; unset falls back to the fixed default.
    pub fn clarity(&self) -> f32 {
        self.clarity.unwrap_or(DEFAULT_CLARITY)
    }

    /// Select a voice. Ids not present in the catalog are ignored.
    pub fn with_voice(mut self, id: &str) -> Self {
        if voices::is_known(id) {
            self.voice_id = Some(id.to_string());
        } else {
            tracing::warn!("ignoring unknown voice id {id:?}");
        }
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.clamp(0.5, 2.0);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(0.5, 2.0);
        self
    }

    pub fn with_stability(mut self, stability: f32) -> Self {
        self.stability = stability.clamp(0.0, 1.0);
        self
    }

    pub fn with_clarity(mut self, clarity: f32) -> Self {
        self.clarity = Some(clarity.clamp(0.0, 1.0));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_voice_and_clarity_resolve_to_defaults() {
        let settings = VoiceSettings::default();
        assert_eq!(settings.voice(), "rachel");
        assert_eq!(settings.clarity(), 0.75);
        assert_eq!(settings.stability(), 0.75);
    }

    #[test]
    fn known_voice_is_kept() {
        let settings = VoiceSettings::default().with_voice("bella");
        assert_eq!(settings.voice(), "bella");
    }

    #[test]
    fn unknown_voice_falls_back_to_default() {
        let settings = VoiceSettings::default().with_voice("not-a-voice");
        assert_eq!(settings.voice(), "rachel");
    }

    #[test]
    fn numeric_fields_are_clamped() {
        let settings = VoiceSettings::default()
            .with_speed(5.0)
            .with_pitch(0.0)
            .with_stability(1.5)
            .with_clarity(-0.2);
        assert_eq!(settings.speed(), 2.0);
        assert_eq!(settings.pitch(), 0.5);
        assert_eq!(settings.stability(), 1.0);
        assert_eq!(settings.clarity(), 0.0);
    }
}
