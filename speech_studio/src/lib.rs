pub mod error;
pub mod history;
pub mod progress;
pub mod settings;
pub mod text;
pub mod voices;

mod studio;

pub use error::GenerationError;
pub use history::{GeneratedAudio, HistoryStore, HISTORY_CAPACITY};
pub use settings::VoiceSettings;
pub use studio::{SpeechStudio, PREVIEW_TEXT};

// The types a UI layer needs alongside the session object.
pub use audio_core::{AudioClip, AudioSink};
pub use synth_client::{ProviderClient, ProviderConfig};
