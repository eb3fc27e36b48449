use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use audio_core::{AudioClip, AudioSink};
use synth_client::{ProviderClient, SynthesisSpec};

use crate::error::GenerationError;
use crate::history::{GeneratedAudio, HistoryStore};
use crate::progress::ProgressSimulator;
use crate::settings::{VoiceSettings, DEFAULT_CLARITY, DEFAULT_STABILITY};
use crate::text;

/// Fixed phrase spoken by voice previews.
pub const PREVIEW_TEXT: &str = "Hi! This is how I sound. Pick me if you like what you hear.";

/// The session-state object behind the UI: current result, bounded history,
/// in-flight flag, simulated progress and the preview marker, mutated only
/// through the coordinator operations below.
pub struct SpeechStudio {
    client: ProviderClient,
    player: Arc<dyn AudioSink>,
    current: Mutex<Option<Arc<GeneratedAudio>>>,
    history: Mutex<HistoryStore>,
    in_flight: AtomicBool,
    progress: Arc<AtomicU8>,
    previewing: Mutex<Option<String>>,
    generation_count: AtomicU64,
}

/// Resets the in-flight flag and zeroes progress on every exit path.
struct ResetGuard<'a> {
    in_flight: &'a AtomicBool,
    progress: &'a AtomicU8,
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        self.progress.store(0, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Clears the preview marker when the preview ends, however it ends.
struct PreviewGuard<'a> {
    previewing: &'a Mutex<Option<String>>,
}

impl Drop for PreviewGuard<'_> {
    fn drop(&mut self) {
        *self.previewing.lock().unwrap() = None;
    }
}

impl SpeechStudio {
    pub fn new(client: ProviderClient, player: Arc<dyn AudioSink>) -> Self {
        Self {
            client,
            player,
            current: Mutex::new(None),
            history: Mutex::new(HistoryStore::new()),
            in_flight: AtomicBool::new(false),
            progress: Arc::new(AtomicU8::new(0)),
            previewing: Mutex::new(None),
            generation_count: AtomicU64::new(0),
        }
    }

    /// Run one full synthesis cycle.
    ///
    /// Returns `Ok(None)` when the request was suppressed by a guard (empty
    /// text, or another generation already in flight); that is a no-op, not
    /// an error. On success the new entry is the current result and the head
    /// of history.
    pub async fn generate(
        &self,
        input: &str,
        settings: &VoiceSettings,
    ) -> Result<Option<Arc<GeneratedAudio>>, GenerationError> {
        let input = input.trim();
        if input.is_empty() {
            debug!("ignoring generation request with empty text");
            return Ok(None);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("generation already in flight, request suppressed");
            return Ok(None);
        }

        let _guard = ResetGuard {
            in_flight: &self.in_flight,
            progress: &self.progress,
        };

        // Snapshot so later UI edits cannot mutate this record.
        let settings = settings.clone();

        // Perceived progress runs beside the request; the two are not
        // synchronized and completion never waits on the ticker.
        let simulator = ProgressSimulator::start(Arc::clone(&self.progress));

        match self.run_generation(input, &settings).await {
            Ok(entry) => {
                simulator.complete();
                let entry = Arc::new(entry);

                *self.current.lock().unwrap() = Some(Arc::clone(&entry));
                if let Some(evicted) = self.history.lock().unwrap().prepend(Arc::clone(&entry)) {
                    debug!(id = %evicted.id, "evicted oldest generation, audio released");
                }
                let total = self.generation_count.fetch_add(1, Ordering::Relaxed) + 1;
                info!(id = %entry.id, voice = %entry.voice_id, total, "generation complete");

                Ok(Some(entry))
            }
            Err(e) => {
                error!("generation failed: {e}");
                Err(e)
            }
        }
    }

    async fn run_generation(
        &self,
        input: &str,
        settings: &VoiceSettings,
    ) -> Result<GeneratedAudio, GenerationError> {
        let spec = SynthesisSpec {
            text: input,
            voice: settings.voice(),
            stability: settings.stability(),
            clarity: settings.clarity(),
        };

        let response = self.client.synthesize(&spec).await?;
        let clip = Arc::new(self.client.decode(response).await?);
        let duration_secs = self.resolve_duration(&clip, input).await;

        Ok(GeneratedAudio {
            id: Uuid::new_v4(),
            text: text::truncate_for_display(input),
            voice_id: spec.voice.to_string(),
            clip,
            duration_secs,
            created_at: Utc::now(),
            settings: settings.clone(),
        })
    }

    /// Natural duration from container metadata, probed off the async
    /// runtime. Falls back to the word-count estimate so the stored value is
    /// always finite and non-negative.
    async fn resolve_duration(&self, clip: &Arc<AudioClip>, input: &str) -> f32 {
        let probe_clip = Arc::clone(clip);
        let probed = tokio::task::spawn_blocking(move || probe_clip.duration_secs())
            .await
            .unwrap_or_else(|e| {
                warn!("duration probe task failed: {e}");
                None
            });

        probed
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or_else(|| {
                let estimate = text::estimated_duration_secs(input) as f32;
                debug!(estimate, "no container duration, using word-count estimate");
                estimate
            })
    }

    /// Audition a voice with the fixed preview phrase and default
    /// stability/clarity, independent of the user's settings and text.
    ///
    /// Single-flight: while any preview is active, further requests are
    /// suppressed. Failures are logged and swallowed; the affordance simply
    /// ends without audio.
    pub async fn preview_voice(&self, voice_id: &str) {
        {
            let mut previewing = self.previewing.lock().unwrap();
            if previewing.is_some() {
                debug!(voice = voice_id, "preview already active, request suppressed");
                return;
            }
            *previewing = Some(voice_id.to_string());
        }
        let _guard = PreviewGuard {
            previewing: &self.previewing,
        };

        if let Err(e) = self.run_preview(voice_id).await {
            warn!(voice = voice_id, "voice preview failed: {e}");
        }
    }

    async fn run_preview(&self, voice_id: &str) -> Result<(), GenerationError> {
        let spec = SynthesisSpec {
            text: PREVIEW_TEXT,
            voice: voice_id,
            stability: DEFAULT_STABILITY,
            clarity: DEFAULT_CLARITY,
        };

        let response = self.client.synthesize(&spec).await?;
        let clip = self.client.decode(response).await?;

        if let Err(e) = self.player.play(&clip).await {
            warn!(voice = voice_id, "preview playback failed: {e}");
        }
        // clip drops here, releasing the preview audio
        Ok(())
    }

    /// Restore a past generation as the current result.
    pub fn select(&self, id: Uuid) -> Option<Arc<GeneratedAudio>> {
        let entry = self.history.lock().unwrap().select(id);
        if let Some(ref entry) = entry {
            *self.current.lock().unwrap() = Some(Arc::clone(entry));
            debug!(%id, "restored generation from history");
        }
        entry
    }

    /// Write a generation's audio bytes to disk (the download affordance).
    pub async fn export(&self, id: Uuid, path: &Path) -> anyhow::Result<()> {
        let mut entry = self.history.lock().unwrap().select(id);
        if entry.is_none() {
            // the current result can outlive its history slot
            entry = self
                .current
                .lock()
                .unwrap()
                .as_ref()
                .filter(|e| e.id == id)
                .cloned();
        }
        let entry = entry.ok_or_else(|| anyhow::anyhow!("no generation with id {id}"))?;

        tokio::fs::write(path, entry.clip.bytes()).await?;
        info!(%id, path = %path.display(), bytes = entry.clip.len(), "exported audio");
        Ok(())
    }

    // --- read surface for the UI layer ---

    pub fn current(&self) -> Option<Arc<GeneratedAudio>> {
        self.current.lock().unwrap().clone()
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Simulated progress in [0, 100]; 0 when idle.
    pub fn progress(&self) -> u8 {
        self.progress.load(Ordering::SeqCst)
    }

    /// Newest-first history snapshot.
    pub fn history(&self) -> Vec<Arc<GeneratedAudio>> {
        self.history.lock().unwrap().snapshot()
    }

    pub fn is_previewing(&self, voice_id: &str) -> bool {
        self.previewing.lock().unwrap().as_deref() == Some(voice_id)
    }

    /// Successful generations since the session started.
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }
}
