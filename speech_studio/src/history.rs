use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use audio_core::AudioClip;

use crate::settings::VoiceSettings;

/// History keeps at most this many generations.
pub const HISTORY_CAPACITY: usize = 10;

/// One completed synthesis. Created only by the generation coordinator and
/// never mutated afterwards; the clip bytes are released when the last
/// reference (history or the current-audio slot) drops.
#[derive(Debug)]
pub struct GeneratedAudio {
    pub id: Uuid,
    /// Source text, capped at 100 characters plus an ellipsis marker.
    pub text: String,
    pub voice_id: String,
    pub clip: Arc<AudioClip>,
    /// Always finite and >= 0.
    pub duration_secs: f32,
    pub created_at: DateTime<Utc>,
    /// Settings snapshot taken at request time.
    pub settings: VoiceSettings,
}

/// Bounded, ordered collection of past generations, newest first.
///
/// Insert-only from the front; the only removal is capacity eviction. No
/// dedup: identical runs are distinct entries.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: VecDeque<Arc<GeneratedAudio>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front. Returns the evicted oldest entry when the store
    /// was already at capacity, so the caller can observe the release.
    pub fn prepend(&mut self, entry: Arc<GeneratedAudio>) -> Option<Arc<GeneratedAudio>> {
        self.entries.push_front(entry);
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Look up an entry for restoring it as the current result.
    pub fn select(&self, id: Uuid) -> Option<Arc<GeneratedAudio>> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest-first snapshot for the UI.
    pub fn snapshot(&self) -> Vec<Arc<GeneratedAudio>> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> Arc<GeneratedAudio> {
        Arc::new(GeneratedAudio {
            id: Uuid::new_v4(),
            text: text.to_string(),
            voice_id: "rachel".to_string(),
            clip: Arc::new(AudioClip::new(vec![0u8; 4], "audio/mpeg")),
            duration_secs: 1.0,
            created_at: Utc::now(),
            settings: VoiceSettings::default(),
        })
    }

    #[test]
    fn prepend_keeps_newest_first() {
        let mut store = HistoryStore::new();
        store.prepend(entry("first"));
        store.prepend(entry("second"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].text, "second");
        assert_eq!(snapshot[1].text, "first");
    }

    #[test]
    fn eleventh_insert_evicts_the_oldest() {
        let mut store = HistoryStore::new();
        let oldest = entry("entry 0");
        let oldest_id = oldest.id;
        assert!(store.prepend(oldest).is_none());

        for i in 1..HISTORY_CAPACITY {
            assert!(store.prepend(entry(&format!("entry {i}"))).is_none());
        }
        assert_eq!(store.len(), HISTORY_CAPACITY);

        let evicted = store.prepend(entry("entry 10")).expect("capacity exceeded");
        assert_eq!(evicted.id, oldest_id);
        assert_eq!(store.len(), HISTORY_CAPACITY);
        assert!(store.select(oldest_id).is_none());
        assert_eq!(store.snapshot()[0].text, "entry 10");
    }

    #[test]
    fn select_finds_by_id_without_reordering() {
        let mut store = HistoryStore::new();
        let a = entry("a");
        let a_id = a.id;
        store.prepend(a);
        store.prepend(entry("b"));

        let found = store.select(a_id).unwrap();
        assert_eq!(found.text, "a");
        // selection must not promote the entry
        assert_eq!(store.snapshot()[0].text, "b");
        assert!(store.select(Uuid::new_v4()).is_none());
    }

    #[test]
    fn identical_texts_stay_distinct_entries() {
        let mut store = HistoryStore::new();
        store.prepend(entry("same"));
        store.prepend(entry("same"));
        assert_eq!(store.len(), 2);
    }
}
