/// Stored source text is capped at this many characters.
pub const MAX_STORED_TEXT: usize = 100;

/// Words spoken per second the duration estimate assumes.
const WORDS_PER_SECOND: f64 = 2.5;

/// Cap `text` for display/history, appending an ellipsis marker only when
/// something was actually cut.
pub fn truncate_for_display(text: &str) -> String {
    if text.chars().count() <= MAX_STORED_TEXT {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_STORED_TEXT).collect();
        format!("{head}...")
    }
}

/// Whitespace-separated non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rough spoken duration in whole seconds, rounded up.
pub fn estimated_duration_secs(text: &str) -> u64 {
    (word_count(text) as f64 / WORDS_PER_SECOND).ceil() as u64
}
