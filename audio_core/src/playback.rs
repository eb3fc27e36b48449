use async_trait::async_trait;

use crate::AudioClip;

/// Output seam for clips that should be heard rather than stored.
///
/// `play` resolves when playback has finished; the caller drops the clip
/// afterwards, which releases the underlying bytes.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, clip: &AudioClip) -> anyhow::Result<()>;
}

/// Sink that drops every clip after logging it. Stands in when no output
/// device is wired up (headless hosts, tests that only care about routing).
#[derive(Debug, Default)]
pub struct DiscardSink;

#[async_trait]
impl AudioSink for DiscardSink {
    async fn play(&self, clip: &AudioClip) -> anyhow::Result<()> {
        tracing::debug!("discarding {} byte clip ({})", clip.len(), clip.mime());
        Ok(())
    }
}

#[cfg(feature = "playback")]
pub use rodio_sink::RodioSink;

#[cfg(feature = "playback")]
mod rodio_sink {
    use std::io::Cursor;

    use async_trait::async_trait;
    use rodio::{Decoder, OutputStream, Sink};

    use super::AudioSink;
    use crate::AudioClip;

    /// Plays clips on the default output device and blocks the worker until
    /// the sink drains.
    #[derive(Debug, Default)]
    pub struct RodioSink;

    #[async_trait]
    impl AudioSink for RodioSink {
        async fn play(&self, clip: &AudioClip) -> anyhow::Result<()> {
            let bytes = clip.bytes().to_vec();
            tokio::task::spawn_blocking(move || {
                let (_stream, handle) = OutputStream::try_default()?;
                let sink = Sink::try_new(&handle)?;
                let source = Decoder::new(Cursor::new(bytes))?;
                sink.append(source);
                sink.sleep_until_end();
                Ok::<(), anyhow::Error>(())
            })
            .await
            .map_err(|e| anyhow::anyhow!("playback task join error: {e}"))?
        }
    }
}
