//! Common utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use audio_core::playback::DiscardSink;
use audio_core::{wav, AudioClip, AudioSink};
use speech_studio::{ProviderClient, ProviderConfig, SpeechStudio};

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .try_init();
    });
}

/// What the mock provider answers with.
#[derive(Clone)]
pub enum MockBehavior {
    /// JSON envelope whose content is a `data:audio/wav;base64,...` URI.
    DataUriWav { seconds: f32 },
    /// Raw WAV body under an `audio/wav` content-type.
    DirectWav { seconds: f32 },
    /// `audio/mpeg` content-type over bytes no probe can read.
    DirectGarbage,
    /// Plain error status.
    Error { status: u16 },
    /// Unrecognized content-type with a zero-length body.
    EmptyUnknown,
}

#[derive(Clone)]
struct MockState {
    behavior: MockBehavior,
    delay: Duration,
    hits: Arc<AtomicUsize>,
}

pub struct MockProvider {
    pub endpoint: String,
    pub hits: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn silence(seconds: f32) -> Vec<f32> {
    vec![0.0; (seconds * 22_050.0) as usize]
}

async fn synthesize(State(state): State<MockState>) -> Response {
    tokio::time::sleep(state.delay).await;
    state.hits.fetch_add(1, Ordering::SeqCst);

    match &state.behavior {
        MockBehavior::DataUriWav { seconds } => {
            let b64 = wav::encode_wav_base64(&silence(*seconds), 22_050).unwrap();
            let body = serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": format!("data:audio/wav;base64,{b64}")
                    }
                }]
            });
            axum::Json(body).into_response()
        }
        MockBehavior::DirectWav { seconds } => {
            let bytes = wav::encode_wav(&silence(*seconds), 22_050).unwrap();
            ([(header::CONTENT_TYPE, "audio/wav")], bytes).into_response()
        }
        MockBehavior::DirectGarbage => (
            [(header::CONTENT_TYPE, "audio/mpeg")],
            b"not an mpeg stream".to_vec(),
        )
            .into_response(),
        MockBehavior::Error { status } => StatusCode::from_u16(*status).unwrap().into_response(),
        MockBehavior::EmptyUnknown => (
            [(header::CONTENT_TYPE, "application/x-unknown")],
            Vec::<u8>::new(),
        )
            .into_response(),
    }
}

/// Serve a one-route chat-completions mock on an ephemeral port.
pub async fn spawn_provider(behavior: MockBehavior, delay: Duration) -> MockProvider {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        behavior,
        delay,
        hits: Arc::clone(&hits),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(synthesize))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProvider {
        endpoint: format!("http://{addr}/v1/chat/completions"),
        hits,
    }
}

pub fn studio_for(provider: &MockProvider) -> SpeechStudio {
    studio_with_sink(provider, Arc::new(DiscardSink))
}

pub fn studio_with_sink(provider: &MockProvider, sink: Arc<dyn AudioSink>) -> SpeechStudio {
    let config = ProviderConfig::default().with_endpoint(provider.endpoint.clone());
    SpeechStudio::new(ProviderClient::new(config), sink)
}

/// Sink that records what it was asked to play.
pub struct RecordingSink {
    pub played: Arc<Mutex<Vec<(String, usize)>>>,
    pub delay: Duration,
}

impl RecordingSink {
    pub fn new(delay: Duration) -> (Arc<Self>, Arc<Mutex<Vec<(String, usize)>>>) {
        let played = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::new(Self {
            played: Arc::clone(&played),
            delay,
        });
        (sink, played)
    }
}

#[async_trait]
impl AudioSink for RecordingSink {
    async fn play(&self, clip: &AudioClip) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        self.played
            .lock()
            .unwrap()
            .push((clip.mime().to_string(), clip.len()));
        Ok(())
    }
}

/// Sink whose playback always errors.
pub struct FailingSink;

#[async_trait]
impl AudioSink for FailingSink {
    async fn play(&self, _clip: &AudioClip) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("device unavailable"))
    }
}
