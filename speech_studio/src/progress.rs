use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Default tick cadence.
pub const TICK: Duration = Duration::from_millis(200);
/// Simulated progress parks here until the real response arrives.
pub const HOLD_AT: u8 = 90;
/// Upper bound of the random per-tick increment.
pub const MAX_STEP: u8 = 15;

/// Cosmetic progress for one in-flight request.
///
/// The value is perceived progress only; the true completion signal is the
/// network response. Ticks add a random increment but never pass `HOLD_AT`;
/// `complete` stores exactly 100. Dropping the simulator aborts the ticker
/// without touching the value, so it can never race a real completion.
pub struct ProgressSimulator {
    value: Arc<AtomicU8>,
    ticker: JoinHandle<()>,
}

impl ProgressSimulator {
    pub fn start(value: Arc<AtomicU8>) -> Self {
        Self::with_tick(value, TICK)
    }

    /// Tick cadence is a parameter so tests can run the ticker hot.
    pub fn with_tick(value: Arc<AtomicU8>, tick: Duration) -> Self {
        value.store(0, Ordering::SeqCst);
        let ticker = tokio::spawn({
            let value = Arc::clone(&value);
            async move {
                let mut interval = tokio::time::interval(tick);
                interval.tick().await; // first tick fires immediately
                loop {
                    interval.tick().await;
                    let step = rand::thread_rng().gen_range(0..=MAX_STEP);
                    let current = value.load(Ordering::SeqCst);
                    value.store(current.saturating_add(step).min(HOLD_AT), Ordering::SeqCst);
                }
            }
        });
        Self { value, ticker }
    }

    /// The real response arrived: stop ticking and report exactly 100.
    pub fn complete(self) {
        self.ticker.abort();
        self.value.store(100, Ordering::SeqCst);
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
