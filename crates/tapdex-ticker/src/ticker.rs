//! Second-granularity pausable tick loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info};

/// A pausable periodic trigger.
///
/// Cloning is cheap; clones share the pause flag and the elapsed
/// counter, so one handle can run the loop while another drives
/// pause/resume and reads the countdown.
#[derive(Clone)]
pub struct Ticker {
    trigger_every: Duration,
    paused: Arc<AtomicBool>,
    elapsed_secs: Arc<AtomicU64>,
}

impl Ticker {
    /// Create a ticker that fires every `trigger_every`. Sub-second
    /// intervals round up to one second.
    pub fn new(trigger_every: Duration) -> Self {
        let trigger_every = trigger_every.max(Duration::from_secs(1));
        Self {
            trigger_every,
            paused: Arc::new(AtomicBool::new(false)),
            elapsed_secs: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
        debug!("ticker paused");
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
        debug!("ticker resumed");
    }

    /// Flip the pause state and return whether the ticker is now
    /// paused.
    pub fn toggle(&self) -> bool {
        let was = self.paused.fetch_xor(true, Ordering::Relaxed);
        !was
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Whole seconds until the next trigger. Frozen while paused.
    pub fn seconds_until_tick(&self) -> u64 {
        let interval = self.trigger_every.as_secs();
        interval.saturating_sub(self.elapsed_secs.load(Ordering::Relaxed))
    }

    /// Run the tick loop until the shutdown channel flips.
    ///
    /// `on_tick` fires once per elapsed interval while running; paused
    /// seconds do not advance the countdown.
    pub async fn run<F>(&self, mut on_tick: F, mut shutdown: tokio::sync::watch::Receiver<bool>)
    where
        F: FnMut(),
    {
        info!(
            interval_secs = self.trigger_every.as_secs(),
            "ticker started"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    if self.is_paused() {
                        continue;
                    }
                    let elapsed = self.elapsed_secs.fetch_add(1, Ordering::Relaxed) + 1;
                    if elapsed >= self.trigger_every.as_secs() {
                        self.elapsed_secs.store(0, Ordering::Relaxed);
                        on_tick();
                    }
                }
                _ = shutdown.changed() => {
                    info!("ticker shutting down");
                    break;
                }
            }
        }
    }
}

/// Format a second count as `MM:SS`, or `HH:MM:SS` once it reaches an
/// hour.
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
