use rand::Rng;
use std::ops::Range;
use std::time::Duration;

/// Randomized pauses between UI actions so the session reads like a person
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    enabled: bool,
}

impl Pacing {
    pub fn human() -> Self {
        Self { enabled: true }
    }

    /// No pauses at all; used for tests and dry runs against local pages
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Between two UI steps
    pub async fn step(&self) {
        self.pause(1.0..5.0).await
    }

    /// After finishing a typed field
    pub async fn after_typing(&self) {
        self.pause(1.0..2.0).await
    }

    /// Between two keystrokes
    pub async fn keystroke(&self) {
        self.pause(0.05..0.15).await
    }

    /// Waiting for a heavy page (post-login redirect, inbox) to settle
    pub async fn settle(&self) {
        self.pause(10.0..15.0).await
    }

    async fn pause(&self, secs: Range<f64>) {
        if !self.enabled {
            return;
        }
        let delay = Duration::from_secs_f64(rand::thread_rng().gen_range(secs));
        tracing::trace!("Pausing for {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::human()
    }
}
