/// Frame-rate cap for the animation loop.
/// `requestAnimationFrame` fires at display rate; frames arriving sooner than
/// `interval_ms` after the last executed one are skipped.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval_ms: f64,
    /// Timestamp of the last executed frame (starts at 0)
    last_ms: f64,
}

impl FrameLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: 0.0,
        }
    }

    /// Returns true (and records `now_ms`) if a frame should run.
    pub fn should_run(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ms < self.interval_ms {
            return false;
        }
        self.last_ms = now_ms;
        true
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
