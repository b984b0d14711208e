use std::time::{Duration, Instant};

/// Leading-edge rate limiter for storm-prone listeners (scroll, resize).
/// Fed an explicit `Instant` so it stays decoupled from any timer primitive.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Interval used by the window listeners; bounds them to ~10 events/s.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when the event should pass; events inside the cooldown window are
    /// dropped, trading fidelity for avoiding event storms.
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
