//! Reconciliation of platform back/forward signals. The platform only
//! reports a target route; push and pop are not distinguishable from the
//! signal itself.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopAction {
    /// Known-spurious signal, absorbed entirely.
    Absorb,
    /// Genuine back/forward movement; render the reported route without
    /// mutating history (the platform already moved it).
    Navigate,
}

/// One-shot absorption of the spurious back/forward signal at least one
/// mainstream browser fires on initial page load.
#[derive(Debug, Default)]
pub struct PopTracker {
    absorbed_initial: bool,
}

impl PopTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the reported route against the jointly tracked current route.
    /// The first signal that matches it is absorbed exactly once; everything
    /// after that is processed normally, even to the same route.
    pub fn observe(&mut self, reported: &str, tracked: &str) -> PopAction {
        if reported == tracked && !self.absorbed_initial {
            self.absorbed_initial = true;
            debug!(target = "history", route = reported, "absorbed initial pop signal");
            return PopAction::Absorb;
        }
        PopAction::Navigate
    }
}
