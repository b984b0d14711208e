use serde::{Deserialize, Serialize};

/// Visual mode applied to the document root. Exactly one marker class is
/// present at any time; older platforms cannot add/remove multiple classes
/// atomically, so the apply step clears every known marker first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Day,
    Night,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Day, Theme::Night];

    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Day => "day-mode",
            Theme::Night => "night-mode",
        }
    }
}

/// Externally observable app state, read by the renderer and page components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub compact: bool,
    pub theme: Theme,
    pub referrer: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            compact: false,
            theme: Theme::Day,
            referrer: None,
        }
    }
}

/// A single typed mutation of [`AppState`]. Applied directly, never
/// re-dispatched through the event bus.
#[derive(Debug, Clone)]
pub enum StateChange {
    Compact(bool),
    Theme(Theme),
    Referrer(String),
}

impl AppState {
    pub fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::Compact(compact) => self.compact = compact,
            StateChange::Theme(theme) => self.theme = theme,
            StateChange::Referrer(referrer) => self.referrer = Some(referrer),
        }
    }
}
