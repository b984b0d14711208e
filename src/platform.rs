//! Interfaces to the external collaborators the engine drives but does not
//! own: the renderer, the error reporter, the title setter, the notification
//! presenter and the platform surface (history, scroll, root classes).

use std::time::SystemTime;

use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prefs::PreferenceStore;

/// Properties handed to the title setter on explicit title changes and on
/// page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleProps {
    pub title: String,
}

/// Payload for an in-app notification; display is decided by the
/// [`NotificationSink`] collaborator, which consults the preference store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Friendly,
    Error,
}

/// A transient user-facing notice (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Recovery directive attached to every error report. Non-destructive by
/// default: the user's current view is still valid and must not be torn down
/// speculatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPolicy {
    pub replace_body: bool,
    pub redirect: bool,
}

impl ReportPolicy {
    pub fn non_destructive() -> Self {
        Self {
            replace_body: false,
            redirect: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    /// True for in-app transitions, false for full reloads.
    pub in_app: bool,
    pub referrer: Option<String>,
}

/// One render invocation. `from` is absent for the initial render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub from: Option<String>,
    pub to: String,
    pub push_history: bool,
    pub context: RenderContext,
}

#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub route: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),
}

/// Materializes a route's content. Asynchronous; the engine awaits completion
/// before triggering scroll restoration via `post_render`.
pub trait Renderer {
    fn render(&self, request: RenderRequest) -> LocalBoxFuture<'_, Result<RenderOutcome, RenderError>>;

    /// Restore the captured scroll offset (or reset to top) for `route` after
    /// its content has finished loading.
    fn post_render(&self, route: &str);
}

pub trait ErrorReporter {
    fn report(&self, error: &dyn std::error::Error, context: &str, policy: ReportPolicy);
}

pub trait TitleSetter {
    fn set_title(&self, props: &TitleProps);
}

/// Decides whether and how to display a notification, consulting persisted
/// dismissal state.
pub trait NotificationSink {
    fn present(&self, prefs: &PreferenceStore, notification: &NotificationPayload);
}

/// The mutable platform surface: history, scroll position, viewport and the
/// document root's class list. The engine is the only writer during a
/// navigation; see the ordering guarantees in the crate docs.
pub trait DomSurface {
    /// Current route (path + query, no origin).
    fn full_path(&self) -> String;

    /// Current vertical scroll offset in pixels.
    fn scroll_y(&self) -> u32;

    fn viewport_width(&self) -> u32;

    fn host(&self) -> String;

    /// Push a new history entry without reloading.
    fn push_history(&self, route: &str);

    /// Full (non-in-app) navigation to an absolute URL.
    fn assign_location(&self, url: &str);

    fn add_root_class(&self, class: &str);
    fn remove_root_class(&self, class: &str);
    fn root_has_class(&self, class: &str) -> bool;

    /// Attach or detach the touch-scroll blocker for the overlay menu.
    /// Overflow suppression alone does not stop background scrolling on at
    /// least one mobile rendering engine.
    fn set_overlay_scroll_lock(&self, locked: bool);

    fn set_meta_color(&self, color: &str);
}

/// Expiry helper for preference records: absolute time `days` from now.
pub fn days_from_now(days: u64) -> SystemTime {
    SystemTime::now() + std::time::Duration::from_secs(days * 24 * 60 * 60)
}
