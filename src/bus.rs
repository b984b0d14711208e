//! Process-wide publish/subscribe hub. Deliberately minimal: no priorities,
//! no once-semantics, no wildcards. Dispatch is synchronous and depth-first;
//! re-entrant emits run to completion before the outer dispatch resumes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::time::SystemTime;

use tracing::error;

use crate::platform::{Notice, NotificationPayload, TitleProps};
use crate::state::Theme;

/// The closed set of events carried on the bus, with per-variant payloads.
#[derive(Debug, Clone)]
pub enum Event {
    SetTitle(TitleProps),
    PageLoad(TitleProps),
    /// Request to leave for the desktop experience at the given route.
    DesktopRedirect { route: String },
    CompactToggle(bool),
    ThemeToggle(Theme),
    AgeGateToggle(bool),
    Notification(NotificationPayload),
    /// Dismissal of a global message; the record persists until the
    /// message's own declared expiry.
    HideGlobalMessage { key: String, expires: SystemTime },
    OverlayMenu(bool),
    SetMetaColor(String),
    /// Doubles as the "close all dropdowns" broadcast.
    DropdownOpen,
    Scroll,
    Resize,
    Toaster(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SetTitle,
    PageLoad,
    DesktopRedirect,
    CompactToggle,
    ThemeToggle,
    AgeGateToggle,
    Notification,
    HideGlobalMessage,
    OverlayMenu,
    SetMetaColor,
    DropdownOpen,
    Scroll,
    Resize,
    Toaster,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SetTitle(_) => EventKind::SetTitle,
            Event::PageLoad(_) => EventKind::PageLoad,
            Event::DesktopRedirect { .. } => EventKind::DesktopRedirect,
            Event::CompactToggle(_) => EventKind::CompactToggle,
            Event::ThemeToggle(_) => EventKind::ThemeToggle,
            Event::AgeGateToggle(_) => EventKind::AgeGateToggle,
            Event::Notification(_) => EventKind::Notification,
            Event::HideGlobalMessage { .. } => EventKind::HideGlobalMessage,
            Event::OverlayMenu(_) => EventKind::OverlayMenu,
            Event::SetMetaColor(_) => EventKind::SetMetaColor,
            Event::DropdownOpen => EventKind::DropdownOpen,
            Event::Scroll => EventKind::Scroll,
            Event::Resize => EventKind::Resize,
            Event::Toaster(_) => EventKind::Toaster,
        }
    }
}

type Handler<C> = Rc<dyn Fn(&C, &Event)>;

/// Subscriber registry. Owns nothing but the handler lists; insertion order
/// defines invocation order.
pub struct EventBus<C> {
    handlers: RefCell<HashMap<EventKind, Vec<Handler<C>>>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(HashMap::new()),
        }
    }

    /// Register a handler for one event kind. Duplicates are kept.
    pub fn on(&self, kind: EventKind, handler: impl Fn(&C, &Event) + 'static) {
        self.handlers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Synchronously invoke every handler registered for the event's kind, in
    /// registration order. A panicking handler is isolated so the remaining
    /// handlers still run.
    pub fn emit(&self, ctx: &C, event: &Event) {
        // Snapshot before invoking: handlers may register more handlers or
        // emit further events while we dispatch.
        let snapshot: Vec<Handler<C>> = self
            .handlers
            .borrow()
            .get(&event.kind())
            .map(|handlers| handlers.to_vec())
            .unwrap_or_default();

        for handler in snapshot {
            if catch_unwind(AssertUnwindSafe(|| handler(ctx, event))).is_err() {
                error!(
                    target = "bus",
                    kind = ?event.kind(),
                    "event handler panicked; continuing with remaining handlers"
                );
            }
        }
    }
}
