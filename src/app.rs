//! Engine wiring: owns the bus, the shared navigation context and the
//! collaborator handles, and drives the interceptor/synchronizer algorithms.
//! Single-threaded and event-loop-driven; the only suspension point is the
//! renderer boundary.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, warn};
use url::Url;

use crate::bus::{Event, EventBus, EventKind};
use crate::config::AppConfig;
use crate::handlers::register_ambient_handlers;
use crate::history::{PopAction, PopTracker};
use crate::intercept::{classify, Decision, LinkActivation, LinkError};
use crate::platform::{
    DomSurface, ErrorReporter, Notice, NoticeKind, NotificationSink, RenderContext, RenderRequest,
    Renderer, ReportPolicy, TitleSetter,
};
use crate::prefs::{CookieStore, PreferenceStore};
use crate::route::RouteState;
use crate::scroll::ScrollCache;
use crate::state::{AppState, StateChange};
use crate::throttle::Throttle;

const DISCONNECTED_MESSAGE: &str = "You have been disconnected from the internet.";
const CONNECTED_MESSAGE: &str = "You have been reconnected to the internet.";

/// External collaborators handed to the engine at construction.
pub struct Collaborators {
    pub renderer: Rc<dyn Renderer>,
    pub reporter: Rc<dyn ErrorReporter>,
    pub titles: Rc<dyn TitleSetter>,
    pub notifier: Rc<dyn NotificationSink>,
    pub dom: Rc<dyn DomSurface>,
    pub cookies: Rc<dyn CookieStore>,
}

pub struct App {
    bus: EventBus<App>,
    pub(crate) config: AppConfig,
    state: RefCell<AppState>,
    pub(crate) prefs: PreferenceStore,
    scroll: RefCell<ScrollCache>,
    route: RefCell<RouteState>,
    pops: RefCell<PopTracker>,
    online: Cell<bool>,
    scroll_gate: RefCell<Throttle>,
    resize_gate: RefCell<Throttle>,
    last_width: Cell<u32>,
    render_generation: Cell<u64>,
    pub(crate) renderer: Rc<dyn Renderer>,
    pub(crate) reporter: Rc<dyn ErrorReporter>,
    pub(crate) titles: Rc<dyn TitleSetter>,
    pub(crate) notifier: Rc<dyn NotificationSink>,
    pub(crate) dom: Rc<dyn DomSurface>,
}

impl App {
    pub fn new(collaborators: Collaborators, config: AppConfig) -> Self {
        let Collaborators {
            renderer,
            reporter,
            titles,
            notifier,
            dom,
            cookies,
        } = collaborators;

        let bus = EventBus::new();
        register_ambient_handlers(&bus);

        let initial_route = dom.full_path();
        let initial_width = dom.viewport_width();

        Self {
            bus,
            config,
            state: RefCell::new(AppState::default()),
            prefs: PreferenceStore::new(cookies),
            scroll: RefCell::new(ScrollCache::new()),
            route: RefCell::new(RouteState::new(initial_route)),
            pops: RefCell::new(PopTracker::new()),
            online: Cell::new(true),
            scroll_gate: RefCell::new(Throttle::default()),
            resize_gate: RefCell::new(Throttle::default()),
            last_width: Cell::new(initial_width),
            render_generation: Cell::new(0),
            renderer,
            reporter,
            titles,
            notifier,
            dom,
        }
    }

    /// Register an additional bus subscriber (embedder UI hooks).
    pub fn on(&self, kind: EventKind, handler: impl Fn(&App, &Event) + 'static) {
        self.bus.on(kind, handler);
    }

    /// Broadcast an event to every subscriber, synchronously and in
    /// registration order.
    pub fn emit(&self, event: Event) {
        self.bus.emit(self, &event);
    }

    /// Direct typed mutation of app state; not a re-dispatch.
    pub fn set_state(&self, change: StateChange) {
        self.state.borrow_mut().apply(change);
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn current_route(&self) -> String {
        self.route.borrow().current().to_string()
    }

    pub fn scroll_offset(&self, route: &str) -> Option<u32> {
        self.scroll.borrow().recall(route)
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.prefs
    }

    /// Entry point for document-level link activations. Returns whether
    /// platform default navigation was suppressed.
    pub async fn handle_link_activation(&self, activation: &LinkActivation) -> bool {
        let current = self.current_route();
        let decision = classify(activation, &current);

        match decision {
            Decision::Pass => false,
            Decision::MissingHref => {
                self.reporter.report(
                    &LinkError::MissingHref,
                    "link-activation",
                    ReportPolicy::non_destructive(),
                );
                false
            }
            Decision::AlreadyHere => true,
            Decision::Fragment { .. } => {
                // The in-page jump stays with the platform; remember where
                // we were in case the user navigates away from the fragment.
                self.capture_scroll(&current);
                true
            }
            Decision::Navigate { target } => {
                self.capture_scroll(&current);
                // Attribute the navigation before transitioning.
                self.set_state(StateChange::Referrer(self.absolute_route(&current)));
                self.route.borrow_mut().advance(target.clone());
                self.dom.push_history(&target);
                self.render_route(Some(current), target, true).await;
                true
            }
        }
    }

    /// Entry point for platform back/forward signals. The platform already
    /// moved history, so the render runs in no-history-mutation mode.
    pub async fn handle_history_pop(&self, reported: &str) {
        let current = self.current_route();
        let action = self.pops.borrow_mut().observe(reported, &current);
        if action == PopAction::Absorb {
            return;
        }

        self.capture_scroll(&current);
        self.route.borrow_mut().advance(reported.to_string());
        self.render_route(Some(current), reported.to_string(), false)
            .await;
    }

    /// Connectivity transitions. The platform may repeat signals for one
    /// logical drop or restore; only genuine transitions produce a notice.
    pub fn handle_connectivity(&self, online: bool) {
        if self.online.get() == online {
            return;
        }
        self.online.set(online);

        let notice = if online {
            Notice {
                kind: NoticeKind::Friendly,
                message: CONNECTED_MESSAGE.to_string(),
            }
        } else {
            Notice {
                kind: NoticeKind::Error,
                message: DISCONNECTED_MESSAGE.to_string(),
            }
        };
        self.emit(Event::Toaster(notice));
    }

    /// Document-level click outside any dropdown closes them all, by reusing
    /// the dropdown-open event as a toggle broadcast.
    pub fn handle_global_click(&self, inside_dropdown: bool) {
        if !inside_dropdown {
            self.emit(Event::DropdownOpen);
        }
    }

    /// Throttled window-scroll listener. Keeps the cache entry for the
    /// current route fresh so an in-flight content load that changes page
    /// height doesn't strand the user at the wrong offset.
    pub fn handle_window_scroll(&self, now: Instant) {
        if !self.scroll_gate.borrow_mut().allow(now) {
            return;
        }
        self.emit(Event::Scroll);

        let current = self.current_route();
        self.capture_scroll(&current);
    }

    /// Throttled window-resize listener. Width only: on-screen keyboards and
    /// browser chrome show/hide change the height without a genuine resize.
    pub fn handle_window_resize(&self, now: Instant) {
        if !self.resize_gate.borrow_mut().allow(now) {
            return;
        }

        let width = self.dom.viewport_width();
        if width == self.last_width.get() {
            return;
        }
        self.last_width.set(width);
        self.emit(Event::Resize);
    }

    /// Unhandled asynchronous failures. Forwarded with a non-destructive
    /// policy; the current view is still valid and this path must never
    /// itself cause a navigation.
    pub fn handle_unhandled_failure(&self, error: &dyn Error) {
        self.reporter
            .report(error, "unhandled-rejection", ReportPolicy::non_destructive());
    }

    fn capture_scroll(&self, route: &str) {
        let offset = self.dom.scroll_y();
        self.scroll.borrow_mut().capture(route, offset);
    }

    fn absolute_route(&self, route: &str) -> String {
        absolutize(&self.config.origin, route)
    }

    async fn render_route(&self, from: Option<String>, to: String, push_history: bool) {
        // A later navigation bumps the generation; a render completing after
        // that must not restore scroll for a view the user already left.
        let generation = self.render_generation.get().wrapping_add(1);
        self.render_generation.set(generation);

        let context = RenderContext {
            in_app: true,
            referrer: self.state.borrow().referrer.clone(),
        };
        let request = RenderRequest {
            from,
            to: to.clone(),
            push_history,
            context,
        };

        match self.renderer.render(request).await {
            Ok(_) => {
                if self.render_generation.get() != generation {
                    debug!(target = "nav", route = %to, "stale render completion suppressed");
                    return;
                }
                self.renderer.post_render(&to);
            }
            Err(err) => {
                warn!(target = "nav", route = %to, error = %err, "render failed");
                self.reporter
                    .report(&err, "render", ReportPolicy::non_destructive());
            }
        }
    }
}

/// Absolutize a route against the app origin for referrer attribution.
/// Falls back to the raw route when the origin is unusable.
fn absolutize(origin: &str, route: &str) -> String {
    Url::parse(origin)
        .ok()
        .and_then(|base| base.join(route).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| route.to_string())
}
