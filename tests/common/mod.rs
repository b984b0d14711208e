//! Fake collaborators shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use tokio::sync::oneshot;

use wayfare::intercept::{AnchorTarget, LinkActivation};
use wayfare::platform::{
    DomSurface, ErrorReporter, NotificationPayload, NotificationSink, RenderError, RenderOutcome,
    RenderRequest, Renderer, ReportPolicy, TitleProps, TitleSetter,
};
use wayfare::prefs::{CookieError, CookieOptions, CookieStore, MemoryCookies, PreferenceStore};
use wayfare::{App, AppConfig, Collaborators};

pub struct FakeDom {
    pub path: RefCell<String>,
    pub host: RefCell<String>,
    pub scroll_y: Cell<u32>,
    pub width: Cell<u32>,
    pub history: RefCell<Vec<String>>,
    pub assigned: RefCell<Vec<String>>,
    pub classes: RefCell<Vec<String>>,
    pub overlay_locks: RefCell<Vec<bool>>,
    pub meta_colors: RefCell<Vec<String>>,
}

impl FakeDom {
    pub fn new(path: &str) -> Rc<Self> {
        Rc::new(Self {
            path: RefCell::new(path.to_string()),
            host: RefCell::new("m.example.com".to_string()),
            scroll_y: Cell::new(0),
            width: Cell::new(375),
            history: RefCell::new(Vec::new()),
            assigned: RefCell::new(Vec::new()),
            classes: RefCell::new(Vec::new()),
            overlay_locks: RefCell::new(Vec::new()),
            meta_colors: RefCell::new(Vec::new()),
        })
    }
}

impl DomSurface for FakeDom {
    fn full_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn scroll_y(&self) -> u32 {
        self.scroll_y.get()
    }

    fn viewport_width(&self) -> u32 {
        self.width.get()
    }

    fn host(&self) -> String {
        self.host.borrow().clone()
    }

    fn push_history(&self, route: &str) {
        self.history.borrow_mut().push(route.to_string());
        *self.path.borrow_mut() = route.to_string();
    }

    fn assign_location(&self, url: &str) {
        self.assigned.borrow_mut().push(url.to_string());
    }

    fn add_root_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_root_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|existing| existing != class);
    }

    fn root_has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|existing| existing == class)
    }

    fn set_overlay_scroll_lock(&self, locked: bool) {
        self.overlay_locks.borrow_mut().push(locked);
    }

    fn set_meta_color(&self, color: &str) {
        self.meta_colors.borrow_mut().push(color.to_string());
    }
}

#[derive(Default)]
pub struct FakeRenderer {
    pub requests: RefCell<Vec<RenderRequest>>,
    pub post_renders: RefCell<Vec<String>>,
    pub fail_next: Cell<bool>,
    /// When set, the next render waits on this before completing.
    pub gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl Renderer for FakeRenderer {
    fn render(
        &self,
        request: RenderRequest,
    ) -> LocalBoxFuture<'_, Result<RenderOutcome, RenderError>> {
        let route = request.to.clone();
        self.requests.borrow_mut().push(request);
        let fail = self.fail_next.replace(false);
        let gate = self.gate.borrow_mut().take();

        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if fail {
                Err(RenderError::Failed("render exploded".to_string()))
            } else {
                Ok(RenderOutcome { route })
            }
        })
    }

    fn post_render(&self, route: &str) {
        self.post_renders.borrow_mut().push(route.to_string());
    }
}

#[derive(Default)]
pub struct FakeReporter {
    pub reports: RefCell<Vec<(String, String, ReportPolicy)>>,
}

impl ErrorReporter for FakeReporter {
    fn report(&self, error: &dyn std::error::Error, context: &str, policy: ReportPolicy) {
        self.reports
            .borrow_mut()
            .push((error.to_string(), context.to_string(), policy));
    }
}

#[derive(Default)]
pub struct FakeTitles {
    pub titles: RefCell<Vec<String>>,
}

impl TitleSetter for FakeTitles {
    fn set_title(&self, props: &TitleProps) {
        self.titles.borrow_mut().push(props.title.clone());
    }
}

/// Presents a notification unless a dismissal record exists for its id.
#[derive(Default)]
pub struct FakeNotifier {
    pub presented: RefCell<Vec<NotificationPayload>>,
}

impl NotificationSink for FakeNotifier {
    fn present(&self, prefs: &PreferenceStore, notification: &NotificationPayload) {
        if prefs.get(&notification.id).is_none() {
            self.presented.borrow_mut().push(notification.clone());
        }
    }
}

/// A persistence medium the user agent has disabled.
pub struct UnavailableCookies;

impl CookieStore for UnavailableCookies {
    fn set(&self, _key: &str, _value: &str, _options: CookieOptions) -> Result<(), CookieError> {
        Err(CookieError::Unavailable)
    }

    fn get(&self, _key: &str) -> Result<Option<String>, CookieError> {
        Err(CookieError::Unavailable)
    }
}

pub struct Harness {
    pub app: App,
    pub dom: Rc<FakeDom>,
    pub renderer: Rc<FakeRenderer>,
    pub reporter: Rc<FakeReporter>,
    pub titles: Rc<FakeTitles>,
    pub notifier: Rc<FakeNotifier>,
    pub cookies: Rc<MemoryCookies>,
}

pub fn harness(path: &str) -> Harness {
    harness_with_config(path, AppConfig::default())
}

pub fn harness_with_config(path: &str, config: AppConfig) -> Harness {
    init_tracing();

    let dom = FakeDom::new(path);
    let renderer = Rc::new(FakeRenderer::default());
    let reporter = Rc::new(FakeReporter::default());
    let titles = Rc::new(FakeTitles::default());
    let notifier = Rc::new(FakeNotifier::default());
    let cookies = Rc::new(MemoryCookies::new());

    let app = App::new(
        Collaborators {
            renderer: renderer.clone(),
            reporter: reporter.clone(),
            titles: titles.clone(),
            notifier: notifier.clone(),
            dom: dom.clone(),
            cookies: cookies.clone(),
        },
        config,
    );

    Harness {
        app,
        dom,
        renderer,
        reporter,
        titles,
        notifier,
        cookies,
    }
}

/// Tracing may already be initialised by another test; continue silently.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .try_init();
}

pub fn click(href: &str) -> LinkActivation {
    LinkActivation {
        anchor: Some(AnchorTarget {
            href: Some(href.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
