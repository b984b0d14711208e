//! Ambient event-bus subscribers: side effects unrelated to navigation
//! itself (theme, overlay menu, preferences, desktop redirect, titles).

use tracing::debug;

use crate::app::App;
use crate::bus::{Event, EventBus, EventKind};
use crate::platform::days_from_now;
use crate::prefs::CookieOptions;
use crate::state::{StateChange, Theme};

/// Class toggled on the document root while the overlay menu is visible.
pub const OVERLAY_MENU_VISIBLE_CLASS: &str = "overlay-menu-visible";

/// Preference suppressing the mobile redirect on the desktop site.
pub const NO_REDIRECT_KEY: &str = "mobile-no-redirect";
pub const AGE_GATE_KEY: &str = "over18";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const GLOBAL_MESSAGE_SEEN: &str = "seen";

const DESKTOP_REDIRECT_EXPIRY_DAYS: u64 = 365;
const LOCAL_HOST_MARKER: &str = "localhost";

pub(crate) fn register_ambient_handlers(bus: &EventBus<App>) {
    bus.on(EventKind::SetTitle, |app, event| {
        if let Event::SetTitle(props) = event {
            app.titles.set_title(props);
        }
    });

    bus.on(EventKind::CompactToggle, |app, event| {
        if let Event::CompactToggle(compact) = event {
            app.set_state(StateChange::Compact(*compact));
        }
    });

    bus.on(EventKind::ThemeToggle, |app, event| {
        if let Event::ThemeToggle(theme) = event {
            app.set_state(StateChange::Theme(*theme));
            // Clear every known marker before applying the new one; old
            // platforms can't add/remove multiple classes in one call.
            for known in Theme::ALL {
                app.dom.remove_root_class(known.css_class());
            }
            app.dom.add_root_class(theme.css_class());
        }
    });

    bus.on(EventKind::AgeGateToggle, |app, event| {
        if let Event::AgeGateToggle(allowed) = event {
            app.prefs
                .set(AGE_GATE_KEY, &allowed.to_string(), CookieOptions::default());
        }
    });

    bus.on(EventKind::Notification, |app, event| {
        if let Event::Notification(notification) = event {
            app.notifier.present(&app.prefs, notification);
        }
    });

    bus.on(EventKind::PageLoad, |app, event| {
        if let Event::PageLoad(props) = event {
            app.titles.set_title(props);
            // Pending notifications were delivered with this page.
            app.prefs.remove(NOTIFICATIONS_KEY);
            // Restore the scroll position now that content has loaded.
            app.renderer.post_render(&app.current_route());
        }
    });

    bus.on(EventKind::HideGlobalMessage, |app, event| {
        if let Event::HideGlobalMessage { key, expires } = event {
            app.prefs.set(
                key,
                GLOBAL_MESSAGE_SEEN,
                CookieOptions {
                    expires: Some(*expires),
                    domain: None,
                },
            );
        }
    });

    bus.on(EventKind::OverlayMenu, |app, event| {
        if let Event::OverlayMenu(open) = event {
            if *open {
                if app.dom.root_has_class(OVERLAY_MENU_VISIBLE_CLASS) {
                    return;
                }
                app.dom.add_root_class(OVERLAY_MENU_VISIBLE_CLASS);
                app.dom.set_overlay_scroll_lock(true);
            } else {
                app.dom.remove_root_class(OVERLAY_MENU_VISIBLE_CLASS);
                app.dom.set_overlay_scroll_lock(false);
            }
        }
    });

    bus.on(EventKind::SetMetaColor, |app, event| {
        if let Event::SetMetaColor(color) = event {
            app.dom.set_meta_color(color);
        }
    });

    bus.on(EventKind::DesktopRedirect, |app, event| {
        if let Event::DesktopRedirect { route } = event {
            desktop_redirect(app, route);
        }
    });
}

/// Persist the redirect-suppression preference and leave for the desktop
/// site with a full page load.
fn desktop_redirect(app: &App, route: &str) {
    let mut options = CookieOptions {
        expires: Some(days_from_now(DESKTOP_REDIRECT_EXPIRY_DAYS)),
        domain: None,
    };

    // The preference must be readable by the root domain; scoped to a
    // subdomain, desktop keeps redirecting mobile users back and the two
    // sites loop. Development hosts get no explicit domain.
    if !app.dom.host().contains(LOCAL_HOST_MARKER) {
        options.domain = Some(app.config.root_domain.clone());
    }

    app.prefs.set(NO_REDIRECT_KEY, "1", options);

    let separator = if route.contains('?') { '&' } else { '?' };
    let target = format!(
        "{}{}{}{}",
        app.config.desktop_origin, route, separator, app.config.redirect_source_tag
    );

    debug!(target = "nav", url = %target, "leaving for desktop");
    app.dom.assign_location(&target);
}
