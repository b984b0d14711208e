//! Link-activation interception. Decides, for every click bubbling to the
//! document body, whether platform navigation is suppressed in favour of an
//! in-app transition.

use thiserror::Error;

/// The nearest enclosing anchor-like element resolved from an activation
/// target, as reported by the platform shell.
#[derive(Debug, Clone, Default)]
pub struct AnchorTarget {
    pub href: Option<String>,
    /// The anchor's viewing-context attribute (`_blank` etc).
    pub target: Option<String>,
    /// Explicit "do not route in-app" marker on the element.
    pub no_route: bool,
}

/// A document-level activation event after anchor resolution.
#[derive(Debug, Clone, Default)]
pub struct LinkActivation {
    pub anchor: Option<AnchorTarget>,
    pub meta_key: bool,
    pub ctrl_key: bool,
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("anchor element has no href attribute")]
    MissingHref,
}

/// Outcome of classifying one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Not our concern; platform default applies.
    Pass,
    /// Diagnostic-worthy but never fatal; platform default applies.
    MissingHref,
    /// Target equals the current route; suppressed, nothing to do.
    AlreadyHere,
    /// Pure in-page fragment reference. Scroll is captured but the renderer
    /// is not invoked; the in-page jump stays with the platform.
    Fragment { fragment: String },
    /// In-app transition to `target`.
    Navigate { target: String },
}

impl Decision {
    /// Whether platform default navigation is suppressed for this activation.
    pub fn intercepts(&self) -> bool {
        matches!(
            self,
            Decision::AlreadyHere | Decision::Fragment { .. } | Decision::Navigate { .. }
        )
    }
}

/// Classify an activation against the current route, short-circuiting on the
/// first match. Pure; the surrounding driver owns scroll capture, referrer
/// attribution and the renderer call.
pub fn classify(activation: &LinkActivation, current_route: &str) -> Decision {
    let Some(anchor) = activation.anchor.as_ref() else {
        return Decision::Pass;
    };

    let href = match anchor.href.as_deref() {
        Some(href) if !href.is_empty() => href,
        _ => return Decision::MissingHref,
    };

    // External viewing context, explicit opt-out, absolute different-origin
    // prefix, or an "open in new context" modifier: let the platform route.
    if anchor.target.as_deref() == Some("_blank")
        || anchor.no_route
        || href.contains("//")
        || activation.meta_key
        || activation.ctrl_key
    {
        return Decision::Pass;
    }

    // Inline-script pseudo-scheme; the platform will reject it.
    if href.starts_with("javascript:") {
        return Decision::Pass;
    }

    if href == current_route {
        return Decision::AlreadyHere;
    }

    if let Some(fragment) = href.strip_prefix('#') {
        return Decision::Fragment {
            fragment: fragment.to_string(),
        };
    }

    Decision::Navigate {
        target: href.to_string(),
    }
}
