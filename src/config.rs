use serde::Deserialize;

/// Deployment-specific values the engine needs: where the app lives, where
/// the desktop experience lives, and the cookie scope that keeps the two
/// from bouncing users back and forth.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Absolute origin of this app, used to absolutize referrer routes.
    pub origin: String,
    /// Absolute origin of the desktop experience.
    pub desktop_origin: String,
    /// Root domain the redirect-suppression preference is scoped to. Must be
    /// the root and not a subdomain, or desktop cannot read the preference
    /// and the user loops between the two experiences.
    pub root_domain: String,
    /// Query parameter appended to desktop-redirect targets for attribution.
    pub redirect_source_tag: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            origin: "https://m.example.com".to_string(),
            desktop_origin: "https://www.example.com".to_string(),
            root_domain: "example.com".to_string(),
            redirect_source_tag: "utm_source=mobile_navbar".to_string(),
        }
    }
}
