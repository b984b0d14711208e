use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::SystemTime;

use thiserror::Error;
use tracing::debug;

/// Write options for a persisted preference entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    /// Absolute expiry; session-lived when absent.
    pub expires: Option<SystemTime>,
    /// Root-domain scope when set; current host otherwise. A preference that
    /// must suppress redirects across subdomains has to be visible to the
    /// root domain or the consuming system enters a redirect loop.
    pub domain: Option<String>,
}

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("persistent store unavailable")]
    Unavailable,
}

/// The cookie-equivalent persistent store collaborator.
pub trait CookieStore {
    fn set(&self, key: &str, value: &str, options: CookieOptions) -> Result<(), CookieError>;
    fn get(&self, key: &str) -> Result<Option<String>, CookieError>;
}

/// Thin wrapper over the persistent store. Preference loss is acceptable;
/// crashing is not, so store failures degrade to no-ops/absent.
#[derive(Clone)]
pub struct PreferenceStore {
    store: Rc<dyn CookieStore>,
}

impl PreferenceStore {
    pub fn new(store: Rc<dyn CookieStore>) -> Self {
        Self { store }
    }

    pub fn set(&self, key: &str, value: &str, options: CookieOptions) {
        if let Err(err) = self.store.set(key, value, options) {
            debug!(target = "prefs", key, error = %err, "preference write dropped");
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                debug!(target = "prefs", key, error = %err, "preference read failed");
                None
            }
        }
    }

    /// Clear a key by expiring it immediately.
    pub fn remove(&self, key: &str) {
        self.set(
            key,
            "",
            CookieOptions {
                expires: Some(SystemTime::UNIX_EPOCH),
                domain: None,
            },
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub value: String,
    pub expires: Option<SystemTime>,
    pub domain: Option<String>,
}

/// In-memory store honouring expiry. Used by tests and by embedders that run
/// without a persistence medium.
#[derive(Default)]
pub struct MemoryCookies {
    entries: RefCell<HashMap<String, StoredCookie>>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry including expiry and domain scope, for inspection.
    pub fn entry(&self, key: &str) -> Option<StoredCookie> {
        self.entries.borrow().get(key).cloned()
    }
}

impl CookieStore for MemoryCookies {
    fn set(&self, key: &str, value: &str, options: CookieOptions) -> Result<(), CookieError> {
        self.entries.borrow_mut().insert(
            key.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires: options.expires,
                domain: options.domain,
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CookieError> {
        let entries = self.entries.borrow();
        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };
        if let Some(expires) = entry.expires {
            if expires <= SystemTime::now() {
                return Ok(None);
            }
        }
        Ok(Some(entry.value.clone()))
    }
}
