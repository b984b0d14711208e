//! Client-side navigation and event orchestration for a server-rendered,
//! progressively-enhanced app: link interception, history synchronization,
//! per-route scroll preservation, and the ambient event handlers around them.
//!
//! The engine is single-threaded and event-loop-driven. The embedding shell
//! forwards raw platform events (clicks, pops, scroll, resize, connectivity)
//! into [`App`] and implements the collaborator traits in [`platform`].

pub mod app;
pub mod bus;
pub mod config;
pub mod handlers;
pub mod history;
pub mod intercept;
pub mod pages;
pub mod platform;
pub mod prefs;
pub mod route;
pub mod scroll;
pub mod state;
pub mod throttle;

pub use app::{App, Collaborators};
pub use bus::{Event, EventBus, EventKind};
pub use config::AppConfig;
pub use intercept::{AnchorTarget, Decision, LinkActivation};
pub use state::{AppState, StateChange, Theme};
