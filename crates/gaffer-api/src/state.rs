//! Application state shared across all route handlers.
//!
//! Everything the chat engine needs is read-only after startup; the only
//! mutable slot is the session context written by login.

use std::sync::{Arc, Mutex};

use gaffer_core::config::GafferConfig;
use gaffer_core::types::{FeatureRegistry, SessionContext};
use gaffer_chat::DialogueOrchestrator;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks; the
/// session slot is the single piece of mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<GafferConfig>,
    /// The chat engine, built once at startup.
    pub orchestrator: Arc<DialogueOrchestrator>,
    /// Feature registry, also read by the suggestions endpoint.
    pub registry: Arc<FeatureRegistry>,
    /// Authenticated session context, set by login.
    pub session: Arc<Mutex<Option<SessionContext>>>,
}

impl AppState {
    /// Create a new AppState over the startup-built components.
    pub fn new(
        config: GafferConfig,
        orchestrator: DialogueOrchestrator,
        registry: Arc<FeatureRegistry>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            registry,
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// The current session context, if a login happened.
    pub fn session_context(&self) -> Option<SessionContext> {
        self.session.lock().ok().and_then(|s| *s)
    }
}
