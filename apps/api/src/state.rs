use std::sync::Arc;

use crate::assistant::SessionStore;
use crate::profile::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable résumé data, loaded once at startup.
    pub profile: Arc<ProfileStore>,
    /// Open assistant panels. Holds the generator behind `Arc<dyn Generator>`.
    pub sessions: Arc<SessionStore>,
}
