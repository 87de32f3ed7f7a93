//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortLinkService;

/// Application state cloned into each request.
///
/// Holds only handles to shared resources (the service owns the pool handle
/// and cache client); there is no per-process mutable state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<ShortLinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<ShortLinkService>) -> Self {
        Self { link_service }
    }
}
