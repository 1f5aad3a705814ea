//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Cheap-to-clone handle bundle shared across concurrent requests.
///
/// Services are stateless per call; all mutable state lives behind the
/// repositories they hold.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    /// Public base URL used to compose shareable short URLs.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        auth_service: Arc<AuthService>,
        base_url: String,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            base_url,
        }
    }
}
