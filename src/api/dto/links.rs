//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The original URL to shorten (must be absolute HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    /// Full shareable URL: the configured base joined with the code.
    pub short_url: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub visit_count: i64,
}

impl LinkResponse {
    /// Builds the wire representation of `link` for the given public base URL.
    pub fn from_link(link: &ShortLink, base_url: &str) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url.clone(),
            short_code: link.short_code.clone(),
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), link.short_code),
            owner_id: link.owner_id,
            created_at: link.created_at,
            visit_count: link.visit_count,
        }
    }
}
