//! ShortLink entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by the user who created it.
///
/// `original_url` and `short_code` are unique across all live records.
/// `visit_count` starts at 0 and only ever grows; it is bumped by the
/// storage layer once per successful redirect resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub visit_count: i64,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        owner_id: i64,
        created_at: DateTime<Utc>,
        visit_count: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            owner_id,
            created_at,
            visit_count,
        }
    }
}

/// Input data for creating a new short link.
///
/// `visit_count` and `created_at` are supplied by storage (0 and now).
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub owner_id: i64,
}
