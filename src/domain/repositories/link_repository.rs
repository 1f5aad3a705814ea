//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage port for short links.
///
/// Point lookups return at most one record; inserts surface uniqueness
/// conflicts as distinct error kinds so the service can tell a duplicate
/// original URL from a short-code allocation race. The visit counter is
/// incremented storage-side so concurrent resolutions never lose updates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link with `visit_count = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Duplicate`] if the original URL is already shortened
    /// - [`AppError::Conflict`] if the short code is already taken
    /// - [`AppError::Unavailable`] / [`AppError::Internal`] on storage failure
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its original URL (case-sensitive exact match).
    ///
    /// Used to check whether a URL has already been shortened.
    async fn find_by_original_url(&self, url: &str) -> Result<Option<ShortLink>, AppError>;

    /// Lists every link, newest first.
    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError>;

    /// Lists the links owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Atomically increments the visit counter for `id`.
    ///
    /// The increment is a single serialized read-modify-write at the storage
    /// layer; concurrent calls against the same record never lose updates.
    ///
    /// # Returns
    ///
    /// The counter value after the increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record vanished (e.g. a
    /// concurrent delete).
    async fn record_visit(&self, id: i64) -> Result<i64, AppError>;

    /// Deletes a link by id.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none
    /// existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all stored links. Used by health reporting.
    async fn count(&self) -> Result<i64, AppError>;
}
