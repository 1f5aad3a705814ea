//! Short link creation, resolution, and lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;
use serde_json::json;

/// Attempts at allocating a unique short code before giving up.
///
/// With a 62^6 code space, collisions at small scale are rare; the bound
/// exists so a degenerate storage state fails with a typed error instead of
/// looping.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Service for creating, resolving, and deleting shortened links.
///
/// The only component with business rules: URL validation, duplicate
/// detection, code allocation with bounded collision retry, ownership
/// checks, and visit counting. Holds no mutable state; conflicting writes
/// are serialized by the repository.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Creates a short link for `original_url` owned by `owner_id`.
    ///
    /// The URL must be an absolute `http`/`https` URL; it is stored exactly
    /// as submitted. If the URL was already shortened, whether found by the
    /// pre-check or by losing an insert race, the result is
    /// [`AppError::Duplicate`]; no record is created.
    ///
    /// # Code allocation
    ///
    /// Generates a random 6-character code and inserts; a short-code
    /// uniqueness conflict re-rolls the code, up to [`MAX_CODE_ATTEMPTS`]
    /// times, after which [`AppError::AllocationExhausted`] is returned.
    pub async fn create_link(
        &self,
        original_url: String,
        owner_id: i64,
    ) -> Result<ShortLink, AppError> {
        validate_url(&original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if self
            .links
            .find_by_original_url(&original_url)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate(
                "URL has already been shortened",
                json!({ "original_url": original_url }),
            ));
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let new_link = NewShortLink {
                original_url: original_url.clone(),
                short_code: generate_code(),
                owner_id,
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                // Code collision: the insert is the arbiter, re-roll and retry.
                Err(AppError::Conflict { .. }) => continue,
                // Includes Duplicate when a concurrent create of the same URL
                // won the race; that is an expected outcome, not a crash.
                Err(e) => return Err(e),
            }
        }

        Err(AppError::allocation_exhausted(
            "Failed to allocate a unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code for redirecting, counting the visit.
    ///
    /// On a hit the visit counter is incremented atomically at the storage
    /// layer and the returned record carries the fresh count. An increment
    /// failure never fails the resolution: the record is returned with its
    /// last known count and the failure is logged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let mut link = self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })?;

        match self.links.record_visit(link.id).await {
            Ok(count) => link.visit_count = count,
            Err(AppError::NotFound { .. }) => {
                // Concurrent delete; either order is acceptable, serve the
                // target we already fetched.
                tracing::debug!(code, "link removed during resolve");
            }
            Err(e) => {
                tracing::warn!(code, error = %e, "visit count increment failed");
            }
        }

        Ok(link)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<ShortLink, AppError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Lists every link. Callers enforce that only admins reach this.
    pub async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        self.links.list_all().await
    }

    /// Lists the links owned by `owner_id`.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        self.links.list_by_owner(owner_id).await
    }

    /// Deletes a link on behalf of a requester.
    ///
    /// Admins may delete any link; other users only their own.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this id
    /// - [`AppError::Forbidden`] if the requester is neither owner nor admin
    pub async fn delete_link(
        &self,
        id: i64,
        requester_id: i64,
        requester_is_admin: bool,
    ) -> Result<(), AppError> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))?;

        if !requester_is_admin && link.owner_id != requester_id {
            return Err(AppError::forbidden(
                "Only the owner or an admin can delete this link",
                json!({ "id": id }),
            ));
        }

        if !self.links.delete(id).await? {
            // Lost a race with another delete.
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    /// Counts stored links. Used by health reporting.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.links.count().await
    }
}
