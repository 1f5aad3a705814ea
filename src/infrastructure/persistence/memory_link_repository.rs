//! In-memory implementation of the link repository.
//!
//! Backs the integration test suite and doubles as the reference model for
//! the storage contract: every conflicting write is serialized by one
//! mutex, which is exactly the guarantee the service layer assumes.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    links: HashMap<i64, ShortLink>,
}

/// HashMap-backed link store behind a mutex.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut inner = self.inner.lock().expect("link store poisoned");

        if inner
            .links
            .values()
            .any(|l| l.original_url == new_link.original_url)
        {
            return Err(AppError::duplicate(
                "URL has already been shortened",
                json!({ "original_url": new_link.original_url }),
            ));
        }

        if inner
            .links
            .values()
            .any(|l| l.short_code == new_link.short_code)
        {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "short_code": new_link.short_code }),
            ));
        }

        inner.next_id += 1;
        let link = ShortLink::new(
            inner.next_id,
            new_link.original_url,
            new_link.short_code,
            new_link.owner_id,
            Utc::now(),
            0,
        );
        inner.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        let inner = self.inner.lock().expect("link store poisoned");
        Ok(inner.links.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let inner = self.inner.lock().expect("link store poisoned");
        Ok(inner.links.values().find(|l| l.short_code == code).cloned())
    }

    async fn find_by_original_url(&self, url: &str) -> Result<Option<ShortLink>, AppError> {
        let inner = self.inner.lock().expect("link store poisoned");
        Ok(inner
            .links
            .values()
            .find(|l| l.original_url == url)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let inner = self.inner.lock().expect("link store poisoned");
        let mut links: Vec<ShortLink> = inner.links.values().cloned().collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        let inner = self.inner.lock().expect("link store poisoned");
        let mut links: Vec<ShortLink> = inner
            .links
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links)
    }

    async fn record_visit(&self, id: i64) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().expect("link store poisoned");

        let link = inner
            .links
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))?;

        link.visit_count += 1;
        Ok(link.visit_count)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().expect("link store poisoned");
        Ok(inner.links.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let inner = self.inner.lock().expect("link store poisoned");
        Ok(inner.links.len() as i64)
    }
}
