//! In-memory implementation of the user repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: HashMap<i64, User>,
}

/// HashMap-backed user store behind a mutex.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.lock().expect("user store poisoned");

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": new_user.email }),
            ));
        }

        inner.next_id += 1;
        let user = User::new(
            inner.next_id,
            new_user.email,
            new_user.password_hash,
            new_user.role,
            Utc::now(),
        );
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().expect("user store poisoned");
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().expect("user store poisoned");
        Ok(inner.users.get(&id).cloned())
    }
}
