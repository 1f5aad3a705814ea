//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contracts; concrete implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL for production, an
//! in-memory backend for tests). Mocks are auto-generated via `mockall`.

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
