//! Repository implementations.
//!
//! PostgreSQL backends serve production; the in-memory backends serve the
//! test suite and document the storage contract in its simplest form.

pub mod memory_link_repository;
pub mod memory_user_repository;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use memory_user_repository::InMemoryUserRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
