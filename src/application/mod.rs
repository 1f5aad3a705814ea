//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation, and business rules on
//! top of the domain traits, and expose a clean API to the HTTP handlers.
//!
//! - [`services::link_service::LinkService`] - link creation, resolution,
//!   visit counting, ownership-checked deletion
//! - [`services::auth_service::AuthService`] - registration, login, and
//!   token verification

pub mod services;
