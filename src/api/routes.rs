//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler, login_handler,
    register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Credential endpoints, open to anonymous callers.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account, returns a token
/// - `POST /auth/login`    - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Link management endpoints, protected by Bearer token authentication
/// (applied by the caller via [`crate::api::middleware::auth`]).
///
/// # Endpoints
///
/// - `GET    /urls`      - List links (all for admins, own otherwise)
/// - `POST   /urls`      - Shorten a URL
/// - `GET    /urls/{id}` - Fetch a link by id
/// - `DELETE /urls/{id}` - Delete a link (owner or admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_links_handler).post(create_link_handler))
        .route(
            "/urls/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
