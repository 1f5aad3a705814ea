#![allow(dead_code)]

use axum::routing::get;
use axum::{Router, middleware};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use shortener::api::handlers::{health_handler, redirect_handler};
use shortener::api::middleware::auth;
use shortener::api::routes::{protected_routes, public_routes};
use shortener::application::services::{AuthService, AuthSettings, LinkService};
use shortener::infrastructure::persistence::{InMemoryLinkRepository, InMemoryUserRepository};
use shortener::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

pub fn test_auth_settings(admin_emails: Vec<String>) -> AuthSettings {
    AuthSettings {
        jwt_secret: "test-signing-secret".to_string(),
        jwt_issuer: "shortener-tests".to_string(),
        jwt_audience: "shortener-clients".to_string(),
        token_ttl_seconds: 3600,
        admin_emails,
    }
}

/// Builds an [`AppState`] over in-memory repositories.
pub fn create_test_state_with_admins(admin_emails: &[&str]) -> AppState {
    let link_repo = Arc::new(InMemoryLinkRepository::new());
    let user_repo = Arc::new(InMemoryUserRepository::new());

    let link_service = Arc::new(LinkService::new(link_repo));
    let auth_service = Arc::new(AuthService::new(
        user_repo,
        test_auth_settings(admin_emails.iter().map(|e| e.to_string()).collect()),
    ));

    AppState::new(link_service, auth_service, BASE_URL.to_string())
}

pub fn create_test_state() -> AppState {
    create_test_state_with_admins(&[])
}

/// Mounts the full route surface (redirect, health, auth, link API with the
/// bearer middleware) without the per-IP rate limiter, which needs real
/// socket peer info.
pub fn test_app(state: AppState) -> TestServer {
    let protected = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api = Router::new().merge(protected).merge(public_routes());

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state);

    TestServer::new(app).unwrap()
}

/// Registers an account and returns its bearer token.
pub async fn register(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .expect("register response carries a token")
        .to_string()
}

/// Shortens a URL as the given caller and returns the created record.
pub async fn create_link(server: &TestServer, token: &str, url: &str) -> Value {
    let response = server
        .post("/api/urls")
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "url": url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
