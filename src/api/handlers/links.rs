//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkResponse};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is malformed or already shortened.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.url, auth.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(&link, &state.base_url)),
    ))
}

/// Lists links visible to the caller.
///
/// Admins see every link; other users only their own.
///
/// # Endpoint
///
/// `GET /api/urls`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = if auth.is_admin {
        state.link_service.list_all().await?
    } else {
        state.link_service.list_by_owner(auth.user_id).await?
    };

    let responses = links
        .iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url))
        .collect();

    Ok(Json(responses))
}

/// Fetches a single link by id.
///
/// # Endpoint
///
/// `GET /api/urls/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown id.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkResponse::from_link(&link, &state.base_url)))
}

/// Deletes a link on behalf of the caller.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// # Errors
///
/// Returns 403 Forbidden if the caller is neither the owner nor an admin,
/// 404 Not Found for an unknown id.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .link_service
        .delete_link(id, auth.user_id, auth.is_admin)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
