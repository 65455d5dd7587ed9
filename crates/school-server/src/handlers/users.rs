use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use school_shared::api::CreateUserRequest;
use school_shared::User;
use uuid::Uuid;

use crate::auth::{hash_password, AuthUser};
use crate::error::AppError;
use crate::extract::Json;
use crate::routes::AppState;
use crate::store::NewUser;

/// GET /admin/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .store
        .list_users()
        .await?
        .iter()
        .map(|u| u.to_user())
        .collect();

    Ok(Json(users))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    // Checked up front so the caller gets a readable conflict
    if state.store.find_user_by_username(username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Username '{}' is already taken",
            username
        )));
    }

    let password_hash = hash_password(&req.password)?;
    let user = state
        .store
        .create_user(NewUser {
            username: username.to_string(),
            password_hash,
            is_admin: req.is_admin,
        })
        .await?;

    tracing::info!(username = %user.username, is_admin = user.is_admin, "User created");
    Ok((StatusCode::CREATED, Json(user.to_user())))
}

/// DELETE /admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if current.id == id {
        return Err(AppError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }

    state.store.delete_user(id).await?;
    tracing::info!(id = %id, by = %current.username, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
