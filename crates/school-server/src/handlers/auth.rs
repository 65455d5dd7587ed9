use axum::{extract::State, Extension};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use school_shared::api::{AuthResponse, LoginRequest};
use school_shared::User;

use crate::auth::{create_session_token, verify_password, AuthUser, SESSION_COOKIE};
use crate::error::AppError;
use crate::extract::Json;
use crate::routes::AppState;

/// Browser-session cookie; the token's own `exp` bounds its lifetime.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let user = state
        .store
        .find_user_by_username(req.username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::info!(username = %user.username, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let token = create_session_token(
        user.id,
        &user.username,
        user.is_admin,
        &state.config.jwt_secret,
        state.config.jwt_expires_in,
    )?;

    tracing::info!(username = %user.username, "User logged in");

    let jar = jar.add(session_cookie(token.clone()));

    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: user.to_user(),
        }),
    ))
}

/// POST /auth/logout
pub async fn logout(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>, AppError> {
    let record = state.store.get_user(user.id).await?;

    Ok(Json(record.to_user()))
}
