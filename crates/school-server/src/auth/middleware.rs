use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{error::AppError, routes::AppState, store::StoreError};

use super::jwt::verify_session_token;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

/// Session token from the `session` cookie, falling back to a bearer header.
fn session_token(request: &Request) -> Option<String> {
    let jar = CookieJar::from_headers(request.headers());
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&request).ok_or(AppError::Unauthorized)?;
    let claims = verify_session_token(&token, &state.config.jwt_secret)?;

    // Deleted users and revoked admin rights take effect immediately
    let user = match state.store.get_user(claims.sub).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e.into()),
    };

    let auth_user = AuthUser {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    };

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Must run after [`auth_middleware`].
pub async fn require_admin(
    Extension(user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.is_admin {
        tracing::warn!(user = %user.username, path = %request.uri().path(), "Non-admin denied");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
