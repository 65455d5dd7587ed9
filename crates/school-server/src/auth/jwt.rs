use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // User ID
    pub username: String,
    pub is_admin: bool,
    pub exp: i64, // Expiration timestamp
    pub iat: i64, // Issued at timestamp
}

pub fn create_session_token(
    user_id: Uuid,
    username: &str,
    is_admin: bool,
    secret: &str,
    expires_in_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expires_in_secs);

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        is_admin,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AppError::Unauthorized
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_identity() {
        let id = Uuid::new_v4();
        let token = create_session_token(id, "admin", true, "secret", 60).unwrap();

        let claims = verify_session_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "admin");
        assert!(claims.is_admin);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_session_token(Uuid::new_v4(), "admin", true, "secret", 60).unwrap();

        assert!(matches!(
            verify_session_token(&token, "other"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s leeway
        let token = create_session_token(Uuid::new_v4(), "admin", true, "secret", -600).unwrap();

        assert!(matches!(
            verify_session_token(&token, "secret"),
            Err(AppError::Unauthorized)
        ));
    }
}
