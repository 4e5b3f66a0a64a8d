use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::db::models::UserRole;
use crate::error::AppError;

/// Claims carried by a session token. The decoded form is the
/// authenticated principal handlers receive — nothing is read from
/// ambient request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    pub role: UserRole,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a signed HS256 session token.
pub fn issue_session_token(
    user_id: Uuid,
    role: UserRole,
    name: &str,
    config: &AuthConfig,
) -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        role,
        name: name.to_string(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::InternalServerError(format!("JWT encode: {e}")))
}

/// Decode and verify a session token.
pub fn decode_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AppError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::Authentication("session expired".into())
            }
            _ => AppError::Authentication("invalid session token".into()),
        })
}

/// Random URL-safe password-reset token (32 bytes, base64url).
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-do-not-use".into(),
            token_lifetime_secs: 900,
        }
    }

    #[test]
    fn session_token_round_trips() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_session_token(user_id, UserRole::Owner, "R. Mehta", &config).unwrap();
        let claims = decode_session_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, UserRole::Owner);
        assert_eq!(claims.name, "R. Mehta");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token =
            issue_session_token(Uuid::new_v4(), UserRole::Tenant, "Asha", &config).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(decode_session_token(&tampered, &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            token_lifetime_secs: 900,
        };

        let token = issue_session_token(Uuid::new_v4(), UserRole::Owner, "X", &config).unwrap();
        assert!(decode_session_token(&token, &other).is_err());
    }

    #[test]
    fn reset_token_is_url_safe() {
        let token = generate_reset_token();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        // 32 bytes -> 43 base64url chars.
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn reset_tokens_are_unique() {
        assert_ne!(generate_reset_token(), generate_reset_token());
    }
}
