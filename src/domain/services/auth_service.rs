use crate::config::Config;
use crate::domain::models::auth::{Claims, ROLE_ADMIN, ROLE_CHECKIN};
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

/// Exchanges staff access codes for signed session tokens. The codes come
/// from configuration and are compared server-side only; the browser never
/// holds anything but the resulting cookie.
pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.auth_secret.as_bytes());
        Self {
            config,
            encoding_key,
        }
    }

    /// Maps an access code to its role, or rejects it.
    pub fn resolve_role(&self, access_code: &str) -> Result<&'static str, AppError> {
        if access_code == self.config.access_code_admin {
            Ok(ROLE_ADMIN)
        } else if access_code == self.config.access_code_checkin {
            Ok(ROLE_CHECKIN)
        } else {
            Err(AppError::Unauthorized)
        }
    }

    /// Issues a 12h access token plus the CSRF token embedded in it.
    pub fn issue_token(&self, role: &str) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let now = Utc::now();
        let claims = Claims {
            iss: "guestlist-backend".to_string(),
            sub: role.to_string(),
            exp: (now + Duration::hours(12)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: role.to_string(),
            csrf_token: csrf_token.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok((token, csrf_token))
    }
}
