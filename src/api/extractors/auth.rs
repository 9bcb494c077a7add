use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

use crate::domain::models::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Any authenticated staff member (admin or door staff).
pub struct StaffUser(pub Claims);

/// Staff member with the admin role; rejects door-only sessions with 403.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .extensions
            .get::<Cookies>()
            .ok_or(AppError::Internal)?;

        let access_token = cookies
            .get("access_token")
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let decoding_key = DecodingKey::from_secret(app_state.config.auth_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["guestlist-backend"]);

        let token_data = decode::<Claims>(&access_token, &decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        let method = &parts.method;
        if method != "GET" && method != "HEAD" && method != "OPTIONS" {
            let csrf_header_val = parts
                .headers
                .get("X-CSRF-Token")
                .ok_or(AppError::Forbidden("Missing CSRF token".into()))?
                .to_str()
                .map_err(|_| AppError::Forbidden("Invalid CSRF token".into()))?;

            if csrf_header_val != token_data.claims.csrf_token {
                return Err(AppError::Forbidden("Invalid CSRF token".into()));
            }
        }

        Span::current().record("role", token_data.claims.role.as_str());

        Ok(StaffUser(token_data.claims))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let StaffUser(claims) = StaffUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            return Err(AppError::Forbidden("Admin role required".into()));
        }
        Ok(AdminUser(claims))
    }
}
