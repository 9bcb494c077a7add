use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

use crate::api::dtos::requests::LoginRequest;
use crate::domain::models::auth::AuthResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.auth_service.resolve_role(&payload.access_code)?;
    let (access_jwt, csrf_token) = state.auth_service.issue_token(role)?;

    set_session_cookie(&cookies, &access_jwt);

    info!("Staff logged in with role: {}", role);

    Ok(Json(AuthResponse {
        csrf_token,
        role: role.to_string(),
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build(("access_token", "")).path("/").into());

    info!("Staff logged out");

    Ok(StatusCode::OK)
}

fn set_session_cookie(cookies: &Cookies, access: &str) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::hours(12));
    cookies.add(access_c);
}
