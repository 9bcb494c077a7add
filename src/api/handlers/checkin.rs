use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{ManualCheckInRequest, ScanCheckInRequest};
use crate::api::dtos::responses::CheckInResponse;
use crate::api::extractors::auth::StaffUser;
use crate::domain::models::guest::CheckInOutcome;
use crate::domain::services::qr::QrPayload;
use crate::error::AppError;
use crate::state::AppState;

pub async fn scan(
    State(state): State<Arc<AppState>>,
    _user: StaffUser,
    Path(event_id): Path<String>,
    Json(payload): Json<ScanCheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let qr = QrPayload::decode(&payload.payload)?;
    check_in(&state, &event_id, &qr.id).await
}

/// Fallback for unreadable codes: the door staff types a name or email
/// fragment and checks in the first match.
pub async fn manual(
    State(state): State<Arc<AppState>>,
    _user: StaffUser,
    Path(event_id): Path<String>,
    Json(payload): Json<ManualCheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let term = payload.query.trim();
    if term.is_empty() {
        return Err(AppError::Validation("Search term is required".into()));
    }

    let guest = state
        .guest_repo
        .search_in_event(&event_id, term)
        .await?
        .ok_or(AppError::NotFound("No matching guest".into()))?;

    check_in(&state, &event_id, &guest.id).await
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    _user: StaffUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.guest_repo.stats(&event_id).await?;
    Ok(Json(stats))
}

pub async fn recent(
    State(state): State<Arc<AppState>>,
    _user: StaffUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guests = state.guest_repo.recent_checkins(&event_id, 10).await?;
    Ok(Json(guests))
}

async fn check_in(
    state: &AppState,
    event_id: &str,
    guest_id: &str,
) -> Result<Json<CheckInResponse>, AppError> {
    match state.guest_repo.check_in(event_id, guest_id).await? {
        CheckInOutcome::CheckedIn(guest) => {
            info!("Guest checked in: {} ({})", guest.name, guest.id);
            Ok(Json(CheckInResponse {
                already_checked_in: false,
                checked_in_at: guest.checked_in_at,
                guest,
            }))
        }
        CheckInOutcome::AlreadyCheckedIn(guest) => Ok(Json(CheckInResponse {
            already_checked_in: true,
            checked_in_at: guest.checked_in_at,
            guest,
        })),
        CheckInOutcome::NotFound => Err(AppError::NotFound(
            "Guest not found in this event".into(),
        )),
    }
}
