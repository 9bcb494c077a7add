use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::responses::{RsvpStatus, RsvpView};
use crate::domain::models::guest::Guest;
use crate::domain::services::qr::{self, QrPayload};
use crate::error::AppError;
use crate::state::AppState;

// Public endpoints. The guest id in the path is the bearer token handed
// out inside the confirmation link; there is no session here.

pub async fn get_rsvp(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = load_guest(&state, &guest_id).await?;
    let event = state
        .event_repo
        .find_by_id(&guest.event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let qr_payload = QrPayload::for_guest(&guest).encode();
    Ok(Json(RsvpView {
        guest,
        event,
        qr_payload,
    }))
}

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = load_guest(&state, &guest_id).await?;
    let event = state
        .event_repo
        .find_by_id(&guest.event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let updated = state.guest_repo.set_rsvp(&guest.id, true, false).await?;
    info!("Guest confirmed: {} for event {}", updated.id, event.id);

    // Best effort: the confirmation itself must never fail because a PNG
    // could not be rendered or stored.
    let payload = QrPayload::for_guest(&updated);
    match qr::render_png(&payload) {
        Ok(png) => {
            if let Err(e) = state.qr_store.store(&updated.id, &png).await {
                warn!("Failed to store QR code for guest {}: {}", updated.id, e);
            }
        }
        Err(e) => warn!("Failed to render QR code for guest {}: {}", updated.id, e),
    }

    let qr_payload = payload.encode();
    Ok(Json(RsvpView {
        guest: updated,
        event,
        qr_payload,
    }))
}

pub async fn reject(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = load_guest(&state, &guest_id).await?;
    let event = state
        .event_repo
        .find_by_id(&guest.event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let updated = state.guest_repo.set_rsvp(&guest.id, false, true).await?;
    info!("Guest rejected invitation: {}", updated.id);

    let qr_payload = QrPayload::for_guest(&updated).encode();
    Ok(Json(RsvpView {
        guest: updated,
        event,
        qr_payload,
    }))
}

/// Poll target for the open confirmation page: reflects table assignments
/// and door check-in as they happen.
pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = load_guest(&state, &guest_id).await?;
    Ok(Json(RsvpStatus {
        table_label: guest.table_label,
        checked_in: guest.checked_in,
    }))
}

async fn load_guest(state: &AppState, guest_id: &str) -> Result<Guest, AppError> {
    state
        .guest_repo
        .find_by_id(guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))
}
