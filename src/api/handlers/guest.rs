use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    CreateGuestRequest, SetCheckedInRequest, SetRsvpRequest, SetTableRequest, UpdateGuestRequest,
};
use crate::api::dtos::responses::{GuestWithLink, ImportSummary};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::guest::Guest;
use crate::domain::services::{invite, roster};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::Validation("Name and email are required".into()));
    }

    state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let guest = Guest::new(
        event_id,
        payload.name.trim().to_string(),
        payload.email.trim().to_string(),
        payload.role_title,
        payload.table_label,
    );

    let created = state.guest_repo.create(&guest).await?;
    Ok(Json(with_link(&state, created)))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guests = state.guest_repo.list_by_event(&event_id).await?;
    let out: Vec<GuestWithLink> = guests.into_iter().map(|g| with_link(&state, g)).collect();
    Ok(Json(out))
}

pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path((event_id, guest_id)): Path<(String, String)>,
    Json(payload): Json<UpdateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut guest = state
        .guest_repo
        .find_in_event(&event_id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::Validation("Name and email are required".into()));
    }

    guest.name = payload.name.trim().to_string();
    guest.email = payload.email.trim().to_string();
    guest.role_title = payload.role_title;
    guest.table_label = payload.table_label;

    let updated = state.guest_repo.update_details(&guest).await?;
    Ok(Json(with_link(&state, updated)))
}

pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path((event_id, guest_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .guest_repo
        .find_in_event(&event_id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    state.guest_repo.delete(&event_id, &guest_id).await?;
    info!("Guest deleted: {}", guest_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn set_rsvp(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path((event_id, guest_id)): Path<(String, String)>,
    Json(payload): Json<SetRsvpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (confirmed, rejected) = match payload.status.as_str() {
        "confirmed" => (true, false),
        "rejected" => (false, true),
        "pending" => (false, false),
        _ => return Err(AppError::Validation("Invalid RSVP status".into())),
    };

    state
        .guest_repo
        .find_in_event(&event_id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    let updated = state.guest_repo.set_rsvp(&guest_id, confirmed, rejected).await?;
    Ok(Json(with_link(&state, updated)))
}

pub async fn set_table(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path((event_id, guest_id)): Path<(String, String)>,
    Json(payload): Json<SetTableRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .guest_repo
        .find_in_event(&event_id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    let updated = state
        .guest_repo
        .set_table(&guest_id, payload.table_label.as_deref())
        .await?;
    Ok(Json(with_link(&state, updated)))
}

/// Manual override from the dashboard; the door flow goes through the
/// check-in endpoints instead.
pub async fn set_checked_in(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path((event_id, guest_id)): Path<(String, String)>,
    Json(payload): Json<SetCheckedInRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .guest_repo
        .find_in_event(&event_id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    let updated = state
        .guest_repo
        .set_checked_in(&guest_id, payload.checked_in)
        .await?;
    Ok(Json(with_link(&state, updated)))
}

pub async fn import_guests(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let rows = roster::parse_import(&body)?;
    if rows.is_empty() {
        return Err(AppError::Validation("No valid guest rows found".into()));
    }

    let guests: Vec<Guest> = rows
        .into_iter()
        .map(|row| Guest::new(event_id.clone(), row.name, row.email, None, row.table_label))
        .collect();

    let created = state.guest_repo.create_batch(&guests).await?;
    info!("Imported {} guests into event {}", created.len(), event_id);

    let guests: Vec<GuestWithLink> = created.into_iter().map(|g| with_link(&state, g)).collect();
    Ok((
        StatusCode::CREATED,
        Json(ImportSummary {
            imported: guests.len(),
            guests,
        }),
    ))
}

pub async fn export_guests(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let guests = state.guest_repo.list_by_event(&event_id).await?;
    let csv = roster::render_export(&guests)?;

    let filename = format!("convidados-{}.csv", invite::slugify(&event.name));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

pub async fn download_invite(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path((event_id, guest_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    let guest = state
        .guest_repo
        .find_in_event(&event_id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    let link = state.config.confirmation_link(&guest.id);
    let html = invite::render_invite(&state.templates, &event, &guest, &link)?;
    let filename = invite::invite_filename(&event, &guest);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        html,
    ))
}

fn with_link(state: &AppState, guest: Guest) -> GuestWithLink {
    let confirmation_link = state.config.confirmation_link(&guest.id);
    GuestWithLink {
        guest,
        confirmation_link,
    }
}
