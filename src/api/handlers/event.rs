use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::api::extractors::auth::{AdminUser, StaffUser};
use crate::domain::models::event::Event;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }
    if payload.location.trim().is_empty() {
        return Err(AppError::Validation("Event location is required".into()));
    }

    let event = Event::new(
        payload.name,
        payload.date,
        payload.time,
        payload.location,
        payload.banner_url,
        payload.accent_color,
    );

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _user: StaffUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _user: StaffUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Event name is required".into()));
        }
        event.name = val;
    }
    if let Some(val) = payload.date {
        event.date = val;
    }
    if let Some(val) = payload.time {
        event.time = val;
    }
    if let Some(val) = payload.location {
        event.location = val;
    }
    if payload.banner_url.is_some() {
        event.banner_url = payload.banner_url;
    }
    if payload.accent_color.is_some() {
        event.accent_color = payload.accent_color;
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}
