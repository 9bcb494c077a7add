use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{SaveTemplateRequest, SendBulkEmailRequest};
use crate::api::dtos::responses::BulkSendResponse;
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::communication::EmailTemplate;
use crate::domain::models::job::EmailJob;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_template(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // null until the organizer saves one; the template row is lazy.
    let template = state.communication_repo.get_template(&event_id).await?;
    Ok(Json(template))
}

pub async fn save_template(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<SaveTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.subject.trim().is_empty() || payload.body.trim().is_empty() {
        return Err(AppError::Validation("Subject and body are required".into()));
    }
    if payload.sender_email.trim().is_empty() {
        return Err(AppError::Validation("Sender email is required".into()));
    }

    state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let template = EmailTemplate::new(
        event_id,
        payload.subject,
        payload.body,
        payload.sender_name,
        payload.sender_email,
    );

    let saved = state.communication_repo.upsert_template(&template).await?;
    info!("Email template saved for event {}", saved.event_id);
    Ok(Json(saved))
}

/// Queues one job per target guest; the background worker does the actual
/// sending at its own pace.
pub async fn send_bulk(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<SendBulkEmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    state
        .communication_repo
        .get_template(&event_id)
        .await?
        .ok_or(AppError::Validation(
            "Save an email template before sending".into(),
        ))?;

    let mut guests = state.guest_repo.list_by_event(&event_id).await?;
    if let Some(ids) = payload.guest_ids {
        let wanted: HashSet<String> = ids.into_iter().collect();
        guests.retain(|g| wanted.contains(&g.id));
    }

    if guests.is_empty() {
        return Err(AppError::Validation("No guests to send to".into()));
    }

    let jobs: Vec<EmailJob> = guests
        .iter()
        .map(|g| EmailJob::new(event_id.clone(), g.id.clone()))
        .collect();

    state.job_repo.create_batch(&jobs).await?;
    info!("Queued {} email jobs for event {}", jobs.len(), event_id);

    Ok(Json(BulkSendResponse { queued: jobs.len() }))
}

pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let logs = state.communication_repo.list_logs(&event_id).await?;
    Ok(Json(logs))
}

pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let jobs = state.job_repo.list_by_event(&event_id).await?;
    Ok(Json(jobs))
}
