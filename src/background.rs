use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};

use crate::domain::models::communication::EmailLog;
use crate::domain::models::job::EmailJob;
use crate::domain::services::placeholder;
use crate::error::AppError;
use crate::state::AppState;

/// Delay between consecutive sends so the mail relay is never flooded
/// by a large guest list.
const SEND_PACING: Duration = Duration::from_millis(200);

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting email job worker...");

    loop {
        match state.job_repo.claim_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "email_job",
                        job_id = %job.id,
                        event_id = %job.event_id,
                        guest_id = %job.guest_id
                    );

                    let state = state.clone();
                    async move {
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Email sent");
                                if let Err(e) =
                                    state.job_repo.update_status(&job.id, "SENT", None).await
                                {
                                    error!("Failed to mark job as sent: {:?}", e);
                                }
                            }
                            Err(e) => {
                                // No retry: the failure is logged and the
                                // organizer re-queues from the dashboard.
                                let err_msg = format!("{}", e);
                                error!("Email job failed: {}", err_msg);
                                if let Err(up_err) = state
                                    .job_repo
                                    .update_status(&job.id, "FAILED", Some(err_msg))
                                    .await
                                {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                    .instrument(span)
                    .await;

                    sleep(SEND_PACING).await;
                }
            }
            Err(e) => error!("Failed to fetch pending email jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

async fn process_job(state: &Arc<AppState>, job: &EmailJob) -> Result<(), AppError> {
    let guest = state
        .guest_repo
        .find_in_event(&job.event_id, &job.guest_id)
        .await?
        .ok_or(AppError::NotFound(format!(
            "Guest {} not found",
            job.guest_id
        )))?;
    let event = state
        .event_repo
        .find_by_id(&job.event_id)
        .await?
        .ok_or(AppError::NotFound(format!(
            "Event {} not found",
            job.event_id
        )))?;
    let template = state
        .communication_repo
        .get_template(&job.event_id)
        .await?
        .ok_or(AppError::NotFound(format!(
            "No email template for event {}",
            job.event_id
        )))?;

    let link = state.config.confirmation_link(&guest.id);
    let subject = placeholder::substitute(&template.subject, &event, &guest, &link);
    let body = placeholder::substitute(&template.body, &event, &guest, &link);

    info!("Sending email to {}", guest.email);
    let result = state
        .email_service
        .send(
            &guest.email,
            &subject,
            &body,
            &template.sender_name,
            &template.sender_email,
        )
        .await;

    let log = match &result {
        Ok(_) => EmailLog::sent(
            job.event_id.clone(),
            guest.id.clone(),
            guest.email.clone(),
            subject,
            body,
        ),
        Err(e) => EmailLog::failed(
            job.event_id.clone(),
            guest.id.clone(),
            guest.email.clone(),
            subject,
            body,
            format!("{}", e),
        ),
    };

    if let Err(e) = state.communication_repo.log_email(&log).await {
        error!("Failed to write email log: {:?}", e);
    }

    result?;

    state.guest_repo.mark_email_sent(&guest.id).await?;
    Ok(())
}
