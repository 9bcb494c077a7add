use crate::domain::models::communication::{EmailLog, EmailTemplate};
use crate::domain::ports::CommunicationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCommunicationRepo {
    pool: SqlitePool,
}

impl SqliteCommunicationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunicationRepository for SqliteCommunicationRepo {
    async fn get_template(&self, event_id: &str) -> Result<Option<EmailTemplate>, AppError> {
        sqlx::query_as::<_, EmailTemplate>(
            "SELECT id, event_id, subject, body, sender_name, sender_email, updated_at \
             FROM email_templates WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn upsert_template(&self, template: &EmailTemplate) -> Result<EmailTemplate, AppError> {
        sqlx::query_as::<_, EmailTemplate>(
            "INSERT INTO email_templates (id, event_id, subject, body, sender_name, sender_email, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (event_id) DO UPDATE SET \
                 subject = excluded.subject, \
                 body = excluded.body, \
                 sender_name = excluded.sender_name, \
                 sender_email = excluded.sender_email, \
                 updated_at = excluded.updated_at \
             RETURNING *",
        )
        .bind(&template.id)
        .bind(&template.event_id)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(&template.sender_name)
        .bind(&template.sender_email)
        .bind(template.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn log_email(&self, log: &EmailLog) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO email_logs (id, event_id, guest_id, recipient, subject, body, status, error, sent_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&log.id)
        .bind(&log.event_id)
        .bind(&log.guest_id)
        .bind(&log.recipient)
        .bind(&log.subject)
        .bind(&log.body)
        .bind(&log.status)
        .bind(&log.error)
        .bind(log.sent_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_logs(&self, event_id: &str) -> Result<Vec<EmailLog>, AppError> {
        sqlx::query_as::<_, EmailLog>(
            "SELECT id, event_id, guest_id, recipient, subject, body, status, error, sent_at \
             FROM email_logs WHERE event_id = ? ORDER BY sent_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
