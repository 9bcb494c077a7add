use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-event email template. One row per event, created lazily on the
/// first save. Subject and body carry literal `{{token}}` placeholders.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EmailTemplate {
    pub id: String,
    pub event_id: String,
    pub subject: String,
    pub body: String,
    pub sender_name: String,
    pub sender_email: String,
    pub updated_at: DateTime<Utc>,
}

impl EmailTemplate {
    pub fn new(
        event_id: String,
        subject: String,
        body: String,
        sender_name: String,
        sender_email: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            subject,
            body,
            sender_name,
            sender_email,
            updated_at: Utc::now(),
        }
    }
}

/// Append-only record of a send attempt. Stores the rendered subject and
/// body so the audit trail survives later template edits.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EmailLog {
    pub id: String,
    pub event_id: String,
    pub guest_id: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: String, // SENT, FAILED
    pub error: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl EmailLog {
    pub fn sent(
        event_id: String,
        guest_id: String,
        recipient: String,
        subject: String,
        body: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            guest_id,
            recipient,
            subject,
            body,
            status: "SENT".to_string(),
            error: None,
            sent_at: Utc::now(),
        }
    }

    pub fn failed(
        event_id: String,
        guest_id: String,
        recipient: String,
        subject: String,
        body: String,
        error: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            guest_id,
            recipient,
            subject,
            body,
            status: "FAILED".to_string(),
            error: Some(error),
            sent_at: Utc::now(),
        }
    }
}
