use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One queued bulk-email send for one guest. The dashboard enqueues a
/// batch, the background worker drains it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EmailJob {
    pub id: String,
    pub event_id: String,
    pub guest_id: String,
    pub status: String, // PENDING, PROCESSING, SENT, FAILED
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EmailJob {
    pub fn new(event_id: String, guest_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            guest_id,
            status: "PENDING".to_string(),
            error_message: None,
            created_at: Utc::now(),
        }
    }
}
