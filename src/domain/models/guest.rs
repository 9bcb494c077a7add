use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An invitee tied to one event. The id doubles as the confirmation-link
/// token and the QR payload id, so it is never recycled.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub role_title: Option<String>,
    pub table_label: Option<String>,
    pub confirmed: bool,
    pub rejected: bool,
    pub checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub email_sent: bool,
    pub email_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(
        event_id: String,
        name: String,
        email: String,
        role_title: Option<String>,
        table_label: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            email,
            role_title,
            table_label,
            confirmed: false,
            rejected: false,
            checked_in: false,
            checked_in_at: None,
            email_sent: false,
            email_sent_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Formal salutation: "Dr. Maria Silva" when a title is present,
    /// otherwise just the name.
    pub fn formal_name(&self) -> String {
        match self.role_title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} {}", title, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Result of the confirmed -> checked-in transition. "Already checked in"
/// is informational, not an error: the scanner shows a warning and the
/// stored `checked_in_at` stays untouched.
#[derive(Debug, Clone)]
pub enum CheckInOutcome {
    CheckedIn(Guest),
    AlreadyCheckedIn(Guest),
    NotFound,
}

/// Aggregated per-event counters for the door dashboard.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, Default)]
pub struct GuestStats {
    pub total: i64,
    pub confirmed: i64,
    pub rejected: i64,
    pub pending: i64,
    pub present: i64,
}
