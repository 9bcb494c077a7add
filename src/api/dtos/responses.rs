use crate::domain::models::event::Event;
use crate::domain::models::guest::Guest;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Guest plus the bearer confirmation link derived from its id.
#[derive(Serialize)]
pub struct GuestWithLink {
    #[serde(flatten)]
    pub guest: Guest,
    pub confirmation_link: String,
}

#[derive(Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub guests: Vec<GuestWithLink>,
}

/// Everything the public confirmation page needs in one round trip.
#[derive(Serialize)]
pub struct RsvpView {
    pub guest: Guest,
    pub event: Event,
    pub qr_payload: String,
}

/// Poll target for the confirmation page: table assignment + check-in.
#[derive(Serialize)]
pub struct RsvpStatus {
    pub table_label: Option<String>,
    pub checked_in: bool,
}

#[derive(Serialize)]
pub struct CheckInResponse {
    pub guest: Guest,
    pub already_checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct BulkSendResponse {
    pub queued: usize,
}
