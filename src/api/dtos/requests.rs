use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub access_code: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub banner_url: Option<String>,
    pub accent_color: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub banner_url: Option<String>,
    pub accent_color: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    pub email: String,
    pub role_title: Option<String>,
    pub table_label: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateGuestRequest {
    pub name: String,
    pub email: String,
    pub role_title: Option<String>,
    pub table_label: Option<String>,
}

#[derive(Deserialize)]
pub struct SetRsvpRequest {
    /// "confirmed", "rejected" or "pending".
    pub status: String,
}

#[derive(Deserialize)]
pub struct SetTableRequest {
    pub table_label: Option<String>,
}

#[derive(Deserialize)]
pub struct SetCheckedInRequest {
    pub checked_in: bool,
}

#[derive(Deserialize)]
pub struct ScanCheckInRequest {
    /// Raw text decoded from the QR code.
    pub payload: String,
}

#[derive(Deserialize)]
pub struct ManualCheckInRequest {
    /// Name or email fragment typed at the door.
    pub query: String,
}

#[derive(Deserialize)]
pub struct SaveTemplateRequest {
    pub subject: String,
    pub body: String,
    pub sender_name: String,
    pub sender_email: String,
}

#[derive(Deserialize)]
pub struct SendBulkEmailRequest {
    /// Explicit targets; when absent every guest of the event is queued.
    pub guest_ids: Option<Vec<String>>,
}
