use crate::domain::models::{
    communication::{EmailLog, EmailTemplate},
    event::Event,
    guest::{CheckInOutcome, Guest, GuestStats},
    job::EmailJob,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn create_batch(&self, guests: &[Guest]) -> Result<Vec<Guest>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    async fn find_in_event(&self, event_id: &str, id: &str) -> Result<Option<Guest>, AppError>;
    async fn search_in_event(&self, event_id: &str, term: &str) -> Result<Option<Guest>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError>;
    async fn update_details(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn set_rsvp(&self, id: &str, confirmed: bool, rejected: bool) -> Result<Guest, AppError>;
    async fn set_table(&self, id: &str, table_label: Option<&str>) -> Result<Guest, AppError>;
    async fn set_checked_in(&self, id: &str, checked_in: bool) -> Result<Guest, AppError>;
    async fn check_in(&self, event_id: &str, id: &str) -> Result<CheckInOutcome, AppError>;
    async fn mark_email_sent(&self, id: &str) -> Result<(), AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
    async fn stats(&self, event_id: &str) -> Result<GuestStats, AppError>;
    async fn recent_checkins(&self, event_id: &str, limit: i64) -> Result<Vec<Guest>, AppError>;
}

#[async_trait]
pub trait CommunicationRepository: Send + Sync {
    async fn get_template(&self, event_id: &str) -> Result<Option<EmailTemplate>, AppError>;
    /// Lazy one-per-event save: inserts on first call, overwrites after.
    async fn upsert_template(&self, template: &EmailTemplate) -> Result<EmailTemplate, AppError>;
    async fn log_email(&self, log: &EmailLog) -> Result<(), AppError>;
    async fn list_logs(&self, event_id: &str) -> Result<Vec<EmailLog>, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create_batch(&self, jobs: &[EmailJob]) -> Result<(), AppError>;
    async fn claim_pending(&self, limit: i32) -> Result<Vec<EmailJob>, AppError>;
    async fn update_status(
        &self,
        id: &str,
        status: &str,
        error_message: Option<String>,
    ) -> Result<(), AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EmailJob>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        from_name: &str,
        from_email: &str,
    ) -> Result<(), AppError>;
}

/// Destination for rendered QR images. Failures here must never break the
/// confirmation flow; callers log and move on.
#[async_trait]
pub trait QrStore: Send + Sync {
    async fn store(&self, guest_id: &str, png: &[u8]) -> Result<(), AppError>;
}
