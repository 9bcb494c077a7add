use crate::config::Config;
use crate::domain::ports::{
    CommunicationRepository, EmailService, EventRepository, GuestRepository, JobRepository,
    QrStore,
};
use crate::domain::services::auth_service::AuthService;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub communication_repo: Arc<dyn CommunicationRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub qr_store: Arc<dyn QrStore>,
    pub templates: Arc<Tera>,
}
