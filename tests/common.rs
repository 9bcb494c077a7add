use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use guestlist_backend::{
    api::router::create_router,
    background::start_background_worker,
    config::Config,
    domain::ports::EmailService,
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::repositories::{
        sqlite_communication_repo::SqliteCommunicationRepo, sqlite_event_repo::SqliteEventRepo,
        sqlite_guest_repo::SqliteGuestRepo, sqlite_job_repo::SqliteJobRepo,
    },
    infra::storage::fs_qr_store::FsQrStore,
    state::AppState,
};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tera::Tera;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_CODE: &str = "ADMIN-TEST-CODE";
pub const CHECKIN_CODE: &str = "DOOR-TEST-CODE";

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub from_name: String,
    pub from_email: String,
}

/// Records every send instead of talking to a relay. Addresses containing
/// "fail" are rejected so failure paths can be exercised.
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        from_name: &str,
        from_email: &str,
    ) -> Result<(), AppError> {
        if to.contains("fail") {
            return Err(AppError::InternalWithMsg("Mock relay rejected".to_string()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            from_name: from_name.to_string(),
            from_email: from_email.to_string(),
        });
        Ok(())
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub qr_dir: String,
    pub state: Arc<AppState>,
    pub sent_emails: Arc<Mutex<Vec<SentEmail>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);
        let qr_dir = format!("test_qr_{}", Uuid::new_v4());

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(
            "invite.html",
            "<html>{{ event_name }} | {{ guest_formal_name }} | {{ confirmation_link }}</html>",
        )
        .unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            frontend_url: "http://localhost:5173".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            auth_secret: "test-secret".to_string(),
            access_code_admin: ADMIN_CODE.to_string(),
            access_code_checkin: CHECKIN_CODE.to_string(),
            qr_storage_dir: qr_dir.clone(),
        };

        let sent_emails = Arc::new(Mutex::new(Vec::new()));
        let auth_service = Arc::new(AuthService::new(config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            communication_repo: Arc::new(SqliteCommunicationRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_service,
            email_service: Arc::new(MockEmailService {
                sent: sent_emails.clone(),
            }),
            qr_store: Arc::new(FsQrStore::new(qr_dir.clone())),
            templates,
        });

        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            qr_dir,
            state,
            sent_emails,
        }
    }

    pub async fn login(&self, access_code: &str) -> AuthHeaders {
        let payload = serde_json::json!({ "access_code": access_code });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies
            .iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..]
            .find(';')
            .unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"]
            .as_str()
            .expect("No csrf_token in body")
            .to_string();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    /// Creates an event through the API and returns its id.
    #[allow(dead_code)]
    pub async fn create_event(&self, auth: &AuthHeaders, name: &str) -> String {
        let payload = serde_json::json!({
            "name": name,
            "date": "2026-06-12",
            "time": "18:30:00",
            "location": "Aula Magna"
        });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, format!("access_token={}", auth.access_token))
                    .header("X-CSRF-Token", &auth.csrf_token)
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Event creation failed in test helper: {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        body_json["id"].as_str().unwrap().to_string()
    }

    /// Creates a guest through the API and returns the response body.
    #[allow(dead_code)]
    pub async fn create_guest(
        &self,
        auth: &AuthHeaders,
        event_id: &str,
        name: &str,
        email: &str,
    ) -> Value {
        let payload = serde_json::json!({ "name": name, "email": email });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/events/{}/guests", event_id))
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, format!("access_token={}", auth.access_token))
                    .header("X-CSRF-Token", &auth.csrf_token)
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Guest creation failed in test helper: {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_dir_all(&self.qr_dir);
    }
}
