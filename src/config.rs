use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Public origin the confirmation links point at, e.g. the SPA host.
    pub frontend_url: String,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub auth_secret: String,
    pub access_code_admin: String,
    pub access_code_checkin: String,
    pub qr_storage_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            mail_service_url: env::var("MAIL_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_default(),
            auth_secret: env::var("AUTH_SECRET").expect("AUTH_SECRET must be set"),
            access_code_admin: env::var("ACCESS_CODE_ADMIN")
                .expect("ACCESS_CODE_ADMIN must be set"),
            access_code_checkin: env::var("ACCESS_CODE_CHECKIN")
                .expect("ACCESS_CODE_CHECKIN must be set"),
            qr_storage_dir: env::var("QR_STORAGE_DIR")
                .unwrap_or_else(|_| "./storage/qrcodes".to_string()),
        }
    }

    /// Bearer-style confirmation link for a guest, `<origin>/confirmar?id=<id>`.
    pub fn confirmation_link(&self, guest_id: &str) -> String {
        format!("{}/confirmar?id={}", self.frontend_url, guest_id)
    }
}
