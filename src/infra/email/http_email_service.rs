use crate::domain::ports::EmailService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

/// Relays outbound mail through the transactional email HTTP endpoint.
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
    from_name: &'a str,
    from_email: &'a str,
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        from_name: &str,
        from_email: &str,
    ) -> Result<(), AppError> {
        let payload = EmailPayload {
            to,
            subject,
            body,
            from_name,
            from_email,
        };

        let res = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Email service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Email service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
