use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CHECKIN: &str = "checkin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://guestlist/claims/role")]
    pub role: String,

    #[serde(rename = "https://guestlist/claims/csrf")]
    pub csrf_token: String,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub role: String,
}
