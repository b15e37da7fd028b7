use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Auth ---

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Form body for `POST /login` (OAuth2 password form: the email goes in `username`).
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub username: String,
}

impl NewUser {
    /// Registration with the username defaulted to the local part of the email.
    pub fn from_email(email: &str, password: &str) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            password: password.to_string(),
            username,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Msg {
    pub msg: String,
}

// --- Users ---

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub personal_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile update for `PUT /users/me`. The backend requires `email`; unset
/// optional fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// --- Uploads ---

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

// --- Products ---

#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub prompt: String,
    pub product_type: String,
    pub generated_image_url: String,
    pub product_image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub prompt: String,
    pub product_type: String,
    pub generated_image_url: String,
    pub product_image_url: String,
    pub created_at: DateTime<Utc>,
}

/// FastAPI error body: `{"detail": "..."}`. `detail` may also be a list of
/// validation errors, so it is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}
