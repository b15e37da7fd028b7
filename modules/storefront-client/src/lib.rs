pub mod error;
pub mod types;

pub use error::{Result, StorefrontError};
pub use types::{
    LoginForm, Msg, NewProduct, NewUser, Product, Token, UploadResponse, User, UserUpdate,
};

use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use types::ErrorBody;

pub struct StorefrontClient {
    client: reqwest::Client,
    base_url: String,
}

impl StorefrontClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if is_session_expired(status) {
            return Err(StorefrontError::SessionExpired {
                status: status.as_u16(),
            });
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StorefrontError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    // --- Auth ---

    pub async fn login(&self, email: &str, password: &str) -> Result<Token> {
        tracing::info!(email, "Logging in");
        let form = LoginForm {
            username: email,
            password,
        };
        let resp = self
            .send(self.client.post(self.url("/login")).form(&form))
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn register(&self, user: &NewUser) -> Result<Token> {
        tracing::info!(email = %user.email, "Registering user");
        let resp = self
            .send(self.client.post(self.url("/register")).json(user))
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn logout(&self, token: &str) -> Result<Msg> {
        let resp = self
            .send(
                self.client
                    .post(self.url("/users/logout"))
                    .bearer_auth(token),
            )
            .await?;
        Ok(resp.json().await?)
    }

    // --- Profile ---

    pub async fn me(&self, token: &str) -> Result<User> {
        let resp = self
            .send(self.client.get(self.url("/users/me")).bearer_auth(token))
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn update_me(&self, token: &str, update: &UserUpdate) -> Result<User> {
        let resp = self
            .send(
                self.client
                    .put(self.url("/users/me"))
                    .bearer_auth(token)
                    .json(update),
            )
            .await?;
        Ok(resp.json().await?)
    }

    // --- Uploads ---

    /// Upload an image to the backend's object store. Returns its public URL.
    pub async fn upload_image(&self, image: Bytes, file_name: &str) -> Result<String> {
        let part = Part::stream(image)
            .file_name(file_name.to_string())
            .mime_str("image/png")?;
        let form = Form::new().part("file", part);

        let resp = self
            .send(
                self.client
                    .post(self.url("/upload-to-cloudflare"))
                    .multipart(form),
            )
            .await?;
        let body: UploadResponse = resp.json().await?;

        tracing::info!(image_url = %body.image_url, "Image uploaded");
        Ok(body.image_url)
    }

    // --- Products ---

    pub async fn create_product(&self, token: &str, product: &NewProduct) -> Result<Product> {
        let resp = self
            .send(
                self.client
                    .post(self.url("/products/"))
                    .bearer_auth(token)
                    .json(product),
            )
            .await?;
        let created: Product = resp.json().await?;

        tracing::info!(product_id = created.id, product_type = %created.product_type, "Product created");
        Ok(created)
    }

    /// Products created by the current user, paged with `skip`/`limit`.
    pub async fn user_products(&self, token: &str, skip: u32, limit: u32) -> Result<Vec<Product>> {
        let resp = self
            .send(
                self.client
                    .get(self.url("/products/user/"))
                    .bearer_auth(token)
                    .query(&[("skip", skip), ("limit", limit)]),
            )
            .await?;
        Ok(resp.json().await?)
    }
}

pub fn is_session_expired(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Best-effort extraction of the backend's `detail` message; falls back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_and_forbidden_mean_session_expired() {
        assert!(is_session_expired(StatusCode::UNAUTHORIZED));
        assert!(is_session_expired(StatusCode::FORBIDDEN));
        assert!(!is_session_expired(StatusCode::BAD_REQUEST));
        assert!(!is_session_expired(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail":"Email already registered"}"#),
            "Email already registered"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");

        let validation = error_message(r#"{"detail":[{"loc":["body","email"]}]}"#);
        assert!(validation.contains("email"));
    }

    #[test]
    fn registration_username_defaults_to_email_local_part() {
        let user = NewUser::from_email("ada@example.com", "hunter2");
        assert_eq!(user.username, "ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = UserUpdate {
            email: "ada@example.com".into(),
            bio: Some("prints things".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["bio"], "prints things");
        assert!(json.get("password").is_none());
        assert!(json.get("username").is_none());
    }

    #[test]
    fn product_deserializes_from_backend_shape() {
        let body = r#"{
            "id": 7,
            "user_id": 3,
            "prompt": "a red fox",
            "product_type": "Mug",
            "generated_image_url": "https://cdn/x.png",
            "product_image_url": "https://cdn/out.png",
            "created_at": "2024-09-01T12:30:00+00:00"
        }"#;
        let product: Product = serde_json::from_str(body).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.product_type, "Mug");
    }
}
