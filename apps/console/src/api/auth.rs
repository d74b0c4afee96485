//! Authentication endpoints: register, login, email verification and the
//! two-step password reset.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::models::user::Role;
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub role: Role,
}

/// Generic `{message}` acknowledgement some endpoints reply with.
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    pub async fn register(&self, request: &RegisterRequest) -> Result<Acknowledgement, ApiError> {
        self.post("/auth/register", request).await
    }

    /// Logs in and installs the returned token on this client. The caller
    /// persists the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let response: LoginResponse = self
            .post("/auth/login", &LoginRequest { email, password })
            .await?;
        self.set_token(&response.token);
        Ok(Session {
            token: response.token,
            user_id: response.user_id,
            role: response.role,
        })
    }

    pub async fn verify_email(&self, token: &str) -> Result<Acknowledgement, ApiError> {
        self.get(&format!("/auth/verify/{token}")).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        self.post(
            "/auth/password-reset/request",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Acknowledgement, ApiError> {
        self.post(
            &format!("/auth/password-reset/{token}"),
            &serde_json::json!({ "password": new_password }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_accepts_camel_case() {
        let raw = r#"{"token":"t","userId":"9f8d8f4e-1c7b-4f7e-8a8a-2d3f4b5c6d7e","role":"company"}"#;
        let parsed: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.token, "t");
        assert_eq!(parsed.role, Role::Company);
    }
}
