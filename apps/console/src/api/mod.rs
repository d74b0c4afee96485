//! API client — the single point of entry for all marketplace HTTP calls.
//!
//! Every module talks to the server through `ApiClient`; nothing else in
//! the crate constructs a `reqwest` request. The client attaches the
//! session token as an `x-auth-token` header whenever one is set, exactly
//! like the original request interceptor: no token, no header.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod auth;
pub mod participants;
pub mod postings;
pub mod profiles;

const AUTH_HEADER: &str = "x-auth-token";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Error body shapes the server is known to produce. Only the optional
/// message string is ever extracted; status codes are not classified
/// further client-side.
#[derive(Debug, Deserialize)]
struct ServerError {
    message: Option<String>,
    error: Option<ServerErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    message: String,
}

/// Shared HTTP client for the marketplace API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Installs the session token; subsequent requests carry it.
    pub fn set_token(&self, token: &str) {
        *self.token.write().expect("token lock poisoned") = Some(token.to_string());
    }

    /// Drops the session token (logout).
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::parse(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Body-less PUT whose response content is irrelevant (the review
    /// actions). Success is all the caller learns.
    pub async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(reqwest::Method::PUT, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token.read().expect("token lock poisoned").as_deref() {
            builder = builder.header(AUTH_HEADER, token);
        }
        builder
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Api {
            status: status.as_u16(),
            message: extract_server_message(&body),
        })
    }
}

/// Pulls the optional human-readable message out of an error body. Falls
/// back to the raw body, then to a placeholder for empty responses.
fn extract_server_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ServerError>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
        if let Some(inner) = parsed.error {
            return inner.message;
        }
    }
    if body.trim().is_empty() {
        "(no message)".to_string()
    } else {
        body.trim().to_string()
    }
}
