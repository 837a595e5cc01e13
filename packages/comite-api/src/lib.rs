//! Pure REST client for the committee membership API.
//!
//! Wraps the `Members`, `Comites` and `Roles` endpoints. Every non-2xx answer
//! is surfaced as an [`ApiError`]; a 404 becomes [`ApiError::NotFound`] so
//! callers can tell "no such cédula" apart from a failing server.
//!
//! # Example
//!
//! ```rust,ignore
//! use comite_api::ApiClient;
//!
//! let client = ApiClient::new("http://localhost:5000/api/")?;
//!
//! let member = client.member_by_cedula("00112345678").await?;
//! println!("{} {}", member.nombre, member.apellido);
//! ```

pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::{Committee, Member, Role};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://host/api/`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET Members/byCedula/{cedula}`
    pub async fn member_by_cedula(&self, cedula: &str) -> Result<Member> {
        self.get_json(&format!("Members/byCedula/{}", cedula)).await
    }

    /// `GET Members/{id}`
    pub async fn member(&self, id: i64) -> Result<Member> {
        self.get_json(&format!("Members/{}", id)).await
    }

    /// `GET Members/byComite/{comite_id}`
    pub async fn members_by_committee(&self, comite_id: i64) -> Result<Vec<Member>> {
        self.get_json(&format!("Members/byComite/{}", comite_id)).await
    }

    /// `POST Members`. Falls back to the submitted record when the API
    /// answers without a body.
    pub async fn create_member(&self, member: &Member) -> Result<Member> {
        let saved: Option<Member> = self.send_json(reqwest::Method::POST, "Members", member).await?;
        Ok(saved.unwrap_or_else(|| member.clone()))
    }

    /// `PUT Members/{id}`. The API usually answers `204 No Content`, in which
    /// case the submitted record is what was stored.
    pub async fn update_member(&self, id: i64, member: &Member) -> Result<Member> {
        let path = format!("Members/{}", id);
        let saved: Option<Member> = self.send_json(reqwest::Method::PUT, &path, member).await?;
        Ok(saved.unwrap_or_else(|| member.clone()))
    }

    /// `GET Comites`
    pub async fn committees(&self) -> Result<Vec<Committee>> {
        self.get_json("Comites").await
    }

    /// `GET Comites/{id}`
    pub async fn committee(&self, id: i64) -> Result<Committee> {
        self.get_json(&format!("Comites/{}", id)).await
    }

    /// `GET Roles`
    pub async fn roles(&self) -> Result<Vec<Role>> {
        self.get_json("Roles").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let resp = self.client.get(self.url(path)).send().await?;
        let body = read_success_body(resp, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<B, T>(&self, method: reqwest::Method, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!(path, method = %method, "sending JSON body");
        let resp = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        let text = read_success_body(resp, path).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}

async fn read_success_body(resp: reqwest::Response, path: &str) -> Result<String> {
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound {
            path: path.to_string(),
        });
    }
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        tracing::warn!(path, status = status.as_u16(), "API returned an error status");
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp.text().await?)
}

/// Ensure the base URL has a scheme and ends with exactly one `/`.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(format!("{}/", trimmed.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_single_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/api").unwrap(),
            "http://localhost:5000/api/"
        );
        assert_eq!(
            normalize_base_url(" https://example.org/api// ").unwrap(),
            "https://example.org/api/"
        );
    }

    #[test]
    fn test_base_url_requires_scheme() {
        let err = normalize_base_url("localhost:5000").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_endpoint_urls() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            client.url("Members/byCedula/00112345678"),
            "http://localhost:5000/api/Members/byCedula/00112345678"
        );
        assert_eq!(client.url("Roles"), "http://localhost:5000/api/Roles");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client =
            ApiClient::with_timeout("http://127.0.0.1:9/api", Duration::from_millis(500)).unwrap();
        let err = client.roles().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!err.is_not_found());
    }
}
