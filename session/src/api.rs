//! REST helpers for the chat backend's auth endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Login and registration turn every failure into a message a form can show:
//! the backend's `detail` when it sent one, otherwise a fixed fallback.
//! Verification keeps the cause (`Rejected` vs `Transport`) for logging, but
//! callers treat every error the same way: the token is no good.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};

use crate::context::Session;
use crate::error::{AUTHENTICATION_FAILED, AuthError, LOGIN_FALLBACK, REGISTRATION_FAILED};
use crate::gate::IdentityVerifier;

/// Backend location used when the build does not override it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Successful `POST /token` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /register` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// HTTP client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http: reqwest::Client::new(), base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchange credentials for a token via `POST /token` and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Authentication`] with the backend's `detail`, or a
    /// generic message when the backend could not be reached or answered with
    /// an unreadable body. Nothing is stored on failure.
    pub async fn login(&self, session: &Session, username: &str, password: &str) -> Result<AuthPayload, AuthError> {
        let resp = self
            .http
            .post(self.endpoint("/token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "login request failed");
                AuthError::Authentication(AUTHENTICATION_FAILED.to_owned())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = error_detail(resp).await.unwrap_or_else(|| LOGIN_FALLBACK.to_owned());
            tracing::warn!(status = status.as_u16(), %message, "login rejected");
            return Err(AuthError::Authentication(message));
        }

        let payload = resp.json::<AuthPayload>().await.map_err(|e| {
            tracing::error!(error = %e, "login response unreadable");
            AuthError::Authentication(AUTHENTICATION_FAILED.to_owned())
        })?;

        session.store(&payload.access_token);
        tracing::info!(%username, "login succeeded");
        Ok(payload)
    }

    /// Create an account via `POST /register`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Registration`] with the backend's `detail`, or a
    /// generic message when none is available.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.endpoint("/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "register request failed");
                AuthError::Registration(REGISTRATION_FAILED.to_owned())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = error_detail(resp).await.unwrap_or_else(|| REGISTRATION_FAILED.to_owned());
            tracing::warn!(status = status.as_u16(), %message, "registration rejected");
            return Err(AuthError::Registration(message));
        }
        Ok(())
    }

    /// Check `token` against `GET /users/me`. Any 2xx means valid.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] on a non-success status and
    /// [`AuthError::Transport`] when no response arrived.
    pub async fn verify_token(&self, token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .get(self.endpoint("/users/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AuthError::Rejected { status: status.as_u16() })
        }
    }
}

impl IdentityVerifier for AuthClient {
    async fn verify(&self, token: &str) -> Result<(), AuthError> {
        self.verify_token(token).await
    }
}

/// Pull a non-empty string `detail` out of an error response body.
async fn error_detail(resp: reqwest::Response) -> Option<String> {
    let body = resp.text().await.ok()?;
    parse_detail(&body)
}

fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .detail?
        .as_str()
        .filter(|detail| !detail.is_empty())
        .map(str::to_owned)
}
