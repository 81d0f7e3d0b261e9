//! Typed HTTP client for the Toe Beans backend.
//!
//! One reusable reqwest client with a cookie store carries the session
//! cookie across calls, mirroring how the browser client authenticated.
//! Every method resolves to a value or a classified [`ApiError`];
//! nothing here panics or leaks a raw transport error.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;

use crate::config;
use crate::error::ApiError;
use crate::models::{
    ChangePasswordRequest, CreatePostingRequest, FollowState, LoginRequest, PostingsPage,
    RegisterUserRequest, UpdateUserRequest, UserProfile,
};

/// Client for the Toe Beans REST API.
#[derive(Debug, Clone)]
pub struct ToeBeansClient {
    /// Base URL of the backend, no trailing slash.
    base_url: String,
    /// Reusable HTTP client holding the session cookie.
    client: Client,
}

impl ToeBeansClient {
    /// Create a client against the configured backend URL.
    pub fn new() -> Self {
        Self::with_base_url(config::api_base_url())
    }

    /// Create a client against an explicit base URL. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            // Builder only fails on TLS backend misconfiguration, which
            // is unrecoverable at this point anyway.
            .unwrap_or_else(|_| Client::new());
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to a classified error, passing
    /// successes through.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let code = status.as_u16();
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::from_response(code, &body))
    }

    /// Send a request expecting no interesting body.
    async fn send_empty(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        Self::check(response).await?;
        Ok(())
    }

    // --- session ---------------------------------------------------

    /// `POST /login`. On success the session cookie is retained by the
    /// underlying client; callers follow up with [`Self::get_my_profile`]
    /// to learn the viewer's user name.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_empty(self.client.post(self.url("/login")).json(&body))
            .await
    }

    // --- users -----------------------------------------------------

    /// `GET /users`: the viewer's own profile.
    pub async fn get_my_profile(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(self.url("/users"))
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::from_transport)
    }

    /// `GET /users?user_name=<name>`: another user's profile.
    pub async fn get_user_profile(&self, user_name: &str) -> Result<UserProfile, ApiError> {
        let url = format!(
            "{}?user_name={}",
            self.url("/users"),
            urlencoding::encode(user_name)
        );
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::from_transport)
    }

    /// `POST /users/{name}`.
    pub async fn register_user(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let body = RegisterUserRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = self.url(&format!("/users/{}", urlencoding::encode(user_name)));
        self.send_empty(self.client.post(url).json(&body)).await
    }

    /// `PUT /users/{name}`.
    pub async fn update_user(
        &self,
        user_name: &str,
        request: &UpdateUserRequest,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/users/{}", urlencoding::encode(user_name)));
        self.send_empty(self.client.put(url).json(request)).await
    }

    /// `DELETE /users/{name}`: account deletion.
    pub async fn delete_user(&self, user_name: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/users/{}", urlencoding::encode(user_name)));
        self.send_empty(self.client.delete(url)).await
    }

    /// `PUT /password`.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.send_empty(self.client.put(self.url("/password")).json(&body))
            .await
    }

    // --- postings --------------------------------------------------

    /// `GET /postings?since_at=<ISO8601>&limit=<n>[&user_name=<name>]`.
    ///
    /// Returns postings strictly older than `since_at`, newest first,
    /// at most `limit` of them; `user_name` restricts to one author.
    pub async fn get_postings(
        &self,
        since_at: DateTime<Utc>,
        limit: usize,
        user_name: Option<&str>,
    ) -> Result<PostingsPage, ApiError> {
        let mut url = format!(
            "{}?since_at={}&limit={}",
            self.url("/postings"),
            since_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            limit
        );
        if let Some(name) = user_name {
            url.push_str("&user_name=");
            url.push_str(&urlencoding::encode(name));
        }
        tracing::debug!(%url, "fetching postings page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::from_transport)
    }

    /// `POST /postings` with the base64-encoded image in the body.
    pub async fn create_posting(&self, title: &str, image_base64: &str) -> Result<(), ApiError> {
        let body = CreatePostingRequest {
            title: title.to_string(),
            image: image_base64.to_string(),
        };
        self.send_empty(self.client.post(self.url("/postings")).json(&body))
            .await
    }

    /// `DELETE /postings/{id}`. Author-only, enforced server-side.
    pub async fn delete_posting(&self, posting_id: u64) -> Result<(), ApiError> {
        self.send_empty(self.client.delete(self.url(&format!("/postings/{}", posting_id))))
            .await
    }

    // --- likes -----------------------------------------------------

    /// `POST /likes/{postingID}`.
    pub async fn like(&self, posting_id: u64) -> Result<(), ApiError> {
        self.send_empty(self.client.post(self.url(&format!("/likes/{}", posting_id))))
            .await
    }

    /// `DELETE /likes/{postingID}`.
    pub async fn unlike(&self, posting_id: u64) -> Result<(), ApiError> {
        self.send_empty(self.client.delete(self.url(&format!("/likes/{}", posting_id))))
            .await
    }

    // --- follows ---------------------------------------------------

    /// `POST /follows/{name}`.
    pub async fn follow(&self, user_name: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/follows/{}", urlencoding::encode(user_name)));
        self.send_empty(self.client.post(url)).await
    }

    /// `DELETE /follows/{name}`.
    pub async fn unfollow(&self, user_name: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/follows/{}", urlencoding::encode(user_name)));
        self.send_empty(self.client.delete(url)).await
    }

    /// `GET /follows/{name}`: whether the viewer follows `name`.
    pub async fn get_follow_state(&self, user_name: &str) -> Result<FollowState, ApiError> {
        let url = self.url(&format!("/follows/{}", urlencoding::encode(user_name)));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::from_transport)
    }
}

impl Default for ToeBeansClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ToeBeansClient::with_base_url("http://example.com");
        assert_eq!(client.url("/postings"), "http://example.com/postings");
        assert_eq!(client.base_url(), "http://example.com");
    }

    #[tokio::test]
    async fn test_connection_refused_classifies_as_no_response() {
        let client = ToeBeansClient::with_base_url("http://127.0.0.1:59999");
        let err = client.like(1).await.unwrap_err();
        assert!(matches!(err, ApiError::NoResponse(_)));
    }
}
