//! API client for communicating with the Cylera Partner API.
//!
//! `CyleraClient` owns one HTTP connection pool, the credentials and
//! the current session token. Every request path runs through
//! `ensure_valid_token`, which performs at most one login round-trip
//! per token expiry; there is no proactive or background refresh.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::auth::SessionData;
use crate::config::Config;

use super::{CyleraError, Query};

/// Partner login endpoint, relative to the base URL.
const LOGIN_PATH: &str = "auth/login_user";

/// HTTP request timeout in seconds.
/// The partner API can be slow under load; 30s allows for that while
/// still failing fast enough for interactive CLI use.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Form of the login request body. Usernames are email addresses.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The one field of the login response the client relies on. The
/// response carries no expiry; the 23-hour lifetime is hardcoded in
/// `SessionData`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Authenticated client for the Cylera Partner API.
///
/// The session sits behind a `Mutex` so resource functions can take
/// `&CyleraClient` while the token is still replaced in place on
/// expiry. The lock is never held across an HTTP round-trip.
pub struct CyleraClient {
    client: Client,
    config: Config,
    session: Mutex<Option<SessionData>>,
}

impl CyleraClient {
    /// Create a client. No network call happens until the first request.
    pub fn new(config: Config) -> Result<Self, CyleraError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            config,
            session: Mutex::new(None),
        })
    }

    /// Create a client with a pre-set session, bypassing the login
    /// endpoint. Used by tests to control token age without real
    /// authentication traffic.
    pub fn with_session(config: Config, session: SessionData) -> Result<Self, CyleraError> {
        let mut client = Self::new(config)?;
        *client.session.get_mut() = Some(session);
        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Exchange the configured credentials for a bearer token and store
    /// it with the current timestamp. Returns the raw auth response so
    /// the init wizard can show it.
    ///
    /// A non-success status or a body without a `token` field is an
    /// `Auth` error; it is fatal and never retried automatically.
    pub async fn authenticate(&self) -> Result<Value, CyleraError> {
        let url = self.url(LOGIN_PATH);
        debug!(url = %url, "Authenticating");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                email: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(CyleraError::Auth(format!(
                "login returned {}: {}",
                status,
                CyleraError::truncate_body(&body)
            )));
        }

        let parsed: Value = serde_json::from_str(&body)
            .map_err(|e| CyleraError::Auth(format!("malformed login response: {e}")))?;
        let login: LoginResponse = serde_json::from_value(parsed.clone())
            .map_err(|_| CyleraError::Auth("login response missing token field".to_string()))?;

        let mut session = self.session.lock().await;
        *session = Some(SessionData::new(login.token));

        Ok(parsed)
    }

    /// Guard run at the start of every request path: returns the current
    /// token, logging in first iff it is absent or expired. This is the
    /// only refresh trigger.
    async fn ensure_valid_token(&self) -> Result<String, CyleraError> {
        {
            let session = self.session.lock().await;
            match session.as_ref() {
                Some(data) if !data.is_expired() => return Ok(data.token.clone()),
                Some(_) => debug!("Token expired, re-authenticating"),
                None => debug!("No token yet, authenticating"),
            }
        }

        self.authenticate().await?;

        let session = self.session.lock().await;
        session
            .as_ref()
            .map(|data| data.token.clone())
            .ok_or_else(|| CyleraError::Auth("token missing after login".to_string()))
    }

    /// Issue one authenticated GET and parse the body as JSON.
    ///
    /// Exactly one HTTP attempt per call (plus at most the implicit
    /// login above). 404 surfaces as `NotFound`, any other non-success
    /// status as `Api`, transport failures as `Network`.
    pub async fn get(&self, path: &str, query: &Query) -> Result<Value, CyleraError> {
        let token = self.ensure_valid_token().await?;
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query.params())
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(CyleraError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            CyleraError::InvalidResponse(format!("response from {url} is not valid JSON: {e}"))
        })
    }
}
