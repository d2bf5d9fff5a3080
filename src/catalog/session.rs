//! Authenticated session
//!
//! The shop keeps the login in a session cookie. [`Session::open`] posts the
//! credentials once on a cookie-storing client; every later request reuses
//! that client and with it the cookie.

use crate::config::Config;
use crate::url::normalize_url;
use crate::CatalogError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Login form endpoint
pub const LOGIN_PATH: &str = "/login/loginsubmit";

/// A cookie-bearing HTTP client rooted at the shop's base URL
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    base_url: Url,
}

impl Session {
    /// Logs in and returns the session
    ///
    /// # Failure
    ///
    /// Returns `CatalogError::Auth` when the login request cannot be sent
    /// or the shop answers with a non-success status.
    ///
    /// The shop answers rejected credentials with an ordinary 200 page, so a
    /// successful `open` does not prove the credentials were accepted. Bad
    /// credentials then show up later as pages missing their
    /// logged-in content.
    pub async fn open(config: &Config, username: &str, password: &str) -> Result<Self, CatalogError> {
        let session = Self::anonymous(config)?;
        let login_url = normalize_url(&session.base_url, LOGIN_PATH)?;

        info!("Logging in as {}", username);
        let response = session
            .client
            .post(login_url.clone())
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| CatalogError::Auth(format!("{}: {}", login_url, e)))?;

        let status = response.status();
        debug!("Login response status: {}", status);
        if !status.is_success() {
            return Err(CatalogError::Auth(format!(
                "{} answered with HTTP {}",
                login_url,
                status.as_u16()
            )));
        }

        Ok(session)
    }

    /// A session without a login, for catalog pages that need none
    pub fn anonymous(config: &Config) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.site.base_url)
            .map_err(|e| crate::UrlError::Parse(format!("{}: {}", config.site.base_url, e)))?;
        let client = build_http_client(config)?;
        Ok(Self { client, base_url })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Builds the cookie-storing HTTP client
///
/// Every request gets the configured whole-request timeout so a stalled
/// connection surfaces as a retryable timeout instead of hanging.
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .cookie_store(true)
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
