//! HTTP fetching with bounded retries
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Timeout | Retry up to `max-retries` times, doubling delay |
//! | Connection failure | Retry up to `max-retries` times, doubling delay |
//! | HTTP 5xx | Retry up to `max-retries` times, doubling delay |
//! | HTTP 4xx | Fail immediately |

use crate::config::HttpConfig;
use crate::CatalogError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Maps a transport error onto the catalog's error taxonomy
pub fn classify_error(url: &Url, error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Timeout {
            url: url.to_string(),
        }
    } else {
        CatalogError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Runs `op` until it succeeds, fails for good, or runs out of retries
pub async fn with_retry<T, F, Fut>(http: &HttpConfig, url: &Url, mut op: F) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut delay = Duration::from_millis(http.retry_delay_ms);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < http.max_retries => {
                attempt += 1;
                warn!(
                    "Retrying {} ({}/{}) after {:?}: {}",
                    url, attempt, http.max_retries, delay, e
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// GETs `url` and returns the raw body bytes
pub async fn fetch_bytes(client: &Client, http: &HttpConfig, url: &Url) -> Result<Vec<u8>, CatalogError> {
    with_retry(http, url, || async move {
        debug!("GET {}", url);
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        check_status(url, response.status())?;

        let body = response.bytes().await.map_err(|e| classify_error(url, e))?;
        Ok(body.to_vec())
    })
    .await
}

/// POSTs a urlencoded form and returns the raw body bytes
pub async fn post_form_bytes(
    client: &Client,
    http: &HttpConfig,
    url: &Url,
    form: &[(&str, &str)],
) -> Result<Vec<u8>, CatalogError> {
    with_retry(http, url, || async move {
        debug!("POST {}", url);
        let response = client
            .post(url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        check_status(url, response.status())?;

        let body = response.bytes().await.map_err(|e| classify_error(url, e))?;
        Ok(body.to_vec())
    })
    .await
}

/// POSTs a urlencoded form once and returns the response status
///
/// Not retried: form posts like cart additions are not idempotent.
pub async fn post_form_status(
    client: &Client,
    url: &Url,
    form: &[(&str, &str)],
) -> Result<StatusCode, CatalogError> {
    debug!("POST {}", url);
    let response = client
        .post(url.clone())
        .form(form)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;
    Ok(response.status())
}

fn check_status(url: &Url, status: StatusCode) -> Result<(), CatalogError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(CatalogError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}
