use crate::config::types::{Config, HttpConfig, UserAgentConfig};
use crate::ConfigError;
use std::ops::RangeInclusive;
use url::Url;

const CONCURRENCY: RangeInclusive<usize> = 1..=32;
const MAX_RETRIES: u32 = 10;

/// Checks every section; errors name the offending TOML key
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base_url(&config.site.base_url)?;
    validate_http(&config.http)?;
    validate_user_agent(&config.user_agent)?;
    ensure(
        !config.output.report_path.trim().is_empty(),
        "output.report-path is empty",
    )
}

fn ensure(ok: bool, message: impl Into<String>) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Validation(message.into()))
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("site.base-url '{}': {}", base_url, e)))?;

    match (url.scheme(), url.host_str()) {
        ("http" | "https", Some(_)) => Ok(()),
        ("http" | "https", None) => Err(ConfigError::InvalidUrl(format!(
            "site.base-url '{}' has no host",
            base_url
        ))),
        (scheme, _) => Err(ConfigError::InvalidUrl(format!(
            "site.base-url must be http(s), got '{}'",
            scheme
        ))),
    }
}

fn validate_http(http: &HttpConfig) -> Result<(), ConfigError> {
    ensure(http.timeout_secs > 0, "http.timeout-secs must be at least 1")?;
    ensure(
        http.connect_timeout_secs > 0,
        "http.connect-timeout-secs must be at least 1",
    )?;
    ensure(
        CONCURRENCY.contains(&http.max_concurrent_pages),
        format!(
            "http.max-concurrent-pages must be in {}..={}, got {}",
            CONCURRENCY.start(),
            CONCURRENCY.end(),
            http.max_concurrent_pages
        ),
    )?;
    ensure(
        http.max_retries <= MAX_RETRIES,
        format!(
            "http.max-retries must be at most {}, got {}",
            MAX_RETRIES, http.max_retries
        ),
    )
}

/// The user agent header carries the name verbatim, so it stays to
/// alphanumerics and hyphens
fn validate_user_agent(agent: &UserAgentConfig) -> Result<(), ConfigError> {
    let name = &agent.client_name;
    ensure(
        !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '-'),
        format!("user-agent.client-name '{}' must be alphanumerics and '-'", name),
    )?;
    validate_email(&agent.contact_email)
}

/// `local@domain.tld`: one `@`, both sides non-empty, a dot in the domain
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    ensure(
        well_formed,
        format!("user-agent.contact-email '{}' is not an email address", email),
    )
}
