use serde::Deserialize;

/// Main configuration structure for Tolvu-Catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Retailer location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the shop; every relative link is resolved against it
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://tolvutek.is".to_string(),
        }
    }
}

/// Transport behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Extra attempts for retryable failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// First backoff delay (milliseconds), doubled on every retry
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Listing pages fetched at the same time
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 2,
            retry_delay_ms: 500,
            max_concurrent_pages: 4,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// Email address the shop can reach the operator at
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: "tolvu-catalog".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_email: "catalog@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Format: ClientName/Version (+ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.client_name, self.client_version, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the build report is written
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "./build.txt".to_string(),
        }
    }
}
