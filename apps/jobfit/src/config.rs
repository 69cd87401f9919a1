use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;

/// The address the analysis backend listens on when run locally.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";
/// Delay before the results block is brought back into view, letting output settle first.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 300;

/// Client configuration loaded from environment variables.
/// Every variable is optional; with none set the client talks to the local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    /// `None` leaves requests unbounded; they resolve whenever the transport does.
    pub request_timeout: Option<Duration>,
    pub reveal_delay: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint_raw = var("JOBFIT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw)
            .with_context(|| format!("JOBFIT_ENDPOINT '{endpoint_raw}' is not a valid URL"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!("JOBFIT_ENDPOINT must use http or https, got '{}'", endpoint.scheme());
        }

        let request_timeout = match var("JOBFIT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .context("JOBFIT_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
                if secs == 0 {
                    bail!("JOBFIT_REQUEST_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let reveal_delay_ms = match var("JOBFIT_REVEAL_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("JOBFIT_REVEAL_DELAY_MS must be a whole number of milliseconds")?,
            None => DEFAULT_REVEAL_DELAY_MS,
        };

        Ok(Config {
            endpoint,
            request_timeout,
            reveal_delay: Duration::from_millis(reveal_delay_ms),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }
}
