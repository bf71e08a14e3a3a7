use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::utils::{is_http_url, remove_trailing_slash};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_SESSION_PATH: &str = ".dish-cart/session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_path: PathBuf,
    /// No timeout is applied unless one is configured.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Reads `STORE_API_URL`, `STORE_SESSION_PATH` and
    /// `STORE_REQUEST_TIMEOUT_SECS`, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("STORE_API_URL").unwrap_or_else(|| {
            debug!("STORE_API_URL not set, using {}", DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });
        let session_path = lookup("STORE_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));
        let request_timeout = match lookup("STORE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("STORE_REQUEST_TIMEOUT_SECS is invalid: {}", e))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let config = Config {
            api_url: remove_trailing_slash(api_url.trim()),
            session_path,
            request_timeout,
        };
        config.validate()?;
        info!(api_url = %config.api_url, "configuration loaded");
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = remove_trailing_slash(api_url.trim());
        self.validate()?;
        Ok(self)
    }

    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = path;
        self
    }

    fn validate(&self) -> Result<()> {
        if !is_http_url(&self.api_url) {
            return Err(anyhow!(
                "API url must start with 'http://' or 'https://', got '{}'",
                self.api_url
            ));
        }
        if self.session_path.as_os_str().is_empty() {
            return Err(anyhow!("session path must not be empty"));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(anyhow!("STORE_REQUEST_TIMEOUT_SECS must be positive"));
        }
        Ok(())
    }
}
