use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use url::Url;

pub const BACKEND_URL_VAR: &str = "POTHIK_BACKEND_URL";
pub const HTTP_TIMEOUT_VAR: &str = "POTHIK_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ConfigError {
    MissingBackendUrl,
    InvalidBackendUrl(String),
    InvalidTimeout(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingBackendUrl => {
                write!(f, "{} environment variable not set", BACKEND_URL_VAR)
            }
            ConfigError::InvalidBackendUrl(err) => {
                write!(f, "Invalid backend URL: {}", err)
            }
            ConfigError::InvalidTimeout(err) => {
                write!(f, "Invalid {} value: {}", HTTP_TIMEOUT_VAR, err)
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ConfigError::InvalidBackendUrl(e.to_string()))?;

        Ok(ApiConfig {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read the backend URL and optional HTTP timeout from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(BACKEND_URL_VAR).map_err(|_| ConfigError::MissingBackendUrl)?;
        let mut config = Self::new(&base_url)?;

        if let Ok(raw) = env::var(HTTP_TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
