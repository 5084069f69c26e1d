use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Backend used when `FINTRACK_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the backend, without the `/api` suffix.
    pub api_url: String,
    /// Where the session token is persisted between runs.
    pub token_path: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_url = env::var("FINTRACK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "FINTRACK_API_URL must start with http:// or https://, got: {}",
                api_url
            )));
        }

        let token_path = match env::var("FINTRACK_TOKEN_PATH") {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_token_path(),
        };

        let request_timeout = env::var("FINTRACK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api_url,
            token_path,
            request_timeout,
        })
    }

    /// Config pointing at an explicit backend, used by tests and embedders.
    pub fn with_api_url(api_url: impl Into<String>, token_path: PathBuf) -> Self {
        Self {
            api_url: api_url.into(),
            token_path,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Base URL every resource path is appended to.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.api_url.trim_end_matches('/'))
    }
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fintrack")
        .join("session.json")
}
