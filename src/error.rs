use reqwest::StatusCode;
use thiserror::Error;

/// Message of the auth error raised when a gated command runs signed out.
pub const NOT_LOGGED_IN: &str = "Not logged in";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Map a non-success HTTP status (and the backend's `message`, if any) into
    /// the error taxonomy.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return AppError::Auth(message.unwrap_or_else(|| "Invalid or expired token".into()));
        }
        AppError::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }

    /// Text suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Auth(msg) if msg.as_str() == NOT_LOGGED_IN => {
                "Not logged in. Run `fintrack login`.".to_string()
            }
            AppError::Auth(_) => "Your session has expired. Please log in again.".to_string(),
            AppError::Server {
                message: Some(msg), ..
            } => msg.clone(),
            AppError::Server { .. } => "Failed to fetch data".to_string(),
            AppError::Network(_) => "Could not reach the server".to_string(),
            error => {
                tracing::error!("Unexpected error: {}", error);
                "An unexpected error occurred".to_string()
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        AppError::Template(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
