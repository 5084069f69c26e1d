use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Wrapper every backend response is enveloped in.
///
/// Reads carry only `payload`. Mutations may add `success` and a
/// user-facing `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub payload: Option<T>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Fails when the backend explicitly reported `success: false`.
    pub fn check(self, status: u16) -> AppResult<Self> {
        if self.success == Some(false) {
            return Err(AppError::Server {
                status,
                message: self.message,
            });
        }
        Ok(self)
    }

    /// The payload, or a decode error when it is absent.
    pub fn into_payload(self) -> AppResult<T> {
        self.payload
            .ok_or_else(|| AppError::Decode("response has no payload".into()))
    }
}

/// Error body shape used for non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
