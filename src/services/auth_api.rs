use reqwest::Method;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{AuthPayload, CurrentUser, LoginCredentials, RegisterCredentials, User};
use crate::services::api_client::ApiClient;

/// Client for the `/users` endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthPayload> {
        debug!(email = %credentials.email, "Logging in");
        let request = self
            .client
            .request(Method::POST, "/users/login", None)
            .json(credentials);
        self.client
            .send::<AuthPayload>(request)
            .await
            .map_err(into_auth_error)?
            .into_payload()
    }

    pub async fn register(&self, credentials: &RegisterCredentials) -> AppResult<AuthPayload> {
        debug!(email = %credentials.email, username = %credentials.username, "Registering");
        let request = self
            .client
            .request(Method::POST, "/users/register", None)
            .json(credentials);
        self.client
            .send::<AuthPayload>(request)
            .await
            .map_err(into_auth_error)?
            .into_payload()
    }

    /// Resolve the user a token belongs to.
    pub async fn validate_token(&self, token: &str) -> AppResult<User> {
        let request = self
            .client
            .request(Method::GET, "/users/validate-token", Some(token));
        let current = self
            .client
            .send::<CurrentUser>(request)
            .await
            .map_err(into_auth_error)?
            .into_payload()?;
        Ok(current.user)
    }
}

/// Credential and token rejections surface as client errors of various
/// statuses; all of them are authentication failures from the caller's view.
fn into_auth_error(error: AppError) -> AppError {
    match error {
        AppError::Server { status, message } if (400..500).contains(&status) => {
            AppError::Auth(message.unwrap_or_else(|| "Invalid email or password".into()))
        }
        other => other,
    }
}
