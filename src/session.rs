//! Session lifecycle and token persistence.
//!
//! A [`Session`] is created once per process and passed by reference to every
//! call that needs authentication. [`Session::init`] restores a persisted
//! token and validates it with the backend; [`Session::teardown`] forgets the
//! token both in memory and on disk. Any authentication failure reported by a
//! data-access call should be routed through [`Session::handle_error`], which
//! forces a logout.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, NOT_LOGGED_IN};
use crate::models::{AuthPayload, LoginCredentials, RegisterCredentials, User};
use crate::services::api_client::ApiClient;
use crate::services::auth_api::AuthApi;

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Durable storage for the session token.
pub trait TokenStore: Send {
    fn load(&self) -> AppResult<Option<String>>;
    fn save(&self, token: &str) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Token store backed by a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AppResult<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) => Ok(stored.token.filter(|t| !t.is_empty())),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let stored = StoredSession {
            token: Some(token.to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AppResult<Option<String>> {
        Ok(self.token.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, token: &str) -> AppResult<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Unauthenticated,
    Loading,
    Authenticated(User),
}

pub struct Session {
    state: AuthState,
    token: Option<String>,
    store: Box<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self {
            state: AuthState::Unauthenticated,
            token: None,
            store,
        }
    }

    /// Restore a persisted token and validate it.
    ///
    /// A missing token leaves the session unauthenticated. A token the
    /// backend rejects is discarded. Any other failure, such as an
    /// unreachable backend, is returned and the stored token is kept for the
    /// next run.
    pub async fn init(&mut self, client: &ApiClient) -> AppResult<&AuthState> {
        let Some(token) = self.store.load()? else {
            debug!("No stored session token");
            self.state = AuthState::Unauthenticated;
            return Ok(&self.state);
        };

        self.state = AuthState::Loading;
        self.token = Some(token.clone());

        match AuthApi::new(client).validate_token(&token).await {
            Ok(user) => {
                info!(username = %user.username, "Restored session");
                self.state = AuthState::Authenticated(user);
            }
            Err(e) if e.is_auth() => {
                warn!(error = %e, "Stored session token was rejected");
                self.teardown()?;
            }
            Err(e) => {
                warn!(error = %e, "Could not validate stored session token");
                self.token = None;
                self.state = AuthState::Unauthenticated;
                return Err(e);
            }
        }

        Ok(&self.state)
    }

    pub async fn login(
        &mut self,
        client: &ApiClient,
        email: &str,
        password: &str,
    ) -> AppResult<&User> {
        let credentials = LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.state = AuthState::Loading;
        let result = AuthApi::new(client).login(&credentials).await;
        self.finish_authentication(result)
    }

    pub async fn register(
        &mut self,
        client: &ApiClient,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<&User> {
        let credentials = RegisterCredentials {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.state = AuthState::Loading;
        let result = AuthApi::new(client).register(&credentials).await;
        self.finish_authentication(result)
    }

    fn finish_authentication(&mut self, result: AppResult<AuthPayload>) -> AppResult<&User> {
        match result {
            Ok(AuthPayload { user, token }) => {
                self.store.save(&token)?;
                self.token = Some(token);
                info!(username = %user.username, "Signed in");
                self.state = AuthState::Authenticated(user);
                self.require_user()
            }
            Err(e) => {
                self.state = AuthState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Log out: forget the token in memory and in durable storage.
    pub fn teardown(&mut self) -> AppResult<()> {
        self.token = None;
        self.state = AuthState::Unauthenticated;
        self.store.clear()
    }

    /// Force a logout when `error` is an authentication failure.
    ///
    /// Returns `true` when the session was torn down.
    pub fn handle_error(&mut self, error: &AppError) -> bool {
        if !error.is_auth() {
            return false;
        }
        warn!("Authentication rejected by the server, signing out");
        if let Err(e) = self.teardown() {
            warn!(error = %e, "Failed to clear stored session token");
        }
        true
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// The signed-in user, or an auth error for gated commands.
    pub fn require_user(&self) -> AppResult<&User> {
        self.user()
            .ok_or_else(|| AppError::Auth(NOT_LOGGED_IN.into()))
    }
}
