use tracing::debug;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Category, Transaction, TransactionQuery, TransactionWithCategory, User};
use crate::services::{ApiClient, CategoryApi, TransactionApi};
use crate::session::{AuthState, FileTokenStore, Session, TokenStore};

/// Everything a command needs: configuration, the HTTP client and the session.
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub session: Session,
}

impl AppState {
    pub fn new(config: Config, store: Box<dyn TokenStore>) -> AppResult<Self> {
        let client = ApiClient::new(&config)?;
        Ok(Self {
            config,
            client,
            session: Session::new(store),
        })
    }

    /// State backed by the token file named in the configuration.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let store = FileTokenStore::new(config.token_path.clone());
        Self::new(config, Box::new(store))
    }

    /// Restore and validate the persisted session.
    pub async fn init(&mut self) -> AppResult<&AuthState> {
        self.session.init(&self.client).await
    }

    pub fn require_user(&self) -> AppResult<&User> {
        self.session.require_user()
    }

    pub fn categories(&self) -> CategoryApi<'_> {
        CategoryApi::new(&self.client, &self.session)
    }

    pub fn transactions(&self) -> TransactionApi<'_> {
        TransactionApi::new(&self.client, &self.session)
    }

    /// Fetch transactions, then categories, and join them once.
    pub async fn load_joined(
        &self,
        query: &TransactionQuery,
    ) -> AppResult<(Vec<TransactionWithCategory>, Vec<Category>)> {
        let transactions: Vec<Transaction> = self.transactions().list(query).await?;
        let categories = self.categories().list().await?;
        let joined = TransactionWithCategory::join(&transactions, &categories);
        debug!(
            transactions = joined.len(),
            categories = categories.len(),
            unresolved = joined.iter().filter(|t| !t.has_category()).count(),
            "Joined transactions with categories"
        );
        Ok((joined, categories))
    }
}
