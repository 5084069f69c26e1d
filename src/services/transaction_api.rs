use reqwest::Method;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{NewTransaction, Transaction, TransactionQuery, TransactionUpdate};
use crate::services::api_client::ApiClient;
use crate::session::Session;

/// Client for the `/transactions` resource.
pub struct TransactionApi<'a> {
    client: &'a ApiClient,
    session: &'a Session,
}

impl<'a> TransactionApi<'a> {
    pub fn new(client: &'a ApiClient, session: &'a Session) -> Self {
        Self { client, session }
    }

    pub async fn list(&self, query: &TransactionQuery) -> AppResult<Vec<Transaction>> {
        let request = self
            .client
            .request(Method::GET, "/transactions", self.session.token())
            .query(query);
        let transactions = self
            .client
            .send::<Vec<Transaction>>(request)
            .await?
            .into_payload()?;
        debug!(count = transactions.len(), "Fetched transactions");
        Ok(transactions)
    }

    pub async fn get(&self, id: i64) -> AppResult<Transaction> {
        let request = self.client.request(
            Method::GET,
            &format!("/transactions/{}", id),
            self.session.token(),
        );
        self.client.send::<Transaction>(request).await?.into_payload()
    }

    pub async fn create(&self, transaction: &NewTransaction) -> AppResult<Transaction> {
        let request = self
            .client
            .request(Method::POST, "/transactions", self.session.token())
            .json(transaction);
        let created = self.client.send::<Transaction>(request).await?.into_payload()?;
        info!(id = created.id, amount = created.amount, "Created transaction");
        Ok(created)
    }

    pub async fn update(&self, id: i64, update: &TransactionUpdate) -> AppResult<Transaction> {
        let request = self
            .client
            .request(
                Method::PUT,
                &format!("/transactions/{}", id),
                self.session.token(),
            )
            .json(update);
        let updated = self.client.send::<Transaction>(request).await?.into_payload()?;
        info!(id = updated.id, "Updated transaction");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let request = self.client.request(
            Method::DELETE,
            &format!("/transactions/{}", id),
            self.session.token(),
        );
        self.client.send::<serde_json::Value>(request).await?;
        info!(id = id, "Deleted transaction");
        Ok(())
    }
}
