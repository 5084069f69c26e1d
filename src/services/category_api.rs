use reqwest::Method;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{Category, CategoryType, CategoryUpdate, NewCategory};
use crate::services::api_client::ApiClient;
use crate::session::Session;

/// Client for the `/categories` resource.
pub struct CategoryApi<'a> {
    client: &'a ApiClient,
    session: &'a Session,
}

impl<'a> CategoryApi<'a> {
    pub fn new(client: &'a ApiClient, session: &'a Session) -> Self {
        Self { client, session }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let request = self
            .client
            .request(Method::GET, "/categories", self.session.token());
        let categories = self.client.send::<Vec<Category>>(request).await?.into_payload()?;
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    pub async fn list_by_type(&self, category_type: CategoryType) -> AppResult<Vec<Category>> {
        let request = self
            .client
            .request(Method::GET, "/categories", self.session.token())
            .query(&[("type", category_type.as_str())]);
        let categories = self.client.send::<Vec<Category>>(request).await?.into_payload()?;
        debug!(count = categories.len(), category_type = %category_type, "Fetched categories");
        Ok(categories)
    }

    pub async fn get(&self, id: i64) -> AppResult<Category> {
        let request = self.client.request(
            Method::GET,
            &format!("/categories/{}", id),
            self.session.token(),
        );
        self.client.send::<Category>(request).await?.into_payload()
    }

    /// Create a category. A `success: false` reply is returned as a server
    /// error carrying the backend's message.
    pub async fn create(&self, category: &NewCategory) -> AppResult<Category> {
        let request = self
            .client
            .request(Method::POST, "/categories", self.session.token())
            .json(category);
        let created = self.client.send::<Category>(request).await?.into_payload()?;
        info!(id = created.id, name = %created.name, "Created category");
        Ok(created)
    }

    pub async fn update(&self, id: i64, update: &CategoryUpdate) -> AppResult<Category> {
        let request = self
            .client
            .request(
                Method::PUT,
                &format!("/categories/{}", id),
                self.session.token(),
            )
            .json(update);
        let updated = self.client.send::<Category>(request).await?.into_payload()?;
        info!(id = updated.id, name = %updated.name, "Updated category");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let request = self.client.request(
            Method::DELETE,
            &format!("/categories/{}", id),
            self.session.token(),
        );
        self.client.send::<serde_json::Value>(request).await?;
        info!(id = id, "Deleted category");
        Ok(())
    }
}
