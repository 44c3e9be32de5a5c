//! MongoDB-backed event store.

use crate::services::store::{EventStore, FindQuery};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Client as MongoClient, Collection,
};
use service_core::error::AppError;
use tokio::sync::OnceCell;
use tracing::instrument;

/// Event store over a MongoDB client created on first use.
///
/// Client creation (including SRV lookups for `mongodb+srv://` URIs) happens
/// inside the first query, so its failures reach callers as ordinary store
/// errors. A failed attempt leaves the cell empty and the next query retries.
pub struct MongoEventStore {
    uri: String,
    database: String,
    client: OnceCell<MongoClient>,
}

impl MongoEventStore {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&MongoClient, AppError> {
        self.client
            .get_or_try_init(|| async {
                tracing::info!("Connecting to MongoDB");
                let client = MongoClient::with_uri_str(&self.uri).await.map_err(|e| {
                    tracing::error!("Failed to create MongoDB client: {}", e);
                    AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
                })?;
                tracing::info!(database = %self.database, "MongoDB client ready");
                Ok(client)
            })
            .await
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client()
            .await?
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub async fn collection(&self, name: &str) -> Result<Collection<Document>, AppError> {
        Ok(self.client().await?.database(&self.database).collection(name))
    }
}

#[async_trait]
impl EventStore for MongoEventStore {
    #[instrument(skip(self, query), fields(filter = %query.filter, sort = %query.sort))]
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, AppError> {
        let options = if query.sort.is_empty() {
            None
        } else {
            Some(FindOptions::builder().sort(query.sort).build())
        };

        let cursor = self
            .collection(collection)
            .await?
            .find(query.filter, options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query {}: {}", collection, e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect {} documents: {}", collection, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unresolvable_srv_uri_fails_on_query_not_construction() {
        let store = MongoEventStore::new(
            "mongodb+srv://cluster0.nonexistent-host.invalid/",
            "events_db",
        );

        let result = store.find("events", FindQuery::default()).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(store.client.get().is_none());
    }
}
