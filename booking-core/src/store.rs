use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::errors::BookingError;

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Client for the external key-document store.
///
/// Collections hold documents keyed by an opaque id. Implementations map
/// their own failures onto the structured errors:
/// - `NotFound` when the document does not exist
/// - `Unavailable` when the store cannot answer or commit
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Document>;

    /// Merge `fields` into an existing document as one atomic write.
    ///
    /// Fields not named in `fields` are left untouched. Never creates a
    /// document.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()>;

    /// Create or fully replace a document.
    async fn insert(&self, _collection: &str, _id: &str, _doc: Document) -> Result<()> {
        Err(BookingError::general_error("Method not implemented: insert").into_anyhow())
    }
}

/// In-process store used for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }
}

fn not_found(collection: &str, id: &str) -> anyhow::Error {
    BookingError::not_found(format!("No record found for id '{id}' in '{collection}'"))
        .with_data(serde_json::json!({ "collection": collection, "id": id }))
        .into_anyhow()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Document> {
        let guard = self.collections.read().await;
        guard
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned()
            .ok_or_else(|| not_found(collection, id))
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let mut guard = self.collections.write().await;
        let doc = guard
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| not_found(collection, id))?;

        for (k, v) in fields {
            doc.insert(k, v);
        }
        Ok(())
    }

    async fn insert(&self, collection: &str, id: &str, doc: Document) -> Result<()> {
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }
}
