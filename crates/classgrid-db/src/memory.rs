use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{DocumentStore, Query};

#[derive(Debug, Default)]
struct Bucket {
    next_seq: u64,
    documents: HashMap<String, (u64, Value)>,
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Bucket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|bucket| bucket.documents.get(id))
            .map(|(_, document)| document.clone()))
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let bucket = collections.entry(collection.to_string()).or_default();

        match bucket.documents.get_mut(id) {
            Some((_, existing)) => *existing = document,
            None => {
                let seq = bucket.next_seq;
                bucket.next_seq += 1;
                bucket.documents.insert(id.to_string(), (seq, document));
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|bucket| bucket.documents.remove(id).is_some()))
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let Some(bucket) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut hits: Vec<&(u64, Value)> = bucket
            .documents
            .values()
            .filter(|(_, document)| query.matches(document))
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);

        Ok(hits.into_iter().map(|(_, document)| document.clone()).collect())
    }
}
