use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// A conjunction of top-level field equalities.
///
/// An empty query matches every document in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `field == value` condition. A second condition on the same
    /// field replaces the first.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.conditions.iter_mut().find(|(f, _)| *f == field) {
            Some(existing) => existing.1 = value,
            None => self.conditions.push((field, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// The query as a JSON object, for containment matching.
    pub fn to_filter(&self) -> Value {
        Value::Object(self.conditions.iter().cloned().collect())
    }
}

/// Schemaless persistence for JSON documents grouped into named collections.
///
/// Implementations must be `Send + Sync` so one store can sit behind an `Arc`
/// in the application state and serve concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name of the backend, for logs.
    fn backend(&self) -> &'static str;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Inserts or replaces the document stored under `id`.
    ///
    /// Replacing keeps the document's original insertion position.
    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    /// Removes a document, returning whether one was present.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Documents matching `query`, in insertion order.
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, StoreError>;
}
