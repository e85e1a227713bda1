use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::error::StoreError;
use crate::store::{DocumentStore, Query};

/// A named collection of `T` records.
///
/// Records go through serde on the way in and out; the store itself only sees
/// JSON values.
pub struct Collection<T> {
    name: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Collection").field(&self.name).finish()
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get(&self, store: &dyn DocumentStore, id: &str) -> Result<Option<T>, StoreError> {
        match store.get(self.name, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, store: &dyn DocumentStore, id: &str, record: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        store.put(self.name, id, value).await
    }

    pub async fn delete(&self, store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete(self.name, id).await
    }

    pub async fn find(&self, store: &dyn DocumentStore, query: &Query) -> Result<Vec<T>, StoreError> {
        store
            .query(self.name, query)
            .await?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }

    pub async fn find_one(
        &self,
        store: &dyn DocumentStore,
        query: &Query,
    ) -> Result<Option<T>, StoreError> {
        Ok(self.find(store, query).await?.into_iter().next())
    }

    pub async fn all(&self, store: &dyn DocumentStore) -> Result<Vec<T>, StoreError> {
        self.find(store, &Query::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Room {
        name: String,
        floor: u8,
    }

    const ROOMS: Collection<Room> = Collection::new("rooms");

    fn room(name: &str, floor: u8) -> Room {
        Room {
            name: name.into(),
            floor,
        }
    }

    #[tokio::test]
    async fn test_typed_roundtrip() {
        let store = MemoryStore::new();
        ROOMS.put(&store, "a", &room("101", 1)).await.unwrap();

        assert_eq!(ROOMS.get(&store, "a").await.unwrap(), Some(room("101", 1)));
        assert_eq!(ROOMS.get(&store, "b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_and_find_one() {
        let store = MemoryStore::new();
        ROOMS.put(&store, "a", &room("101", 1)).await.unwrap();
        ROOMS.put(&store, "b", &room("201", 2)).await.unwrap();
        ROOMS.put(&store, "c", &room("102", 1)).await.unwrap();

        let first_floor = ROOMS
            .find(&store, &Query::new().eq("floor", 1))
            .await
            .unwrap();
        assert_eq!(first_floor, vec![room("101", 1), room("102", 1)]);

        let second = ROOMS
            .find_one(&store, &Query::new().eq("name", "201"))
            .await
            .unwrap();
        assert_eq!(second, Some(room("201", 2)));

        assert_eq!(ROOMS.all(&store).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_serialization_error() {
        let store = MemoryStore::new();
        store
            .put("rooms", "bad", serde_json::json!({"name": 5}))
            .await
            .unwrap();

        let err = ROOMS.get(&store, "bad").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
