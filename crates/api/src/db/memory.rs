//! In-memory document storage backend.
//!
//! Provides a non-persistent store with the same observable behavior as the
//! MongoDB backend for the operations the API uses: top-level equality
//! filters, `$set`-style updates, distinct values, and unique indexes.
//! Ideal for tests and for running the API without a database.

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use super::store::{DocumentStore, IndexSpec, StoreError, UpdateOutcome};

/// In-memory document store using `DashMap`.
///
/// Collections are created on first insert, mirroring MongoDB. Unique indexes
/// declared through [`DocumentStore::create_index`] are enforced on insert.
///
/// # Example
///
/// ```
/// use mongodb::bson::doc;
/// use shopfront_api::db::{DocumentStore, MemoryStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), shopfront_api::db::StoreError> {
/// let store = MemoryStore::new();
/// store.insert_one("products", doc! { "name": "Mug" }).await?;
/// assert_eq!(store.len("products"), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
    unique_fields: DashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |docs| docs.len())
    }

    /// Returns true if the collection is missing or holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

/// Top-level equality match; every filter key must be present and equal.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        Ok(self.collections.get(collection).map_or_else(Vec::new, |docs| {
            docs.iter()
                .filter(|doc| matches(doc, &filter))
                .cloned()
                .collect()
        }))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, &filter)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ObjectId, StoreError> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            Some(other) => {
                return Err(StoreError::Unavailable(format!(
                    "memory store only supports ObjectId keys, got {other}"
                )));
            }
            None => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        let unique_fields = self
            .unique_fields
            .get(collection)
            .map(|fields| fields.clone())
            .unwrap_or_default();

        // The entry guard holds the shard lock, so the uniqueness check and the
        // push are atomic with respect to other writers on this collection.
        let mut docs = self.collections.entry(collection.to_owned()).or_default();

        for existing in docs.iter() {
            if existing.get("_id") == document.get("_id") {
                return Err(StoreError::DuplicateKey(format!("{collection}._id: {id}")));
            }
            for field in &unique_fields {
                if let Some(value) = document.get(field)
                    && existing.get(field) == Some(value)
                {
                    return Err(StoreError::DuplicateKey(format!(
                        "{collection}.{field}: {value}"
                    )));
                }
            }
        }

        docs.push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };

        let Some(document) = docs.iter_mut().find(|doc| matches(doc, &filter)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = 0;
        for (key, value) in fields {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                modified = 1;
            }
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified,
        })
    }

    async fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Bson>, StoreError> {
        let mut values: Vec<Bson> = Vec::new();
        if let Some(docs) = self.collections.get(collection) {
            for value in docs.iter().filter_map(|doc| doc.get(field)) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        Ok(values)
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|doc| !matches(doc, &filter));
        Ok((before - docs.len()) as u64)
    }

    async fn create_index(&self, index: &IndexSpec) -> Result<(), StoreError> {
        // Only unique single-field indexes change observable behavior here
        if index.unique
            && let [field] = index.fields
        {
            let mut fields = self
                .unique_fields
                .entry(index.collection.to_owned())
                .or_default();
            if !fields.iter().any(|f| f == field) {
                fields.push((*field).to_owned());
            }
        }
        Ok(())
    }
}
