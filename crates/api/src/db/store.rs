//! Collection-oriented document store interface.
//!
//! The data access layer talks to the database only through [`DocumentStore`],
//! which exposes the handful of collection operations it needs. Filters are
//! BSON documents of top-level equality criteria; updates set top-level fields.
//!
//! Two backends implement the trait:
//! - [`MongoStore`](super::MongoStore) - the production backend
//! - [`MemoryStore`](super::MemoryStore) - non-persistent, for tests and local runs

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use thiserror::Error;

/// Errors raised by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write was rejected by a unique index.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The MongoDB driver reported an error.
    #[error("mongodb error: {0}")]
    Mongo(mongodb::error::Error),

    /// The backend could not complete the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result of an `update_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Number of documents matching the filter (0 or 1).
    pub matched: u64,
    /// Number of documents actually changed (0 when the fields already held the values).
    pub modified: u64,
}

/// Kind of index to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Ascending single- or multi-field index.
    Ascending,
    /// Full-text index over all listed fields.
    Text,
}

/// Declaration of an index on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub collection: &'static str,
    pub fields: &'static [&'static str],
    pub kind: IndexKind,
    pub unique: bool,
}

/// Backend trait for document storage.
///
/// All backends must be thread-safe (`Send + Sync`) so a single instance can be
/// shared across request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Round-trips to the backend to check connectivity.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Lists the names of collections that currently exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Returns every document matching `filter`, in insertion order.
    ///
    /// A collection that does not exist yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    /// Returns the first document matching `filter`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Inserts a document, assigning an `_id` when it has none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateKey` if a unique index rejects the document.
    async fn insert_one(&self, collection: &str, document: Document)
    -> Result<ObjectId, StoreError>;

    /// Sets top-level `fields` on the first document matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Returns the distinct values of `field` across the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Bson>, StoreError>;

    /// Deletes every document matching `filter`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Creates an index if it does not already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn create_index(&self, index: &IndexSpec) -> Result<(), StoreError>;
}
