//! Data access layer for the Shopfront document store.
//!
//! # Database: `ecommerce` (MongoDB)
//!
//! ## Collections
//!
//! - `products` - Catalog items (read-only through the API once created)
//! - `subscribers` - Newsletter subscribers, one document per normalized email
//!
//! ## Indexes
//!
//! Created at startup and by `shop-cli indexes`; see [`INDEXES`]. The unique
//! index on `subscribers.email` is what makes concurrent subscribes safe.

pub mod memory;
pub mod mongo;
pub mod products;
pub mod store;
pub mod subscribers;

use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use products::ProductRepository;
pub use store::{DocumentStore, IndexKind, IndexSpec, StoreError, UpdateOutcome};
pub use subscribers::SubscriberRepository;

/// Collection holding catalog products.
pub const PRODUCTS: &str = "products";

/// Collection holding newsletter subscribers.
pub const SUBSCRIBERS: &str = "subscribers";

/// Indexes expected on the Shopfront collections.
pub const INDEXES: &[IndexSpec] = &[
    IndexSpec {
        collection: PRODUCTS,
        fields: &["category"],
        kind: IndexKind::Ascending,
        unique: false,
    },
    IndexSpec {
        collection: PRODUCTS,
        fields: &["featured"],
        kind: IndexKind::Ascending,
        unique: false,
    },
    IndexSpec {
        collection: PRODUCTS,
        fields: &["price"],
        kind: IndexKind::Ascending,
        unique: false,
    },
    // Reserved for product search; no endpoint queries it yet
    IndexSpec {
        collection: PRODUCTS,
        fields: &["name", "description"],
        kind: IndexKind::Text,
        unique: false,
    },
    IndexSpec {
        collection: SUBSCRIBERS,
        fields: &["email"],
        kind: IndexKind::Ascending,
        unique: true,
    },
    IndexSpec {
        collection: SUBSCRIBERS,
        fields: &["subscribed_at"],
        kind: IndexKind::Ascending,
        unique: false,
    },
];

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The document store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create every index in [`INDEXES`].
///
/// Index creation is idempotent, so this is safe to run on every startup.
///
/// # Errors
///
/// Returns the first `StoreError` raised by the backend.
pub async fn ensure_indexes(store: &dyn DocumentStore) -> Result<(), StoreError> {
    for index in INDEXES {
        store.create_index(index).await?;
        tracing::debug!(
            collection = index.collection,
            fields = ?index.fields,
            unique = index.unique,
            "Index ensured"
        );
    }
    Ok(())
}
