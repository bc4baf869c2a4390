//! MongoDB storage backend.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use secrecy::{ExposeSecret, SecretString};

use super::store::{DocumentStore, IndexKind, IndexSpec, StoreError, UpdateOutcome};

/// Database used when neither the configuration nor the URI names one.
pub const DEFAULT_DATABASE: &str = "ecommerce";

/// MongoDB server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Document store backed by a MongoDB database.
///
/// Cheap to clone; the driver's `Client` pools connections internally.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to MongoDB and verify the server is reachable.
    ///
    /// # Arguments
    ///
    /// * `uri` - MongoDB connection string (wrapped in `SecretString`)
    /// * `database` - Database name; falls back to the URI's default database,
    ///   then to [`DEFAULT_DATABASE`]
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Mongo` if the URI is invalid or the initial ping fails.
    pub async fn connect(uri: &SecretString, database: Option<&str>) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri.expose_secret()).await?;

        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        let store = Self { database };
        store.ping().await?;
        Ok(store)
    }

    /// Name of the database this store operates on.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref()
            && write_error.code == DUPLICATE_KEY_CODE
        {
            return Self::DuplicateKey(write_error.message.clone());
        }
        Self::Mongo(err)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.database.list_collection_names().await?)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Unavailable(format!(
                "inserted _id is not an ObjectId: {}",
                result.inserted_id
            ))
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Bson>, StoreError> {
        Ok(self.collection(collection).distinct(field, doc! {}).await?)
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self.collection(collection).delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    async fn create_index(&self, index: &IndexSpec) -> Result<(), StoreError> {
        let mut keys = Document::new();
        for field in index.fields {
            match index.kind {
                IndexKind::Ascending => keys.insert(*field, 1),
                IndexKind::Text => keys.insert(*field, "text"),
            };
        }

        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(index.unique).build())
            .build();

        self.collection(index.collection).create_index(model).await?;
        Ok(())
    }
}
