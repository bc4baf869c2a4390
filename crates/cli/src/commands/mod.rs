//! CLI subcommands.

pub mod indexes;
pub mod ping;
pub mod seed;

use shopfront_api::config::get_mongo_uri;
use shopfront_api::db::MongoStore;

/// Connect to MongoDB using the same environment as the API server.
///
/// # Errors
///
/// Returns an error if `MONGO_URI` is missing or the connection fails.
pub async fn connect() -> Result<MongoStore, Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let uri = get_mongo_uri("MONGO_URI")?;
    let database = std::env::var("SHOPFRONT_DATABASE")
        .ok()
        .filter(|name| !name.trim().is_empty());

    let store = MongoStore::connect(&uri, database.as_deref()).await?;
    tracing::info!(database = store.database_name(), "Connected to MongoDB");
    Ok(store)
}
