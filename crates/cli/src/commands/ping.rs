//! Connectivity check.

use shopfront_api::db::DocumentStore;

/// Ping the database and list its collections.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn check() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;

    store.ping().await?;
    tracing::info!("MongoDB connection successful");

    let collections = store.collection_names().await?;
    if collections.is_empty() {
        tracing::info!("No collections yet (run `shop-cli seed`)");
    }
    for name in &collections {
        tracing::info!("  {name}");
    }

    Ok(())
}
