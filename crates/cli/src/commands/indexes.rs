//! Create collection indexes.

use shopfront_api::db::{self, INDEXES};

/// Create every index the API relies on.
///
/// # Errors
///
/// Returns an error if the connection or any index creation fails.
pub async fn create() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;

    db::ensure_indexes(&store).await?;

    tracing::info!(count = INDEXES.len(), "Indexes created");
    Ok(())
}
