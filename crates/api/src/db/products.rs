//! Product repository for document store operations.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};

use shopfront_core::{Price, ProductId};

use super::{DocumentStore, PRODUCTS, RepositoryError};
use crate::models::{NewProduct, Product, ProductFilter};

/// Repository for product operations.
pub struct ProductRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Insert a validated product and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let mut document = doc! {
            "name": product.name.as_str(),
            "description": product.description.as_str(),
            "price": product.price.as_f64(),
            "category": product.category.as_str(),
            "featured": product.featured,
            "stock": product.stock,
        };
        if let Some(image_url) = &product.image_url {
            document.insert("image_url", image_url.as_str());
        }

        let id = self.store.insert_one(PRODUCTS, document).await?;
        Ok(ProductId::new(id.to_hex()))
    }

    /// List products matching the filter.
    ///
    /// An empty catalog (or one whose collection was never created) yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored product is malformed.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let documents = self.store.find(PRODUCTS, filter_document(filter)).await?;
        documents.iter().map(product_from_document).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ID is malformed or unknown.
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Product, RepositoryError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Err(RepositoryError::NotFound);
        };

        let document = self
            .store
            .find_one(PRODUCTS, doc! { "_id": object_id })
            .await?
            .ok_or(RepositoryError::NotFound)?;

        product_from_document(&document)
    }

    /// Distinct category labels across the catalog, sorted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let values = self.store.distinct(PRODUCTS, "category").await?;

        let mut categories: Vec<String> = values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(category) => Some(category),
                _ => None,
            })
            .collect();
        categories.sort();
        Ok(categories)
    }

    /// Delete every product. Used by the seeder.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the delete fails.
    pub async fn clear(&self) -> Result<u64, RepositoryError> {
        Ok(self.store.delete_many(PRODUCTS, doc! {}).await?)
    }
}

/// Build the query document, leaving out absent criteria.
fn filter_document(filter: &ProductFilter) -> Document {
    let mut query = Document::new();
    if let Some(category) = &filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(featured) = filter.featured {
        query.insert("featured", featured);
    }
    query
}

fn product_from_document(document: &Document) -> Result<Product, RepositoryError> {
    let id = document
        .get_object_id("_id")
        .map_err(|e| corrupt("_id", &e))?;
    let name = document
        .get_str("name")
        .map_err(|e| corrupt("name", &e))?;
    let category = document
        .get_str("category")
        .map_err(|e| corrupt("category", &e))?;
    let price = number(document.get("price"))
        .ok_or_else(|| corrupt("price", &"missing or not numeric"))
        .and_then(|amount| Price::from_f64(amount).map_err(|e| corrupt("price", &e)))?;
    #[allow(clippy::cast_possible_truncation)] // stock counts are small integers
    let stock = number(document.get("stock")).map_or(0, |stock| stock as i64);

    Ok(Product {
        id: ProductId::new(id.to_hex()),
        name: name.to_owned(),
        description: document.get_str("description").unwrap_or_default().to_owned(),
        price,
        category: category.to_owned(),
        image_url: document
            .get_str("image_url")
            .ok()
            .filter(|url| !url.is_empty())
            .map(str::to_owned),
        featured: document.get_bool("featured").unwrap_or(false),
        stock,
    })
}

/// Numeric field as a double, whichever BSON number type it was written as.
#[allow(clippy::cast_precision_loss)] // prices and stock counts fit in f64
fn number(value: Option<&Bson>) -> Option<f64> {
    match value? {
        Bson::Double(n) => Some(*n),
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        _ => None,
    }
}

fn corrupt(field: &str, error: &dyn std::fmt::Display) -> RepositoryError {
    RepositoryError::DataCorruption(format!("invalid product {field}: {error}"))
}
