//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use shopfront_core::{ProductId, ProductInput};

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductFilter};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub featured: Option<String>,
}

impl ProductQuery {
    /// Translate raw query values into a repository filter.
    ///
    /// `category` is ignored when empty or `all`. `featured` is true only
    /// for `true` (any case) and ignored when empty.
    #[must_use]
    pub fn into_filter(self) -> ProductFilter {
        let category = self
            .category
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
        let featured = self
            .featured
            .map(|f| f.trim().to_owned())
            .filter(|f| !f.is_empty())
            .map(|f| f.eq_ignore_ascii_case("true"));

        ProductFilter { category, featured }
    }
}

/// Product listing body.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub count: usize,
}

/// List products, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductList>> {
    let products = state.products().list(&query.into_filter()).await?;

    Ok(Json(ProductList {
        count: products.len(),
        products,
    }))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    match state.products().get_by_id(&id).await {
        Ok(product) => Ok(Json(json!({ "product": product }))),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound("Product not found".to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Response body for a created product.
#[derive(Debug, Serialize)]
pub struct ProductCreated {
    pub message: &'static str,
    pub product_id: ProductId,
}

/// Create a product from a JSON payload.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductCreated>)> {
    let Json(input) = payload?;
    let product = NewProduct::from_input(input).map_err(AppError::Validation)?;

    let product_id = state.products().create(&product).await?;
    tracing::info!(%product_id, name = %product.name, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductCreated {
            message: "Product created successfully",
            product_id,
        }),
    ))
}

/// List distinct category labels.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Value>> {
    let categories = state.products().categories().await?;
    Ok(Json(json!({ "categories": categories })))
}
