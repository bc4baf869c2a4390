//! Product domain types.

use serde::Serialize;

use shopfront_core::{Price, ProductId, ProductInput, sanitize, validate_product_data};

/// A catalog product as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Store-assigned identifier, immutable.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Free-form category label.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Storefront promotion flag.
    pub featured: bool,
    pub stock: i64,
}

/// A validated product ready to be inserted.
///
/// Build one with [`NewProduct::from_input`]; defaults (`featured = false`,
/// `stock = 0`) are applied there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub stock: i64,
}

impl NewProduct {
    /// Validate a client payload and normalize it into a `NewProduct`.
    ///
    /// Missing required fields (`name`, `price`, `category`) are reported
    /// first, one message per field. When all are present the text fields
    /// are sanitized and the sanitized payload goes through
    /// [`validate_product_data`]; every message is returned.
    ///
    /// # Errors
    ///
    /// Returns the list of validation messages if the payload is invalid.
    pub fn from_input(input: ProductInput) -> Result<Self, Vec<String>> {
        let missing: Vec<String> = [
            ("name", input.name.is_none()),
            ("price", input.price.is_none()),
            ("category", input.category.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(field, _)| format!("{field} is required"))
        .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        // Length rules apply to what will actually be stored
        let sanitized = ProductInput {
            name: Some(sanitize(input.name.as_deref())),
            description: input.description.as_deref().map(|d| sanitize(Some(d))),
            category: Some(sanitize(input.category.as_deref())),
            image_url: Some(sanitize(input.image_url.as_deref())).filter(|url| !url.is_empty()),
            ..input
        };

        let mut errors = validate_product_data(&sanitized);
        if sanitized.category.as_deref().is_none_or(str::is_empty) {
            errors.push("Category cannot be empty".to_owned());
        }

        let price = sanitized.price.as_ref().map(Price::from_json);
        let Some(Ok(price)) = price else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: sanitized.name.unwrap_or_default(),
            description: sanitized.description.unwrap_or_default(),
            price,
            category: sanitized.category.unwrap_or_default(),
            image_url: sanitized.image_url,
            featured: sanitized.featured.unwrap_or(false),
            stock: sanitized.stock.unwrap_or(0),
        })
    }
}

/// Optional criteria for listing products.
///
/// `None` fields are left out of the query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact featured-flag match.
    pub featured: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(value: serde_json::Value) -> ProductInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_input_applies_defaults_and_sanitizes() {
        let product = NewProduct::from_input(input(json!({
            "name": "  <Desk Lamp> ",
            "description": "Warm light for late nights",
            "price": "24.50",
            "category": "Home",
        })))
        .unwrap();

        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.category, "Home");
        assert_eq!(product.price.to_string(), "24.50");
        assert!(!product.featured);
        assert_eq!(product.stock, 0);
        assert_eq!(product.image_url, None);
    }

    #[test]
    fn test_from_input_reports_missing_required_fields() {
        let errors = NewProduct::from_input(input(json!({ "description": "whatever it is" })))
            .unwrap_err();
        assert_eq!(
            errors,
            vec!["name is required", "price is required", "category is required"]
        );
    }

    #[test]
    fn test_from_input_surfaces_every_validation_message() {
        let errors = NewProduct::from_input(input(json!({
            "name": "x",
            "price": 0,
            "category": "<>",
        })))
        .unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&"Category cannot be empty".to_owned()));
        assert!(errors.contains(&"Price must be greater than 0".to_owned()));
    }

    #[test]
    fn test_from_input_checks_lengths_after_sanitizing() {
        let errors = NewProduct::from_input(input(json!({
            "name": "<>",
            "description": "<<<<<>>>>>",
            "price": 5,
            "category": "Misc",
        })))
        .unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Product name must be at least 2 characters",
                "Description must be at least 10 characters",
            ]
        );

        let errors = NewProduct::from_input(input(json!({
            "name": "  ",
            "description": "   short    ",
            "price": 5,
            "category": "Misc",
        })))
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_product_serializes_with_store_id_field() {
        let product = Product {
            id: ProductId::new("65f0c0ffee0000000000beef"),
            name: "Mug".to_owned(),
            description: "Holds coffee".to_owned(),
            price: Price::from_f64(9.5).unwrap(),
            category: "Kitchen".to_owned(),
            image_url: None,
            featured: true,
            stock: 3,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["_id"], "65f0c0ffee0000000000beef");
        assert_eq!(value["price"], 9.5);
        assert!(value.get("image_url").is_none());
    }
}
