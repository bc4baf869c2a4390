//! Validation for incoming product payloads and free-text input.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{Price, PriceError};

/// Minimum length of a product name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum length of a product description, in characters.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// A product payload as submitted by a client, before validation.
///
/// Every field is optional so that missing fields surface as validation
/// messages instead of deserialization failures. `price` is kept as a raw
/// JSON value because clients send both numbers and numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub stock: Option<i64>,
}

/// Check a product payload, collecting every problem found.
///
/// Does not short-circuit: a payload with a bad name, description and price
/// yields three messages. An empty list means the payload is valid.
///
/// # Example
///
/// ```
/// use shopfront_core::{ProductInput, validate_product_data};
///
/// assert_eq!(validate_product_data(&ProductInput::default()).len(), 3);
/// ```
#[must_use]
pub fn validate_product_data(input: &ProductInput) -> Vec<String> {
    let mut errors = Vec::new();

    if !has_min_length(input.name.as_deref(), MIN_NAME_LENGTH) {
        errors.push(format!(
            "Product name must be at least {MIN_NAME_LENGTH} characters"
        ));
    }

    if !has_min_length(input.description.as_deref(), MIN_DESCRIPTION_LENGTH) {
        errors.push(format!(
            "Description must be at least {MIN_DESCRIPTION_LENGTH} characters"
        ));
    }

    // An absent price is treated as zero
    let price = input
        .price
        .as_ref()
        .map_or(Err(PriceError::NotPositive), Price::from_json);
    if let Err(e) = price {
        errors.push(e.to_string());
    }

    errors
}

fn has_min_length(value: Option<&str>, min: usize) -> bool {
    value.is_some_and(|v| v.chars().count() >= min)
}

/// Strip angle brackets and surrounding whitespace from free text.
///
/// This is a basic guard against HTML injection in stored text, not a full
/// sanitizer. Absent or empty input yields an empty string.
#[must_use]
pub fn sanitize(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect::<String>()
        .trim()
        .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(value: Value) -> ProductInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_payload_reports_all_three_fields() {
        let errors = validate_product_data(&input(json!({})));
        assert_eq!(
            errors,
            vec![
                "Product name must be at least 2 characters",
                "Description must be at least 10 characters",
                "Price must be greater than 0",
            ]
        );
    }

    #[test]
    fn test_minimal_valid_payload() {
        let errors = validate_product_data(&input(json!({
            "name": "ab",
            "description": "0123456789",
            "price": 1,
        })));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_short_fields() {
        let errors = validate_product_data(&input(json!({
            "name": "a",
            "description": "too short",
            "price": "12.50",
        })));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Product name"));
        assert!(errors[1].starts_with("Description"));
    }

    #[test]
    fn test_price_messages() {
        let base = json!({"name": "Lamp", "description": "A very bright lamp"});

        let mut payload = base.clone();
        payload["price"] = json!("free");
        assert_eq!(
            validate_product_data(&input(payload)),
            vec!["Price must be a valid number"]
        );

        let mut payload = base;
        payload["price"] = json!(-4);
        assert_eq!(
            validate_product_data(&input(payload)),
            vec!["Price must be greater than 0"]
        );
    }

    #[test]
    fn test_extreme_prices_are_out_of_range_not_invalid() {
        for price in [json!(1e30), json!("1e-30"), json!(1e-29)] {
            let errors = validate_product_data(&input(json!({
                "name": "Lamp",
                "description": "A very bright lamp",
                "price": price,
            })));
            assert_eq!(errors, vec!["Price is out of range"], "{price}");
        }
    }

    #[test]
    fn test_name_length_counts_characters() {
        let errors = validate_product_data(&input(json!({
            "name": "é",
            "description": "ééééééééééé",
            "price": 3,
        })));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(Some("  <b>Bold</b> ")), "bBold/b");
        assert_eq!(sanitize(Some("plain")), "plain");
        assert_eq!(sanitize(Some("")), "");
        assert_eq!(sanitize(None), "");
    }
}
