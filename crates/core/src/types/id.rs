//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! Document-store identifiers are opaque to this crate: an ID carries the
//! store's textual form (a 24-character hex `ObjectId` for MongoDB) and the
//! data access layer is responsible for converting it back.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget_id = WidgetId::new("65f0c0ffee0000000000beef");
/// let gadget_id = GadgetId::new("65f0c0ffee0000000000beef");
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget_id;
/// # let _ = (widget_id, gadget_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from its textual form.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(SubscriberId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_conversion() {
        let id = ProductId::new("65f0c0ffee0000000000beef");
        assert_eq!(id.to_string(), "65f0c0ffee0000000000beef");
        assert_eq!(id.as_str(), "65f0c0ffee0000000000beef");

        let raw: String = id.into();
        assert_eq!(raw, "65f0c0ffee0000000000beef");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = SubscriberId::from("abc123".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        let parsed: SubscriberId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(parsed, id);
    }
}
