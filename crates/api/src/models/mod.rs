//! Domain models for the Shopfront API.
//!
//! These types represent validated domain objects, separate from the BSON
//! documents they are stored as. The `db` repositories convert between the two.

pub mod product;
pub mod subscriber;

pub use product::{NewProduct, Product, ProductFilter};
pub use subscriber::{SubscribeOutcome, Subscriber};
