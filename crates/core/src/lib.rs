//! Shopfront Core - Shared types and validation.
//!
//! This crate provides the types used across all Shopfront components:
//! - `api` - Public JSON API for products and the newsletter
//! - `cli` - Command-line tools for seeding and index management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Request payloads are validated here before any handler
//! touches the store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and emails
//! - [`validation`] - Product payload validation and input sanitization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{ProductInput, sanitize, validate_product_data};
