//! Cartwheel Core - Shared types library.
//!
//! This crate provides common types used across all Cartwheel components:
//! - `storefront` - Cart, search, wishlist and recently-viewed state stores
//! - `cli` - Command-line front end that drives the stores
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   read-only [`Product`] record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
