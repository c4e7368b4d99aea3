//! Bandhan Core - Shared types library.
//!
//! This crate provides common types used across all Bandhan components:
//! - `storefront` - Catalog loading, cart store and the HTTP storefront
//! - `cli` - Command-line tools for rendering the page and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, phone numbers, the canonical catalog
//!   document and cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
