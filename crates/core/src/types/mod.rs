//! Core types for the Bandhan storefront.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! canonical shapes shared by the catalog loader, renderer and cart.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod lenient;
pub mod phone;
pub mod price;

pub use cart::{CartLine, DEFAULT_CART_CATEGORY, NewCartItem};
pub use catalog::*;
pub use id::{ProductId, ProductIdError};
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, Price, format_amount};
