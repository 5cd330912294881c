//! Core types for Mebel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod login;
pub mod price;

pub use id::*;
pub use login::{Login, LoginError};
pub use price::{CurrencyCode, Price};
