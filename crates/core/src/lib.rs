//! Mebel Core - Shared types library.
//!
//! This crate provides common types used across all Mebel components:
//! - `storefront` - Public-facing furniture shop (catalog, cart, checkout)
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and login names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
