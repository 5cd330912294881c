//! Mebel storefront library.
//!
//! The furniture shop's catalog, cart, authentication and checkout, packaged
//! as a library so the binary, the CLI and the router tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use app::build_app;
pub use config::StorefrontConfig;
pub use state::AppState;
