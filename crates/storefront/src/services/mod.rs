//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//! - `cart` - Cart ledger operations with product checks
//! - `checkout` - Payment/address validation and cart clearing
//!
//! Services borrow the pool for the length of one request and return their
//! own error enums; handlers convert those into `AppError`.

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutService};
