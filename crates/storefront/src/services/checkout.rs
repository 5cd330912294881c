//! Checkout service.
//!
//! Validates payment and address fields, then empties the cart. Nothing is
//! charged and nothing about the order is stored.

use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;

use mebel_core::UserId;

use crate::db::{CartRepository, RepositoryError};
use crate::validation::{self, AddressError, PaymentError};

/// Raw checkout form as posted by the client.
///
/// Missing fields are empty strings. `Debug` never prints the card number or
/// CVV.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutRequest {
    pub card: String,
    pub cvv: String,
    pub name: String,
    pub city: String,
    pub street: String,
    pub house: String,
    pub apartment: String,
}

impl std::fmt::Debug for CheckoutRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutRequest")
            .field("card", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .field("name", &self.name)
            .field("city", &self.city)
            .field("street", &self.street)
            .field("house", &self.house)
            .field("apartment", &self.apartment)
            .finish()
    }
}

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// First failing payment field.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Every failing address field, in form order.
    #[error("{}", validation::join_messages(.0))]
    Address(Vec<AddressError>),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CheckoutRequest {
    /// Normalize and validate every field.
    ///
    /// Card, CVV and name are checked in that order and the first failure
    /// wins. Address problems are only reported once payment passes, and
    /// then all at once.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Payment` or `CheckoutError::Address`.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let card = validation::normalize_card_number(&self.card);
        validation::validate_card_number(&card)?;
        validation::validate_cvv(self.cvv.trim())?;
        validation::validate_cardholder_name(self.name.trim())?;

        let address_errors = validation::validate_address(
            self.city.trim(),
            self.street.trim(),
            self.house.trim(),
            self.apartment.trim(),
        );
        if address_errors.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Address(address_errors))
        }
    }
}

/// Checkout service.
pub struct CheckoutService<'a> {
    cart: CartRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            cart: CartRepository::new(pool),
        }
    }

    /// Validate the form and clear the user's cart.
    ///
    /// Returns the number of cart lines that were checked out; an empty cart
    /// checks out with zero lines.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Payment`/`Address` for invalid input. The cart
    /// is left untouched in every error case.
    pub async fn submit(&self, user_id: UserId, request: &CheckoutRequest) -> Result<u64, CheckoutError> {
        request.validate()?;

        let cleared = self.cart.clear(user_id).await?;

        tracing::info!(%user_id, lines = cleared, "Checkout completed");
        Ok(cleared)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mebel_core::{Login, ProductId};

    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::{UserRepository, seed};

    fn valid_request() -> CheckoutRequest {
        CheckoutRequest {
            card: "4111 1111 1111 1111".to_string(),
            cvv: "123".to_string(),
            name: "Ivan".to_string(),
            city: "Москва".to_string(),
            street: "Ленина 5".to_string(),
            house: "12-А".to_string(),
            apartment: String::new(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let request = CheckoutRequest {
            cvv: " 123 ".to_string(),
            name: "  Ivan ".to_string(),
            city: " Москва ".to_string(),
            house: " 7 ".to_string(),
            apartment: "   ".to_string(),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_first_payment_error_wins() {
        let request = CheckoutRequest {
            card: "4111 1111 1111 111".to_string(),
            cvv: "x".to_string(),
            name: String::new(),
            city: "Moscow123".to_string(),
            ..valid_request()
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, CheckoutError::Payment(PaymentError::CardNumber)));
        assert_eq!(err.to_string(), "Неверный номер карты (должно быть 16 цифр).");

        let request = CheckoutRequest {
            cvv: "12".to_string(),
            name: String::new(),
            ..valid_request()
        };
        assert!(matches!(
            request.validate(),
            Err(CheckoutError::Payment(PaymentError::Cvv))
        ));

        let request = CheckoutRequest {
            name: "   ".to_string(),
            ..valid_request()
        };
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "Укажите имя на карте."
        );
    }

    #[test]
    fn test_address_errors_are_joined() {
        let request = CheckoutRequest {
            city: "Moscow123".to_string(),
            street: "Ленина; 5".to_string(),
            ..valid_request()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Город должен содержать только буквы, пробелы, дефисы или апострофы. \
             Улица может содержать буквы, цифры, пробелы, дефисы, точки, # и /."
        );
    }

    #[test]
    fn test_debug_redacts_card_data() {
        let output = format!("{:?}", valid_request());
        assert!(!output.contains("4111"));
        assert!(!output.contains("123"));
        assert!(output.contains("Москва"));
    }

    async fn setup_with_cart() -> (SqlitePool, UserId) {
        let pool = memory_pool().await;
        seed::seed_catalog(&pool).await.unwrap();
        let user = UserRepository::new(&pool)
            .create(&Login::parse("buyer").unwrap(), "hash")
            .await
            .unwrap()
            .id;
        let cart = CartRepository::new(&pool);
        cart.increment(user, ProductId::new(1)).await.unwrap();
        cart.increment(user, ProductId::new(2)).await.unwrap();
        (pool, user)
    }

    #[tokio::test]
    async fn test_submit_empties_cart() {
        let (pool, user) = setup_with_cart().await;

        let cleared = CheckoutService::new(&pool)
            .submit(user, &valid_request())
            .await
            .unwrap();

        assert_eq!(cleared, 2);
        assert!(CartRepository::new(&pool).list(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submit_leaves_cart() {
        let (pool, user) = setup_with_cart().await;
        let request = CheckoutRequest {
            card: "411111111111111".to_string(),
            ..valid_request()
        };

        let err = CheckoutService::new(&pool).submit(user, &request).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Payment(PaymentError::CardNumber)));
        assert_eq!(CartRepository::new(&pool).list(user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_with_empty_cart_succeeds() {
        let pool = memory_pool().await;
        let user = UserRepository::new(&pool)
            .create(&Login::parse("buyer").unwrap(), "hash")
            .await
            .unwrap()
            .id;

        let cleared = CheckoutService::new(&pool)
            .submit(user, &valid_request())
            .await
            .unwrap();
        assert_eq!(cleared, 0);
    }
}
