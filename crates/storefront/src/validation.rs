//! Shape checks for checkout input.
//!
//! Everything here is pure: no I/O, no state. Each failure is a typed error
//! whose `Display` is the message shown to the customer.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Letters (latin and Cyrillic), whitespace, hyphen, apostrophe.
static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ\s\-']+$").expect("Invalid regex"));

/// Letters, digits, whitespace and `-.'/#`.
static STREET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ0-9\s\-.'/#]+$").expect("Invalid regex"));

/// e.g. `33`, `33/1`, `12-А`.
static HOUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+[/\-]?[0-9]*[A-Za-zА-Яа-яЁё]?$").expect("Invalid regex")
});

/// e.g. `15`, `15/2`.
static APARTMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[/\-]?[0-9]*$").expect("Invalid regex"));

/// Number of digits in a card number.
pub const CARD_DIGITS: usize = 16;

/// Number of digits in a CVV code.
pub const CVV_DIGITS: usize = 3;

/// Payment field errors. Only the first one found is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Неверный номер карты (должно быть 16 цифр).")]
    CardNumber,
    #[error("Неверный CVV (3 цифры).")]
    Cvv,
    #[error("Укажите имя на карте.")]
    CardholderName,
}

/// Address field errors. All of them are reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Город должен содержать только буквы, пробелы, дефисы или апострофы.")]
    City,
    #[error("Улица может содержать буквы, цифры, пробелы, дефисы, точки, # и /.")]
    Street,
    #[error("Номер дома должен быть числом (например: 33, 33/1, 12-А).")]
    House,
    #[error("Номер квартиры должен быть числом (например: 15, 15/2).")]
    Apartment,
}

/// Keep only the ASCII digits of a card number as typed.
#[must_use]
pub fn normalize_card_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check a normalized (digits only) card number.
///
/// # Errors
///
/// Returns `PaymentError::CardNumber` unless there are exactly 16 digits.
pub fn validate_card_number(digits: &str) -> Result<(), PaymentError> {
    if digits.len() == CARD_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PaymentError::CardNumber)
    }
}

/// Check a trimmed CVV.
///
/// # Errors
///
/// Returns `PaymentError::Cvv` unless the CVV is exactly 3 ASCII digits.
pub fn validate_cvv(cvv: &str) -> Result<(), PaymentError> {
    if cvv.len() == CVV_DIGITS && cvv.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PaymentError::Cvv)
    }
}

/// Check a trimmed cardholder name.
///
/// # Errors
///
/// Returns `PaymentError::CardholderName` if the name is empty.
pub fn validate_cardholder_name(name: &str) -> Result<(), PaymentError> {
    if name.is_empty() {
        Err(PaymentError::CardholderName)
    } else {
        Ok(())
    }
}

/// Check all address fields (already trimmed), collecting every failure in
/// field order: city, street, house, apartment.
///
/// The apartment is optional; an empty string passes.
#[must_use]
pub fn validate_address(city: &str, street: &str, house: &str, apartment: &str) -> Vec<AddressError> {
    let mut errors = Vec::new();

    if !CITY_RE.is_match(city) {
        errors.push(AddressError::City);
    }
    if !STREET_RE.is_match(street) {
        errors.push(AddressError::Street);
    }
    if !HOUSE_RE.is_match(house) {
        errors.push(AddressError::House);
    }
    if !apartment.is_empty() && !APARTMENT_RE.is_match(apartment) {
        errors.push(AddressError::Apartment);
    }

    errors
}

/// Join address errors into the single message sent to the client.
#[must_use]
pub fn join_messages(errors: &[AddressError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_normalization() {
        assert_eq!(normalize_card_number("4111 1111-1111 1111"), "4111111111111111");
        assert_eq!(normalize_card_number("abc"), "");
        // Non-ASCII digits are dropped, not counted.
        assert_eq!(normalize_card_number("١٢٣4"), "4");
    }

    #[test]
    fn test_card_number_length() {
        assert!(validate_card_number("4111111111111111").is_ok());
        assert_eq!(validate_card_number("411111111111111"), Err(PaymentError::CardNumber));
        assert_eq!(validate_card_number("41111111111111112"), Err(PaymentError::CardNumber));
        assert_eq!(validate_card_number(""), Err(PaymentError::CardNumber));
    }

    #[test]
    fn test_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("000").is_ok());
        assert_eq!(validate_cvv("12"), Err(PaymentError::Cvv));
        assert_eq!(validate_cvv("1234"), Err(PaymentError::Cvv));
        assert_eq!(validate_cvv("12a"), Err(PaymentError::Cvv));
        assert_eq!(validate_cvv("١٢٣"), Err(PaymentError::Cvv));
    }

    #[test]
    fn test_cardholder_name() {
        assert!(validate_cardholder_name("Ivan").is_ok());
        assert_eq!(validate_cardholder_name(""), Err(PaymentError::CardholderName));
    }

    #[test]
    fn test_valid_addresses() {
        assert!(validate_address("Москва", "Ленина 5", "12-А", "").is_empty());
        assert!(validate_address("Ростов-на-Дону", "пр. Мира 3", "33/1", "15/2").is_empty());
        assert!(validate_address("Saint Petersburg", "Nevsky #28", "7b", "15").is_empty());
        assert!(validate_address("Орёл", "ул. Щорса", "4", "2-1").is_empty());
        assert!(validate_address("D'Arcy", "O'Connell st.", "10", "").is_empty());
    }

    #[test]
    fn test_city_rejects_digits_and_empty() {
        assert_eq!(validate_address("Moscow123", "Ленина 5", "12", ""), [AddressError::City]);
        assert_eq!(validate_address("", "Ленина 5", "12", ""), [AddressError::City]);
    }

    #[test]
    fn test_street_rejects_symbols() {
        assert_eq!(validate_address("Москва", "Ленина, 5", "12", ""), [AddressError::Street]);
        assert_eq!(validate_address("Москва", "", "12", ""), [AddressError::Street]);
    }

    #[test]
    fn test_house_shapes() {
        for ok in ["33", "33/1", "12-А", "12А", "5b", "7-", "1ё"] {
            assert!(validate_address("Москва", "Тверская", ok, "").is_empty(), "{ok}");
        }
        for bad in ["", "А12", "12АБ", "12 А", "12/1/2"] {
            assert_eq!(
                validate_address("Москва", "Тверская", bad, ""),
                [AddressError::House],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_apartment_optional_but_numeric() {
        assert!(validate_address("Москва", "Тверская", "1", "").is_empty());
        assert_eq!(
            validate_address("Москва", "Тверская", "1", "15a"),
            [AddressError::Apartment]
        );
    }

    #[test]
    fn test_address_errors_accumulate_in_field_order() {
        let errors = validate_address("Moscow123", "Ленина, 5", "дом", "кв");
        assert_eq!(
            errors,
            [
                AddressError::City,
                AddressError::Street,
                AddressError::House,
                AddressError::Apartment
            ]
        );
    }

    #[test]
    fn test_join_messages() {
        let message = join_messages(&[AddressError::City, AddressError::Street]);
        assert_eq!(
            message,
            "Город должен содержать только буквы, пробелы, дефисы или апострофы. \
             Улица может содержать буквы, цифры, пробелы, дефисы, точки, # и /."
        );
        assert_eq!(join_messages(&[]), "");
    }
}
