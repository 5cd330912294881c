//! Login name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Login`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The input string is empty.
    #[error("login cannot be empty")]
    Empty,
    /// The input is shorter or longer than allowed.
    #[error("login must be between {min} and {max} characters")]
    Length {
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("login contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A user login name.
///
/// ## Constraints
///
/// - Length: 3-30 characters
/// - Characters: latin letters, ASCII digits, `_` and `-`
///
/// Equivalent to the pattern `^[A-Za-z0-9_-]{3,30}$`.
///
/// ## Examples
///
/// ```
/// use mebel_core::Login;
///
/// assert!(Login::parse("ivan_petrov").is_ok());
/// assert!(Login::parse("user-42").is_ok());
///
/// assert!(Login::parse("").is_err());          // empty
/// assert!(Login::parse("ab").is_err());        // too short
/// assert!(Login::parse("иван").is_err());      // cyrillic
/// assert!(Login::parse("john doe").is_err());  // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    /// Minimum length of a login.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a login.
    pub const MAX_LENGTH: usize = 30;

    /// Parse a `Login` from a string.
    ///
    /// The input is taken as-is; callers trim user input first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Contains a character other than `[A-Za-z0-9_-]`
    /// - Is shorter than 3 or longer than 30 characters
    pub fn parse(s: &str) -> Result<Self, LoginError> {
        if s.is_empty() {
            return Err(LoginError::Empty);
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(LoginError::InvalidCharacter(c));
        }

        // All characters are ASCII here, so byte length equals char count.
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&s.len()) {
            return Err(LoginError::Length {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the login as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Login {
    type Err = LoginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with sqlite feature)
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Login {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Login {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_logins() {
        assert!(Login::parse("abc").is_ok());
        assert!(Login::parse("Ivan_Petrov-1990").is_ok());
        assert!(Login::parse("___").is_ok());
        assert!(Login::parse("---").is_ok());
        assert!(Login::parse(&"a".repeat(30)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Login::parse(""), Err(LoginError::Empty));
    }

    #[test]
    fn test_parse_length_bounds() {
        assert!(matches!(Login::parse("ab"), Err(LoginError::Length { .. })));
        assert!(matches!(
            Login::parse(&"a".repeat(31)),
            Err(LoginError::Length { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(
            Login::parse("john doe"),
            Err(LoginError::InvalidCharacter(' '))
        );
        assert_eq!(
            Login::parse("user@mail"),
            Err(LoginError::InvalidCharacter('@'))
        );
        assert_eq!(Login::parse("иван"), Err(LoginError::InvalidCharacter('и')));
        assert_eq!(
            Login::parse("abc.def"),
            Err(LoginError::InvalidCharacter('.'))
        );
    }

    #[test]
    fn test_cyrillic_length_is_not_counted_in_bytes() {
        // Two cyrillic letters are four bytes but still an invalid login.
        assert!(matches!(
            Login::parse("ив"),
            Err(LoginError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_display_and_from_str() {
        let login: Login = "buyer_01".parse().unwrap();
        assert_eq!(login.as_str(), "buyer_01");
        assert_eq!(format!("{login}"), "buyer_01");
    }

    #[test]
    fn test_serde_is_transparent() {
        let login = Login::parse("buyer_01").unwrap();
        let json = serde_json::to_string(&login).unwrap();
        assert_eq!(json, "\"buyer_01\"");

        let parsed: Login = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, login);
    }

    mod properties {
        use proptest::prelude::*;
        use regex::Regex;

        use super::*;

        fn login_pattern() -> Regex {
            Regex::new("^[A-Za-z0-9_-]{3,30}$").unwrap()
        }

        proptest! {
            #[test]
            fn prop_parse_agrees_with_pattern_near_valid(s in "[A-Za-z0-9_\\-ёЖ .@]{0,34}") {
                prop_assert_eq!(Login::parse(&s).is_ok(), login_pattern().is_match(&s));
            }

            #[test]
            fn prop_parse_agrees_with_pattern_on_any_string(s in any::<String>()) {
                prop_assert_eq!(Login::parse(&s).is_ok(), login_pattern().is_match(&s));
            }

            #[test]
            fn prop_valid_logins_round_trip(s in "[A-Za-z0-9_-]{3,30}") {
                let login = Login::parse(&s).unwrap();
                prop_assert_eq!(login.as_str(), s.as_str());
            }
        }
    }
}
