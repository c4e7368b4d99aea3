//! Phone number type used as the checkout hand-off destination.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input contains no digits at all.
    #[error("phone number must contain at least one digit")]
    NoDigits,
    /// A country code must be made of digits only.
    #[error("country code must be digits only, got {0:?}")]
    InvalidCountryCode(String),
}

/// A phone number reduced to its digits.
///
/// Footer phone numbers are written for humans (`+91 98765 43210`); the
/// messaging hand-off wants bare digits with a country code prefix.
///
/// ## Examples
///
/// ```
/// use bandhan_core::PhoneNumber;
///
/// let phone = PhoneNumber::from_display("+91 98765 43210").unwrap();
/// assert_eq!(phone.as_str(), "919876543210");
///
/// let local = PhoneNumber::from_display("98765-43210").unwrap();
/// assert_eq!(local.with_country_code("91").unwrap().as_str(), "919876543210");
///
/// assert!(PhoneNumber::from_display("call us").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a human-formatted phone number, keeping only ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::NoDigits`] if the input has no digits.
    pub fn from_display(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(PhoneError::NoDigits);
        }
        Ok(Self(digits))
    }

    /// Prefix the number with `country_code` unless it already starts with it.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidCountryCode`] if `country_code` is empty
    /// or contains anything but digits.
    pub fn with_country_code(&self, country_code: &str) -> Result<Self, PhoneError> {
        if country_code.is_empty() || !country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCountryCode(country_code.to_string()));
        }
        if self.0.starts_with(country_code) {
            return Ok(self.clone());
        }
        Ok(Self(format!("{country_code}{}", self.0)))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
