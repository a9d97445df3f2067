//! PhoneNumber value object and the format policy it is validated against.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static TEN_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static E164: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+1[0-9]{10}$").unwrap());

/// Which phone-number format incoming rosters are validated against.
///
/// The two formats are mutually incompatible, so the active one is a
/// configuration choice made once per run, not a per-number toggle. The
/// `texts-v2` wire protocol expects E.164; the other two expect raw ten-digit
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneFormat {
    /// Exactly ten ASCII digits with no separators ("5555555551").
    TenDigit,

    /// `+1` followed by ten digits ("+15555555551").
    E164,
}

impl PhoneFormat {
    fn regex(&self) -> &'static Regex {
        match self {
            Self::TenDigit => &TEN_DIGIT,
            Self::E164 => &E164,
        }
    }
}

impl fmt::Display for PhoneFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TenDigit => write!(f, "ten-digit"),
            Self::E164 => write!(f, "e164"),
        }
    }
}

impl FromStr for PhoneFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ten-digit" => Ok(Self::TenDigit),
            "e164" => Ok(Self::E164),
            other => Err(format!(
                "Unrecognized phone format {:?} (expected ten-digit or e164)",
                other
            )),
        }
    }
}

/// A type-safe wrapper for USA phone numbers.
///
/// A `PhoneNumber` can only be constructed through [`PhoneNumber::parse`],
/// which checks the value against a [`PhoneFormat`]. Once constructed it is
/// an opaque comparable value: `Ord` follows the underlying string, so sorted
/// recipient lists come out deterministic.
///
/// There is deliberately no `Deserialize` impl — the format in force is
/// run-time configuration, so documents carry raw strings that are validated
/// during resolution.
///
/// # Example
///
/// ```
/// use pushbullet_sms::domain::{PhoneFormat, PhoneNumber};
///
/// let phone = PhoneNumber::parse("5555555551", PhoneFormat::TenDigit).unwrap();
/// assert_eq!(phone.as_str(), "5555555551");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate `value` against `format` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the value does not match
    /// the format exactly.
    pub fn parse(value: impl Into<String>, format: PhoneFormat) -> Result<Self, ValidationError> {
        let value = value.into();

        if !format.regex().is_match(&value) {
            return Err(ValidationError::InvalidPhone { value, format });
        }

        Ok(Self(value))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Display support
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digit_valid() {
        let phone = PhoneNumber::parse("5555555551", PhoneFormat::TenDigit).unwrap();
        assert_eq!(phone.as_str(), "5555555551");
    }

    #[test]
    fn test_ten_digit_rejects_other_shapes() {
        assert!(PhoneNumber::parse("", PhoneFormat::TenDigit).is_err());
        assert!(PhoneNumber::parse("555555555", PhoneFormat::TenDigit).is_err());
        assert!(PhoneNumber::parse("55555555510", PhoneFormat::TenDigit).is_err());
        assert!(PhoneNumber::parse("+15555555551", PhoneFormat::TenDigit).is_err());
        assert!(PhoneNumber::parse("555-555-5551", PhoneFormat::TenDigit).is_err());
        assert!(PhoneNumber::parse("555555555a", PhoneFormat::TenDigit).is_err());
    }

    #[test]
    fn test_e164_valid() {
        let phone = PhoneNumber::parse("+15555555551", PhoneFormat::E164).unwrap();
        assert_eq!(phone.as_str(), "+15555555551");
    }

    #[test]
    fn test_e164_rejects_other_shapes() {
        assert!(PhoneNumber::parse("5555555551", PhoneFormat::E164).is_err());
        assert!(PhoneNumber::parse("+25555555551", PhoneFormat::E164).is_err());
        assert!(PhoneNumber::parse("+1555555555", PhoneFormat::E164).is_err());
        assert!(PhoneNumber::parse("+155555555511", PhoneFormat::E164).is_err());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = PhoneNumber::parse("5555555551", PhoneFormat::TenDigit).unwrap();
        let b = PhoneNumber::parse("5555555552", PhoneFormat::TenDigit).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_phone_display() {
        let phone = PhoneNumber::parse("5555555551", PhoneFormat::TenDigit).unwrap();
        assert_eq!(format!("{}", phone), "5555555551");
    }

    #[test]
    fn test_phone_serialization() {
        let phone = PhoneNumber::parse("5555555551", PhoneFormat::TenDigit).unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"5555555551\"");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("ten-digit".parse::<PhoneFormat>(), Ok(PhoneFormat::TenDigit));
        assert_eq!("e164".parse::<PhoneFormat>(), Ok(PhoneFormat::E164));
        assert!("E164".parse::<PhoneFormat>().is_err());
    }

    #[test]
    fn test_invalid_phone_error_names_the_format() {
        let err = PhoneNumber::parse("123", PhoneFormat::E164).unwrap_err();
        assert!(err.to_string().contains("E.164"));
    }
}
