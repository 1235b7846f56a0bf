//! Fixed-point recipe prices.
//!
//! Prices are stored as whole cents so no floating-point value ever reaches
//! persistence. The accepted range is `0.00 ..= 999.99`: five significant
//! digits, two of them after the decimal point.

use std::fmt;
use std::str::FromStr;

/// Largest representable price in cents.
pub const PRICE_MAX_CENTS: u32 = 99_999;
/// Number of digits allowed after the decimal point.
pub const PRICE_DECIMAL_PLACES: usize = 2;

/// Validation errors for [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceValidationError {
    #[error("price must not be empty")]
    Empty,
    #[error("price must be a non-negative decimal number")]
    Malformed,
    #[error("price must have at most {max} decimal places")]
    TooManyDecimalPlaces { max: usize },
    #[error("price must not exceed 999.99")]
    OutOfRange,
}

/// Non-negative price with two decimal places.
///
/// # Examples
/// ```
/// use recipe_api::domain::Price;
///
/// let price: Price = "5.5".parse().expect("valid price");
/// assert_eq!(price.cents(), 550);
/// assert_eq!(price.to_string(), "5.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u32);

impl Price {
    /// Build a price from cents.
    pub fn from_cents(cents: u32) -> Result<Self, PriceValidationError> {
        if cents > PRICE_MAX_CENTS {
            return Err(PriceValidationError::OutOfRange);
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> u32 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PriceValidationError::Empty);
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(PriceValidationError::Malformed);
        }
        if fraction.len() > PRICE_DECIMAL_PLACES {
            return Err(PriceValidationError::TooManyDecimalPlaces {
                max: PRICE_DECIMAL_PLACES,
            });
        }

        let digits = whole.trim_start_matches('0');
        // Anything beyond three whole digits is out of range regardless of value.
        if digits.len() > 3 {
            return Err(PriceValidationError::OutOfRange);
        }
        let whole_value: u32 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| PriceValidationError::Malformed)?
        };
        let fraction_value: u32 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u32>().map_err(|_| PriceValidationError::Malformed)? * 10,
            _ => fraction.parse().map_err(|_| PriceValidationError::Malformed)?,
        };

        Self::from_cents(whole_value * 100 + fraction_value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
