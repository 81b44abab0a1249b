use std::{fmt, str::FromStr};
use thiserror::Error;

/// Number of digits of a brazilian postal code (CEP).
pub const POSTAL_CODE_DIGITS: usize = 8;

/// A normalized postal code consisting of exactly
/// [`POSTAL_CODE_DIGITS`] ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostalCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Expected {POSTAL_CODE_DIGITS} digits, found {found}")]
pub struct PostalCodeParseError {
    pub found: usize,
}

impl PostalCode {
    /// Strips every non-digit character and checks the digit count.
    pub fn normalize(input: &str) -> Result<Self, PostalCodeParseError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(PostalCodeParseError {
                found: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first two digits identify the postal zone.
    pub fn zone_prefix(&self) -> &str {
        &self.0[..2]
    }

    /// Two-digit number at the given zero-based digit offset.
    pub fn digit_pair(&self, offset: usize) -> u8 {
        debug_assert!(offset + 2 <= POSTAL_CODE_DIGITS);
        self.0.as_bytes()[offset..offset + 2]
            .iter()
            .fold(0, |acc, b| acc * 10 + (b - b'0'))
    }

    /// Formatted as `NNNNN-NNN`.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl FromStr for PostalCode {
    type Err = PostalCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A house number as entered by the user, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HouseNumber(String);

impl HouseNumber {
    /// Blank input is treated as absent.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the leading digits, e.g. `"123A"` yields `123`.
    pub fn numeric_value(&self) -> Option<u32> {
        let digits: String = self
            .0
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .take(9)
            .collect();
        digits.parse().ok()
    }
}

impl fmt::Display for HouseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
