//! Instrument name value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Maximum accepted length for an underlying instrument name.
const MAX_LEN: usize = 32;

/// An underlying instrument name as used by the broker's option chain API.
///
/// Examples: "NIFTY", "BANKNIFTY", "FINNIFTY"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentName(String);

impl InstrumentName {
    /// Create a new instrument name without validation.
    ///
    /// The name is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Create a validated instrument name.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty, too long, or contains characters
    /// other than ASCII letters, digits, `-` and `&`.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let name = Self::new(value);
        name.validate()?;
        Ok(name)
    }

    /// Get the name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the name.
    ///
    /// # Errors
    ///
    /// Returns error if name is empty or contains invalid characters.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "instrument_name".to_string(),
                message: "Instrument name cannot be empty".to_string(),
            });
        }

        if self.0.len() > MAX_LEN {
            return Err(DomainError::InvalidValue {
                field: "instrument_name".to_string(),
                message: "Instrument name exceeds maximum length".to_string(),
            });
        }

        // NSE symbols like "M&M" and "BAJAJ-AUTO" carry '&' and '-'
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '&')
        {
            return Err(DomainError::InvalidValue {
                field: "instrument_name".to_string(),
                message: "Instrument name contains invalid characters".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for InstrumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InstrumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstrumentName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
