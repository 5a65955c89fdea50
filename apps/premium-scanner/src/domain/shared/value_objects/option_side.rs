//! Option side value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// Option side (put or call).
///
/// Serialized with the exchange tags `PE` / `CE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    /// Put option. Priced at the best bid.
    #[serde(rename = "PE")]
    Put,
    /// Call option. Priced at the best ask.
    #[serde(rename = "CE")]
    Call,
}

impl OptionSide {
    /// Exchange tag for this side.
    #[must_use]
    pub const fn wire_tag(&self) -> &'static str {
        match self {
            Self::Put => "PE",
            Self::Call => "CE",
        }
    }

    /// Map an exchange tag to a side.
    ///
    /// Only the exact tags `PE` and `CE` are recognized. Anything else (futures,
    /// lowercase variants, empty) is not an option side.
    #[must_use]
    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            "PE" => Some(Self::Put),
            "CE" => Some(Self::Call),
            _ => None,
        }
    }

    /// Check if this is a put.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self, Self::Put)
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_tag())
    }
}

impl FromStr for OptionSide {
    type Err = DomainError;

    /// Lenient parse for user input: `PE`/`PUT`/`P` and `CE`/`CALL`/`C`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PE" | "PUT" | "P" => Ok(Self::Put),
            "CE" | "CALL" | "C" => Ok(Self::Call),
            _ => Err(DomainError::UnknownOptionSide { tag: s.to_string() }),
        }
    }
}
