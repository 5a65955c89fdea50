//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod instrument;
mod option_side;

pub use instrument::InstrumentName;
pub use option_side::OptionSide;
