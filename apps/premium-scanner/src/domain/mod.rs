//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic (best-price selection)
//!
//! # Bounded Contexts
//!
//! - [`option_chain`]: Raw chain entries and the per-strike record types
//! - [`shared`]: Instrument names, option sides and domain errors

pub mod option_chain;
pub mod shared;
