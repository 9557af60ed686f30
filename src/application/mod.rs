//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: static replies and the search pipeline
//! - Formatting: truncation and reply composition
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod errors;
pub mod formatting;
pub mod services;
pub mod messaging;

#[cfg(test)]
pub(crate) mod testing;
