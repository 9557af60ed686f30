//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Message, CommandKind, Reply, search results)
//! - Traits: Abstractions for infrastructure (Bot, SearchClient)

pub mod entities;
pub mod traits;
