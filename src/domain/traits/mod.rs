//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod search;

pub use bot::{Bot, BotInfo};
pub use search::SearchClient;
