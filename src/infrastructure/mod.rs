//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Gopher: Live search API client
//! - Adapters: Platform integrations (Telegram, console)

pub mod config;
pub mod gopher;
pub mod adapters;
