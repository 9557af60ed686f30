//! Gopher Explore Bot - Telegram bot for Gopher AI live search

pub mod domain;
pub mod application;
pub mod infrastructure;
