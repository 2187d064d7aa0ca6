//! Bot module for handling Telegram interactions
//!
//! This module is split into submodules:
//! - `message_handler`: Drives the conversation state machine for incoming messages
//! - `ui_builder`: Creates reply keyboards and renders composed message parts

pub mod message_handler;
pub mod ui_builder;

// Re-export the dispatcher endpoint for use in main.rs
pub use message_handler::handle_message;
