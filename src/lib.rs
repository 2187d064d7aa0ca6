//! # Room Guide Bot
//!
//! A Telegram bot that helps visitors find rooms in the Moscow Polytech
//! building: pick a language, type a room number, get directional photos
//! and a floor/description summary from the room database.

pub mod bot;
pub mod composer;
pub mod config;
pub mod db;
pub mod errors;
pub mod localization;
pub mod normalizer;
pub mod session;
