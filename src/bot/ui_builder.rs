//! UI Builder module for creating reply keyboards

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::composer::Keyboard;
use crate::localization::LocalizationManager;
use crate::session::Language;

/// Language selection keyboard, shown before any language is known
pub fn language_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("🇷🇺 Русский"),
        KeyboardButton::new("🇬🇧 English"),
    ]])
    .resize_keyboard()
    .one_time_keyboard()
}

/// Main menu keyboard: find room on the first row, change language and help
/// on the second
pub fn main_menu_keyboard(loc: &LocalizationManager, language: Language) -> KeyboardMarkup {
    let lang = language.code();
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(loc.t("find-room-button", lang))],
        vec![
            KeyboardButton::new(loc.t("change-language-button", lang)),
            KeyboardButton::new(loc.t("help-button", lang)),
        ],
    ])
    .resize_keyboard()
}

/// Post-search keyboard: search again or go back to the menu
pub fn retry_keyboard(loc: &LocalizationManager, language: Language) -> KeyboardMarkup {
    let lang = language.code();
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(loc.t("search-again", lang)),
        KeyboardButton::new(loc.t("back-to-menu", lang)),
    ]])
    .resize_keyboard()
}

/// Keyboard shown after /cancel, offering a way back in
pub fn restart_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new("/start")]]).resize_keyboard()
}

/// Render a composed keyboard tag into Telegram markup
pub fn keyboard_markup(
    loc: &LocalizationManager,
    language: Language,
    keyboard: Keyboard,
) -> KeyboardMarkup {
    match keyboard {
        Keyboard::RetrySearch => retry_keyboard(loc, language),
    }
}
