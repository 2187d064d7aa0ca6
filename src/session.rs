//! Conversation state and intent classification for the room guide dialogue.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Languages the bot can speak
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Russian,
    English,
}

impl Language {
    /// Locale code used to pick a localization bundle
    pub fn code(self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }
}

/// Represents the conversation state for the room guide dialogue
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ConversationState {
    /// First contact: waiting for the user to pick a language
    #[default]
    AwaitingLanguage,
    /// Main menu: waiting for a search/help/change-language action
    AwaitingAction { language: Language },
    /// Waiting for a room number to look up
    AwaitingRoomNumber { language: Language },
}

/// Type alias for our room guide dialogue
pub type RoomDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;

/// A classified user message, one row of the transition table
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// A language button was pressed
    SelectLanguage(Language),
    /// "Find room" menu action
    Search,
    /// "Change language" menu action
    ChangeLanguage,
    /// "Help" menu action
    Help,
    /// "Back to main menu" action
    BackToMenu,
    /// Anything that matched no marker; meaning depends on the state
    FreeText,
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

/// Match a language-selection button label. Accepts the flag emoji or the
/// language name so typed-out answers work too.
pub fn parse_language_choice(text: &str) -> Option<Language> {
    if contains_any(text, &["🇷🇺", "Русский", "русский"]) {
        Some(Language::Russian)
    } else if contains_any(text, &["🇬🇧", "English", "english"]) {
        Some(Language::English)
    } else {
        None
    }
}

/// Classify free-form text against the fixed intent markers for the given
/// state. No natural-language understanding, just substring checks.
pub fn classify(state: &ConversationState, text: &str) -> Intent {
    match state {
        ConversationState::AwaitingLanguage => match parse_language_choice(text) {
            Some(language) => Intent::SelectLanguage(language),
            None => Intent::FreeText,
        },
        ConversationState::AwaitingAction { .. } => {
            if contains_any(text, &["🔍", "Найти", "find", "Find"]) {
                Intent::Search
            } else if contains_any(text, &["🔄", "Сменить", "change", "Change"]) {
                Intent::ChangeLanguage
            } else if contains_any(text, &["❓", "Помощь", "help", "Help"]) {
                Intent::Help
            } else {
                Intent::FreeText
            }
        }
        ConversationState::AwaitingRoomNumber { .. } => {
            // The main-menu keyboard can still be on screen here, so its
            // buttons must keep working alongside the result keyboard.
            if contains_any(text, &["⬅️", "В главное", "Back", "back to"]) {
                Intent::BackToMenu
            } else if contains_any(text, &["🔄", "Сменить", "change", "Change"]) {
                Intent::ChangeLanguage
            } else if contains_any(text, &["❓", "Помощь", "help", "Help"]) {
                Intent::Help
            } else if contains_any(text, &["🔍", "Найти", "find", "Find"]) {
                Intent::Search
            } else {
                Intent::FreeText
            }
        }
    }
}
