//! Message Handler module: drives the conversation state machine for
//! incoming Telegram messages.

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use tracing::{debug, error, info};
use url::Url;

use crate::composer::{run_room_search, MessagePart};
use crate::localization::LocalizationManager;
use crate::session::{classify, ConversationState, Intent, Language, RoomDialogue};

use super::ui_builder;

/// Dispatcher endpoint for text messages.
///
/// Commands (`/start`, `/cancel`, `/menu`) work from any state; everything
/// else is classified against the current conversation state.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    dialogue: RoomDialogue,
    pool: PgPool,
    loc: Arc<LocalizationManager>,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        debug!(user_id = %chat_id, "Ignoring non-text message");
        return Ok(());
    };
    let text = text.trim();

    debug!(user_id = %chat_id, text = %text, "Received text message");

    let state = dialogue.get().await?.unwrap_or_default();

    match text {
        "/start" => return prompt_language(&bot, &dialogue, &loc, chat_id).await,
        "/cancel" => return say_goodbye(&bot, &dialogue, &loc, chat_id).await,
        "/menu" => {
            if let ConversationState::AwaitingAction { language }
            | ConversationState::AwaitingRoomNumber { language } = state
            {
                return show_menu(&bot, &dialogue, &loc, chat_id, language).await;
            }
            // No language picked yet, so the menu cannot be rendered
            return prompt_language(&bot, &dialogue, &loc, chat_id).await;
        }
        _ => {}
    }

    match state {
        ConversationState::AwaitingLanguage => match classify(&state, text) {
            Intent::SelectLanguage(language) => {
                info!(user_id = %chat_id, language = ?language, "Language selected");
                show_menu(&bot, &dialogue, &loc, chat_id, language).await
            }
            _ => {
                bot.send_message(chat_id, loc.t("choose-language-retry", "ru"))
                    .reply_markup(ui_builder::language_keyboard())
                    .await?;
                Ok(())
            }
        },
        ConversationState::AwaitingAction { language } => match classify(&state, text) {
            Intent::ChangeLanguage => {
                prompt_language_change(&bot, &dialogue, &loc, chat_id, language).await
            }
            Intent::Help => send_help(&bot, &loc, chat_id, language).await,
            // Explicit search and free text both lead to the room prompt
            _ => prompt_room_number(&bot, &dialogue, &loc, chat_id, language).await,
        },
        ConversationState::AwaitingRoomNumber { language } => match classify(&state, text) {
            Intent::BackToMenu => show_menu(&bot, &dialogue, &loc, chat_id, language).await,
            Intent::ChangeLanguage => {
                prompt_language_change(&bot, &dialogue, &loc, chat_id, language).await
            }
            Intent::Help => send_help(&bot, &loc, chat_id, language).await,
            Intent::Search => {
                bot.send_message(chat_id, loc.t("room-prompt", language.code()))
                    .await?;
                Ok(())
            }
            _ => {
                let parts = run_room_search(&pool, &loc, language, text).await;
                send_parts(&bot, chat_id, &loc, language, parts).await
            }
        },
    }
}

/// Send the bilingual language prompt and reset to `AwaitingLanguage`
async fn prompt_language(
    bot: &Bot,
    dialogue: &RoomDialogue,
    loc: &LocalizationManager,
    chat_id: ChatId,
) -> Result<()> {
    bot.send_message(chat_id, loc.t("choose-language", "ru"))
        .reply_markup(ui_builder::language_keyboard())
        .await?;
    dialogue.update(ConversationState::AwaitingLanguage).await?;
    Ok(())
}

/// Send the localized main menu and move to `AwaitingAction`
async fn show_menu(
    bot: &Bot,
    dialogue: &RoomDialogue,
    loc: &LocalizationManager,
    chat_id: ChatId,
    language: Language,
) -> Result<()> {
    bot.send_message(chat_id, loc.t("choose-action", language.code()))
        .reply_markup(ui_builder::main_menu_keyboard(loc, language))
        .await?;
    dialogue
        .update(ConversationState::AwaitingAction { language })
        .await?;
    Ok(())
}

/// Ask for a room number and move to `AwaitingRoomNumber`
async fn prompt_room_number(
    bot: &Bot,
    dialogue: &RoomDialogue,
    loc: &LocalizationManager,
    chat_id: ChatId,
    language: Language,
) -> Result<()> {
    bot.send_message(chat_id, loc.t("room-prompt", language.code()))
        .await?;
    dialogue
        .update(ConversationState::AwaitingRoomNumber { language })
        .await?;
    Ok(())
}

/// Offer the language keyboard again and reset to `AwaitingLanguage`
async fn prompt_language_change(
    bot: &Bot,
    dialogue: &RoomDialogue,
    loc: &LocalizationManager,
    chat_id: ChatId,
    language: Language,
) -> Result<()> {
    bot.send_message(chat_id, loc.t("choose-language-again", language.code()))
        .reply_markup(ui_builder::language_keyboard())
        .await?;
    dialogue.update(ConversationState::AwaitingLanguage).await?;
    Ok(())
}

/// Send the localized help text; the conversation state is unchanged
async fn send_help(
    bot: &Bot,
    loc: &LocalizationManager,
    chat_id: ChatId,
    language: Language,
) -> Result<()> {
    bot.send_message(chat_id, loc.t("help-text", language.code()))
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// Say goodbye and clear the session
async fn say_goodbye(
    bot: &Bot,
    dialogue: &RoomDialogue,
    loc: &LocalizationManager,
    chat_id: ChatId,
) -> Result<()> {
    bot.send_message(chat_id, loc.t("goodbye", "ru"))
        .reply_markup(ui_builder::restart_keyboard())
        .await?;
    dialogue.exit().await?;
    Ok(())
}

/// Render composed message parts to Telegram. A photo that fails to send is
/// skipped with an inline notice; the remaining parts still go out.
async fn send_parts(
    bot: &Bot,
    chat_id: ChatId,
    loc: &LocalizationManager,
    language: Language,
    parts: Vec<MessagePart>,
) -> Result<()> {
    let mut photo_index = 0usize;

    for part in parts {
        match part {
            MessagePart::Text { body, keyboard } => {
                let mut request = bot
                    .send_message(chat_id, body)
                    .parse_mode(ParseMode::Markdown);
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(ui_builder::keyboard_markup(
                        loc, language, keyboard,
                    ));
                }
                request.await?;
            }
            MessagePart::Photo { url, caption } => {
                photo_index += 1;

                let sent = match Url::parse(&url) {
                    Ok(parsed) => bot
                        .send_photo(chat_id, InputFile::url(parsed))
                        .caption(caption)
                        .parse_mode(ParseMode::Markdown)
                        .await
                        .map(|_| ())
                        .map_err(anyhow::Error::from),
                    Err(err) => Err(anyhow::Error::from(err)),
                };

                if let Err(err) = sent {
                    error!(
                        user_id = %chat_id,
                        photo_index,
                        error = %err,
                        "Failed to send route photo"
                    );
                    let index = photo_index.to_string();
                    bot.send_message(
                        chat_id,
                        loc.t_args("photo-failed", language.code(), &[("index", &index)]),
                    )
                    .await?;
                }
            }
        }
    }

    Ok(())
}
