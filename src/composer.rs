//! Response composition: turns a lookup outcome into an ordered sequence of
//! localized message parts, independent of the transport.

use tracing::warn;

use crate::db::{RoomRecord, RoomRepository};
use crate::errors::RoomNumberError;
use crate::localization::LocalizationManager;
use crate::normalizer::normalize_room_number;
use crate::session::Language;

/// Reply affordance attached to a text part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Search again / back to menu
    RetrySearch,
}

/// One outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    Text {
        body: String,
        keyboard: Option<Keyboard>,
    },
    Photo {
        url: String,
        caption: String,
    },
}

/// Caption for the photo at `index` out of `total`, by position: the first
/// photo starts the route, the last one ends it. A single photo is both,
/// and gets the "arrived" caption.
fn photo_caption(loc: &LocalizationManager, language: Language, index: usize, total: usize) -> String {
    let key = if index == total - 1 {
        "caption-last"
    } else if index == 0 {
        "caption-first"
    } else {
        "caption-middle"
    };
    loc.t(key, language.code())
}

/// Compose the reply for a completed lookup: either the room's photos and
/// summary, or a not-found message. Both variants end with the retry
/// keyboard.
pub fn compose_room_reply(
    loc: &LocalizationManager,
    language: Language,
    query: &str,
    record: Option<&RoomRecord>,
) -> Vec<MessagePart> {
    let lang = language.code();

    let Some(room) = record else {
        return vec![MessagePart::Text {
            body: loc.t_args("room-not-found", lang, &[("number", query)]),
            keyboard: Some(Keyboard::RetrySearch),
        }];
    };

    let total = room.photo_urls.len();
    let mut parts: Vec<MessagePart> = room
        .photo_urls
        .iter()
        .enumerate()
        .map(|(i, url)| MessagePart::Photo {
            url: url.clone(),
            caption: photo_caption(loc, language, i, total),
        })
        .collect();

    parts.push(MessagePart::Text {
        body: loc.t_args(
            "room-summary",
            lang,
            &[
                ("number", room.number.as_str()),
                ("floor", room.floor.as_str()),
                ("description", room.description.as_str()),
            ],
        ),
        keyboard: Some(Keyboard::RetrySearch),
    });

    parts
}

/// Run one room search: normalize the token, query the repository, compose
/// the reply. Every failure mode maps to a localized reply part; nothing
/// internal leaks to the chat.
pub async fn run_room_search<R: RoomRepository>(
    repo: &R,
    loc: &LocalizationManager,
    language: Language,
    raw: &str,
) -> Vec<MessagePart> {
    let lang = language.code();

    let key = match normalize_room_number(raw) {
        Ok(key) => key,
        Err(RoomNumberError::InvalidFormat) => {
            return vec![MessagePart::Text {
                body: loc.t("invalid-room", lang),
                keyboard: None,
            }];
        }
    };

    match repo.find_by_key(&key).await {
        Ok(record) => compose_room_reply(loc, language, raw, record.as_ref()),
        Err(err) => {
            warn!(room_key = %key, error = %err, "Room lookup failed");
            vec![MessagePart::Text {
                body: loc.t("repository-unavailable", lang),
                keyboard: Some(Keyboard::RetrySearch),
            }]
        }
    }
}
