//! End-to-end conversation scenario: language selection, menu, room search
//! against a stub repository. Exercises the same logic the Telegram handler
//! drives, without the transport.

use roomguide::composer::{run_room_search, Keyboard, MessagePart};
use roomguide::db::{RoomRecord, RoomRepository};
use roomguide::errors::RepositoryError;
use roomguide::localization::LocalizationManager;
use roomguide::session::{classify, ConversationState, Intent, Language};

struct StubRepository {
    rooms: Vec<RoomRecord>,
}

impl RoomRepository for StubRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<RoomRecord>, RepositoryError> {
        Ok(self
            .rooms
            .iter()
            .find(|room| room.number.to_uppercase() == key.to_uppercase())
            .cloned())
    }
}

fn seeded_repository() -> StubRepository {
    StubRepository {
        rooms: vec![RoomRecord {
            number: "305".to_string(),
            floor: "3".to_string(),
            description: "Лекционная аудитория".to_string(),
            photo_urls: vec![
                "https://example.com/305-1.jpg".to_string(),
                "https://example.com/305-2.jpg".to_string(),
                "https://example.com/305-3.jpg".to_string(),
            ],
        }],
    }
}

#[tokio::test]
async fn test_full_conversation_flow_with_existing_room() {
    let loc = LocalizationManager::new().unwrap();
    let repo = seeded_repository();

    // /start puts the user at language selection
    let mut state = ConversationState::default();
    assert!(matches!(state, ConversationState::AwaitingLanguage));

    // User picks Russian; the conversation moves to the menu
    let language = match classify(&state, "🇷🇺 Русский") {
        Intent::SelectLanguage(language) => language,
        other => panic!("Expected language selection, got {other:?}"),
    };
    assert_eq!(language, Language::Russian);
    state = ConversationState::AwaitingAction { language };

    // The menu greeting is rendered in Russian
    let menu = loc.t("choose-action", language.code());
    assert!(menu.contains("путеводитель"));

    // Free text while at the menu is an implicit search request
    assert_eq!(classify(&state, "305"), Intent::FreeText);
    state = ConversationState::AwaitingRoomNumber { language };

    // The room token runs the lookup
    assert_eq!(classify(&state, "305"), Intent::FreeText);
    let parts = run_room_search(&repo, &loc, language, "305").await;

    // Three captioned photos in stored order, then the summary
    assert_eq!(parts.len(), 4);
    let captions: Vec<&str> = parts[..3]
        .iter()
        .map(|part| match part {
            MessagePart::Photo { caption, .. } => caption.as_str(),
            other => panic!("Expected photo part, got {other:?}"),
        })
        .collect();
    assert!(captions[0].contains("Иди прямо"));
    assert!(captions[1].contains("Продолжай идти прямо"));
    assert!(captions[2].contains("Ты на месте"));

    match parts.last().unwrap() {
        MessagePart::Text { body, keyboard } => {
            assert!(body.contains("305"));
            assert!(body.contains("Лекционная аудитория"));
            assert_eq!(*keyboard, Some(Keyboard::RetrySearch));
        }
        other => panic!("Expected summary part, got {other:?}"),
    }
}

#[tokio::test]
async fn test_full_conversation_flow_with_missing_room() {
    let loc = LocalizationManager::new().unwrap();
    let repo = seeded_repository();

    let state = ConversationState::AwaitingLanguage;
    let language = match classify(&state, "🇬🇧 English") {
        Intent::SelectLanguage(language) => language,
        other => panic!("Expected language selection, got {other:?}"),
    };
    assert_eq!(language, Language::English);

    let parts = run_room_search(&repo, &loc, language, "412").await;
    assert_eq!(parts.len(), 1);
    match &parts[0] {
        MessagePart::Text { body, keyboard } => {
            assert!(body.contains("412"));
            assert!(body.contains("not found"));
            assert_eq!(*keyboard, Some(Keyboard::RetrySearch));
        }
        other => panic!("Expected not-found part, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cyrillic_query_finds_latin_record() {
    let loc = LocalizationManager::new().unwrap();
    let repo = StubRepository {
        rooms: vec![RoomRecord {
            number: "205B".to_string(),
            floor: "2".to_string(),
            description: "Chemistry lab".to_string(),
            photo_urls: vec![],
        }],
    };

    // Lowercase Cyrillic б folds to B and matches the stored record
    let parts = run_room_search(&repo, &loc, Language::English, "205б").await;
    assert_eq!(parts.len(), 1);
    match &parts[0] {
        MessagePart::Text { body, .. } => assert!(body.contains("205B")),
        other => panic!("Expected summary part, got {other:?}"),
    }
}

#[test]
fn test_language_change_returns_to_language_selection() {
    let state = ConversationState::AwaitingAction {
        language: Language::English,
    };
    assert_eq!(
        classify(&state, "🔄 Change language"),
        Intent::ChangeLanguage
    );
    // The handler then resets to AwaitingLanguage; selecting a new language
    // lands back at the menu with the new language.
    let state = ConversationState::AwaitingLanguage;
    assert_eq!(
        classify(&state, "🇷🇺 Русский"),
        Intent::SelectLanguage(Language::Russian)
    );
}
