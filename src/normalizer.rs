//! Room number normalization: Cyrillic homoglyph folding plus format
//! validation, producing the canonical uppercase lookup key.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::RoomNumberError;

// One or more digits, optionally followed by exactly one a/b/v letter.
// Applied after transliteration, so only Latin letters can appear here.
static ROOM_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[abvABV]?$").expect("room number regex is valid"));

/// Fold the Cyrillic homoglyphs for a, b and v to their Latin equivalents,
/// preserving case. All other characters pass through unchanged.
fn transliterate(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'а' => 'a',
            'А' => 'A',
            'б' => 'b',
            'Б' => 'B',
            'в' => 'v',
            'В' => 'V',
            other => other,
        })
        .collect()
}

/// Normalize a raw room token into its canonical lookup key.
///
/// The input is expected to be trimmed already. The result is the
/// transliterated, validated, uppercased form (e.g. `"205в"` → `"205V"`).
pub fn normalize_room_number(raw: &str) -> Result<String, RoomNumberError> {
    let transliterated = transliterate(raw);

    if !ROOM_NUMBER_RE.is_match(&transliterated) {
        return Err(RoomNumberError::InvalidFormat);
    }

    Ok(transliterated.to_uppercase())
}
