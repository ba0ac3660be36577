// ═══════════════════════════════════════════════════════════════════════
// Card catalog: fixed characters and weapons, rooms taken from the map
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;
use serde::{Deserialize, Serialize};

// ── Fixed identities ───────────────────────────────────────────────────

pub const CHARACTERS: [&str; 6] = [
    "MISS_SCARLETT",
    "COLONEL_MUSTARD",
    "MRS_WHITE",
    "REVEREND_GREEN",
    "MRS_PEACOCK",
    "PROFESSOR_PLUM",
];

pub const WEAPONS: [&str; 6] = [
    "CANDLESTICK",
    "DAGGER",
    "LEAD_PIPE",
    "REVOLVER",
    "ROPE",
    "SPANNER",
];

/// Placeholder room some layouts carry. Never becomes a card.
pub const BLANK_ROOM: &str = "Blank";

// ── Catalog ────────────────────────────────────────────────────────────

/// Every card in the game, grouped by category. Built once at set-up and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub characters: Vec<Card>,
    pub weapons: Vec<Card>,
    pub rooms: Vec<Card>,
}

impl Catalog {
    /// Build the catalog from the map's room names.
    pub fn new<S: AsRef<str>>(room_names: &[S]) -> Self {
        Catalog {
            characters: CHARACTERS.iter().map(|c| Card::Character(c.to_string())).collect(),
            weapons: WEAPONS.iter().map(|w| Card::Weapon(w.to_string())).collect(),
            rooms: room_names
                .iter()
                .map(|r| r.as_ref())
                .filter(|r| *r != BLANK_ROOM)
                .map(|r| Card::Room(r.to_string()))
                .collect(),
        }
    }

    pub fn category(&self, kind: CardKind) -> &[Card] {
        match kind {
            CardKind::Character => &self.characters,
            CardKind::Weapon => &self.weapons,
            CardKind::Room => &self.rooms,
        }
    }

    /// Characters, then weapons, then rooms.
    pub fn all_cards(&self) -> Vec<Card> {
        self.characters
            .iter()
            .chain(self.weapons.iter())
            .chain(self.rooms.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len() + self.weapons.len() + self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.category(card.kind()).contains(card)
    }
}

// ── Tokens ─────────────────────────────────────────────────────────────

/// Pick the display token for a character: the first letter after the
/// first `_` that no earlier participant already uses, walking forward
/// through the name. Falls back to the first free uppercase letter.
pub fn pick_token(character: &str, taken: &[char]) -> char {
    let start = character.find('_').map_or(0, |i| i + 1);
    character[start..]
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .find(|c| !taken.contains(c))
        .or_else(|| ('A'..='Z').find(|c| !taken.contains(c)))
        .unwrap_or('?')
}
