// ═══════════════════════════════════════════════════════════════════════
// Core types: cards, solution, participants, game state
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Catalog;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Identifiers ────────────────────────────────────────────────────────
// Compact, copyable identifiers. PlayerId indexes GameState::players
// (insertion order = turn order); TileId indexes the map collaborator.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TileId(pub u16);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Cards ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum CardKind {
    Character,
    Weapon,
    Room,
}

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Character, CardKind::Weapon, CardKind::Room];
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::Character => write!(f, "character"),
            CardKind::Weapon => write!(f, "weapon"),
            CardKind::Room => write!(f, "room"),
        }
    }
}

/// A single card. Two cards are equal when both category and identity match,
/// so `Card::Room("STUDY")` never equals `Card::Weapon("STUDY")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Card {
    Character(String),
    Weapon(String),
    Room(String),
}

impl Card {
    pub fn new(kind: CardKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            CardKind::Character => Card::Character(name),
            CardKind::Weapon => Card::Weapon(name),
            CardKind::Room => Card::Room(name),
        }
    }

    pub fn kind(&self) -> CardKind {
        match self {
            Card::Character(_) => CardKind::Character,
            Card::Weapon(_) => CardKind::Weapon,
            Card::Room(_) => CardKind::Room,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Card::Character(n) | Card::Weapon(n) | Card::Room(n) => n,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

// ── Solution ───────────────────────────────────────────────────────────

/// The three hidden cards. One per category by construction; fields are
/// private so nothing outside the crate can rewrite them mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    character: Card,
    weapon: Card,
    room: Card,
}

impl Solution {
    pub fn new(
        character: impl Into<String>,
        weapon: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Solution {
            character: Card::Character(character.into()),
            weapon: Card::Weapon(weapon.into()),
            room: Card::Room(room.into()),
        }
    }

    pub fn character(&self) -> &Card { &self.character }
    pub fn weapon(&self) -> &Card { &self.weapon }
    pub fn room(&self) -> &Card { &self.room }

    pub fn cards(&self) -> [&Card; 3] {
        [&self.character, &self.weapon, &self.room]
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards().contains(&card)
    }
}

// ── Participant ────────────────────────────────────────────────────────

/// Per-player state.
///
/// `hand` and `unseen` are independent: dealing adds to `hand` and removes
/// from `unseen`, while a disproof only removes from `unseen`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub character: String,
    pub token: char,
    pub hand: Vec<Card>,      // cards owned (PRIVATE)
    pub unseen: Vec<Card>,    // cards never observed (PRIVATE)
    pub active: bool,
    pub last_suggestion: Option<TileId>,
    pub position: Option<TileId>,
}

impl Participant {
    pub fn new(id: PlayerId, character: impl Into<String>, token: char, all_cards: Vec<Card>) -> Self {
        Participant {
            id,
            character: character.into(),
            token,
            hand: Vec::new(),
            unseen: all_cards,
            active: true,
            last_suggestion: None,
            position: None,
        }
    }

    /// Take a dealt card into the hand. A card you hold counts as seen.
    pub fn add_card(&mut self, card: Card) {
        self.observe(&card);
        self.hand.push(card);
    }

    /// Record that a card has been shown. Returns false if it was already seen.
    pub fn observe(&mut self, card: &Card) -> bool {
        match self.unseen.iter().position(|c| c == card) {
            Some(pos) => {
                self.unseen.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn holds(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    pub fn has_seen(&self, card: &Card) -> bool {
        !self.unseen.contains(card)
    }
}

// ── Turn phase ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingRoll,
    AwaitingAction,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingRoll => write!(f, "AwaitingRoll"),
            Phase::AwaitingAction => write!(f, "AwaitingAction"),
            Phase::GameOver => write!(f, "GameOver"),
        }
    }
}

// ── Game State ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// All participants. Order = turn order, fixed at creation.
    pub players: Vec<Participant>,
    pub current: PlayerId,
    /// Movement allowance for the current turn. 0 until the first roll.
    pub roll: u8,
    pub complete: bool,
    pub winner: Option<PlayerId>,

    pub catalog: Catalog,
    pub(crate) solution: Solution,

    // Deterministic RNG. Every random draw in the game goes through here.
    pub seed: u64,
    pub(crate) rng: ChaCha8Rng,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> &Participant {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Participant {
        &mut self.players[id.index()]
    }

    pub fn current_player(&self) -> &Participant {
        self.player(self.current)
    }

    pub fn player_by_character(&self, character: &str) -> Option<PlayerId> {
        self.players.iter().find(|p| p.character == character).map(|p| p.id)
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    pub fn phase(&self) -> Phase {
        if self.complete {
            Phase::GameOver
        } else if self.roll == 0 {
            Phase::AwaitingRoll
        } else {
            Phase::AwaitingAction
        }
    }

    /// The hidden answer. Drivers may reveal it once the game is over;
    /// participants only ever get a `ParticipantView`.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn set_roll(&mut self, roll: u8) {
        self.roll = roll;
    }

    pub fn set_current(&mut self, id: PlayerId) {
        self.current = id;
    }
}
