// ═══════════════════════════════════════════════════════════════════════
// Visibility / Information Model
//
//   PUBLIC  : who is playing, tokens, positions, who is still active,
//             how many cards each participant holds, turn, roll, winner
//   PRIVATE : your own hand, your own unseen set, your last suggestion
//   HIDDEN  : the solution, everyone else's hand
//
// Drivers hand a participant a `ParticipantView`, never the GameState.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Catalog;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// What everyone at the table can see about one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicParticipant {
    pub id: PlayerId,
    pub character: String,
    pub token: char,
    pub active: bool,
    pub position: Option<TileId>,
    pub hand_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
    // ── Public info ────────────────────────────────────────
    pub players: Vec<PublicParticipant>,
    pub current: PlayerId,
    pub roll: u8,
    pub phase: Phase,
    pub winner: Option<PlayerId>,
    pub catalog: Catalog,

    // ── Private info (viewer only) ─────────────────────────
    pub viewer: PlayerId,
    pub hand: Vec<Card>,
    pub unseen: Vec<Card>,
    pub last_suggestion: Option<TileId>,
}

impl ParticipantView {
    /// Cards of one category the viewer has never seen. The solution card of
    /// that category is always among them.
    pub fn candidates(&self, kind: CardKind) -> Vec<&Card> {
        self.unseen.iter().filter(|c| c.kind() == kind).collect()
    }

    pub fn is_my_turn(&self) -> bool {
        self.current == self.viewer && self.phase != Phase::GameOver
    }
}

pub fn participant_view(state: &GameState, viewer: PlayerId) -> ParticipantView {
    let me = state.player(viewer);
    ParticipantView {
        players: state
            .players
            .iter()
            .map(|p| PublicParticipant {
                id: p.id,
                character: p.character.clone(),
                token: p.token,
                active: p.active,
                position: p.position,
                hand_size: p.hand.len(),
            })
            .collect(),
        current: state.current,
        roll: state.roll,
        phase: state.phase(),
        winner: state.winner,
        catalog: state.catalog.clone(),
        viewer,
        hand: me.hand.clone(),
        unseen: me.unseen.clone(),
        last_suggestion: me.last_suggestion,
    }
}
