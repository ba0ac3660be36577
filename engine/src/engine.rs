// ═══════════════════════════════════════════════════════════════════════
// Game Engine: turn control and action resolution
//
// Architecture:
//   The engine is a synchronous state machine. It never does I/O and never
//   decides anything for a participant. A driver (CLI, UI) calls one of
//   the four actions below per player input:
//
//     advance_turn  roll + hand the turn to the next active participant
//     move_to       walk the current participant toward a tile
//     suggest       relocate tokens, look for a disproving card
//     accuse        win, or be eliminated
//
//   Rejecting actions after Game-Over is the driver's job; the engine
//   does not re-check `state.complete` on every call.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::{MoveError, SuggestError};
use crate::map::Board;
use crate::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive movement roll range.
pub const ROLL_MIN: u8 = 2;
pub const ROLL_MAX: u8 = 11;

/// A card shown privately to the suggester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disproof {
    pub by: PlayerId,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccusationOutcome {
    Won,
    Eliminated,
}

// ── Turn Controller ────────────────────────────────────────────────────

/// Roll for the next turn and pass it to the next active participant in
/// turn order, wrapping. Once at most one participant is still active the
/// game is over, with no winner recorded.
pub fn advance_turn(state: &mut GameState) {
    state.roll = state.rng.gen_range(ROLL_MIN..=ROLL_MAX);

    let n = state.player_count();
    let start = state.current.index();
    let next = (1..=n)
        .map(|step| (start + step) % n)
        .find(|&i| state.players[i].active);
    if let Some(i) = next {
        state.current = PlayerId(i as u8);
    }

    if state.active_count() <= 1 {
        state.complete = true;
        tracing::info!(current = %state.current, "no opponents left, game over");
        return;
    }

    tracing::debug!(current = %state.current, roll = state.roll, "turn advanced");
}

// ── Movement Validator ─────────────────────────────────────────────────

/// Move the current participant to `destination`.
///
/// The board supplies the path; the engine only checks its length against
/// the roll, then replays it step by step. Returns the number of steps
/// taken. A rejected request leaves the participant where it was.
pub fn move_to<B: Board>(
    state: &mut GameState,
    board: &mut B,
    destination: TileId,
) -> Result<usize, MoveError> {
    let id = state.current;
    let from = state.player(id).position.ok_or(MoveError::NoPosition(id))?;

    let path = match board.find_path(from, destination) {
        Some(path) => path,
        None => {
            tracing::warn!(player = %id, %from, to = %destination, "no path");
            return Err(MoveError::NoPath { from, to: destination });
        }
    };

    if path.len() > state.roll as usize {
        tracing::warn!(player = %id, needed = path.len(), roll = state.roll, "roll too low");
        return Err(MoveError::InsufficientRoll { needed: path.len(), roll: state.roll });
    }

    let last = path.len().saturating_sub(1);
    for (i, &step) in path.iter().enumerate() {
        board.move_player(id, step, i == last)?;
        state.player_mut(id).position = Some(step);
    }

    tracing::debug!(player = %id, %from, to = %destination, steps = path.len(), "moved");
    Ok(path.len())
}

// ── Suggestion Resolver ────────────────────────────────────────────────

/// Suggest `character` with `weapon` in the room at `room`.
///
/// The current participant must be standing in that room. Every check runs
/// before any token moves, so an `Err` leaves the game untouched. On success
/// the weapon and the named character's participant are pulled into the
/// room, and the opponents are asked clockwise for a disproving card.
pub fn suggest<B: Board>(
    state: &mut GameState,
    board: &mut B,
    character: &str,
    weapon: &str,
    room: TileId,
) -> Result<Option<Disproof>, SuggestError> {
    let suggester = state.current;

    let character_card = Card::Character(character.to_string());
    if !state.catalog.contains(&character_card) {
        return Err(SuggestError::UnknownCharacter(character.to_string()));
    }
    let weapon_card = Card::Weapon(weapon.to_string());
    if !state.catalog.contains(&weapon_card) {
        return Err(SuggestError::UnknownWeapon(weapon.to_string()));
    }
    let room_name = board.room_at(room).ok_or(SuggestError::NotARoom(room))?.to_string();
    if state.player(suggester).position != Some(room) {
        tracing::warn!(player = %suggester, room = %room_name, "suggestion from outside the room");
        return Err(SuggestError::NotInRoom { player: suggester, room: room_name });
    }

    relocate_weapon(board, weapon, room);
    if let Some(target) = state.player_by_character(character) {
        relocate_player(state, board, target, room);
    }
    state.player_mut(suggester).last_suggestion = Some(room);

    let suggestion = [character_card, weapon_card, Card::Room(room_name)];
    let disproof = find_disproof(state, suggester, &suggestion);
    if let Some(d) = &disproof {
        state.player_mut(suggester).observe(&d.card);
    }

    tracing::debug!(
        player = %suggester,
        character,
        weapon,
        room = suggestion[2].name(),
        disproved_by = ?disproof.as_ref().map(|d| d.by),
        "suggestion resolved"
    );
    Ok(disproof)
}

fn relocate_weapon<B: Board>(board: &mut B, weapon: &str, room: TileId) {
    for name in board.rooms() {
        match board.room_tile(&name) {
            Some(other) if other != room && board.contains_weapon(other, weapon) => {
                board.remove_weapon(other, weapon);
            }
            _ => {}
        }
    }
    board.add_weapon(room, weapon);
}

fn relocate_player<B: Board>(state: &mut GameState, board: &mut B, target: PlayerId, room: TileId) {
    let previous = state.player(target).position;
    if previous == Some(room) {
        return;
    }
    if let Some(tile) = previous {
        board.remove_player(tile, target);
    }
    if board.set_player(room, target) {
        state.player_mut(target).position = Some(room);
        return;
    }
    // Refused by the board: the token goes back where it was.
    if let Some(tile) = previous {
        board.set_player(tile, target);
    }
    tracing::warn!(player = %target, %room, "board refused relocation");
}

/// Ask each opponent in turn order, starting just after the suggester. The
/// first one holding any suggested card shows one of them, chosen at
/// random if several match.
fn find_disproof(state: &mut GameState, suggester: PlayerId, suggestion: &[Card; 3]) -> Option<Disproof> {
    let n = state.player_count();
    let start = suggester.index();

    for step in 1..n {
        let idx = (start + step) % n;
        let matches: Vec<&Card> = suggestion
            .iter()
            .filter(|c| state.players[idx].holds(c))
            .collect();
        if matches.is_empty() {
            continue;
        }
        let pick = state.rng.gen_range(0..matches.len());
        return Some(Disproof { by: PlayerId(idx as u8), card: matches[pick].clone() });
    }
    None
}

// ── Accusation Resolver ────────────────────────────────────────────────

/// The current participant names room, character and weapon. A full match
/// wins the game; anything else eliminates the accuser, and ends the game
/// if nobody is left.
pub fn accuse(state: &mut GameState, room: &str, character: &str, weapon: &str) -> AccusationOutcome {
    let accuser = state.current;
    let claim = [
        Card::Room(room.to_string()),
        Card::Character(character.to_string()),
        Card::Weapon(weapon.to_string()),
    ];

    if claim.iter().all(|c| state.solution.contains(c)) {
        state.complete = true;
        state.winner = Some(accuser);
        tracing::info!(player = %accuser, "correct accusation, game won");
        return AccusationOutcome::Won;
    }

    state.player_mut(accuser).active = false;
    if state.active_count() == 0 {
        state.complete = true;
    }
    tracing::info!(player = %accuser, remaining = state.active_count(), "wrong accusation, eliminated");
    AccusationOutcome::Eliminated
}
