//! Error types for set-up, the map collaborator and player actions.
//!
//! Every failure here is an ordinary branch of play and is returned as a
//! value; nothing in the engine panics on bad input.

use crate::types::{CardKind, PlayerId, TileId};

/// Errors raised while creating a game.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("a game needs at least one participant")]
    NoParticipants,

    #[error("{requested} participants requested but only {max} characters exist")]
    TooManyParticipants { requested: usize, max: usize },

    /// The map offered no cards for a category (usually: no rooms).
    #[error("no {0} cards available")]
    EmptyCategory(CardKind),

    #[error("map has no start tile for {0}")]
    MissingStartTile(String),

    #[error("start tile {tile} for {character} is unavailable")]
    StartTileOccupied { character: String, tile: TileId },
}

/// Step-level rejections from the map collaborator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("tile {0} does not exist")]
    UnknownTile(TileId),

    #[error("player {0} is not on the board")]
    NotOnBoard(PlayerId),

    #[error("cannot move from {from} to {to}")]
    NotAdjacent { from: TileId, to: TileId },

    #[error("tile {0} is occupied")]
    Occupied(TileId),

    /// Entering a room ends movement, so only the last step may do it.
    #[error("room {0} can only be entered on the final step")]
    RoomNotFinal(TileId),

    #[error("secret passage {0} cannot end a move")]
    PassageNotFinal(TileId),
}

/// Why a move request was refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("player {0} has no position on the board")]
    NoPosition(PlayerId),

    #[error("no path from {from} to {to}")]
    NoPath { from: TileId, to: TileId },

    #[error("destination needs {needed} steps but the roll is {roll}")]
    InsufficientRoll { needed: usize, roll: u8 },

    #[error("illegal step: {0}")]
    Board(#[from] BoardError),
}

/// Why a suggestion was refused. A refused suggestion changes nothing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SuggestError {
    #[error("tile {0} is not a room")]
    NotARoom(TileId),

    #[error("player {player} is not in room {room}")]
    NotInRoom { player: PlayerId, room: String },

    #[error("unknown character {0}")]
    UnknownCharacter(String),

    #[error("unknown weapon {0}")]
    UnknownWeapon(String),
}
