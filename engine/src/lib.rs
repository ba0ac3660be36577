pub mod types;
pub mod error;
pub mod cards;
pub mod map;
pub mod navigation;
pub mod setup;
pub mod engine;
pub mod visibility;


pub use types::*;
pub use cards::Catalog;
pub use error::{BoardError, MoveError, SetupError, SuggestError};
pub use map::{standard_board, Board, GridBoard};
pub use setup::{create_game, GameConfig};
pub use engine::{accuse, advance_turn, move_to, suggest, AccusationOutcome, Disproof};
