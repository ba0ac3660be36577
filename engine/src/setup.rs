// ═══════════════════════════════════════════════════════════════════════
// Game setup: creates the initial GameState for N participants
//
// Order of random draws (all from the one seeded generator):
//   1. solution: character, weapon, room
//   2. character assignment
//   3. dealing
//   4. weapon placement
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{pick_token, Catalog, CHARACTERS};
use crate::error::SetupError;
use crate::map::Board;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One character per participant.
pub const MAX_PLAYERS: usize = CHARACTERS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_count: usize,
    /// Controls every random draw in the game, for reproducibility.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { player_count: 3, seed: 42 }
    }
}

/// Create a new game on `board`: pick the solution, create and place the
/// participants, deal the remaining cards and scatter the weapons.
pub fn create_game<B: Board>(board: &mut B, config: &GameConfig) -> Result<GameState, SetupError> {
    let player_count = config.player_count;
    if player_count == 0 {
        return Err(SetupError::NoParticipants);
    }
    if player_count > MAX_PLAYERS {
        return Err(SetupError::TooManyParticipants { requested: player_count, max: MAX_PLAYERS });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let catalog = Catalog::new(&board.rooms());

    let solution = select_solution(&catalog, &mut rng)?;
    let mut players = create_players(board, &catalog, player_count, &mut rng)?;
    deal(&mut players, &catalog, &solution, &mut rng)?;
    place_weapons(board, &catalog, &mut rng);

    tracing::info!(
        players = player_count,
        seed = config.seed,
        cards = catalog.len(),
        "game created"
    );

    Ok(GameState {
        players,
        current: PlayerId(0),
        roll: 0,
        complete: false,
        winner: None,
        catalog,
        solution,
        seed: config.seed,
        rng,
    })
}

/// Pick one card from each category uniformly at random.
pub fn select_solution(catalog: &Catalog, rng: &mut impl Rng) -> Result<Solution, SetupError> {
    let mut pick = |kind: CardKind| {
        catalog
            .category(kind)
            .choose(&mut *rng)
            .map(|c| c.name().to_string())
            .ok_or(SetupError::EmptyCategory(kind))
    };
    let character = pick(CardKind::Character)?;
    let weapon = pick(CardKind::Weapon)?;
    let room = pick(CardKind::Room)?;
    Ok(Solution::new(character, weapon, room))
}

/// Create `count` participants with distinct random characters and place
/// each on its character's start tile.
fn create_players<B: Board>(
    board: &mut B,
    catalog: &Catalog,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Participant>, SetupError> {
    let mut remaining: Vec<&str> = CHARACTERS.to_vec();
    let mut tokens: Vec<char> = Vec::new();
    let mut players: Vec<Participant> = Vec::with_capacity(count);

    for i in 0..count {
        let character = remaining.remove(rng.gen_range(0..remaining.len()));
        let token = pick_token(character, &tokens);
        tokens.push(token);

        let id = PlayerId(i as u8);
        let start = match place_on_start(board, character, id) {
            Ok(tile) => tile,
            Err(e) => {
                // Leave the caller's board as we found it.
                for p in &players {
                    if let Some(tile) = p.position {
                        board.remove_player(tile, p.id);
                    }
                }
                return Err(e);
            }
        };

        let mut player = Participant::new(id, character, token, catalog.all_cards());
        player.position = Some(start);
        tracing::debug!(%id, character, %token, %start, "participant placed");
        players.push(player);
    }

    Ok(players)
}

fn place_on_start<B: Board>(board: &mut B, character: &str, id: PlayerId) -> Result<TileId, SetupError> {
    let start = board
        .start_tile(character)
        .ok_or_else(|| SetupError::MissingStartTile(character.to_string()))?;
    if !board.set_player(start, id) {
        return Err(SetupError::StartTileOccupied { character: character.to_string(), tile: start });
    }
    Ok(start)
}

/// Deal every non-solution card round-robin, each draw taken uniformly at
/// random from what is left. Hand sizes end up differing by at most one.
pub fn deal(
    players: &mut [Participant],
    catalog: &Catalog,
    solution: &Solution,
    rng: &mut impl Rng,
) -> Result<(), SetupError> {
    if players.is_empty() {
        return Err(SetupError::NoParticipants);
    }

    let mut rest: Vec<Card> = catalog
        .all_cards()
        .into_iter()
        .filter(|c| !solution.contains(c))
        .collect();

    while !rest.is_empty() {
        for player in players.iter_mut() {
            if rest.is_empty() {
                break;
            }
            let card = rest.remove(rng.gen_range(0..rest.len()));
            player.add_card(card);
        }
    }
    Ok(())
}

/// Put each weapon in a room. Rooms are shuffled and weapons handed out in
/// order, wrapping if there are more weapons than rooms.
pub fn place_weapons<B: Board>(board: &mut B, catalog: &Catalog, rng: &mut impl Rng) {
    let mut rooms: Vec<TileId> = catalog
        .rooms
        .iter()
        .filter_map(|r| board.room_tile(r.name()))
        .collect();
    if rooms.is_empty() {
        return;
    }
    rooms.shuffle(rng);

    for (i, weapon) in catalog.weapons.iter().enumerate() {
        board.add_weapon(rooms[i % rooms.len()], weapon.name());
    }
}
