// ═══════════════════════════════════════════════════════════════════════
// Map collaborator: tile kinds, the Board trait, and a reference board
//
// The engine never computes adjacency itself. It talks to whatever
// implements `Board`; `GridBoard` is the in-memory implementation used by
// the runner and the tests.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::BoardError;
use crate::navigation;
use crate::types::{PlayerId, TileId};
use serde::{Deserialize, Serialize};

// ── Board trait ────────────────────────────────────────────────────────

/// Everything the rules engine needs from the map.
pub trait Board {
    /// Room names in map order.
    fn rooms(&self) -> Vec<String>;

    /// The tile that represents a room.
    fn room_tile(&self, room: &str) -> Option<TileId>;

    /// Name of the room at `tile`, if `tile` is a room.
    fn room_at(&self, tile: TileId) -> Option<&str>;

    fn is_room(&self, tile: TileId) -> bool {
        self.room_at(tile).is_some()
    }

    fn start_tile(&self, character: &str) -> Option<TileId>;

    fn player_tile(&self, player: PlayerId) -> Option<TileId>;

    /// Steps from `from` to `to`, excluding `from`. `None` if unreachable.
    fn find_path(&self, from: TileId, to: TileId) -> Option<Vec<TileId>>;

    /// Move a player one step. `is_final` marks the destination step.
    fn move_player(&mut self, player: PlayerId, to: TileId, is_final: bool) -> Result<(), BoardError>;

    fn contains_weapon(&self, room: TileId, weapon: &str) -> bool;
    fn add_weapon(&mut self, room: TileId, weapon: &str);
    fn remove_weapon(&mut self, room: TileId, weapon: &str);

    /// Put a player on a tile. Returns false if the tile cannot take them.
    fn set_player(&mut self, tile: TileId, player: PlayerId) -> bool;
    fn remove_player(&mut self, tile: TileId, player: PlayerId);
}

// ── Tiles ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Hall,
    /// Hallway square that opens into `room`.
    Door { room: String },
    Room { name: String },
    /// Secret passage out of `from` leading into `to`.
    Warp { from: String, to: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    /// Grid coordinates. Only Hall and Door tiles have them.
    pub pos: Option<(i16, i16)>,
    pub occupants: Vec<PlayerId>,
    pub weapons: Vec<String>,
}

impl Tile {
    pub fn is_room(&self) -> bool {
        matches!(self.kind, TileKind::Room { .. })
    }

    /// A secret passage is walked through, never stood on.
    pub fn is_warp(&self) -> bool {
        matches!(self.kind, TileKind::Warp { .. })
    }

    /// Rooms hold any number of players; every other tile holds one.
    pub fn is_free_for(&self, player: PlayerId) -> bool {
        self.is_room() || self.occupants.iter().all(|&p| p == player)
    }
}

/// The single movement rule. Whether `from` may step directly onto `to`,
/// ignoring occupancy.
pub fn can_move_to(from: &Tile, to: &Tile) -> bool {
    use TileKind::*;
    match (&from.kind, &to.kind) {
        (Hall | Door { .. }, Hall | Door { .. }) => match (from.pos, to.pos) {
            (Some((fx, fy)), Some((tx, ty))) => (fx - tx).abs() + (fy - ty).abs() == 1,
            _ => false,
        },
        (Door { room }, Room { name }) | (Room { name }, Door { room }) => room == name,
        (Room { name }, Warp { from: start, .. }) => name == start,
        (Warp { to: dest, .. }, Room { name }) => dest == name,
        _ => false,
    }
}

// ── GridBoard ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridBoard {
    tiles: Vec<Tile>,
    starts: Vec<(String, TileId)>,
}

impl GridBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: TileKind, pos: Option<(i16, i16)>) -> TileId {
        let id = TileId(self.tiles.len() as u16);
        self.tiles.push(Tile { id, kind, pos, occupants: Vec::new(), weapons: Vec::new() });
        id
    }

    pub fn add_hall(&mut self, x: i16, y: i16) -> TileId {
        self.push(TileKind::Hall, Some((x, y)))
    }

    pub fn add_door(&mut self, x: i16, y: i16, room: &str) -> TileId {
        self.push(TileKind::Door { room: room.to_string() }, Some((x, y)))
    }

    pub fn add_room(&mut self, name: &str) -> TileId {
        self.push(TileKind::Room { name: name.to_string() }, None)
    }

    pub fn add_warp(&mut self, from: &str, to: &str) -> TileId {
        self.push(TileKind::Warp { from: from.to_string(), to: to.to_string() }, None)
    }

    pub fn set_start(&mut self, character: &str, tile: TileId) {
        self.starts.retain(|(c, _)| c != character);
        self.starts.push((character.to_string(), tile));
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Hall or Door tile at grid position (x, y).
    pub fn tile_at(&self, x: i16, y: i16) -> Option<TileId> {
        self.tiles.iter().find(|t| t.pos == Some((x, y))).map(|t| t.id)
    }

    /// Room currently holding `weapon`, if any.
    pub fn weapon_room(&self, weapon: &str) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|t| t.weapons.iter().any(|w| w == weapon))
            .map(|t| t.id)
    }
}

impl Board for GridBoard {
    fn rooms(&self) -> Vec<String> {
        self.tiles
            .iter()
            .filter_map(|t| match &t.kind {
                TileKind::Room { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn room_tile(&self, room: &str) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|t| matches!(&t.kind, TileKind::Room { name } if name == room))
            .map(|t| t.id)
    }

    fn room_at(&self, tile: TileId) -> Option<&str> {
        match &self.tile(tile)?.kind {
            TileKind::Room { name } => Some(name),
            _ => None,
        }
    }

    fn start_tile(&self, character: &str) -> Option<TileId> {
        self.starts.iter().find(|(c, _)| c == character).map(|(_, t)| *t)
    }

    fn player_tile(&self, player: PlayerId) -> Option<TileId> {
        self.tiles.iter().find(|t| t.occupants.contains(&player)).map(|t| t.id)
    }

    fn find_path(&self, from: TileId, to: TileId) -> Option<Vec<TileId>> {
        navigation::shortest_path(self, from, to)
    }

    fn move_player(&mut self, player: PlayerId, to: TileId, is_final: bool) -> Result<(), BoardError> {
        let from = self.player_tile(player).ok_or(BoardError::NotOnBoard(player))?;
        let (from_tile, to_tile) = match (self.tile(from), self.tile(to)) {
            (Some(f), Some(t)) => (f, t),
            _ => return Err(BoardError::UnknownTile(to)),
        };
        if !can_move_to(from_tile, to_tile) {
            return Err(BoardError::NotAdjacent { from, to });
        }
        if to_tile.is_room() && !is_final {
            return Err(BoardError::RoomNotFinal(to));
        }
        if to_tile.is_warp() && is_final {
            return Err(BoardError::PassageNotFinal(to));
        }
        if !to_tile.is_free_for(player) {
            return Err(BoardError::Occupied(to));
        }

        self.remove_player(from, player);
        self.set_player(to, player);
        Ok(())
    }

    fn contains_weapon(&self, room: TileId, weapon: &str) -> bool {
        self.tile(room).is_some_and(|t| t.weapons.iter().any(|w| w == weapon))
    }

    fn add_weapon(&mut self, room: TileId, weapon: &str) {
        if let Some(t) = self.tile_mut(room) {
            if !t.weapons.iter().any(|w| w == weapon) {
                t.weapons.push(weapon.to_string());
            }
        }
    }

    fn remove_weapon(&mut self, room: TileId, weapon: &str) {
        if let Some(t) = self.tile_mut(room) {
            t.weapons.retain(|w| w != weapon);
        }
    }

    fn set_player(&mut self, tile: TileId, player: PlayerId) -> bool {
        match self.tile_mut(tile) {
            Some(t) if t.is_free_for(player) => {
                if !t.occupants.contains(&player) {
                    t.occupants.push(player);
                }
                true
            }
            _ => false,
        }
    }

    fn remove_player(&mut self, tile: TileId, player: PlayerId) {
        if let Some(t) = self.tile_mut(tile) {
            t.occupants.retain(|&p| p != player);
        }
    }
}

// ── Standard board ─────────────────────────────────────────────────────
// 9x9 hallway, nine rooms hanging off single doors, two secret passages.
//
//        x: 0 1 2 3 4 5 6 7 8
//   y=0     . K . w B g . C .
//   y=1     . . . . . . . . p
//   y=2     . . . . . . . . .
//   y=3     . . . . . . . . I
//   y=4     D . . . . . . . .
//   y=5     . . . . . . . . m
//   y=6     u . . . . . . . L
//   y=7     . . . . . . . . .
//   y=8     . O . . H s . S .
//
// Upper case marks doors (Kitchen, Ball room, Conservatory, Dining room,
// bIlliard room, Library, lOunge, Hall, Study), lower case start squares.

pub const STANDARD_ROOMS: [(&str, (i16, i16)); 9] = [
    ("KITCHEN", (1, 0)),
    ("BALL_ROOM", (4, 0)),
    ("CONSERVATORY", (7, 0)),
    ("DINING_ROOM", (0, 4)),
    ("BILLIARD_ROOM", (8, 3)),
    ("LIBRARY", (8, 6)),
    ("LOUNGE", (1, 8)),
    ("HALL", (4, 8)),
    ("STUDY", (7, 8)),
];

pub const STANDARD_STARTS: [(&str, (i16, i16)); 6] = [
    ("MISS_SCARLETT", (5, 8)),
    ("COLONEL_MUSTARD", (0, 6)),
    ("MRS_WHITE", (3, 0)),
    ("REVEREND_GREEN", (5, 0)),
    ("MRS_PEACOCK", (8, 1)),
    ("PROFESSOR_PLUM", (8, 5)),
];

pub const STANDARD_PASSAGES: [(&str, &str); 2] = [
    ("KITCHEN", "STUDY"),
    ("CONSERVATORY", "LOUNGE"),
];

pub const GRID_SIZE: i16 = 9;

pub fn standard_board() -> GridBoard {
    let mut board = GridBoard::new();

    for (name, _) in STANDARD_ROOMS {
        board.add_room(name);
    }

    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            match STANDARD_ROOMS.iter().find(|(_, pos)| *pos == (x, y)) {
                Some((room, _)) => board.add_door(x, y, room),
                None => board.add_hall(x, y),
            };
        }
    }

    for (a, b) in STANDARD_PASSAGES {
        board.add_warp(a, b);
        board.add_warp(b, a);
    }

    for (character, (x, y)) in STANDARD_STARTS {
        if let Some(tile) = board.tile_at(x, y) {
            board.set_start(character, tile);
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall(x: i16, y: i16) -> Tile {
        Tile { id: TileId(0), kind: TileKind::Hall, pos: Some((x, y)), occupants: vec![], weapons: vec![] }
    }

    fn room(name: &str) -> Tile {
        Tile { id: TileId(0), kind: TileKind::Room { name: name.into() }, pos: None, occupants: vec![], weapons: vec![] }
    }

    fn door(x: i16, y: i16, room: &str) -> Tile {
        Tile { id: TileId(0), kind: TileKind::Door { room: room.into() }, pos: Some((x, y)), occupants: vec![], weapons: vec![] }
    }

    fn warp(from: &str, to: &str) -> Tile {
        Tile {
            id: TileId(0),
            kind: TileKind::Warp { from: from.into(), to: to.into() },
            pos: None,
            occupants: vec![],
            weapons: vec![],
        }
    }

    #[test]
    fn test_hall_moves_orthogonally_one_square() {
        assert!(can_move_to(&hall(2, 2), &hall(2, 3)));
        assert!(can_move_to(&hall(2, 2), &hall(1, 2)));
        assert!(!can_move_to(&hall(2, 2), &hall(3, 3)));
        assert!(!can_move_to(&hall(2, 2), &hall(2, 4)));
        assert!(!can_move_to(&hall(2, 2), &hall(2, 2)));
    }

    #[test]
    fn test_hall_never_enters_room_or_warp_directly() {
        assert!(!can_move_to(&hall(0, 0), &room("STUDY")));
        assert!(!can_move_to(&hall(0, 0), &warp("STUDY", "KITCHEN")));
    }

    #[test]
    fn test_door_connects_only_its_room() {
        assert!(can_move_to(&door(1, 0, "KITCHEN"), &room("KITCHEN")));
        assert!(can_move_to(&room("KITCHEN"), &door(1, 0, "KITCHEN")));
        assert!(!can_move_to(&door(1, 0, "KITCHEN"), &room("STUDY")));
        assert!(can_move_to(&door(1, 0, "KITCHEN"), &hall(1, 1)));
    }

    #[test]
    fn test_warp_is_one_way_per_tile() {
        let w = warp("KITCHEN", "STUDY");
        assert!(can_move_to(&room("KITCHEN"), &w));
        assert!(can_move_to(&w, &room("STUDY")));
        assert!(!can_move_to(&room("STUDY"), &w));
        assert!(!can_move_to(&w, &room("KITCHEN")));
    }

    #[test]
    fn test_standard_board_shape() {
        let board = standard_board();
        assert_eq!(board.rooms().len(), 9);
        assert_eq!(board.tiles().len(), 9 + 81 + 4);
        for (character, _) in STANDARD_STARTS {
            assert!(board.start_tile(character).is_some(), "{character} has no start");
        }
        let kitchen = board.room_tile("KITCHEN").unwrap();
        assert_eq!(board.room_at(kitchen), Some("KITCHEN"));
        assert!(board.is_room(kitchen));
        assert!(!board.is_room(board.tile_at(0, 0).unwrap()));
    }

    #[test]
    fn test_hall_tiles_hold_one_player() {
        let mut board = standard_board();
        let t = board.tile_at(2, 2).unwrap();
        assert!(board.set_player(t, PlayerId(0)));
        assert!(!board.set_player(t, PlayerId(1)));
        let kitchen = board.room_tile("KITCHEN").unwrap();
        assert!(board.set_player(kitchen, PlayerId(2)));
        assert!(board.set_player(kitchen, PlayerId(3)));
    }

    #[test]
    fn test_move_player_rules() {
        let mut board = standard_board();
        let start = board.tile_at(1, 1).unwrap();
        board.set_player(start, PlayerId(0));

        let diagonal = board.tile_at(2, 2).unwrap();
        assert_eq!(
            board.move_player(PlayerId(0), diagonal, true),
            Err(BoardError::NotAdjacent { from: start, to: diagonal })
        );

        let door = board.tile_at(1, 0).unwrap();
        board.move_player(PlayerId(0), door, false).unwrap();
        assert_eq!(board.player_tile(PlayerId(0)), Some(door));

        let kitchen = board.room_tile("KITCHEN").unwrap();
        assert_eq!(
            board.move_player(PlayerId(0), kitchen, false),
            Err(BoardError::RoomNotFinal(kitchen))
        );
        board.move_player(PlayerId(0), kitchen, true).unwrap();
        assert_eq!(board.player_tile(PlayerId(0)), Some(kitchen));
        assert!(board.tile(door).unwrap().occupants.is_empty());
    }

    #[test]
    fn test_cannot_stop_on_secret_passage() {
        let mut board = standard_board();
        let kitchen = board.room_tile("KITCHEN").unwrap();
        let study = board.room_tile("STUDY").unwrap();
        let passage = board
            .tiles()
            .iter()
            .find(|t| matches!(&t.kind, TileKind::Warp { from, .. } if from == "KITCHEN"))
            .map(|t| t.id)
            .unwrap();
        board.set_player(kitchen, PlayerId(0));

        assert_eq!(
            board.move_player(PlayerId(0), passage, true),
            Err(BoardError::PassageNotFinal(passage))
        );
        assert_eq!(board.player_tile(PlayerId(0)), Some(kitchen));

        board.move_player(PlayerId(0), passage, false).unwrap();
        board.move_player(PlayerId(0), study, true).unwrap();
        assert_eq!(board.player_tile(PlayerId(0)), Some(study));
    }

    #[test]
    fn test_move_into_occupied_square_rejected() {
        let mut board = standard_board();
        let a = board.tile_at(3, 3).unwrap();
        let b = board.tile_at(3, 4).unwrap();
        board.set_player(a, PlayerId(0));
        board.set_player(b, PlayerId(1));
        assert_eq!(board.move_player(PlayerId(0), b, true), Err(BoardError::Occupied(b)));
        assert_eq!(board.move_player(PlayerId(5), b, true), Err(BoardError::NotOnBoard(PlayerId(5))));
    }

    #[test]
    fn test_weapons() {
        let mut board = standard_board();
        let study = board.room_tile("STUDY").unwrap();
        board.add_weapon(study, "ROPE");
        board.add_weapon(study, "ROPE");
        assert!(board.contains_weapon(study, "ROPE"));
        assert_eq!(board.tile(study).unwrap().weapons.len(), 1);
        assert_eq!(board.weapon_room("ROPE"), Some(study));
        board.remove_weapon(study, "ROPE");
        assert!(!board.contains_weapon(study, "ROPE"));
        assert_eq!(board.weapon_room("ROPE"), None);
    }
}
