// ═══════════════════════════════════════════════════════════════════════
// Navigation: shortest legal path across a GridBoard
// ═══════════════════════════════════════════════════════════════════════

use crate::map::{can_move_to, GridBoard, Tile};
use crate::types::TileId;
use std::collections::VecDeque;

/// Breadth-first search from `from` to `to`.
///
/// Returns the tiles stepped on, excluding `from` and including `to`.
/// Intermediate tiles must be unoccupied and may not be rooms (a room
/// always ends movement); the destination itself may be a room but never
/// a secret passage.
pub fn shortest_path(board: &GridBoard, from: TileId, to: TileId) -> Option<Vec<TileId>> {
    let tiles = board.tiles();
    let dest = board.tile(to)?;
    board.tile(from)?;

    if from == to {
        return Some(Vec::new());
    }
    if dest.is_warp() || (!dest.is_room() && !dest.occupants.is_empty()) {
        return None;
    }

    let mut queue: VecDeque<TileId> = VecDeque::new();
    let mut parent: Vec<Option<TileId>> = vec![None; tiles.len()];
    let mut visited = vec![false; tiles.len()];

    queue.push_back(from);
    visited[from.index()] = true;

    while let Some(current) = queue.pop_front() {
        let current_tile = &tiles[current.index()];

        for next in tiles.iter().filter(|t| can_move_to(current_tile, t)) {
            if visited[next.id.index()] {
                continue;
            }

            if next.id == to {
                parent[to.index()] = Some(current);
                return Some(unwind(&parent, from, to));
            }

            if passable(next) {
                visited[next.id.index()] = true;
                parent[next.id.index()] = Some(current);
                queue.push_back(next.id);
            }
        }
    }

    None
}

/// Can a path run through this tile without stopping?
fn passable(tile: &Tile) -> bool {
    !tile.is_room() && tile.occupants.is_empty()
}

fn unwind(parent: &[Option<TileId>], from: TileId, to: TileId) -> Vec<TileId> {
    let mut path = vec![to];
    let mut cursor = to;
    while let Some(prev) = parent[cursor.index()] {
        if prev == from {
            break;
        }
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    path
}

/// All tiles reachable in at most `steps` moves.
pub fn reachable_within(board: &GridBoard, from: TileId, steps: usize) -> Vec<TileId> {
    board
        .tiles()
        .iter()
        .filter(|t| t.id != from)
        .filter(|t| shortest_path(board, from, t.id).is_some_and(|p| p.len() <= steps))
        .map(|t| t.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{standard_board, Board};
    use crate::types::PlayerId;

    #[test]
    fn test_straight_line_path() {
        let board = standard_board();
        let a = board.tile_at(2, 2).unwrap();
        let b = board.tile_at(2, 5).unwrap();
        let path = shortest_path(&board, a, b).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(*path.last().unwrap(), b);
        assert!(!path.contains(&a));
    }

    #[test]
    fn test_path_into_room_through_door() {
        let board = standard_board();
        let start = board.tile_at(5, 8).unwrap();
        let hall = board.room_tile("HALL").unwrap();
        let door = board.tile_at(4, 8).unwrap();
        assert_eq!(shortest_path(&board, start, hall), Some(vec![door, hall]));
    }

    #[test]
    fn test_secret_passage() {
        let board = standard_board();
        let kitchen = board.room_tile("KITCHEN").unwrap();
        let study = board.room_tile("STUDY").unwrap();
        let path = shortest_path(&board, kitchen, study).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[1], study);
    }

    #[test]
    fn test_secret_passage_is_not_a_destination() {
        let board = standard_board();
        let kitchen = board.room_tile("KITCHEN").unwrap();
        let passages: Vec<TileId> = board.tiles().iter().filter(|t| t.is_warp()).map(|t| t.id).collect();
        assert_eq!(passages.len(), 4);
        for p in &passages {
            assert_eq!(shortest_path(&board, kitchen, *p), None);
        }
        let reach = reachable_within(&board, kitchen, 6);
        assert!(reach.iter().all(|t| !passages.contains(t)));
        assert!(reach.contains(&board.room_tile("STUDY").unwrap()));
    }

    #[test]
    fn test_path_avoids_occupied_squares() {
        let mut board = standard_board();
        let a = board.tile_at(0, 0).unwrap();
        let b = board.tile_at(2, 0).unwrap();
        board.set_player(board.tile_at(1, 0).unwrap(), PlayerId(1));
        let path = shortest_path(&board, a, b).unwrap();
        assert_eq!(path.len(), 4); // around through row 1
    }

    #[test]
    fn test_occupied_destination_unreachable() {
        let mut board = standard_board();
        let a = board.tile_at(0, 0).unwrap();
        let b = board.tile_at(0, 1).unwrap();
        board.set_player(b, PlayerId(1));
        assert_eq!(shortest_path(&board, a, b), None);
    }

    #[test]
    fn test_rooms_are_not_shortcuts() {
        let board = standard_board();
        // Lounge door and Hall door are both on the bottom row; the route
        // between them stays in the hallway.
        let lounge_door = board.tile_at(1, 8).unwrap();
        let hall_door = board.tile_at(4, 8).unwrap();
        let path = shortest_path(&board, lounge_door, hall_door).unwrap();
        assert_eq!(path.len(), 3);
        assert!(path.iter().all(|t| !board.is_room(*t)));
    }

    #[test]
    fn test_unknown_tile() {
        let board = standard_board();
        assert_eq!(shortest_path(&board, TileId(0), TileId(9999)), None);
    }

    #[test]
    fn test_reachable_within() {
        let board = standard_board();
        let centre = board.tile_at(4, 4).unwrap();
        let reach = reachable_within(&board, centre, 1);
        assert_eq!(reach.len(), 4);
        let reach2 = reachable_within(&board, centre, 2);
        assert_eq!(reach2.len(), 12);
    }
}
