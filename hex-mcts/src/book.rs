//! Fixed opening book
//!
//! Covers only the first move of the game for the side using it: the four
//! cells around the board center are strong openings, and the reply mirrors
//! the opponent's first stone toward the center of their quadrant. Once the
//! searcher has any stone of its own on the board the book stays silent.

use hex_core::{Board, Color, Move};

/// Book lookup. Returns `None` once `color` has a stone on the board, or on
/// boards too small to have a center quad.
pub fn opening_move(board: &Board, color: Color) -> Option<Move> {
    let n = board.dimensions();
    if n < 2 {
        return None;
    }
    if board.count_stones(color) > 0 {
        return None;
    }

    let lo = n / 2 - 1;
    let hi = n / 2;

    let Some(foe) = first_stone(board, color.opponent()) else {
        // Moving first: take the upper-left center cell.
        return Some(Move::new(lo, lo));
    };

    // Center cells pair off with their horizontal neighbor; anything else
    // maps to the center cell of its quadrant. Order matters: the exact
    // center cases are checked before the quadrant ranges.
    let reply = match (foe.row, foe.col) {
        (r, c) if r == lo && c == lo => Move::new(lo, hi),
        (r, c) if r == lo && c == hi => Move::new(lo, lo),
        (r, c) if r == hi && c == lo => Move::new(hi, hi),
        (r, c) if r == hi && c == hi => Move::new(hi, lo),
        (r, c) if r <= lo && c <= lo => Move::new(lo, lo),
        (r, c) if r <= lo && c >= hi => Move::new(lo, hi),
        (_, c) if c <= lo => Move::new(hi, lo),
        _ => Move::new(hi, hi),
    };
    Some(reply)
}

/// First stone of `color` in row-major order.
fn first_stone(board: &Board, color: Color) -> Option<Move> {
    let n = board.dimensions();
    for row in 0..n {
        for col in 0..n {
            if let Ok(cell) = board.get(row, col) {
                if cell.stone() == Some(color) {
                    return Some(Move::new(row, col));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_takes_upper_left_center() {
        let board = Board::new(8);
        assert_eq!(opening_move(&board, Color::White), Some(Move::new(3, 3)));
        assert_eq!(opening_move(&board, Color::Black), Some(Move::new(3, 3)));
    }

    #[test]
    fn test_center_cells_pair_horizontally() {
        let cases = [
            (Move::new(3, 3), Move::new(3, 4)),
            (Move::new(3, 4), Move::new(3, 3)),
            (Move::new(4, 3), Move::new(4, 4)),
            (Move::new(4, 4), Move::new(4, 3)),
        ];
        for (foe, reply) in cases {
            let mut board = Board::new(8);
            board.place(foe, Color::White).unwrap();
            assert_eq!(opening_move(&board, Color::Black), Some(reply));
        }
    }

    #[test]
    fn test_quadrants_map_to_center_cells() {
        let cases = [
            (Move::new(0, 0), Move::new(3, 3)),
            (Move::new(0, 7), Move::new(3, 4)),
            (Move::new(7, 0), Move::new(4, 3)),
            (Move::new(7, 7), Move::new(4, 4)),
            (Move::new(2, 5), Move::new(3, 4)),
            (Move::new(6, 2), Move::new(4, 3)),
        ];
        for (foe, reply) in cases {
            let mut board = Board::new(8);
            board.place(foe, Color::Black).unwrap();
            assert_eq!(opening_move(&board, Color::White), Some(reply));
        }
    }

    #[test]
    fn test_silent_once_own_stone_placed() {
        let mut board = Board::new(8);
        board.place(Move::new(3, 3), Color::White).unwrap();
        board.place(Move::new(4, 4), Color::Black).unwrap();
        assert_eq!(opening_move(&board, Color::White), None);
        assert_eq!(opening_move(&board, Color::Black), None);
    }

    #[test]
    fn test_silent_on_tiny_board() {
        let board = Board::new(1);
        assert_eq!(opening_move(&board, Color::White), None);
    }

    #[test]
    fn test_reply_uses_first_opponent_stone_row_major() {
        let mut board = Board::new(8);
        board.place(Move::new(6, 6), Color::Black).unwrap();
        board.place(Move::new(1, 1), Color::Black).unwrap();
        assert_eq!(opening_move(&board, Color::White), Some(Move::new(3, 3)));
    }
}
