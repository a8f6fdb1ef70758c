//! Random playouts
//!
//! A playout fills every empty cell in a uniformly random order, alternating
//! colors, then asks the finished board who won. Full Hex boards always have
//! exactly one winner, so the check is one connectivity query.

use hex_core::{Board, Color, EngineError, Move};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Outcome of a traced playout: the winner plus which cells each color
/// filled, for All-Moves-As-First accounting.
#[derive(Debug)]
pub struct Rollout {
    pub winner: Color,
    white_moves: FxHashSet<Move>,
    black_moves: FxHashSet<Move>,
}

impl Rollout {
    /// Cells `color` played during the rollout.
    pub fn moves_of(&self, color: Color) -> &FxHashSet<Move> {
        match color {
            Color::White => &self.white_moves,
            Color::Black => &self.black_moves,
        }
    }
}

/// Play the position out to a full board and return the winner. `last_mover`
/// is the color that placed the most recent stone, so its opponent moves
/// first.
pub fn playout<R: Rng>(
    board: &mut Board,
    last_mover: Color,
    rng: &mut R,
) -> Result<Color, EngineError> {
    let mut moves = board.empty_cells();
    moves.shuffle(rng);

    let mut mover = last_mover;
    for mv in moves {
        mover = mover.opponent();
        board.place(mv, mover)?;
    }

    Ok(winner(board))
}

/// Like [`playout`] but records which cells each color filled.
pub fn traced_playout<R: Rng>(
    board: &mut Board,
    last_mover: Color,
    rng: &mut R,
) -> Result<Rollout, EngineError> {
    let mut moves = board.empty_cells();
    moves.shuffle(rng);

    let mut white_moves = FxHashSet::default();
    let mut black_moves = FxHashSet::default();

    let mut mover = last_mover;
    for mv in moves {
        mover = mover.opponent();
        board.place(mv, mover)?;
        match mover {
            Color::White => white_moves.insert(mv),
            Color::Black => black_moves.insert(mv),
        };
    }

    Ok(Rollout {
        winner: winner(board),
        white_moves,
        black_moves,
    })
}

fn winner(board: &Board) -> Color {
    if board.is_connected(Color::Black) {
        Color::Black
    } else {
        Color::White
    }
}
