//! Depth-limited minimax with alpha-beta pruning

use tracing::debug;

use crate::board::{Board, Color, Move};
use crate::error::EngineError;
use crate::eval::evaluate;
use crate::player::Player;

/// Search depth used by the reference configuration.
pub const DEFAULT_SEARCH_DEPTH: u32 = 2;

/// Alpha-beta player. Explores every empty cell in row-major order to a fixed
/// depth, scoring leaves with the two-distance heuristic.
pub struct AlphaBetaPlayer {
    color: Color,
    depth: u32,
}

impl AlphaBetaPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_depth(color, DEFAULT_SEARCH_DEPTH)
    }

    pub fn with_depth(color: Color, depth: u32) -> Self {
        Self { color, depth }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Player for AlphaBetaPlayer {
    fn choose_move(&mut self, board: &Board) -> Result<Move, EngineError> {
        let mut scratch = board.clone();
        let moves = scratch.empty_cells();

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<(Move, f64)> = None;

        for mv in moves {
            let score = scratch.with_trial_move(mv, self.color, |b| {
                alpha_beta(b, self.color, self.depth.saturating_sub(1), alpha, beta, false)
            })??;

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        let (mv, score) = best.ok_or(EngineError::NoMoveAvailable)?;
        debug!(%mv, score, depth = self.depth, "alpha-beta move chosen");
        Ok(mv)
    }
}

/// Score `board` for `color`, looking `depth` plies ahead. The board is
/// mutated while exploring and is back in its entry state on return, with or
/// without a cutoff; every trial placement is scoped.
fn alpha_beta(
    board: &mut Board,
    color: Color,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> Result<f64, EngineError> {
    if depth == 0 {
        return Ok(evaluate(board, color));
    }

    let moves = board.empty_cells();
    if moves.is_empty() {
        // Board filled up before the horizon.
        return Ok(evaluate(board, color));
    }

    if maximizing {
        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            let score = board.with_trial_move(mv, color, |b| {
                alpha_beta(b, color, depth - 1, alpha, beta, false)
            })??;
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    } else {
        let mut best = f64::INFINITY;
        for mv in moves {
            let score = board.with_trial_move(mv, color.opponent(), |b| {
                alpha_beta(b, color, depth - 1, alpha, beta, true)
            })??;
            best = best.min(score);
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}
