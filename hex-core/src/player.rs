//! The contract between the game loop and a move source

use crate::board::{Board, Move};
use crate::error::EngineError;

/// Anything that can pick a move for the side it plays.
///
/// `choose_move` must return a move into a currently empty cell and must not
/// mutate the caller's board; the caller commits the returned move.
pub trait Player {
    fn choose_move(&mut self, board: &Board) -> Result<Move, EngineError>;
}
