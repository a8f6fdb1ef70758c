//! Engine error type

use thiserror::Error;

/// Errors raised by the board and the searchers.
///
/// Every variant indicates a broken invariant in the caller or the search
/// itself; none of them are recoverable mid-search, they abort the current
/// decision by propagating to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("coordinate ({row}, {col}) is out of range for a {dimensions}x{dimensions} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        dimensions: usize,
    },

    /// Expansion was requested on a position with no empty cell left.
    #[error("no empty cell left on the board")]
    BoardFull,

    /// A searcher finished without producing a move.
    #[error("search produced no move")]
    NoMoveAvailable,
}
