//! Hex engine core
//!
//! This crate provides the game-independent pieces of the Hex engine:
//! - Board state on a square grid with hexagonal adjacency
//! - Edge-connectivity win check
//! - Two-distance heuristic evaluation
//! - Depth-limited alpha-beta search
//! - The `Player` contract consumed by the game loop

pub mod ai;
pub mod board;
pub mod error;
pub mod eval;
pub mod player;

// Re-exports for convenient access
pub use ai::{AlphaBetaPlayer, DEFAULT_SEARCH_DEPTH};
pub use board::{Board, Cell, Color, Move, DEFAULT_DIMENSIONS, HEX_NEIGHBORS};
pub use error::EngineError;
pub use eval::{evaluate, two_distances, INFINITE_DISTANCE};
pub use player::Player;
