//! Hex CLI library surface
//!
//! The `hex` binary is a thin clap wrapper around [`play`]; the game loop,
//! human input, and rendering live here so they can be exercised directly.

pub mod play;
