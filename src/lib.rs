//! Scuffle - engine and AI opponents for the Scuffle board game

pub mod ai;
pub mod core;
pub mod engine;
pub mod utils;

// Re-export commonly used items
pub use crate::core::state::GameState;
pub use crate::engine::MatchRunner;
