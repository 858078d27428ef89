//! Tug of war game.
//!
//! A real-time challenge where the player's car and a bot's car pull a rope
//! in opposite directions. The bot pulls at a constant rate every frame; the
//! player pulls by holding (classic) or tapping (festive) the pull key. The
//! first car dragged across the centerline loses.

pub mod confetti;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
