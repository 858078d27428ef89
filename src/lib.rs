//! Tug of War - terminal tug-of-war against a bot.
//!
//! This module exposes the game logic and renderer for testing and for the
//! binary.

pub mod config;
pub mod input;
pub mod tug;
pub mod ui;
pub mod utils;

pub use config::{Config, ConfigError};
pub use tug::{SessionTally, TugGame, TugResult, TugSession, Variant};
