//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The play mode owns the `GridState` and hands it to the engine each tick.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Request};
pub use config::GameConfig;
pub use engine::{SimulationEngine, TickResult};
pub use state::{CollisionType, EndReason, GameStatus, GridState, Position, Snake};
