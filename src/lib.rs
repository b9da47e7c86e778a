//! Arcade Snake - a single-screen terminal Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - High score persistence (score module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
