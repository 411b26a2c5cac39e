//! Grid Snake - a snake game on a toroidal grid
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Session counters (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
