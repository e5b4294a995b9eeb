//! # Connect Four
//!
//! A two-player Connect Four engine. One side can be played by a heuristic
//! opponent that takes an immediate win when it sees one and otherwise drops
//! into a column near a random pick. Ships with a terminal UI built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Board, players and move strategies, the turn-sequencing engine
//!   and its event stream
//! - [`ui`]: Terminal UI that plays through the engine
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
