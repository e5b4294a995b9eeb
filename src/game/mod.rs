//! Core Connect Four game logic: board representation, players and their move
//! strategies, and the engine that sequences turns and notifies subscribers.

mod board;
mod engine;
mod events;
mod player;
mod shared;
mod strategy;

pub use board::{Board, Cell, Position, COLS, ROWS, WIN_LENGTH};
pub use engine::{Engine, GameMode, GameOutcome, GamePhase, MoveReport};
pub use events::{EventLog, GameEvent, Subscriber, SubscriberId};
pub use player::{PlayerConfig, PlayerIdentity, Role, DEFAULT_PLAYER_NAME};
pub use shared::SharedEngine;
pub use strategy::{HeuristicStrategy, MoveStrategy};
