use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::error::{ConfigError, GameError};

use super::board::{Board, Position};
use super::events::{GameEvent, Subscriber, SubscriberId};
use super::player::{PlayerConfig, PlayerIdentity, Role};
use super::strategy::{HeuristicStrategy, MoveStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Finished,
}

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Interactive `SideA` against the heuristic player.
    #[serde(rename = "single")]
    SinglePlayer,
    /// Two interactive players, `SideA` and `SideB`.
    #[serde(rename = "two")]
    TwoPlayer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(PlayerIdentity),
    Tie,
}

/// What a single accepted move request did to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Pieces placed, in order. Holds two entries when the heuristic player
    /// replied within the same request.
    pub placements: Vec<(PlayerIdentity, Position)>,
    /// Set when the request ended the game.
    pub outcome: Option<GameOutcome>,
}

struct Seat {
    player: PlayerIdentity,
    strategy: MoveStrategy,
}

impl Seat {
    fn new(config: PlayerConfig, seed: Option<u64>) -> Self {
        let strategy = if config.role.is_heuristic() {
            MoveStrategy::Heuristic(match seed {
                Some(seed) => HeuristicStrategy::seeded(seed),
                None => HeuristicStrategy::new(),
            })
        } else {
            MoveStrategy::Interactive
        };
        Seat {
            player: PlayerIdentity::from_config(config),
            strategy,
        }
    }
}

/// Turn sequencer and state machine for one game session.
///
/// The engine owns its board outright. Every request runs to completion
/// before returning, including the heuristic reply in single-player mode,
/// and subscribers are notified synchronously in registration order.
pub struct Engine {
    board: Board,
    mode: GameMode,
    seats: [Seat; 2],
    turn: usize,
    phase: GamePhase,
    subscribers: Vec<(SubscriberId, Box<dyn Subscriber>)>,
    next_subscriber_id: u64,
}

impl Engine {
    /// Create an engine for `mode`. The first seat always moves first.
    ///
    /// `seed` makes the heuristic player's fallback choices reproducible.
    pub fn new(
        mode: GameMode,
        first: PlayerConfig,
        second: PlayerConfig,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let expected = match mode {
            GameMode::SinglePlayer => (Role::SideA, Role::Heuristic),
            GameMode::TwoPlayer => (Role::SideA, Role::SideB),
        };
        if (first.role, second.role) != expected {
            return Err(ConfigError::Validation(format!(
                "{mode:?} needs seats {:?} and {:?}, got {:?} and {:?}",
                expected.0, expected.1, first.role, second.role
            )));
        }

        let seats = [Seat::new(first, seed), Seat::new(second, seed)];
        Ok(Self::with_seats(mode, seats))
    }

    /// Interactive player against the heuristic player.
    pub fn single_player(
        name: impl Into<String>,
        computer_name: impl Into<String>,
        seed: Option<u64>,
    ) -> Self {
        let seats = [
            Seat::new(PlayerConfig::named(Role::SideA, name), seed),
            Seat::new(PlayerConfig::named(Role::Heuristic, computer_name), seed),
        ];
        Self::with_seats(GameMode::SinglePlayer, seats)
    }

    /// Two interactive players.
    pub fn two_player(first: impl Into<String>, second: impl Into<String>) -> Self {
        let seats = [
            Seat::new(PlayerConfig::named(Role::SideA, first), None),
            Seat::new(PlayerConfig::named(Role::SideB, second), None),
        ];
        Self::with_seats(GameMode::TwoPlayer, seats)
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (first, second) = match config.mode {
            GameMode::SinglePlayer => (
                PlayerConfig::named(Role::SideA, config.first_player.clone()),
                PlayerConfig::named(Role::Heuristic, config.computer_name.clone()),
            ),
            GameMode::TwoPlayer => (
                PlayerConfig::named(Role::SideA, config.first_player.clone()),
                PlayerConfig::named(Role::SideB, config.second_player.clone()),
            ),
        };
        Self::new(config.mode, first, second, config.seed)
    }

    fn with_seats(mode: GameMode, seats: [Seat; 2]) -> Self {
        Engine {
            board: Board::new(),
            mode,
            seats,
            turn: 0,
            phase: GamePhase::NotStarted,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The player allowed to move next.
    pub fn current_turn(&self) -> &PlayerIdentity {
        &self.seats[self.turn].player
    }

    /// Both players, first seat first.
    pub fn players(&self) -> (&PlayerIdentity, &PlayerIdentity) {
        (&self.seats[0].player, &self.seats[1].player)
    }

    /// Register a subscriber. Delivery follows registration order.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Move from `NotStarted` to `InProgress`.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::AlreadyStarted(self.phase));
        }
        self.phase = GamePhase::InProgress;
        info!(mode = ?self.mode, first = %self.current_turn(), "game started");
        self.broadcast(&GameEvent::GameStarted);
        Ok(())
    }

    /// Clear the board and return to `NotStarted` with the first seat to move.
    pub fn reset_session(&mut self) {
        self.board.reset();
        self.phase = GamePhase::NotStarted;
        self.turn = 0;
        info!("session reset");
    }

    /// Tell subscribers the session is over, then reset it for reuse.
    pub fn close_session(&mut self) {
        self.broadcast(&GameEvent::SessionClosed);
        self.reset_session();
    }

    pub fn hover_entered(&mut self, player: &PlayerIdentity, column: usize) {
        self.broadcast(&GameEvent::HoverEntered {
            player: player.clone(),
            column,
        });
    }

    pub fn hover_exited(&mut self, player: &PlayerIdentity, column: usize) {
        self.broadcast(&GameEvent::HoverExited {
            player: player.clone(),
            column,
        });
    }

    /// Play `column` for `player`. The column is ignored for the heuristic
    /// player.
    ///
    /// Requests outside `InProgress` or from a player who does not hold the
    /// turn are rejected without any state change or notification. A full
    /// column is broadcast as [`GameEvent::ColumnFull`] and returned as an
    /// error, leaving the turn with the requester.
    ///
    /// If the heuristic reply fails, the requester's placement has already
    /// been committed and broadcast; only the reply is missing. The heuristic
    /// can only fail on a full board, which the tie check settles first.
    pub fn request_move(
        &mut self,
        player: &PlayerIdentity,
        column: usize,
    ) -> Result<MoveReport, GameError> {
        if self.phase != GamePhase::InProgress {
            warn!(player = %player, phase = ?self.phase, "move rejected: game not in progress");
            return Err(GameError::NotInProgress(self.phase));
        }
        let holder = self.current_turn();
        if player != holder {
            warn!(player = %player, holder = %holder, "move rejected: out of turn");
            return Err(GameError::MoveOutOfTurn {
                requested: player.clone(),
                holder: holder.clone(),
            });
        }

        let mut report = MoveReport::default();
        self.resolve_turn(column, &mut report)?;

        if self.phase == GamePhase::InProgress
            && self.mode == GameMode::SinglePlayer
            && self.current_turn().role().is_heuristic()
        {
            if let Err(err) = self.resolve_turn(column, &mut report) {
                // The requester's piece stays on the board.
                error!(
                    player = %player,
                    placed = ?report.placements.first().map(|(_, pos)| *pos),
                    error = %err,
                    "heuristic reply failed after an accepted move"
                );
                return Err(err);
            }
        }

        Ok(report)
    }

    /// Run one placement for the current turn holder and settle its result.
    fn resolve_turn(&mut self, column: usize, report: &mut MoveReport) -> Result<(), GameError> {
        let turn = self.turn;
        let seat = &mut self.seats[turn];
        let player = seat.player.clone();

        let position = match seat.strategy.make_move(&mut self.board, &player, column) {
            Ok(position) => position,
            Err(GameError::ColumnFull { column }) => {
                info!(player = %player, column, "column full");
                self.broadcast(&GameEvent::ColumnFull(player));
                return Err(GameError::ColumnFull { column });
            }
            Err(err @ GameError::InvariantViolation(_)) => {
                error!(player = %player, error = %err, "aborting session");
                self.phase = GamePhase::Finished;
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        debug!(player = %player, %position, "piece placed");
        self.broadcast(&GameEvent::PiecePlaced {
            player: player.clone(),
            position,
        });
        report.placements.push((player.clone(), position));

        if self.board.is_winning_move(position, &player) {
            self.phase = GamePhase::Finished;
            info!(winner = %player, "game over");
            report.outcome = Some(GameOutcome::Winner(player.clone()));
            self.broadcast(&GameEvent::GameOverWinner(player));
            return Ok(());
        }

        if self.board.is_full() {
            self.phase = GamePhase::Finished;
            info!("game tied");
            report.outcome = Some(GameOutcome::Tie);
            self.broadcast(&GameEvent::GameTied);
            return Ok(());
        }

        self.turn = 1 - self.turn;
        let next = self.current_turn().clone();
        self.broadcast(&GameEvent::TurnChanged(next));
        Ok(())
    }

    fn broadcast(&mut self, event: &GameEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber.on_event(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
