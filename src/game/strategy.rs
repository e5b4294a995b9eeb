use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::GameError;

use super::board::{Board, Position, COLS};
use super::player::PlayerIdentity;

/// How a player's move is chosen.
#[derive(Debug)]
pub enum MoveStrategy {
    /// The caller supplies the column.
    Interactive,
    /// One-ply win search, then a random legal column.
    Heuristic(HeuristicStrategy),
}

impl MoveStrategy {
    /// Place `player`'s piece on `board`. `column` is ignored by the heuristic.
    pub fn make_move(
        &mut self,
        board: &mut Board,
        player: &PlayerIdentity,
        column: usize,
    ) -> Result<Position, GameError> {
        match self {
            MoveStrategy::Interactive => board.place(column, player),
            MoveStrategy::Heuristic(heuristic) => heuristic.make_move(board, player),
        }
    }
}

/// Looks one move ahead for an immediate win, otherwise picks a column near a
/// random seed column.
#[derive(Debug)]
pub struct HeuristicStrategy {
    rng: StdRng,
}

impl HeuristicStrategy {
    pub fn new() -> Self {
        HeuristicStrategy {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a strategy whose fallback choices are reproducible.
    pub fn seeded(seed: u64) -> Self {
        HeuristicStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn make_move(
        &mut self,
        board: &mut Board,
        player: &PlayerIdentity,
    ) -> Result<Position, GameError> {
        if board.is_full() {
            return Err(GameError::InvariantViolation(
                "heuristic move requested on a full board".into(),
            ));
        }

        if let Some(pos) = Self::find_winning_move(board, player)? {
            debug!(player = %player, column = pos.column, "heuristic found winning column");
            return Ok(pos);
        }

        let seed = self.rng.random_range(0..COLS);
        let column = Self::fallback_column(board, seed).ok_or_else(|| {
            GameError::InvariantViolation("no legal column for heuristic move".into())
        })?;
        debug!(player = %player, seed, column, "heuristic fell back to scanned column");
        board.place(column, player)
    }

    /// Try every column left to right and keep the first placement that wins.
    /// Non-winning placements are retracted.
    fn find_winning_move(
        board: &mut Board,
        player: &PlayerIdentity,
    ) -> Result<Option<Position>, GameError> {
        for col in 0..COLS {
            if board.is_column_full(col) {
                continue;
            }
            let pos = board.place(col, player)?;
            if board.is_winning_move(pos, player) {
                return Ok(Some(pos));
            }
            board.retract(col);
        }
        Ok(None)
    }

    /// First non-full column scanning right from `seed` (inclusive), else
    /// scanning left from `seed`.
    fn fallback_column(board: &Board, seed: usize) -> Option<usize> {
        (seed..COLS)
            .find(|&col| !board.is_column_full(col))
            .or_else(|| (0..=seed).rev().find(|&col| !board.is_column_full(col)))
    }
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        Self::new()
    }
}
