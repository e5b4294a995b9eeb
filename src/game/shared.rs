use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::GameError;

use super::engine::{Engine, MoveReport};
use super::player::PlayerIdentity;

/// A cloneable, thread-safe handle to one engine.
///
/// Each call holds the lock for the whole operation, so a move request and
/// any heuristic reply it triggers are admitted as a single unit.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        SharedEngine {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Engine>, GameError> {
        self.inner.lock().map_err(|_| GameError::EnginePoisoned)
    }

    pub fn start_game(&self) -> Result<(), GameError> {
        self.lock()?.start_game()
    }

    pub fn request_move(
        &self,
        player: &PlayerIdentity,
        column: usize,
    ) -> Result<MoveReport, GameError> {
        self.lock()?.request_move(player, column)
    }

    pub fn reset_session(&self) -> Result<(), GameError> {
        self.lock()?.reset_session();
        Ok(())
    }

    /// Run `f` against the engine while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> Result<R, GameError> {
        Ok(f(&mut *self.lock()?))
    }
}
