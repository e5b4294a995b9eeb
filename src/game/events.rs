use std::sync::{Arc, Mutex};

use super::board::Position;
use super::player::PlayerIdentity;

/// Everything observable that happens during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    HoverEntered {
        player: PlayerIdentity,
        column: usize,
    },
    HoverExited {
        player: PlayerIdentity,
        column: usize,
    },
    PiecePlaced {
        player: PlayerIdentity,
        position: Position,
    },
    TurnChanged(PlayerIdentity),
    GameOverWinner(PlayerIdentity),
    GameTied,
    ColumnFull(PlayerIdentity),
    SessionClosed,
}

/// Receives engine events synchronously, in registration order.
///
/// A subscriber that blocks also blocks the engine.
pub trait Subscriber: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> Subscriber for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by `Engine::subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub(crate) u64);

/// A subscriber that records every event into a shared buffer.
///
/// Clones share the same buffer, so one clone can be registered with the
/// engine while another is read by the front end.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&self) -> Vec<GameEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Copy of the recorded events.
    pub fn snapshot(&self) -> Vec<GameEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Subscriber for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Role;

    #[test]
    fn test_event_log_clones_share_buffer() {
        let log = EventLog::new();
        let mut sink = log.clone();
        sink.on_event(&GameEvent::GameStarted);
        sink.on_event(&GameEvent::GameTied);

        assert_eq!(log.len(), 2);
        assert_eq!(log.drain(), vec![GameEvent::GameStarted, GameEvent::GameTied]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_closure_subscriber() {
        let mut count = 0;
        {
            let mut sub = |event: &GameEvent| {
                if matches!(event, GameEvent::ColumnFull(_)) {
                    count += 1;
                }
            };
            let player = PlayerIdentity::new("Player", Role::SideA);
            Subscriber::on_event(&mut sub, &GameEvent::ColumnFull(player));
            Subscriber::on_event(&mut sub, &GameEvent::SessionClosed);
        }
        assert_eq!(count, 1);
    }
}
