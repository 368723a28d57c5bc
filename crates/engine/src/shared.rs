//! Thread-safe coordinator wrapper
//!
//! Hosts that deliver events from more than one thread share a
//! [`SharedCoordinator`]: every call takes the lock for its whole duration, so
//! each registry check-then-set stays atomic.
//!
//! Uses parking_lot::Mutex so a panicking game hook does not poison the lock.

use crate::coordinator::GameCoordinator;
use crate::events::{EventOutcome, GameEvent};
use crate::game::Game;
use arcade_core::{ParticipantId, PartyId, SessionId};
use parking_lot::Mutex;
use std::sync::Arc;

/// A coordinator behind a mutex, cheap to clone
#[derive(Debug, Clone)]
pub struct SharedCoordinator {
    inner: Arc<Mutex<GameCoordinator>>,
}

impl SharedCoordinator {
    /// Wrap a coordinator
    pub fn new(coordinator: GameCoordinator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(coordinator)),
        }
    }

    /// Run `f` with exclusive access to the coordinator
    pub fn with<R>(&self, f: impl FnOnce(&mut GameCoordinator) -> R) -> R {
        let mut coordinator = self.inner.lock();
        f(&mut coordinator)
    }

    /// Dispatch an event under lock.
    pub fn dispatch(&self, event: &GameEvent) -> EventOutcome {
        self.inner.lock().dispatch(event)
    }

    /// Advance one tick under lock.
    pub fn tick(&self) {
        self.inner.lock().tick();
    }

    /// Create a session under lock.
    pub fn create_session(&self, game: Box<dyn Game>) -> SessionId {
        self.inner.lock().create_session(game)
    }

    /// Close a session under lock.
    pub fn close_session(&self, session: SessionId) -> bool {
        self.inner.lock().close_session(session)
    }

    /// Look up a participant's party under lock.
    pub fn party_of(&self, participant: ParticipantId) -> Option<PartyId> {
        self.inner.lock().party_of(participant)
    }

    /// Look up a participant's session under lock.
    pub fn session_of(&self, participant: ParticipantId) -> Option<SessionId> {
        self.inner.lock().session_of(participant)
    }
}
