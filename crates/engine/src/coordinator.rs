//! Game coordinator: the arena that owns every party and session
//!
//! The coordinator owns:
//! - the membership registry, the single source of truth for membership
//! - every Party and every Session, keyed by arena id
//! - the tick scheduler and the host handle
//!
//! Parties and sessions are reached through short-lived views
//! ([`PartyHandle`], [`SessionHandle`]) that borrow the arena. Events are
//! routed by looking the actor up in the registry; world-scoped events go to
//! every live session.

use crate::config::EngineConfig;
use crate::events::{EventOutcome, GameEvent};
use crate::game::Game;
use crate::party::{Party, PartyHandle};
use crate::registry::MembershipRegistry;
use crate::scheduler::TickScheduler;
use crate::session::{Session, SessionHandle};
use arcade_core::{Error, Host, ParticipantId, PartyId, Result, SessionId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Coordinator counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorMetrics {
    /// Parties created since start
    pub parties_created: u64,
    /// Parties dropped from the arena
    pub parties_dropped: u64,
    /// Sessions created since start
    pub sessions_created: u64,
    /// Sessions closed and dropped from the arena
    pub sessions_closed: u64,
    /// Events passed to `dispatch`
    pub events_dispatched: u64,
    /// Dispatched events that at least one session cancelled
    pub events_cancelled: u64,
}

impl CoordinatorMetrics {
    /// Parties currently in the arena
    pub fn live_parties(&self) -> u64 {
        self.parties_created - self.parties_dropped
    }

    /// Sessions currently in the arena
    pub fn live_sessions(&self) -> u64 {
        self.sessions_created - self.sessions_closed
    }
}

/// Owner of all party and session state
pub struct GameCoordinator {
    pub(crate) host: Arc<dyn Host>,
    pub(crate) config: EngineConfig,
    pub(crate) registry: MembershipRegistry,
    pub(crate) parties: BTreeMap<PartyId, Party>,
    pub(crate) sessions: BTreeMap<SessionId, Session>,
    pub(crate) scheduler: TickScheduler,
    next_party: u64,
    next_session: u64,
    pub(crate) metrics: CoordinatorMetrics,
}

impl fmt::Debug for GameCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameCoordinator")
            .field("config", &self.config)
            .field("parties", &self.parties.len())
            .field("sessions", &self.sessions.len())
            .field("tick", &self.scheduler.current_tick())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl GameCoordinator {
    /// Create a coordinator
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration does not validate.
    pub fn new(host: Arc<dyn Host>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            target: "arcade::session",
            interval = config.scoreboard_interval_ticks,
            max_party_size = ?config.max_party_size,
            "Coordinator started"
        );
        Ok(Self::build(host, config))
    }

    /// Create a coordinator with the default configuration
    pub fn with_defaults(host: Arc<dyn Host>) -> Self {
        Self::build(host, EngineConfig::default())
    }

    fn build(host: Arc<dyn Host>, config: EngineConfig) -> Self {
        Self {
            host,
            config,
            registry: MembershipRegistry::new(),
            parties: BTreeMap::new(),
            sessions: BTreeMap::new(),
            scheduler: TickScheduler::new(),
            next_party: 1,
            next_session: 1,
            metrics: CoordinatorMetrics::default(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The host runtime
    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Membership registry (read-only)
    pub fn registry(&self) -> &MembershipRegistry {
        &self.registry
    }

    /// Tick scheduler (read-only)
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Counter snapshot
    pub fn metrics(&self) -> CoordinatorMetrics {
        self.metrics
    }

    // ========================================================================
    // Parties
    // ========================================================================

    /// Create an empty party
    pub fn create_party(&mut self) -> PartyId {
        let id = PartyId::from_raw(self.next_party);
        self.next_party += 1;
        self.parties.insert(id, Party::new(id));
        self.metrics.parties_created += 1;
        debug!(target: "arcade::party", party = %id, "Party created");
        id
    }

    /// View of a party
    ///
    /// Parties emptied through an earlier handle are dropped first, so a
    /// party whose last member left is never handed out again.
    pub fn party(&mut self, id: PartyId) -> Option<PartyHandle<'_>> {
        self.prune_parties();
        let party = self.parties.get_mut(&id)?;
        Some(PartyHandle::new(party, &mut self.registry))
    }

    /// Role state of a party without borrowing the arena mutably
    pub fn party_state(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(&id).filter(|party| !self.is_dissolved(party))
    }

    /// Ids of every party in the arena
    pub fn party_ids(&self) -> Vec<PartyId> {
        self.parties
            .values()
            .filter(|party| !self.is_dissolved(party))
            .map(Party::id)
            .collect()
    }

    /// Drop a party, releasing every member's party slot
    ///
    /// Returns `false` if the party is unknown.
    pub fn remove_party(&mut self, id: PartyId) -> bool {
        let Some(mut party) = self.parties.remove(&id) else {
            return false;
        };
        {
            let mut handle = PartyHandle::new(&mut party, &mut self.registry);
            for member in handle.players() {
                handle.remove(member);
            }
        }
        party.clear_invitations();
        self.metrics.parties_dropped += 1;
        debug!(target: "arcade::party", party = %id, "Party dropped");
        true
    }

    /// Drop every party whose last member has left
    ///
    /// Fresh parties that never had a member are kept.
    pub fn prune_parties(&mut self) -> usize {
        let empty: Vec<PartyId> = self
            .parties
            .values()
            .filter(|party| self.is_dissolved(party))
            .map(Party::id)
            .collect();
        for id in &empty {
            self.remove_party(*id);
        }
        empty.len()
    }

    /// Had a member once and has none now
    fn is_dissolved(&self, party: &Party) -> bool {
        party.populated() && self.registry.party_size(party.id()) == 0
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Create a session around a game, schedule its tick task and run the
    /// game's start hook
    pub fn create_session(&mut self, game: Box<dyn Game>) -> SessionId {
        let id = SessionId::from_raw(self.next_session);
        self.next_session += 1;
        let session = Session::new(id, game, self.config.scoreboard, &mut self.scheduler);
        self.sessions.insert(id, session);
        self.metrics.sessions_created += 1;
        if let Some(mut handle) = self.session(id) {
            handle.start();
        }
        self.prune_sessions();
        id
    }

    /// View of a session
    pub fn session(&mut self, id: SessionId) -> Option<SessionHandle<'_>> {
        let session = self.sessions.get_mut(&id)?;
        Some(SessionHandle::new(
            session,
            &mut self.registry,
            &mut self.scheduler,
            self.host.as_ref(),
        ))
    }

    /// Session state without borrowing the arena mutably
    pub fn session_state(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Ids of every session in the arena
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    /// Seat every member of a party in a session and link the two
    ///
    /// Returns the number of participants added.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownParty`] / [`Error::UnknownSession`] for stale ids
    /// - any error of [`SessionHandle::add_all`]
    pub fn add_party_to_session(&mut self, party: PartyId, session: SessionId) -> Result<usize> {
        if !self.parties.contains_key(&party) {
            return Err(Error::UnknownParty { party });
        }
        let added = self
            .session(session)
            .ok_or(Error::UnknownSession { session })?
            .add_all(party)?;
        if let Some(mut handle) = self.party(party) {
            handle.set_session(Some(session));
        }
        debug!(target: "arcade::session", session = %session, party = %party, added, "Party seated");
        Ok(added)
    }

    /// Close a session and drop it from the arena
    ///
    /// Returns `false` if the session is unknown.
    pub fn close_session(&mut self, id: SessionId) -> bool {
        match self.session(id) {
            Some(mut handle) => {
                handle.close();
            }
            None => return false,
        }
        self.prune_sessions();
        true
    }

    /// Drop closed sessions and clear party links that point at them
    pub fn prune_sessions(&mut self) -> usize {
        let closed: Vec<SessionId> = self
            .sessions
            .values()
            .filter(|session| session.is_closed())
            .map(Session::id)
            .collect();
        for id in &closed {
            self.sessions.remove(id);
            for party in self.parties.values_mut() {
                party.clear_session(*id);
            }
            self.metrics.sessions_closed += 1;
            debug!(target: "arcade::session", session = %id, "Session dropped");
        }
        closed.len()
    }

    // ========================================================================
    // Event routing and ticks
    // ========================================================================

    /// Route a platform event to the session(s) it belongs to
    ///
    /// Actor-scoped events go to the actor's session, if any. World-scoped
    /// events go to every live session. Returns [`EventOutcome::Cancel`] if
    /// any receiving game cancelled.
    pub fn dispatch(&mut self, event: &GameEvent) -> EventOutcome {
        self.metrics.events_dispatched += 1;
        let targets: Vec<SessionId> = match event.actor() {
            Some(actor) => self.registry.session_of(actor).into_iter().collect(),
            None => self.session_ids(),
        };

        let mut outcome = EventOutcome::Continue;
        for id in &targets {
            if let Some(mut handle) = self.session(*id) {
                outcome = outcome.merge(handle.deliver(event));
            }
        }
        if outcome.is_cancelled() {
            self.metrics.events_cancelled += 1;
        }
        trace!(
            target: "arcade::session",
            event = %event.kind(),
            receivers = targets.len(),
            cancelled = outcome.is_cancelled(),
            "Event dispatched"
        );
        self.prune_sessions();
        self.prune_parties();
        outcome
    }

    /// Advance one server tick
    ///
    /// Runs every due session tick, then re-renders every scoreboard when the
    /// configured interval elapses.
    pub fn tick(&mut self) {
        for id in self.scheduler.advance() {
            if let Some(mut handle) = self.session(id) {
                handle.run_tick();
            }
        }
        self.prune_sessions();
        self.prune_parties();
        if self.scheduler.current_tick() % self.config.scoreboard_interval_ticks == 0 {
            self.update_scoreboards();
        }
    }

    /// Re-render every live session's scoreboard
    pub fn update_scoreboards(&mut self) {
        for id in self.session_ids() {
            if let Some(mut handle) = self.session(id) {
                handle.update_scoreboards();
            }
        }
    }

    // ========================================================================
    // Registry queries
    // ========================================================================

    /// The participant's party
    pub fn party_of(&self, participant: ParticipantId) -> Option<PartyId> {
        self.registry.party_of(participant)
    }

    /// The participant's session
    pub fn session_of(&self, participant: ParticipantId) -> Option<SessionId> {
        self.registry.session_of(participant)
    }

    /// Parties in the arena
    pub fn party_count(&self) -> usize {
        self.parties
            .values()
            .filter(|party| !self.is_dissolved(party))
            .count()
    }

    /// Sessions in the arena
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
