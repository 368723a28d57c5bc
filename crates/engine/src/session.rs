//! Game sessions: running activity instances
//!
//! A [`Session`] owns its lifecycle state, its tick task, its scoreboard and
//! the [`Game`] that supplies the rules. Who is in the session is answered by
//! the [`MembershipRegistry`]; [`SessionHandle`] is the view that pairs the
//! two and implements every session operation.
//!
//! ```text
//! Active --close--> Closed
//! ```
//!
//! A closed session is inert: `add` fails with [`Error::SessionClosed`] and
//! every other mutation is a logged no-op returning `false`.

use crate::events::{EventOutcome, GameEvent};
use crate::game::{Game, RenderContext, SessionContext, SessionRequest};
use crate::registry::MembershipRegistry;
use crate::scheduler::{TaskId, TickScheduler};
use arcade_core::{online_participants, Error, Host, ParticipantId, PartyId, Result, SessionId, TeamOption};
use arcade_scoreboard::{ScoreboardSynchronizer, SharedOptions};
use std::fmt;
use tracing::{debug, trace, warn};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting participants and receiving ticks
    Active,
    /// Evicted and cancelled
    Closed,
}

/// One running game
pub struct Session {
    id: SessionId,
    state: SessionState,
    invisibility: bool,
    task: Option<TaskId>,
    scoreboard: ScoreboardSynchronizer,
    game: Box<dyn Game>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("game", &self.game.name())
            .field("state", &self.state)
            .field("invisibility", &self.invisibility)
            .field("task", &self.task)
            .finish()
    }
}

impl Session {
    /// Create a session and schedule its zero-delay, every-tick task
    pub fn new(
        id: SessionId,
        game: Box<dyn Game>,
        options: SharedOptions,
        scheduler: &mut TickScheduler,
    ) -> Self {
        let task = scheduler.schedule_repeating(id, 0, 1);
        debug!(target: "arcade::session", session = %id, game = game.name(), task = %task, "Session created");
        Self {
            id,
            state: SessionState::Active,
            invisibility: false,
            task: Some(task),
            scoreboard: ScoreboardSynchronizer::new(id, options),
            game,
        }
    }

    /// Arena key
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True once `close` has run
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Whether pairwise invisibility is on
    pub fn invisibility(&self) -> bool {
        self.invisibility
    }

    /// The session's tick task, until it is cancelled
    pub fn task(&self) -> Option<TaskId> {
        self.task
    }

    /// The session's scoreboard
    pub fn scoreboard(&self) -> &ScoreboardSynchronizer {
        &self.scoreboard
    }

    /// The game's name
    pub fn game_name(&self) -> &str {
        self.game.name()
    }
}

/// A session paired with the registry, scheduler and host it works against
pub struct SessionHandle<'a> {
    session: &'a mut Session,
    registry: &'a mut MembershipRegistry,
    scheduler: &'a mut TickScheduler,
    host: &'a dyn Host,
}

impl<'a> SessionHandle<'a> {
    pub(crate) fn new(
        session: &'a mut Session,
        registry: &'a mut MembershipRegistry,
        scheduler: &'a mut TickScheduler,
        host: &'a dyn Host,
    ) -> Self {
        Self {
            session,
            registry,
            scheduler,
            host,
        }
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Add a participant
    ///
    /// The participant is tracked on the scoreboard under their host display
    /// name, falling back to the id.
    ///
    /// # Errors
    ///
    /// - [`Error::SessionClosed`] once the session is closed
    /// - [`Error::InvalidState`] if the participant is in any session,
    ///   including this one
    pub fn add(&mut self, participant: ParticipantId) -> Result<bool> {
        let id = self.session.id;
        if self.session.is_closed() {
            warn!(target: "arcade::session", session = %id, participant = %participant, "Add on closed session ignored");
            return Err(Error::SessionClosed { session: id });
        }
        if !self.registry.join_session(participant, id) {
            return Err(Error::invalid_state("participant is in another session"));
        }
        let name = self.host.name_or_id(participant);
        if !self.session.scoreboard.add(self.host, participant, name) {
            warn!(
                target: "arcade::consistency",
                session = %id,
                participant = %participant,
                "Scoreboard already tracked a participant the registry did not"
            );
        }
        if self.session.invisibility && self.host.is_online(participant) {
            for other in self.online_others(participant) {
                self.host.set_pair_visible(participant, other, false);
                self.host.set_pair_visible(other, participant, false);
            }
        }
        debug!(target: "arcade::session", session = %id, participant = %participant, "Participant added");
        Ok(true)
    }

    /// Add every member of a party not already in this session
    ///
    /// Returns the number of participants added. Stops at the first member
    /// that cannot be added; members added before that stay added.
    pub fn add_all(&mut self, party: PartyId) -> Result<usize> {
        let id = self.session.id;
        if self.session.is_closed() {
            warn!(target: "arcade::session", session = %id, party = %party, "Add on closed session ignored");
            return Err(Error::SessionClosed { session: id });
        }
        let mut added = 0;
        for member in self.registry.party_members(party) {
            if self.registry.session_of(member) == Some(id) {
                continue;
            }
            if self.add(member)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove a participant; `true` iff they were in this session
    pub fn remove(&mut self, participant: ParticipantId) -> bool {
        if self.session.is_closed() {
            warn!(
                target: "arcade::session",
                session = %self.session.id,
                participant = %participant,
                "Remove on closed session ignored"
            );
            return false;
        }
        self.evict(participant)
    }

    /// Close the session
    ///
    /// Runs the game's close hook, cancels the tick task, turns invisibility
    /// off and evicts every participant. Returns `false` if the session was
    /// already closed.
    pub fn close(&mut self) -> bool {
        let id = self.session.id;
        if self.session.is_closed() {
            debug!(target: "arcade::session", session = %id, "Session already closed");
            return false;
        }

        let ((), requests) = self.with_context(|game, ctx| game.on_close(ctx));
        if !requests.is_empty() {
            trace!(target: "arcade::session", session = %id, dropped = requests.len(), "Requests from close hook dropped");
        }

        if let Some(task) = self.session.task.take() {
            self.scheduler.cancel(task);
        }
        self.apply_invisibility(false);
        for participant in self.registry.session_members(id) {
            self.evict(participant);
        }
        let leftovers: Vec<ParticipantId> = self.session.scoreboard.tracked().collect();
        for participant in leftovers {
            warn!(
                target: "arcade::consistency",
                session = %id,
                participant = %participant,
                "Scoreboard tracked a participant the registry did not"
            );
            self.session.scoreboard.remove(self.host, participant);
        }
        self.session.state = SessionState::Closed;
        debug!(target: "arcade::session", session = %id, "Session closed");
        true
    }

    /// Hide (`true`) or show (`false`) every online participant from every
    /// other; `false` on a closed session
    pub fn set_invisibility(&mut self, enabled: bool) -> bool {
        if self.session.is_closed() {
            warn!(target: "arcade::session", session = %self.session.id, "Invisibility change on closed session ignored");
            return false;
        }
        self.apply_invisibility(enabled);
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Arena key
    pub fn id(&self) -> SessionId {
        self.session.id
    }

    /// Lifecycle state
    pub fn state(&self) -> SessionState {
        self.session.state
    }

    /// True once `close` has run
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    /// Whether pairwise invisibility is on
    pub fn invisibility(&self) -> bool {
        self.session.invisibility
    }

    /// Participants, earliest join first
    pub fn participants(&self) -> Vec<ParticipantId> {
        self.registry.session_members(self.session.id)
    }

    /// Participants currently online
    pub fn online_participants(&self) -> Vec<ParticipantId> {
        online_participants(self.host, self.participants())
    }

    /// Whether the participant is in this session
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.registry.session_of(participant) == Some(self.session.id)
    }

    /// Number of participants
    pub fn size(&self) -> usize {
        self.registry.session_size(self.session.id)
    }

    /// The game's name
    pub fn game_name(&self) -> &str {
        self.session.game.name()
    }

    // ========================================================================
    // Scoreboard
    // ========================================================================

    /// The session's scoreboard
    pub fn scoreboard(&self) -> &ScoreboardSynchronizer {
        &self.session.scoreboard
    }

    /// Change the sidebar title of every pane
    pub fn set_scoreboard_title(&mut self, title: impl Into<String>) {
        self.session.scoreboard.set_title(self.host, title);
    }

    /// Show the same lines on every pane
    pub fn set_scoreboard_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.session.scoreboard.set_shared_lines(self.host, lines);
    }

    /// Show lines to one participant; `false` if they are not tracked
    pub fn set_scoreboard_lines_for<I, S>(&mut self, viewer: ParticipantId, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.session.scoreboard.set_lines_for(self.host, viewer, lines)
    }

    /// Change a team option on every pane
    pub fn set_scoreboard_option(&mut self, option: TeamOption, enabled: bool) {
        self.session.scoreboard.set_shared_option(self.host, option, enabled);
    }

    /// Re-render every pane from the game's per-viewer lines
    pub fn update_scoreboards(&mut self) {
        if self.session.is_closed() {
            return;
        }
        let participants = self.registry.session_members(self.session.id);
        let render = RenderContext {
            session: self.session.id,
            participants: &participants,
            tick: self.scheduler.current_tick(),
        };
        let session = &mut *self.session;
        let game = &session.game;
        session
            .scoreboard
            .update_scoreboards(self.host, |viewer| game.scoreboard_lines(&render, viewer));
    }

    // ========================================================================
    // Hooks
    // ========================================================================

    /// Run the game's start hook and apply its requests
    pub fn start(&mut self) {
        if self.session.is_closed() {
            return;
        }
        let ((), requests) = self.with_context(|game, ctx| game.on_start(ctx));
        self.apply_requests(requests);
    }

    /// Run one tick of the game and apply its requests
    pub fn run_tick(&mut self) {
        if self.session.is_closed() {
            return;
        }
        let ((), requests) = self.with_context(|game, ctx| game.on_tick(ctx));
        self.apply_requests(requests);
    }

    /// Deliver an event to the game and apply its requests
    pub fn deliver(&mut self, event: &GameEvent) -> EventOutcome {
        if self.session.is_closed() {
            return EventOutcome::Continue;
        }
        let (outcome, requests) = self.with_context(|game, ctx| game.on_event(ctx, event));
        trace!(
            target: "arcade::session",
            session = %self.session.id,
            event = %event.kind(),
            cancelled = outcome.is_cancelled(),
            "Event delivered"
        );
        self.apply_requests(requests);
        outcome
    }

    /// Apply requests made by a hook, in order
    ///
    /// A close request ends processing; later requests are dropped.
    pub fn apply_requests(&mut self, requests: Vec<SessionRequest>) {
        for request in requests {
            if self.session.is_closed() {
                trace!(target: "arcade::session", session = %self.session.id, ?request, "Request after close dropped");
                continue;
            }
            match request {
                SessionRequest::Add(participant) => {
                    if let Err(e) = self.add(participant) {
                        debug!(
                            target: "arcade::session",
                            session = %self.session.id,
                            participant = %participant,
                            error = %e,
                            "Requested add refused"
                        );
                    }
                }
                SessionRequest::Remove(participant) => {
                    self.remove(participant);
                }
                SessionRequest::SetInvisibility(enabled) => {
                    self.set_invisibility(enabled);
                }
                SessionRequest::Close => {
                    self.close();
                }
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn with_context<R>(
        &mut self,
        f: impl FnOnce(&mut dyn Game, &mut SessionContext<'_>) -> R,
    ) -> (R, Vec<SessionRequest>) {
        let participants = self.registry.session_members(self.session.id);
        let tick = self.scheduler.current_tick();
        let session = &mut *self.session;
        let mut ctx = SessionContext::new(
            session.id,
            participants,
            &mut session.scoreboard,
            self.host,
            tick,
            session.invisibility,
        );
        let result = f(session.game.as_mut(), &mut ctx);
        (result, ctx.into_requests())
    }

    fn evict(&mut self, participant: ParticipantId) -> bool {
        let id = self.session.id;
        if self.registry.session_of(participant) != Some(id) {
            if self.session.scoreboard.remove(self.host, participant) {
                warn!(
                    target: "arcade::consistency",
                    session = %id,
                    participant = %participant,
                    "Scoreboard tracked a participant the registry did not"
                );
            }
            return false;
        }
        if !self.registry.leave_session(participant) {
            warn!(
                target: "arcade::consistency",
                session = %id,
                participant = %participant,
                "Registry refused to release a claimed session slot"
            );
        }
        if !self.session.scoreboard.remove(self.host, participant) {
            warn!(
                target: "arcade::consistency",
                session = %id,
                participant = %participant,
                "Participant had no scoreboard pane"
            );
        }
        if self.session.invisibility && self.host.is_online(participant) {
            for other in self.online_others(participant) {
                self.host.set_pair_visible(participant, other, true);
                self.host.set_pair_visible(other, participant, true);
            }
        }
        debug!(target: "arcade::session", session = %id, participant = %participant, "Participant removed");
        true
    }

    fn apply_invisibility(&mut self, enabled: bool) {
        self.session.invisibility = enabled;
        let online = self.online_participants();
        for viewer in &online {
            for subject in &online {
                if viewer != subject {
                    self.host.set_pair_visible(*viewer, *subject, !enabled);
                }
            }
        }
        trace!(
            target: "arcade::session",
            session = %self.session.id,
            enabled,
            online = online.len(),
            "Invisibility applied"
        );
    }

    fn online_others(&self, participant: ParticipantId) -> Vec<ParticipantId> {
        self.online_participants()
            .into_iter()
            .filter(|p| *p != participant)
            .collect()
    }
}
