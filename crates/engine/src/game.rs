//! The game capability interface
//!
//! A [`Game`] is the rules half of a session: it receives the session's tick
//! and routed events and may draw per-viewer scoreboard lines. Membership and
//! lifecycle stay with the session; a game asks for structural changes
//! through its [`SessionContext`] and the coordinator applies them once the
//! hook has returned.
//!
//! Scoreboard tracking follows membership. A hook may change what the panes
//! show through [`SessionScoreboard`], never whose panes exist.

use crate::events::{EventOutcome, GameEvent};
use arcade_core::{online_participants, Host, ParticipantId, SessionId, TeamOption};
use arcade_scoreboard::{DisplayPane, ScoreboardSynchronizer, SharedOptions};

/// A structural change a hook asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    /// Add a participant to the session
    Add(ParticipantId),
    /// Remove a participant from the session
    Remove(ParticipantId),
    /// Close the session
    Close,
    /// Turn pairwise invisibility on or off
    SetInvisibility(bool),
}

/// What a hook can see and do while it runs
pub struct SessionContext<'a> {
    id: SessionId,
    participants: Vec<ParticipantId>,
    scoreboard: &'a mut ScoreboardSynchronizer,
    host: &'a dyn Host,
    tick: u64,
    invisibility: bool,
    requests: Vec<SessionRequest>,
}

impl<'a> SessionContext<'a> {
    pub(crate) fn new(
        id: SessionId,
        participants: Vec<ParticipantId>,
        scoreboard: &'a mut ScoreboardSynchronizer,
        host: &'a dyn Host,
        tick: u64,
        invisibility: bool,
    ) -> Self {
        Self {
            id,
            participants,
            scoreboard,
            host,
            tick,
            invisibility,
            requests: Vec::new(),
        }
    }

    /// The session this hook runs for
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Session members at the time the hook was invoked, earliest join first
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    /// Whether the participant is a member
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.participants.contains(&participant)
    }

    /// Members currently online
    pub fn online_participants(&self) -> Vec<ParticipantId> {
        online_participants(self.host, self.participants.iter().copied())
    }

    /// The session's scoreboard, limited to what the panes show
    pub fn scoreboard(&mut self) -> SessionScoreboard<'_> {
        SessionScoreboard {
            scoreboard: &mut *self.scoreboard,
            host: self.host,
        }
    }

    /// The host runtime
    pub fn host(&self) -> &dyn Host {
        self.host
    }

    /// Scheduler tick the hook runs on
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Whether pairwise invisibility is on
    pub fn invisibility(&self) -> bool {
        self.invisibility
    }

    /// Ask for a participant to be added after the hook returns
    ///
    /// The add goes through the registry like any other; a participant
    /// seated elsewhere stays where they are.
    pub fn request_add(&mut self, participant: ParticipantId) {
        self.requests.push(SessionRequest::Add(participant));
    }

    /// Ask for a participant to be removed after the hook returns
    pub fn request_remove(&mut self, participant: ParticipantId) {
        self.requests.push(SessionRequest::Remove(participant));
    }

    /// Ask for the session to be closed after the hook returns
    pub fn request_close(&mut self) {
        self.requests.push(SessionRequest::Close);
    }

    /// Ask for invisibility to change after the hook returns
    pub fn request_invisibility(&mut self, enabled: bool) {
        self.requests.push(SessionRequest::SetInvisibility(enabled));
    }

    /// Requests made so far, in order
    pub fn requests(&self) -> &[SessionRequest] {
        &self.requests
    }

    pub(crate) fn into_requests(self) -> Vec<SessionRequest> {
        self.requests
    }
}

/// A hook's view of the session scoreboard
///
/// Changes titles, lines and team options. Tracking is not exposed; it
/// changes only when members join or leave.
pub struct SessionScoreboard<'a> {
    scoreboard: &'a mut ScoreboardSynchronizer,
    host: &'a dyn Host,
}

impl SessionScoreboard<'_> {
    /// Change the sidebar title of every pane
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.scoreboard.set_title(self.host, title);
    }

    /// Show the same lines on every pane
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scoreboard.set_shared_lines(self.host, lines);
    }

    /// Show lines to one member; `false` if they have no pane
    pub fn set_lines_for<I, S>(&mut self, viewer: ParticipantId, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scoreboard.set_lines_for(self.host, viewer, lines)
    }

    /// Change a team option on every pane
    pub fn set_option(&mut self, option: TeamOption, enabled: bool) {
        self.scoreboard.set_shared_option(self.host, option, enabled);
    }

    /// Current shared title
    pub fn title(&self) -> Option<&str> {
        self.scoreboard.title()
    }

    /// Current shared options
    pub fn options(&self) -> SharedOptions {
        self.scoreboard.options()
    }

    /// A member's pane
    pub fn pane(&self, participant: ParticipantId) -> Option<&DisplayPane> {
        self.scoreboard.pane(participant)
    }
}

/// Read-only view handed to [`Game::scoreboard_lines`]
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The session being rendered
    pub session: SessionId,
    /// Session members, earliest join first
    pub participants: &'a [ParticipantId],
    /// Current scheduler tick
    pub tick: u64,
}

/// Rules of one kind of game
///
/// Every hook has a no-op default so games implement only what they use.
pub trait Game: Send {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Called once after the session is created
    fn on_start(&mut self, _ctx: &mut SessionContext<'_>) {}

    /// Called on every scheduled tick of the session
    fn on_tick(&mut self, _ctx: &mut SessionContext<'_>) {}

    /// Called for every event routed to the session
    fn on_event(&mut self, _ctx: &mut SessionContext<'_>, _event: &GameEvent) -> EventOutcome {
        EventOutcome::Continue
    }

    /// Lines to show `viewer` on the next periodic re-render
    ///
    /// `None` keeps the viewer's current lines.
    fn scoreboard_lines(&self, _ctx: &RenderContext<'_>, _viewer: ParticipantId) -> Option<Vec<String>> {
        None
    }

    /// Called once when the session closes, before members are evicted
    fn on_close(&mut self, _ctx: &mut SessionContext<'_>) {}
}
