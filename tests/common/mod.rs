//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any suite's
//! main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Once};

pub use arcade::{
    ActiveDisplay, EngineConfig, Error, EventKind, EventOutcome, Game, GameCoordinator, GameEvent,
    Host, PaneDelta, PaneOp, ParticipantId, PartyId, RenderContext, SessionContext, SessionId,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer fmt subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// RecordingHost - in-memory server runtime
// ============================================================================

/// What one viewer's client currently shows
#[derive(Debug, Default, Clone)]
pub struct ClientView {
    pub title: Option<String>,
    pub scores: HashMap<String, i32>,
    pub entries: HashSet<String>,
    pub ops_received: usize,
}

impl ClientView {
    /// Sidebar entries sorted by score, highest first
    pub fn sidebar(&self) -> Vec<String> {
        let mut lines: Vec<(&String, &i32)> = self.scores.iter().collect();
        lines.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        lines.into_iter().map(|(line, _)| line.clone()).collect()
    }
}

/// Host that applies every call to an in-memory model of the clients
#[derive(Default)]
pub struct RecordingHost {
    online: Mutex<HashSet<ParticipantId>>,
    names: Mutex<HashMap<ParticipantId, String>>,
    displays: Mutex<HashMap<ParticipantId, ActiveDisplay>>,
    views: Mutex<HashMap<ParticipantId, ClientView>>,
    hidden: Mutex<HashSet<(ParticipantId, ParticipantId)>>,
    visibility_calls: Mutex<usize>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bring a named participant online
    pub fn join(&self, name: &str) -> ParticipantId {
        let participant = ParticipantId::new();
        self.online.lock().insert(participant);
        self.names.lock().insert(participant, name.to_string());
        participant
    }

    pub fn set_online(&self, participant: ParticipantId, online: bool) {
        if online {
            self.online.lock().insert(participant);
        } else {
            self.online.lock().remove(&participant);
        }
    }

    pub fn display(&self, viewer: ParticipantId) -> Option<ActiveDisplay> {
        self.displays.lock().get(&viewer).copied()
    }

    pub fn view(&self, viewer: ParticipantId) -> ClientView {
        self.views.lock().get(&viewer).cloned().unwrap_or_default()
    }

    pub fn can_see(&self, viewer: ParticipantId, subject: ParticipantId) -> bool {
        !self.hidden.lock().contains(&(viewer, subject))
    }

    pub fn visibility_calls(&self) -> usize {
        *self.visibility_calls.lock()
    }
}

impl Host for RecordingHost {
    fn is_online(&self, participant: ParticipantId) -> bool {
        self.online.lock().contains(&participant)
    }

    fn display_name_of(&self, participant: ParticipantId) -> Option<String> {
        self.names.lock().get(&participant).cloned()
    }

    fn set_active_display(&self, viewer: ParticipantId, display: ActiveDisplay) {
        self.displays.lock().insert(viewer, display);
    }

    fn push_pane_update(&self, viewer: ParticipantId, delta: &PaneDelta) {
        let mut views = self.views.lock();
        let view = views.entry(viewer).or_default();
        for op in delta.ops() {
            view.ops_received += 1;
            match op {
                PaneOp::ResetScore { line } => {
                    view.scores.remove(line);
                }
                PaneOp::SetScore { line, score } => {
                    view.scores.insert(line.clone(), *score);
                }
                PaneOp::SetTitle { title } => view.title = Some(title.clone()),
                PaneOp::SetOption { .. } => {}
                PaneOp::AddEntry { name } => {
                    view.entries.insert(name.clone());
                }
                PaneOp::RemoveEntry { name } => {
                    view.entries.remove(name);
                }
            }
        }
    }

    fn set_pair_visible(&self, viewer: ParticipantId, subject: ParticipantId, visible: bool) {
        *self.visibility_calls.lock() += 1;
        if visible {
            self.hidden.lock().remove(&(viewer, subject));
        } else {
            self.hidden.lock().insert((viewer, subject));
        }
    }
}

// ============================================================================
// ScriptedGame - game whose behavior is set per test
// ============================================================================

/// What a scripted game has observed
#[derive(Debug, Default)]
pub struct GameLog {
    pub started: bool,
    pub ticks: u64,
    pub events: Vec<(SessionId, EventKind)>,
    pub closed: bool,
}

/// Shared handle to a scripted game's log
pub type SharedLog = Arc<Mutex<GameLog>>;

/// A game driven by simple rules
#[derive(Default)]
pub struct ScriptedGame {
    pub log: SharedLog,
    /// Event kinds this game cancels
    pub cancel: HashSet<EventKind>,
    /// Remove the actor of a quit event
    pub remove_on_quit: bool,
    /// Close the session on this tick
    pub close_on_tick: Option<u64>,
    /// Turn invisibility on when started
    pub invisible_on_start: bool,
    /// Sidebar title set when started
    pub title_on_start: Option<String>,
    /// Ask for this participant to be added on every tick
    pub add_on_tick: Option<ParticipantId>,
    /// Lines shown to each viewer on periodic re-render
    pub lines: BTreeMap<ParticipantId, Vec<String>>,
}

impl ScriptedGame {
    pub fn new() -> (Self, SharedLog) {
        let game = Self::default();
        let log = game.log.clone();
        (game, log)
    }
}

impl Game for ScriptedGame {
    fn name(&self) -> &str {
        "scripted"
    }

    fn on_start(&mut self, ctx: &mut SessionContext<'_>) {
        self.log.lock().started = true;
        if self.invisible_on_start {
            ctx.request_invisibility(true);
        }
        if let Some(title) = &self.title_on_start {
            ctx.scoreboard().set_title(title.clone());
        }
    }

    fn on_tick(&mut self, ctx: &mut SessionContext<'_>) {
        let ticks = {
            let mut log = self.log.lock();
            log.ticks += 1;
            log.ticks
        };
        if let Some(participant) = self.add_on_tick {
            ctx.request_add(participant);
        }
        if self.close_on_tick == Some(ticks) {
            ctx.request_close();
        }
    }

    fn on_event(&mut self, ctx: &mut SessionContext<'_>, event: &GameEvent) -> EventOutcome {
        self.log.lock().events.push((ctx.id(), event.kind()));
        if let (true, GameEvent::Quit { participant }) = (self.remove_on_quit, event) {
            ctx.request_remove(*participant);
        }
        if self.cancel.contains(&event.kind()) {
            EventOutcome::Cancel
        } else {
            EventOutcome::Continue
        }
    }

    fn scoreboard_lines(&self, _ctx: &RenderContext<'_>, viewer: ParticipantId) -> Option<Vec<String>> {
        self.lines.get(&viewer).cloned()
    }

    fn on_close(&mut self, _ctx: &mut SessionContext<'_>) {
        self.log.lock().closed = true;
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A coordinator over a fresh recording host
pub fn coordinator() -> (GameCoordinator, Arc<RecordingHost>) {
    coordinator_with(EngineConfig::default())
}

pub fn coordinator_with(config: EngineConfig) -> (GameCoordinator, Arc<RecordingHost>) {
    init_tracing();
    let host = RecordingHost::new();
    let coordinator =
        GameCoordinator::new(host.clone(), config).expect("test config should validate");
    (coordinator, host)
}
