//! Session-wide scoreboard synchronization
//!
//! A [`ScoreboardSynchronizer`] owns one [`DisplayPane`] per tracked
//! participant of a session. Every pane carries the same team: the display
//! names of all tracked participants, with the session's shared options.
//! Deltas are pushed to the host as soon as they are computed.
//!
//! Per participant the synchronizer is a two-state machine:
//!
//! ```text
//! absent --add--> tracked --remove--> absent
//! ```
//!
//! `add` allocates the pane, registers the name on every pane, applies the
//! shared options, title and lines, and switches the viewer to the pane.
//! `remove` drops the pane, scrubs the name from every remaining pane, and
//! puts the viewer back on the host's default display.

use crate::pane::DisplayPane;
use arcade_core::{ActiveDisplay, Host, PaneDelta, ParticipantId, SessionId, TeamOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Team options shared by every pane of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedOptions {
    /// Whether name tags of team members are shown
    pub name_tag_visibility: bool,
    /// Whether team members collide
    pub collision_rule: bool,
}

impl SharedOptions {
    /// Current value of one option
    pub fn get(&self, option: TeamOption) -> bool {
        match option {
            TeamOption::NameTagVisibility => self.name_tag_visibility,
            TeamOption::CollisionRule => self.collision_rule,
        }
    }

    /// Update one option
    pub fn set(&mut self, option: TeamOption, enabled: bool) {
        match option {
            TeamOption::NameTagVisibility => self.name_tag_visibility = enabled,
            TeamOption::CollisionRule => self.collision_rule = enabled,
        }
    }

    fn iter(&self) -> [(TeamOption, bool); 2] {
        [
            (TeamOption::NameTagVisibility, self.name_tag_visibility),
            (TeamOption::CollisionRule, self.collision_rule),
        ]
    }
}

impl Default for SharedOptions {
    fn default() -> Self {
        Self {
            name_tag_visibility: true,
            collision_rule: true,
        }
    }
}

/// Keeps every participant's pane of one session in sync
#[derive(Debug)]
pub struct ScoreboardSynchronizer {
    session: SessionId,
    panes: BTreeMap<ParticipantId, DisplayPane>,
    names: BTreeMap<ParticipantId, String>,
    options: SharedOptions,
    title: Option<String>,
    shared_lines: Vec<String>,
}

impl ScoreboardSynchronizer {
    /// Create an empty synchronizer for a session
    pub fn new(session: SessionId, options: SharedOptions) -> Self {
        Self {
            session,
            panes: BTreeMap::new(),
            names: BTreeMap::new(),
            options,
            title: None,
            shared_lines: Vec::new(),
        }
    }

    /// Session this synchronizer renders for
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Start tracking a participant
    ///
    /// Returns `false` without side effects if the participant is already
    /// tracked.
    pub fn add(&mut self, host: &dyn Host, participant: ParticipantId, display_name: impl Into<String>) -> bool {
        if self.panes.contains_key(&participant) {
            return false;
        }
        let display_name = display_name.into();
        self.panes.insert(participant, DisplayPane::new());
        self.names.insert(participant, display_name.clone());

        // Title first so the initial delta reads top-down on the host.
        let mut initial = PaneDelta::new();
        if let (Some(title), Some(pane)) = (self.title.clone(), self.panes.get_mut(&participant)) {
            initial.extend(pane.set_title(title));
        }
        if let Some(pane) = self.panes.get_mut(&participant) {
            initial.extend(pane.set_lines(self.shared_lines.clone()));
        }
        if !initial.is_empty() {
            host.push_pane_update(participant, &initial);
        }

        for (option, enabled) in self.options.iter() {
            self.apply_option(host, option, enabled);
        }
        self.show(host, participant);

        debug!(
            target: "arcade::scoreboard",
            session = %self.session,
            participant = %participant,
            name = %display_name,
            "Participant tracked"
        );
        true
    }

    /// Stop tracking a participant
    ///
    /// Returns `false` without side effects if the participant is not tracked.
    pub fn remove(&mut self, host: &dyn Host, participant: ParticipantId) -> bool {
        if self.panes.remove(&participant).is_none() {
            return false;
        }
        if let Some(name) = self.names.remove(&participant) {
            for (viewer, pane) in self.panes.iter_mut() {
                let delta = pane.remove_entry(&name);
                if !delta.is_empty() {
                    host.push_pane_update(*viewer, &delta);
                }
            }
        }
        if host.is_online(participant) {
            host.set_active_display(participant, ActiveDisplay::Default);
        }
        debug!(
            target: "arcade::scoreboard",
            session = %self.session,
            participant = %participant,
            "Participant untracked"
        );
        true
    }

    /// Change a team option on every pane
    ///
    /// Also a repair pass: the option and every known display name are
    /// pushed to every pane even when the pane believes the host has them.
    pub fn set_shared_option(&mut self, host: &dyn Host, option: TeamOption, enabled: bool) {
        self.options.set(option, enabled);
        for (viewer, pane) in self.panes.iter_mut() {
            for name in self.names.values() {
                pane.add_entry(name);
            }
            let delta = pane.reassert(option, enabled);
            host.push_pane_update(*viewer, &delta);
        }
        trace!(
            target: "arcade::scoreboard",
            session = %self.session,
            ?option,
            enabled,
            "Shared option reasserted"
        );
    }

    /// Change the sidebar title on every pane
    pub fn set_title(&mut self, host: &dyn Host, title: impl Into<String>) {
        let title = title.into();
        self.title = Some(title.clone());
        for (viewer, pane) in self.panes.iter_mut() {
            let delta = pane.set_title(title.clone());
            if !delta.is_empty() {
                host.push_pane_update(*viewer, &delta);
            }
        }
    }

    /// Show the same lines on every pane; also the initial lines of new panes
    pub fn set_shared_lines<I, S>(&mut self, host: &dyn Host, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shared_lines = lines.into_iter().map(Into::into).collect();
        for (viewer, pane) in self.panes.iter_mut() {
            let delta = pane.set_lines(self.shared_lines.clone());
            if !delta.is_empty() {
                host.push_pane_update(*viewer, &delta);
            }
        }
    }

    /// Show lines to a single viewer; `false` if the viewer is not tracked
    pub fn set_lines_for<I, S>(&mut self, host: &dyn Host, viewer: ParticipantId, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.panes.get_mut(&viewer) {
            Some(pane) => {
                let delta = pane.set_lines(lines);
                if !delta.is_empty() {
                    host.push_pane_update(viewer, &delta);
                }
                true
            }
            None => false,
        }
    }

    /// Re-render every pane and re-assert the active display of online viewers
    ///
    /// `render` returns the lines a viewer should see, or `None` to keep the
    /// pane's current lines.
    pub fn update_scoreboards<F>(&mut self, host: &dyn Host, mut render: F)
    where
        F: FnMut(ParticipantId) -> Option<Vec<String>>,
    {
        let viewers: Vec<ParticipantId> = self.panes.keys().copied().collect();
        for viewer in viewers {
            if let Some(lines) = render(viewer) {
                self.set_lines_for(host, viewer, lines);
            }
            self.show(host, viewer);
        }
        trace!(
            target: "arcade::scoreboard",
            session = %self.session,
            panes = self.panes.len(),
            "Scoreboards updated"
        );
    }

    /// Whether a participant is tracked
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.panes.contains_key(&participant)
    }

    /// Tracked participants in id order
    pub fn tracked(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.panes.keys().copied()
    }

    /// A tracked participant's pane
    pub fn pane(&self, participant: ParticipantId) -> Option<&DisplayPane> {
        self.panes.get(&participant)
    }

    /// The display name registered for a tracked participant
    pub fn display_name(&self, participant: ParticipantId) -> Option<&str> {
        self.names.get(&participant).map(String::as_str)
    }

    /// Current shared options
    pub fn options(&self) -> SharedOptions {
        self.options
    }

    /// Current shared title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of tracked participants
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    /// True when nobody is tracked
    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Push an option to every pane and re-add every known name
    fn apply_option(&mut self, host: &dyn Host, option: TeamOption, enabled: bool) {
        for (viewer, pane) in self.panes.iter_mut() {
            let mut delta = pane.set_option(option, enabled);
            for name in self.names.values() {
                delta.extend(pane.add_entry(name));
            }
            if !delta.is_empty() {
                host.push_pane_update(*viewer, &delta);
            }
        }
    }

    fn show(&self, host: &dyn Host, viewer: ParticipantId) {
        if host.is_online(viewer) {
            host.set_active_display(viewer, ActiveDisplay::Session(self.session));
        }
    }
}
