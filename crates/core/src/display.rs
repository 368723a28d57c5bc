//! Display operations exchanged with the host
//!
//! Scoreboard panes never talk to the host directly. Every mutation yields a
//! [`PaneDelta`]: an ordered list of [`PaneOp`]s the host replays against the
//! viewer's own scoreboard object. Order matters: removals always precede
//! writes within one delta.

use crate::types::SessionId;
use serde::{Deserialize, Serialize};

/// Invisible formatting marker used to disambiguate repeated line texts
pub const RESET_MARKER: &str = "\u{00A7}r";

/// Team-wide option shared by every pane of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamOption {
    /// Whether team members' name tags are visible
    NameTagVisibility,
    /// Whether team members push each other
    CollisionRule,
}

/// Which scoreboard a viewer is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveDisplay {
    /// The viewer's own pane inside the given session
    Session(SessionId),
    /// The host's main scoreboard
    Default,
}

/// A single display operation on one viewer's pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaneOp {
    /// Clear a line from the sidebar
    ResetScore {
        /// Line text (update key)
        line: String,
    },
    /// Write a line with its rank score
    SetScore {
        /// Line text (update key)
        line: String,
        /// Rank score, higher renders nearer the top
        score: i32,
    },
    /// Change the sidebar title
    SetTitle {
        /// New title
        title: String,
    },
    /// Change a team option
    SetOption {
        /// Option being changed
        option: TeamOption,
        /// `true` renders as "always", `false` as "never"
        enabled: bool,
    },
    /// Add a display name to the pane's team
    AddEntry {
        /// Display name
        name: String,
    },
    /// Remove a display name from the pane's team
    RemoveEntry {
        /// Display name
        name: String,
    },
}

/// Ordered display operations produced by one pane mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneDelta {
    ops: Vec<PaneOp>,
}

impl PaneDelta {
    /// An empty delta
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&mut self, op: PaneOp) {
        self.ops.push(op);
    }

    /// Append every operation of another delta
    pub fn extend(&mut self, other: PaneDelta) {
        self.ops.extend(other.ops);
    }

    /// Operations in application order
    pub fn ops(&self) -> &[PaneOp] {
        &self.ops
    }

    /// Consume the delta into its operations
    pub fn into_ops(self) -> Vec<PaneOp> {
        self.ops
    }

    /// True when applying this delta would change nothing
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Lines written by this delta, in order
    pub fn writes(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PaneOp::SetScore { line, score } => Some((line.as_str(), *score)),
            _ => None,
        })
    }

    /// Lines cleared by this delta, in order
    pub fn removals(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PaneOp::ResetScore { line } => Some(line.as_str()),
            _ => None,
        })
    }
}

impl From<Vec<PaneOp>> for PaneDelta {
    fn from(ops: Vec<PaneOp>) -> Self {
        Self { ops }
    }
}
