//! Scoreboard synchronization for arcade
//!
//! This crate keeps per-viewer scoreboards consistent as session membership
//! changes:
//! - DisplayPane: one viewer's lines, title and team, with minimal-update diffing
//! - ScoreboardSynchronizer: one pane per participant, shared team options
//!
//! Panes produce [`arcade_core::PaneDelta`]s; the synchronizer pushes them to
//! the [`arcade_core::Host`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pane;
pub mod synchronizer;

pub use pane::DisplayPane;
pub use synchronizer::{ScoreboardSynchronizer, SharedOptions};
