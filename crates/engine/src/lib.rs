//! Party and session coordination for arcade
//!
//! This crate orchestrates membership and games on top of the core types:
//! - MembershipRegistry: who is in which party and which session
//! - Party / PartyHandle: moderator and invitation roles
//! - Session / SessionHandle: game lifecycle, invisibility, scoreboards
//! - Game: the rules capability, fed by routed GameEvents and ticks
//! - GameCoordinator: the arena owning all of the above, plus party operations
//! - TickScheduler: repeating, cancellable session tick tasks
//! - EngineConfig: `arcade.toml`
//!
//! All mutation runs on the host's main thread. Hosts that deliver events
//! from several threads wrap the coordinator in a [`SharedCoordinator`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod coordinator;
pub mod events;
pub mod game;
pub mod party;
pub mod party_ops;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod shared;

pub use config::{EngineConfig, CONFIG_FILE_NAME};
pub use coordinator::{CoordinatorMetrics, GameCoordinator};
pub use events::{EventKind, EventOutcome, GameEvent, GameMode, InteractAction};
pub use game::{Game, RenderContext, SessionContext, SessionRequest, SessionScoreboard};
pub use party::{Party, PartyHandle};
pub use party_ops::{PartyRoster, RosterEntry};
pub use registry::MembershipRegistry;
pub use scheduler::{SchedulerStats, TaskId, TickScheduler};
pub use session::{Session, SessionHandle, SessionState};
pub use shared::SharedCoordinator;
