//! Core types and traits for arcade
//!
//! This crate defines the foundational types used throughout the system:
//! - ParticipantId, PartyId, SessionId: identities and arena keys
//! - Location, BlockPos, EntityRef: event payload types
//! - Error: Error type hierarchy
//! - Display types: PaneOp, PaneDelta, TeamOption, ActiveDisplay
//! - Traits: the Host runtime abstraction
//! - Utilities: time formatting and random selection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod display;
pub mod error;
pub mod traits;
pub mod types;
pub mod util;

pub use display::{ActiveDisplay, PaneDelta, PaneOp, TeamOption, RESET_MARKER};
pub use error::{Error, Result};
pub use traits::{online_participants, Host};
pub use types::{BlockPos, EntityRef, Location, ParticipantId, PartyId, SessionId};
pub use util::{format_time, random_element, take_random_element};
