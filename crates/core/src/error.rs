//! Error types for arcade
//!
//! Membership precondition failures are the only errors the core raises.
//! Internal mismatches between a view and the registry are logged, never
//! returned, and "nothing changed" outcomes are plain `false` results.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::{ParticipantId, PartyId, SessionId};
use thiserror::Error;

/// Result type alias for arcade operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for party and session operations
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Membership | `InvalidState` | A membership precondition was violated |
/// | Lifecycle | `SessionClosed`, `UnknownParty`, `UnknownSession` | Handle is stale or inert |
/// | Policy | `NotInParty`, `AlreadyInParty`, `NotModerator`, `NotInvited`, `PartyFull` | Boundary rules |
/// | System | `Config` | Configuration could not be loaded |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ==================== Membership ====================
    /// A membership precondition was violated (promoting a non-member,
    /// inviting an existing member, joining while already claimed elsewhere)
    #[error("invalid state: {reason}")]
    InvalidState {
        /// Human-readable description of the violated precondition
        reason: String,
    },

    // ==================== Lifecycle ====================
    /// The session has been closed and no longer accepts participants
    #[error("session {session} is closed")]
    SessionClosed {
        /// Closed session
        session: SessionId,
    },

    /// No party with this id is registered with the coordinator
    #[error("unknown party: {party}")]
    UnknownParty {
        /// Requested party
        party: PartyId,
    },

    /// No session with this id is registered with the coordinator
    #[error("unknown session: {session}")]
    UnknownSession {
        /// Requested session
        session: SessionId,
    },

    // ==================== Policy ====================
    /// The participant is not a member of any party
    #[error("{participant} is not in a party")]
    NotInParty {
        /// Participant without a party
        participant: ParticipantId,
    },

    /// The participant already belongs to a party
    #[error("{participant} is already in a party")]
    AlreadyInParty {
        /// Participant that already has a party
        participant: ParticipantId,
    },

    /// The acting participant is not a moderator of their party
    #[error("{participant} is not a party moderator")]
    NotModerator {
        /// Acting participant
        participant: ParticipantId,
    },

    /// The participant has no pending invitation to the party
    #[error("{participant} has not been invited to party {party}")]
    NotInvited {
        /// Participant attempting to join
        participant: ParticipantId,
        /// Target party
        party: PartyId,
    },

    /// The party has reached its configured maximum size
    #[error("party {party} is full ({limit} players)")]
    PartyFull {
        /// Full party
        party: PartyId,
        /// Configured limit
        limit: usize,
    },

    // ==================== System ====================
    /// Configuration could not be read, parsed or validated
    #[error("config error: {reason}")]
    Config {
        /// Underlying failure
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidState`] from any displayable reason.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Error::InvalidState {
            reason: reason.into(),
        }
    }

    /// Build an [`Error::Config`] from any displayable reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Returns true for precondition failures on membership.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::InvalidState { .. })
    }
}
