//! Host runtime abstraction
//!
//! The [`Host`] trait is everything arcade consumes from the server runtime:
//! presence lookups, per-viewer display pushes and pairwise visibility. It
//! decouples the membership and scoreboard logic from any particular server
//! platform, so tests drive the whole stack with an in-memory host.
//!
//! All methods take `&self`; implementations that record or forward calls
//! use interior mutability. Calls arrive on the host's main thread.

use crate::display::{ActiveDisplay, PaneDelta};
use crate::types::ParticipantId;

/// Services provided by the server runtime
pub trait Host: Send + Sync {
    /// Whether the participant is currently connected
    fn is_online(&self, participant: ParticipantId) -> bool;

    /// The participant's current display name, if the host knows them
    fn display_name_of(&self, participant: ParticipantId) -> Option<String>;

    /// Switch which scoreboard the viewer sees
    fn set_active_display(&self, viewer: ParticipantId, display: ActiveDisplay);

    /// Apply a display delta to the viewer's pane
    fn push_pane_update(&self, viewer: ParticipantId, delta: &PaneDelta);

    /// Show or hide `subject` from `viewer`
    fn set_pair_visible(&self, viewer: ParticipantId, subject: ParticipantId, visible: bool);

    /// Display name with a stable fallback for unknown participants
    fn name_or_id(&self, participant: ParticipantId) -> String {
        self.display_name_of(participant)
            .unwrap_or_else(|| participant.to_string())
    }

    /// Filter a set of participants down to those currently online
    fn online<I>(&self, participants: I) -> Vec<ParticipantId>
    where
        I: IntoIterator<Item = ParticipantId>,
        Self: Sized,
    {
        participants
            .into_iter()
            .filter(|p| self.is_online(*p))
            .collect()
    }
}

/// Filter participants down to those online, for `dyn Host` callers
pub fn online_participants<I>(host: &dyn Host, participants: I) -> Vec<ParticipantId>
where
    I: IntoIterator<Item = ParticipantId>,
{
    participants
        .into_iter()
        .filter(|p| host.is_online(*p))
        .collect()
}
