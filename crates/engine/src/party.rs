//! Parties: groups of participants with moderator and invitation roles
//!
//! A [`Party`] only owns its sub-role sets. Who is a player is answered by the
//! [`MembershipRegistry`]; [`PartyHandle`] is the short-lived view that pairs
//! the two and implements every party operation.
//!
//! Invariants kept by every handle operation:
//! - moderators are players
//! - invitees are never players

use crate::registry::MembershipRegistry;
use arcade_core::{online_participants, Error, Host, ParticipantId, PartyId, Result, SessionId};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Role state of one party
#[derive(Debug, Clone)]
pub struct Party {
    id: PartyId,
    moderators: BTreeSet<ParticipantId>,
    invitees: BTreeSet<ParticipantId>,
    session: Option<SessionId>,
    populated: bool,
}

impl Party {
    /// A fresh party with no players, moderators or invitations
    pub fn new(id: PartyId) -> Self {
        Self {
            id,
            moderators: BTreeSet::new(),
            invitees: BTreeSet::new(),
            session: None,
            populated: false,
        }
    }

    /// Arena key
    pub fn id(&self) -> PartyId {
        self.id
    }

    /// Session the party was last seated in, if still open
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    /// Current moderators
    pub fn moderators(&self) -> &BTreeSet<ParticipantId> {
        &self.moderators
    }

    /// Pending invitations
    pub fn invitees(&self) -> &BTreeSet<ParticipantId> {
        &self.invitees
    }

    /// Whether anyone has ever joined
    pub(crate) fn populated(&self) -> bool {
        self.populated
    }

    pub(crate) fn clear_session(&mut self, session: SessionId) {
        if self.session == Some(session) {
            self.session = None;
        }
    }

    pub(crate) fn clear_invitations(&mut self) {
        self.invitees.clear();
    }
}

/// A party paired with the registry it draws its players from
pub struct PartyHandle<'a> {
    party: &'a mut Party,
    registry: &'a mut MembershipRegistry,
}

impl<'a> PartyHandle<'a> {
    pub(crate) fn new(party: &'a mut Party, registry: &'a mut MembershipRegistry) -> Self {
        Self { party, registry }
    }

    /// Arena key
    pub fn id(&self) -> PartyId {
        self.party.id
    }

    /// Add a participant to the party
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the participant already has a party,
    /// including this one.
    pub fn add(&mut self, participant: ParticipantId) -> Result<bool> {
        if !self.registry.join_party(participant, self.party.id) {
            return Err(Error::invalid_state("participant already has a party"));
        }
        self.party.invitees.remove(&participant);
        self.party.populated = true;
        // A moderator entry without a registry slot is left over from an
        // earlier mismatch; drop it so the new member starts unprivileged.
        if self.party.moderators.remove(&participant) {
            warn!(
                target: "arcade::consistency",
                party = %self.party.id,
                participant = %participant,
                "Stale moderator entry found for joining participant"
            );
        }
        debug!(target: "arcade::party", party = %self.party.id, participant = %participant, "Player added");
        Ok(true)
    }

    /// Remove a participant; `true` iff they were a player
    ///
    /// Removing the last player dissolves the party: the coordinator stops
    /// listing it at once and drops it with its invitations on the next
    /// mutable access.
    pub fn remove(&mut self, participant: ParticipantId) -> bool {
        if self.registry.party_of(participant) != Some(self.party.id) {
            if self.party.moderators.remove(&participant) {
                warn!(
                    target: "arcade::consistency",
                    party = %self.party.id,
                    participant = %participant,
                    "Moderator without registry slot removed"
                );
            }
            return false;
        }
        if !self.registry.leave_party(participant) {
            warn!(
                target: "arcade::consistency",
                party = %self.party.id,
                participant = %participant,
                "Registry refused to release a claimed party slot"
            );
        }
        self.party.moderators.remove(&participant);
        debug!(target: "arcade::party", party = %self.party.id, participant = %participant, "Player removed");
        true
    }

    /// Grant moderator status; `true` iff it was not held
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the participant is not a player.
    pub fn promote(&mut self, participant: ParticipantId) -> Result<bool> {
        self.require_member(participant)?;
        Ok(self.party.moderators.insert(participant))
    }

    /// Revoke moderator status; `true` iff it was held
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the participant is not a player.
    pub fn demote(&mut self, participant: ParticipantId) -> Result<bool> {
        self.require_member(participant)?;
        Ok(self.party.moderators.remove(&participant))
    }

    /// Record an invitation; `true` iff it is new
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the participant is already a player.
    pub fn invite(&mut self, participant: ParticipantId) -> Result<bool> {
        self.require_non_member(participant)?;
        Ok(self.party.invitees.insert(participant))
    }

    /// Withdraw an invitation; `true` iff one was pending
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the participant is already a player.
    pub fn uninvite(&mut self, participant: ParticipantId) -> Result<bool> {
        self.require_non_member(participant)?;
        Ok(self.party.invitees.remove(&participant))
    }

    /// Players, earliest join first
    pub fn players(&self) -> Vec<ParticipantId> {
        self.registry.party_members(self.party.id)
    }

    /// Current moderators
    pub fn moderators(&self) -> &BTreeSet<ParticipantId> {
        &self.party.moderators
    }

    /// Pending invitations
    pub fn invitees(&self) -> &BTreeSet<ParticipantId> {
        &self.party.invitees
    }

    /// Whether the participant is a player
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.registry.party_of(participant) == Some(self.party.id)
    }

    /// Whether the participant is a moderator
    pub fn is_moderator(&self, participant: ParticipantId) -> bool {
        self.party.moderators.contains(&participant)
    }

    /// Whether the participant has a pending invitation
    pub fn is_invited(&self, participant: ParticipantId) -> bool {
        self.party.invitees.contains(&participant)
    }

    /// Number of players
    pub fn size(&self) -> usize {
        self.registry.party_size(self.party.id)
    }

    /// True when the party has no players
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Players currently online
    pub fn online_players(&self, host: &dyn Host) -> Vec<ParticipantId> {
        online_participants(host, self.players())
    }

    /// Session the party was seated in
    pub fn session(&self) -> Option<SessionId> {
        self.party.session
    }

    /// Link the party to a session, or clear the link
    pub fn set_session(&mut self, session: Option<SessionId>) {
        self.party.session = session;
    }

    fn require_member(&self, participant: ParticipantId) -> Result<()> {
        if self.contains(participant) {
            Ok(())
        } else {
            Err(Error::invalid_state("participant is not in this party"))
        }
    }

    fn require_non_member(&self, participant: ParticipantId) -> Result<()> {
        if self.contains(participant) {
            Err(Error::invalid_state("participant is already in this party"))
        } else {
            Ok(())
        }
    }
}
