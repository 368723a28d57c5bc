//! Party operations: invite, join, take over, leave, kick, promote, disband
//!
//! Engine-level policy on top of [`PartyHandle`] for boundary code (chat
//! commands, menus). Every operation names the acting participant and
//! returns a typed error the boundary maps to a message.
//!
//! ## Operations
//!
//! - `invite`: Invite a participant, creating the inviter's party if needed
//! - `join`: Accept a pending invitation to someone's party
//! - `take_over`: Join someone's party as a moderator without an invitation
//! - `leave` / `kick`: Leave a party, or remove another member
//! - `promote_member` / `demote_member`: Change a member's moderator status
//! - `disband`: Remove every member and drop the party
//! - `roster`: Moderators and players with their online status

use crate::coordinator::GameCoordinator;
use crate::party::PartyHandle;
use arcade_core::{Error, ParticipantId, PartyId, Result};
use tracing::{debug, info};

// =============================================================================
// Public result types
// =============================================================================

/// One roster line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    /// The member
    pub participant: ParticipantId,
    /// Whether the host reports them online
    pub online: bool,
}

/// Party members split by role, each list in join order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyRoster {
    /// Members with moderator status
    pub moderators: Vec<RosterEntry>,
    /// Every other member
    pub players: Vec<RosterEntry>,
}

impl PartyRoster {
    /// Total number of members
    pub fn len(&self) -> usize {
        self.moderators.len() + self.players.len()
    }

    /// True when the roster lists nobody
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Operations
// =============================================================================

impl GameCoordinator {
    /// Invite `invitee` to `inviter`'s party
    ///
    /// An inviter without a party gets a new one, joining it as its first
    /// moderator. Returns `false` if the invitation was already pending.
    ///
    /// # Errors
    ///
    /// - [`Error::NotModerator`] if the inviter is not a moderator
    /// - [`Error::InvalidState`] if the invitee is already in the party
    pub fn invite(&mut self, inviter: ParticipantId, invitee: ParticipantId) -> Result<bool> {
        let party = match self.party_of(inviter) {
            Some(party) => party,
            None => {
                let party = self.create_party();
                let mut handle = self.handle(party)?;
                handle.add(inviter)?;
                handle.promote(inviter)?;
                info!(target: "arcade::party", party = %party, creator = %inviter, "Party formed by invitation");
                party
            }
        };
        let mut handle = self.handle(party)?;
        if !handle.is_moderator(inviter) {
            return Err(Error::NotModerator {
                participant: inviter,
            });
        }
        let invited = handle.invite(invitee)?;
        if invited {
            debug!(target: "arcade::party", party = %party, inviter = %inviter, invitee = %invitee, "Invitation sent");
        }
        Ok(invited)
    }

    /// Accept an invitation to `host_member`'s party
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyInParty`] if the participant has a party
    /// - [`Error::NotInParty`] if `host_member` has no party
    /// - [`Error::NotInvited`] without a pending invitation
    /// - [`Error::PartyFull`] at the configured size limit
    pub fn join(&mut self, participant: ParticipantId, host_member: ParticipantId) -> Result<PartyId> {
        let party = self.joinable_party(participant, host_member)?;
        let mut handle = self.handle(party)?;
        if !handle.is_invited(participant) {
            return Err(Error::NotInvited { participant, party });
        }
        handle.add(participant)?;
        debug!(target: "arcade::party", party = %party, participant = %participant, "Invitation accepted");
        Ok(party)
    }

    /// Join `host_member`'s party as a moderator without an invitation
    ///
    /// Reserved for privileged callers; the boundary checks the privilege.
    ///
    /// # Errors
    ///
    /// Same as [`GameCoordinator::join`], except that no invitation is needed.
    pub fn take_over(&mut self, participant: ParticipantId, host_member: ParticipantId) -> Result<PartyId> {
        let party = self.joinable_party(participant, host_member)?;
        let mut handle = self.handle(party)?;
        handle.add(participant)?;
        handle.promote(participant)?;
        info!(target: "arcade::party", party = %party, participant = %participant, "Party taken over");
        Ok(party)
    }

    /// Leave the participant's party
    ///
    /// # Errors
    ///
    /// [`Error::NotInParty`] if the participant has no party.
    pub fn leave(&mut self, participant: ParticipantId) -> Result<PartyId> {
        let party = self
            .party_of(participant)
            .ok_or(Error::NotInParty { participant })?;
        self.remove_member(party, participant)?;
        debug!(target: "arcade::party", party = %party, participant = %participant, "Left party");
        Ok(party)
    }

    /// Remove `target` from `moderator`'s party
    ///
    /// # Errors
    ///
    /// - [`Error::NotInParty`] if either participant is outside the party
    /// - [`Error::NotModerator`] if the actor is not a moderator
    pub fn kick(&mut self, moderator: ParticipantId, target: ParticipantId) -> Result<()> {
        let party = self.moderated_party(moderator)?;
        if self.party_of(target) != Some(party) {
            return Err(Error::NotInParty { participant: target });
        }
        self.remove_member(party, target)?;
        debug!(target: "arcade::party", party = %party, moderator = %moderator, kicked = %target, "Member kicked");
        Ok(())
    }

    /// Grant moderator status to `target`; `false` if already held
    ///
    /// # Errors
    ///
    /// - [`Error::NotInParty`] if either participant is outside the party
    /// - [`Error::NotModerator`] if the actor is not a moderator
    pub fn promote_member(&mut self, moderator: ParticipantId, target: ParticipantId) -> Result<bool> {
        let party = self.moderated_party(moderator)?;
        if self.party_of(target) != Some(party) {
            return Err(Error::NotInParty { participant: target });
        }
        self.handle(party)?.promote(target)
    }

    /// Revoke `target`'s moderator status; `false` if not held
    ///
    /// # Errors
    ///
    /// - [`Error::NotInParty`] if either participant is outside the party
    /// - [`Error::NotModerator`] if the actor is not a moderator
    pub fn demote_member(&mut self, moderator: ParticipantId, target: ParticipantId) -> Result<bool> {
        let party = self.moderated_party(moderator)?;
        if self.party_of(target) != Some(party) {
            return Err(Error::NotInParty { participant: target });
        }
        self.handle(party)?.demote(target)
    }

    /// Remove every member of `moderator`'s party and drop it
    ///
    /// Returns the former members in join order.
    ///
    /// # Errors
    ///
    /// - [`Error::NotInParty`] if the actor has no party
    /// - [`Error::NotModerator`] if the actor is not a moderator
    pub fn disband(&mut self, moderator: ParticipantId) -> Result<Vec<ParticipantId>> {
        let party = self.moderated_party(moderator)?;
        let members = self.handle(party)?.players();
        self.remove_party(party);
        info!(target: "arcade::party", party = %party, moderator = %moderator, members = members.len(), "Party disbanded");
        Ok(members)
    }

    /// Moderators and players of a party with their online status
    ///
    /// # Errors
    ///
    /// [`Error::UnknownParty`] for a stale id.
    pub fn roster(&mut self, party: PartyId) -> Result<PartyRoster> {
        let host = self.host.clone();
        let handle = self.handle(party)?;
        let mut roster = PartyRoster::default();
        for participant in handle.players() {
            let entry = RosterEntry {
                participant,
                online: host.is_online(participant),
            };
            if handle.is_moderator(participant) {
                roster.moderators.push(entry);
            } else {
                roster.players.push(entry);
            }
        }
        Ok(roster)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn handle(&mut self, party: PartyId) -> Result<PartyHandle<'_>> {
        self.party(party).ok_or(Error::UnknownParty { party })
    }

    fn moderated_party(&self, moderator: ParticipantId) -> Result<PartyId> {
        let party = self.party_of(moderator).ok_or(Error::NotInParty {
            participant: moderator,
        })?;
        let is_moderator = self
            .party_state(party)
            .is_some_and(|state| state.moderators().contains(&moderator));
        if !is_moderator {
            return Err(Error::NotModerator {
                participant: moderator,
            });
        }
        Ok(party)
    }

    fn joinable_party(&self, participant: ParticipantId, host_member: ParticipantId) -> Result<PartyId> {
        if self.party_of(participant).is_some() {
            return Err(Error::AlreadyInParty { participant });
        }
        let party = self.party_of(host_member).ok_or(Error::NotInParty {
            participant: host_member,
        })?;
        if let Some(limit) = self.config.max_party_size {
            if self.registry.party_size(party) >= limit {
                return Err(Error::PartyFull { party, limit });
            }
        }
        Ok(party)
    }

    /// Remove a member, hand moderation on if needed, drop the party if empty
    fn remove_member(&mut self, party: PartyId, participant: ParticipantId) -> Result<()> {
        let auto_promote = self.config.auto_promote_on_moderator_leave;
        let mut handle = self.handle(party)?;
        let was_moderator = handle.is_moderator(participant);
        handle.remove(participant);
        if auto_promote && was_moderator && handle.moderators().is_empty() {
            if let Some(successor) = handle.players().first().copied() {
                handle.promote(successor)?;
                info!(target: "arcade::party", party = %party, successor = %successor, "Moderator auto-promoted");
            }
        }
        self.prune_parties();
        Ok(())
    }
}
