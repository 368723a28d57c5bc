//! Membership registry: who is in which party and which session
//!
//! The registry is the single source of truth for membership. Parties and
//! sessions keep no member sets of their own; they query the registry.
//!
//! Two independent slot maps are kept, one per membership kind. Each maps a
//! participant to at most one owner and keeps the reverse index (owner ->
//! members) inside the same operation, so the two directions cannot drift.
//! A participant may hold a party slot and a session slot at the same time.
//!
//! Every join is a check-then-set with no yield point in between. That is
//! atomic under the host's single-threaded tick model; multi-threaded hosts
//! wrap the whole coordinator in a [`crate::SharedCoordinator`].

use arcade_core::{ParticipantId, PartyId, SessionId};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use tracing::trace;

/// One membership kind: participant -> owner, with join order
#[derive(Debug)]
struct SlotMap<K> {
    owner_of: HashMap<ParticipantId, (K, u64)>,
    members: HashMap<K, BTreeSet<ParticipantId>>,
    next_seq: u64,
}

impl<K> Default for SlotMap<K> {
    fn default() -> Self {
        Self {
            owner_of: HashMap::new(),
            members: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> SlotMap<K> {
    fn join(&mut self, participant: ParticipantId, owner: K) -> bool {
        if self.owner_of.contains_key(&participant) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.owner_of.insert(participant, (owner, seq));
        self.members.entry(owner).or_default().insert(participant);
        true
    }

    fn leave(&mut self, participant: ParticipantId) -> Option<K> {
        let (owner, _) = self.owner_of.remove(&participant)?;
        if let Some(members) = self.members.get_mut(&owner) {
            members.remove(&participant);
            if members.is_empty() {
                self.members.remove(&owner);
            }
        }
        Some(owner)
    }

    fn owner(&self, participant: ParticipantId) -> Option<K> {
        self.owner_of.get(&participant).map(|(owner, _)| *owner)
    }

    /// Members of an owner, earliest join first
    fn members(&self, owner: K) -> Vec<ParticipantId> {
        let mut members: Vec<(u64, ParticipantId)> = self
            .members
            .get(&owner)
            .into_iter()
            .flatten()
            .filter_map(|p| self.owner_of.get(p).map(|(_, seq)| (*seq, *p)))
            .collect();
        members.sort_unstable();
        members.into_iter().map(|(_, p)| p).collect()
    }

    fn size(&self, owner: K) -> usize {
        self.members.get(&owner).map_or(0, BTreeSet::len)
    }

    fn owners(&self) -> impl Iterator<Item = K> + '_ {
        self.members.keys().copied()
    }

    fn len(&self) -> usize {
        self.owner_of.len()
    }
}

/// Authoritative party and session membership
#[derive(Debug, Default)]
pub struct MembershipRegistry {
    parties: SlotMap<PartyId>,
    sessions: SlotMap<SessionId>,
}

impl MembershipRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the participant's party slot for `party`
    ///
    /// Returns `false` if the slot is already claimed, including by `party`
    /// itself.
    pub fn join_party(&mut self, participant: ParticipantId, party: PartyId) -> bool {
        let joined = self.parties.join(participant, party);
        if joined {
            trace!(target: "arcade::registry", participant = %participant, party = %party, "Party slot claimed");
        }
        joined
    }

    /// Release the participant's party slot; `true` if it was claimed
    pub fn leave_party(&mut self, participant: ParticipantId) -> bool {
        match self.parties.leave(participant) {
            Some(party) => {
                trace!(target: "arcade::registry", participant = %participant, party = %party, "Party slot released");
                true
            }
            None => false,
        }
    }

    /// Claim the participant's session slot for `session`
    ///
    /// Returns `false` if the slot is already claimed, including by `session`
    /// itself.
    pub fn join_session(&mut self, participant: ParticipantId, session: SessionId) -> bool {
        let joined = self.sessions.join(participant, session);
        if joined {
            trace!(target: "arcade::registry", participant = %participant, session = %session, "Session slot claimed");
        }
        joined
    }

    /// Release the participant's session slot; `true` if it was claimed
    pub fn leave_session(&mut self, participant: ParticipantId) -> bool {
        match self.sessions.leave(participant) {
            Some(session) => {
                trace!(target: "arcade::registry", participant = %participant, session = %session, "Session slot released");
                true
            }
            None => false,
        }
    }

    /// The party holding the participant's slot
    pub fn party_of(&self, participant: ParticipantId) -> Option<PartyId> {
        self.parties.owner(participant)
    }

    /// The session holding the participant's slot
    pub fn session_of(&self, participant: ParticipantId) -> Option<SessionId> {
        self.sessions.owner(participant)
    }

    /// Whether the participant is in any party
    pub fn in_party(&self, participant: ParticipantId) -> bool {
        self.party_of(participant).is_some()
    }

    /// Whether the participant is in any session
    pub fn in_session(&self, participant: ParticipantId) -> bool {
        self.session_of(participant).is_some()
    }

    /// Members of a party, earliest join first
    pub fn party_members(&self, party: PartyId) -> Vec<ParticipantId> {
        self.parties.members(party)
    }

    /// Members of a session, earliest join first
    pub fn session_members(&self, session: SessionId) -> Vec<ParticipantId> {
        self.sessions.members(session)
    }

    /// Number of members in a party
    pub fn party_size(&self, party: PartyId) -> usize {
        self.parties.size(party)
    }

    /// Number of members in a session
    pub fn session_size(&self, session: SessionId) -> usize {
        self.sessions.size(session)
    }

    /// Sessions that currently hold at least one participant
    pub fn live_sessions(&self) -> BTreeSet<SessionId> {
        self.sessions.owners().collect()
    }

    /// Parties that currently hold at least one participant
    pub fn live_parties(&self) -> BTreeSet<PartyId> {
        self.parties.owners().collect()
    }

    /// Total number of claimed party slots
    pub fn party_slots(&self) -> usize {
        self.parties.len()
    }

    /// Total number of claimed session slots
    pub fn session_slots(&self) -> usize {
        self.sessions.len()
    }
}
