//! Party Operation Tests
//!
//! Invite, join, take over, leave, kick and disband as a command layer
//! would drive them.

use crate::common::*;

#[test]
fn invite_then_join_flow() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");

    assert_eq!(coordinator.party_count(), 0);
    assert!(coordinator.invite(alice, bob).unwrap());
    assert_eq!(coordinator.party_count(), 1);

    let party = coordinator.join(bob, alice).unwrap();
    let roster = coordinator.roster(party).unwrap();
    assert_eq!(roster.moderators.len(), 1);
    assert_eq!(roster.moderators[0].participant, alice);
    assert_eq!(roster.players.len(), 1);
    assert_eq!(roster.players[0].participant, bob);
    assert!(roster.players[0].online);
}

#[test]
fn join_without_invitation_is_refused() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");
    let carol = host.join("carol");
    coordinator.invite(alice, bob).unwrap();

    let err = coordinator.join(carol, alice).unwrap_err();
    assert!(matches!(err, Error::NotInvited { participant, .. } if participant == carol));
    assert_eq!(coordinator.party_of(carol), None);
}

#[test]
fn take_over_promotes_without_invitation() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let admin = host.join("admin");
    coordinator.invite(alice, host.join("bob")).unwrap();

    let party = coordinator.take_over(admin, alice).unwrap();
    let roster = coordinator.roster(party).unwrap();
    let moderators: Vec<ParticipantId> = roster.moderators.iter().map(|e| e.participant).collect();
    assert_eq!(moderators, vec![alice, admin]);
}

#[test]
fn kicked_moderator_hands_over_to_longest_member() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");
    let carol = host.join("carol");
    coordinator.invite(alice, bob).unwrap();
    coordinator.invite(alice, carol).unwrap();
    coordinator.join(carol, alice).unwrap();
    coordinator.join(bob, alice).unwrap();
    coordinator.promote_member(alice, bob).unwrap();

    // bob kicks alice; bob is still a moderator so nobody else is promoted
    coordinator.kick(bob, alice).unwrap();
    let party = coordinator.party_of(bob).unwrap();
    let roster = coordinator.roster(party).unwrap();
    assert_eq!(roster.moderators.len(), 1);
    assert_eq!(roster.moderators[0].participant, bob);

    // bob leaves as the last moderator; carol is the only one left
    coordinator.leave(bob).unwrap();
    let roster = coordinator.roster(party).unwrap();
    assert_eq!(roster.moderators[0].participant, carol);
    assert!(roster.players.is_empty());
}

#[test]
fn disband_clears_every_membership() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");
    coordinator.invite(alice, bob).unwrap();
    coordinator.join(bob, alice).unwrap();

    let members = coordinator.disband(alice).unwrap();
    assert_eq!(members, vec![alice, bob]);
    assert_eq!(coordinator.party_of(alice), None);
    assert_eq!(coordinator.party_of(bob), None);
    assert_eq!(coordinator.party_count(), 0);
    assert_eq!(coordinator.metrics().parties_dropped, 1);
}

#[test]
fn policy_errors_name_the_offender() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");

    assert_eq!(
        coordinator.leave(alice).unwrap_err().to_string(),
        format!("{} is not in a party", alice)
    );
    coordinator.invite(alice, bob).unwrap();
    coordinator.join(bob, alice).unwrap();
    assert_eq!(
        coordinator.disband(bob).unwrap_err().to_string(),
        format!("{} is not a party moderator", bob)
    );
}
