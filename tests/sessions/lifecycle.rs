//! Seating and closing sessions

use crate::common::*;

/// alice and bob in one party, alice moderating
fn party_of_two(coordinator: &mut GameCoordinator, host: &RecordingHost) -> (PartyId, ParticipantId, ParticipantId) {
    let alice = host.join("alice");
    let bob = host.join("bob");
    coordinator.invite(alice, bob).unwrap();
    let party = coordinator.join(bob, alice).unwrap();
    (party, alice, bob)
}

#[test]
fn party_is_seated_and_released_on_close() {
    let (mut coordinator, host) = coordinator();
    let (party, alice, bob) = party_of_two(&mut coordinator, &host);
    let (game, log) = ScriptedGame::new();
    let session = coordinator.create_session(Box::new(game));
    assert!(log.lock().started);

    assert_eq!(coordinator.add_party_to_session(party, session).unwrap(), 2);
    assert_eq!(coordinator.session_of(alice), Some(session));
    assert_eq!(coordinator.session_of(bob), Some(session));
    assert_eq!(coordinator.party_state(party).unwrap().session(), Some(session));

    assert!(coordinator.close_session(session));
    assert!(log.lock().closed);
    for p in [alice, bob] {
        assert_eq!(coordinator.session_of(p), None);
        assert_eq!(host.display(p), Some(ActiveDisplay::Default));
        // party membership outlives the session
        assert_eq!(coordinator.party_of(p), Some(party));
    }
    assert_eq!(coordinator.party_state(party).unwrap().session(), None);
    assert_eq!(coordinator.session_count(), 0);
}

#[test]
fn add_all_skips_members_already_seated() {
    let (mut coordinator, host) = coordinator();
    let (party, alice, _bob) = party_of_two(&mut coordinator, &host);
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));

    let mut handle = coordinator.session(session).unwrap();
    handle.add(alice).unwrap();
    assert_eq!(handle.add_all(party).unwrap(), 1);
    assert_eq!(handle.size(), 2);
    assert_eq!(handle.add_all(party).unwrap(), 0);
}

#[test]
fn add_all_stops_at_member_seated_elsewhere() {
    let (mut coordinator, host) = coordinator();
    let (party, _alice, bob) = party_of_two(&mut coordinator, &host);
    let elsewhere = coordinator.create_session(Box::new(ScriptedGame::default()));
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    coordinator.session(elsewhere).unwrap().add(bob).unwrap();

    let err = coordinator.add_party_to_session(party, session).unwrap_err();
    assert!(err.is_invalid_state());
    // alice joined first and stays seated
    assert_eq!(coordinator.session(session).unwrap().size(), 1);
    assert_eq!(coordinator.session_of(bob), Some(elsewhere));
}

#[test]
fn participant_cannot_be_seated_twice() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let first = coordinator.create_session(Box::new(ScriptedGame::default()));
    let second = coordinator.create_session(Box::new(ScriptedGame::default()));

    assert!(coordinator.session(first).unwrap().add(alice).unwrap());
    assert!(coordinator.session(first).unwrap().add(alice).unwrap_err().is_invalid_state());
    assert!(coordinator.session(second).unwrap().add(alice).unwrap_err().is_invalid_state());

    assert!(coordinator.session(first).unwrap().remove(alice));
    assert!(!coordinator.session(first).unwrap().remove(alice));
    assert!(coordinator.session(second).unwrap().add(alice).unwrap());
}

#[test]
fn closed_session_handle_refuses_changes() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));

    let mut handle = coordinator.session(session).unwrap();
    assert!(handle.close());
    assert!(!handle.close());
    assert!(handle.is_closed());
    assert!(matches!(handle.add(alice), Err(Error::SessionClosed { .. })));
    assert!(!handle.remove(alice));
    assert!(!handle.set_invisibility(true));
}

#[test]
fn stale_ids_are_reported() {
    let (mut coordinator, _host) = coordinator();
    let party = coordinator.create_party();
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    coordinator.close_session(session);

    assert!(!coordinator.close_session(session));
    assert!(coordinator.session(session).is_none());
    assert!(matches!(
        coordinator.add_party_to_session(party, session),
        Err(Error::UnknownSession { .. })
    ));
    assert!(matches!(
        coordinator.add_party_to_session(PartyId::from_raw(999), session),
        Err(Error::UnknownParty { .. })
    ));
}

#[test]
fn metrics_follow_lifecycle() {
    let (mut coordinator, host) = coordinator();
    let (_party, alice, _bob) = party_of_two(&mut coordinator, &host);
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    coordinator.close_session(session);
    coordinator.disband(alice).unwrap();

    let metrics = coordinator.metrics();
    assert_eq!(metrics.sessions_created, 1);
    assert_eq!(metrics.sessions_closed, 1);
    assert_eq!(metrics.live_sessions(), 0);
    assert_eq!(metrics.parties_created, 1);
    assert_eq!(metrics.live_parties(), 0);
}
