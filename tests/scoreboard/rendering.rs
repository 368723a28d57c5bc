//! Titles, team entries and periodic re-render across viewers

use crate::common::*;

#[test]
fn every_viewer_sees_every_member_entry() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    {
        let mut handle = coordinator.session(session).unwrap();
        handle.add(alice).unwrap();
        handle.add(bob).unwrap();
    }

    for viewer in [alice, bob] {
        let entries = host.view(viewer).entries;
        assert!(entries.contains("alice"));
        assert!(entries.contains("bob"));
        assert_eq!(host.display(viewer), Some(ActiveDisplay::Session(session)));
    }
}

#[test]
fn removed_member_disappears_from_remaining_panes() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    {
        let mut handle = coordinator.session(session).unwrap();
        handle.add(alice).unwrap();
        handle.add(bob).unwrap();
        assert!(handle.remove(bob));
    }

    assert!(!host.view(alice).entries.contains("bob"));
    assert_eq!(host.display(bob), Some(ActiveDisplay::Default));
}

#[test]
fn shared_title_and_lines_reach_late_joiners() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let bob = host.join("bob");
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    {
        let mut handle = coordinator.session(session).unwrap();
        handle.add(alice).unwrap();
        handle.set_scoreboard_title("Spleef");
        handle.set_scoreboard_lines(["Round 1", "Players: 1"]);
        handle.add(bob).unwrap();
    }

    for viewer in [alice, bob] {
        let view = host.view(viewer);
        assert_eq!(view.title.as_deref(), Some("Spleef"));
        assert_eq!(view.sidebar(), vec!["Round 1", "Players: 1"]);
    }
}

#[test]
fn offline_member_is_tracked_by_id_fallback() {
    let (mut coordinator, host) = coordinator();
    let alice = host.join("alice");
    let ghost = ParticipantId::new();
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    {
        let mut handle = coordinator.session(session).unwrap();
        handle.add(alice).unwrap();
        handle.add(ghost).unwrap();
    }

    assert!(host.view(alice).entries.contains(&ghost.to_string()));
    assert_eq!(host.display(ghost), None);
}

#[test]
fn periodic_update_renders_game_lines() {
    let config = EngineConfig {
        scoreboard_interval_ticks: 5,
        ..EngineConfig::default()
    };
    let (mut coordinator, host) = coordinator_with(config);
    let alice = host.join("alice");
    let bob = host.join("bob");

    let (mut game, _log) = ScriptedGame::new();
    game.lines.insert(alice, vec!["You: alice".to_string(), "Score: 3".to_string()]);
    let session = coordinator.create_session(Box::new(game));
    {
        let mut handle = coordinator.session(session).unwrap();
        handle.add(alice).unwrap();
        handle.add(bob).unwrap();
    }

    for _ in 0..4 {
        coordinator.tick();
    }
    assert!(host.view(alice).scores.is_empty());

    coordinator.tick();
    assert_eq!(host.view(alice).sidebar(), vec!["You: alice", "Score: 3"]);
    // no lines for bob: his pane keeps what it had
    assert!(host.view(bob).scores.is_empty());
}

#[test]
fn periodic_update_with_unchanged_lines_is_quiet() {
    let config = EngineConfig {
        scoreboard_interval_ticks: 1,
        ..EngineConfig::default()
    };
    let (mut coordinator, host) = coordinator_with(config);
    let alice = host.join("alice");

    let (mut game, _log) = ScriptedGame::new();
    game.lines.insert(alice, vec!["steady".to_string()]);
    let session = coordinator.create_session(Box::new(game));
    coordinator.session(session).unwrap().add(alice).unwrap();

    coordinator.tick();
    let after_first = host.view(alice).ops_received;
    coordinator.tick();
    coordinator.tick();
    assert_eq!(host.view(alice).ops_received, after_first);
}
