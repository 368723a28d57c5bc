//! Line diff behavior as seen by a client
//!
//! Each test seats one viewer in a session, pushes two line sets and counts
//! the operations the second push produced.

use crate::common::*;

fn seated() -> (GameCoordinator, std::sync::Arc<RecordingHost>, SessionId, ParticipantId) {
    let (mut coordinator, host) = coordinator();
    let viewer = host.join("viewer");
    let session = coordinator.create_session(Box::new(ScriptedGame::default()));
    coordinator.session(session).unwrap().add(viewer).unwrap();
    (coordinator, host, session, viewer)
}

/// Ops the viewer received while `f` ran
fn ops_during(
    coordinator: &mut GameCoordinator,
    host: &RecordingHost,
    viewer: ParticipantId,
    f: impl FnOnce(&mut GameCoordinator),
) -> usize {
    let before = host.view(viewer).ops_received;
    f(coordinator);
    host.view(viewer).ops_received - before
}

#[test]
fn first_lines_render_top_down() {
    let (mut coordinator, host, session, viewer) = seated();
    coordinator
        .session(session)
        .unwrap()
        .set_scoreboard_lines_for(viewer, ["Kills: 0", "Deaths: 0", "Time: 0:00"]);

    let view = host.view(viewer);
    assert_eq!(view.sidebar(), vec!["Kills: 0", "Deaths: 0", "Time: 0:00"]);
    assert_eq!(view.scores["Kills: 0"], 3);
    assert_eq!(view.scores["Time: 0:00"], 1);
}

#[test]
fn identical_lines_send_nothing() {
    let (mut coordinator, host, session, viewer) = seated();
    coordinator.session(session).unwrap().set_scoreboard_lines_for(viewer, ["A", "B", "C"]);

    let sent = ops_during(&mut coordinator, &host, viewer, |c| {
        c.session(session).unwrap().set_scoreboard_lines_for(viewer, ["A", "B", "C"]);
    });
    assert_eq!(sent, 0);
}

#[test]
fn swapped_lines_rewrite_both() {
    let (mut coordinator, host, session, viewer) = seated();
    coordinator.session(session).unwrap().set_scoreboard_lines_for(viewer, ["A", "B"]);

    let sent = ops_during(&mut coordinator, &host, viewer, |c| {
        c.session(session).unwrap().set_scoreboard_lines_for(viewer, ["B", "A"]);
    });
    assert_eq!(sent, 2);
    assert_eq!(host.view(viewer).sidebar(), vec!["B", "A"]);
}

#[test]
fn dropped_line_is_reset_and_survivor_kept() {
    let (mut coordinator, host, session, viewer) = seated();
    coordinator.session(session).unwrap().set_scoreboard_lines_for(viewer, ["A", "B"]);

    let sent = ops_during(&mut coordinator, &host, viewer, |c| {
        c.session(session).unwrap().set_scoreboard_lines_for(viewer, ["A"]);
    });
    // one reset for B; A keeps its old score and still renders on top
    assert_eq!(sent, 1);
    assert_eq!(host.view(viewer).sidebar(), vec!["A"]);
}

#[test]
fn repeated_text_shows_twice() {
    let (mut coordinator, host, session, viewer) = seated();
    coordinator.session(session).unwrap().set_scoreboard_lines_for(viewer, ["X", "X"]);

    let view = host.view(viewer);
    assert_eq!(view.scores.len(), 2);
    let sidebar = view.sidebar();
    assert_eq!(sidebar[0], "X");
    assert!(sidebar[1].starts_with('X'));
    assert_ne!(sidebar[0], sidebar[1]);
}

#[test]
fn emptying_the_sidebar_resets_everything() {
    let (mut coordinator, host, session, viewer) = seated();
    coordinator.session(session).unwrap().set_scoreboard_lines_for(viewer, ["A", "B", "C"]);
    coordinator
        .session(session)
        .unwrap()
        .set_scoreboard_lines_for(viewer, Vec::<String>::new());

    assert!(host.view(viewer).scores.is_empty());
}

#[test]
fn untracked_viewer_is_reported() {
    let (mut coordinator, host, session, _viewer) = seated();
    let stranger = host.join("stranger");
    assert!(!coordinator
        .session(session)
        .unwrap()
        .set_scoreboard_lines_for(stranger, ["A"]));
    assert_eq!(host.view(stranger).ops_received, 0);
}
