//! The coordinator shared between threads

use crate::common::*;
use arcade::SharedCoordinator;
use std::thread;

#[test]
fn events_from_many_threads_are_all_delivered() {
    let (coordinator, host) = coordinator();
    let shared = SharedCoordinator::new(coordinator);
    let (game, log) = ScriptedGame::new();
    let session = shared.create_session(Box::new(game));
    let players: Vec<ParticipantId> = (0..8).map(|i| host.join(&format!("p{}", i))).collect();
    shared.with(|c| {
        let mut handle = c.session(session).unwrap();
        for p in &players {
            handle.add(*p).unwrap();
        }
    });

    let handles: Vec<_> = players
        .iter()
        .map(|p| {
            let shared = shared.clone();
            let p = *p;
            thread::spawn(move || {
                for _ in 0..25 {
                    shared.dispatch(&GameEvent::ToggleFlight {
                        participant: p,
                        flying: false,
                    });
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(log.lock().events.len(), 8 * 25);
    assert_eq!(shared.with(|c| c.metrics().events_dispatched), 200);
}

#[test]
fn ticks_and_closes_through_the_wrapper() {
    let (coordinator, host) = coordinator();
    let shared = SharedCoordinator::new(coordinator);
    let alice = host.join("alice");
    let (game, log) = ScriptedGame::new();
    let session = shared.create_session(Box::new(game));
    shared.with(|c| c.session(session).unwrap().add(alice).unwrap());

    shared.tick();
    assert_eq!(shared.session_of(alice), Some(session));
    assert!(shared.close_session(session));
    assert_eq!(shared.session_of(alice), None);
    assert_eq!(log.lock().ticks, 1);
}
