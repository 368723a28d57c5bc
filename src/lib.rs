//! Arcade - party and game membership coordination for multiplayer servers
//!
//! Arcade keeps two kinds of membership consistent for a game server:
//! parties (groups that queue together) and sessions (running games), and
//! keeps every session member's scoreboard in sync as membership changes.
//!
//! # Quick Start
//!
//! ```ignore
//! use arcade::{GameCoordinator, Game, EngineConfig};
//! use std::sync::Arc;
//!
//! let mut coordinator = GameCoordinator::new(Arc::new(my_host), EngineConfig::default())?;
//!
//! // alice invites bob; alice's party is created on the fly
//! coordinator.invite(alice, bob)?;
//! coordinator.join(bob, alice)?;
//!
//! // seat the whole party in a new game
//! let session = coordinator.create_session(Box::new(MyGame::default()));
//! let party = coordinator.party_of(alice).unwrap();
//! coordinator.add_party_to_session(party, session)?;
//!
//! // from the host's main loop and listeners
//! coordinator.tick();
//! coordinator.dispatch(&event);
//! ```
//!
//! # Architecture
//!
//! - `arcade-core`: ids, errors, the [`Host`] trait, display types
//! - `arcade-scoreboard`: per-viewer panes and the session synchronizer
//! - `arcade-engine`: registry, parties, sessions, coordinator, config

pub use arcade_core::*;
pub use arcade_engine::*;
pub use arcade_scoreboard::{DisplayPane, ScoreboardSynchronizer, SharedOptions};
