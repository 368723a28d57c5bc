//! Core types for arcade
//!
//! This module defines the foundational types:
//! - ParticipantId: Stable identity of a player, owned by the host
//! - PartyId / SessionId: Arena keys handed out by the coordinator
//! - Location / BlockPos / EntityRef: Positional payloads carried by game events

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a participant
///
/// A ParticipantId is a wrapper around a UUID. The core never owns
/// participants; it only references them by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Create a new random ParticipantId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID issued by the host
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a ParticipantId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse a ParticipantId from a string representation
    ///
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arena key of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartyId(u64);

impl PartyId {
    /// Wrap a raw counter value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "party-{}", self.0)
    }
}

/// Arena key of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    /// Wrap a raw counter value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// A position with orientation in a named world
///
/// Deserializes from configuration sections of the form
/// `{ world = "lobby", x = 0.5, y = 64.0, z = 0.5, yaw = 90.0, pitch = 0.0 }`;
/// `yaw` and `pitch` default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// World name
    pub world: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Horizontal rotation in degrees
    #[serde(default)]
    pub yaw: f32,
    /// Vertical rotation in degrees
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    /// Create a location without rotation
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// The block containing this location
    pub fn block(&self) -> BlockPos {
        BlockPos {
            world: self.world.clone(),
            x: self.x.floor() as i64,
            y: self.y.floor() as i64,
            z: self.z.floor() as i64,
        }
    }
}

/// Integer block coordinates in a named world
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// World name
    pub world: String,
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
    /// Z coordinate
    pub z: i64,
}

/// Reference to a world entity as seen by game events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    /// Another participant
    Participant(ParticipantId),
    /// Any other entity, by host-assigned id
    Other(Uuid),
}

impl EntityRef {
    /// The participant behind this entity, if it is one
    pub fn participant(&self) -> Option<ParticipantId> {
        match self {
            EntityRef::Participant(p) => Some(*p),
            EntityRef::Other(_) => None,
        }
    }
}
