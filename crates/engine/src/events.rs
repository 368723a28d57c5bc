//! Platform events routed to game sessions
//!
//! Every variant except [`GameEvent::EntityChangeBlock`] is actor-scoped: it
//! names the participant whose session should receive it. Entity-change-block
//! events have no participant actor and are broadcast to every live session.

use arcade_core::{BlockPos, EntityRef, Location, ParticipantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant's game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Normal play
    Survival,
    /// Unlimited resources and flight
    Creative,
    /// Cannot modify the world
    Adventure,
    /// Invisible observer
    Spectator,
}

/// Which hand or action an interaction used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractAction {
    /// Left click on a block
    LeftClickBlock,
    /// Right click on a block
    RightClickBlock,
    /// Left click in the air
    LeftClickAir,
    /// Right click in the air
    RightClickAir,
    /// Stepping on a pressure plate or similar
    Physical,
}

/// A notification from the host platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// The participant connected to the server
    Join {
        /// Connecting participant
        participant: ParticipantId,
    },
    /// The participant disconnected
    Quit {
        /// Disconnecting participant
        participant: ParticipantId,
    },
    /// The participant moved
    Move {
        /// Moving participant
        participant: ParticipantId,
        /// Position before the move
        from: Location,
        /// Position after the move
        to: Location,
    },
    /// The participant dropped an item
    DropItem {
        /// Dropping participant
        participant: ParticipantId,
        /// Item type identifier
        item: String,
        /// Stack size
        amount: u32,
    },
    /// The participant's game mode is about to change
    GameModeChange {
        /// Affected participant
        participant: ParticipantId,
        /// Requested mode
        new_mode: GameMode,
    },
    /// The participant toggled flight
    ToggleFlight {
        /// Flying participant
        participant: ParticipantId,
        /// Whether flight is being enabled
        flying: bool,
    },
    /// The participant interacted with a block or the air
    Interact {
        /// Interacting participant
        participant: ParticipantId,
        /// Interaction kind
        action: InteractAction,
        /// Clicked block, if any
        block: Option<BlockPos>,
    },
    /// The participant interacted with an entity
    InteractEntity {
        /// Interacting participant
        participant: ParticipantId,
        /// Clicked entity
        target: EntityRef,
    },
    /// The participant manipulated an armor stand
    ArmorStandManipulate {
        /// Interacting participant
        participant: ParticipantId,
        /// Armor stand entity
        stand: EntityRef,
    },
    /// The participant shot a bow
    ShootBow {
        /// Shooter
        participant: ParticipantId,
        /// Draw force in `0.0..=1.0`
        force: f32,
    },
    /// A projectile shot by the participant hit something
    ProjectileHit {
        /// Shooter
        participant: ParticipantId,
        /// Entity that was hit, if any
        hit_entity: Option<EntityRef>,
        /// Block that was hit, if any
        hit_block: Option<BlockPos>,
    },
    /// The participant took damage
    Damage {
        /// Damaged participant
        participant: ParticipantId,
        /// Damage cause identifier
        cause: String,
        /// Damage amount
        amount: f64,
    },
    /// The participant was damaged by another entity
    DamageByEntity {
        /// Damaged participant
        participant: ParticipantId,
        /// Attacking entity
        damager: EntityRef,
        /// Damage amount
        amount: f64,
    },
    /// The participant placed a block
    BlockPlace {
        /// Placing participant
        participant: ParticipantId,
        /// Placed block position
        block: BlockPos,
        /// Placed material identifier
        material: String,
    },
    /// The participant broke a block
    BlockBreak {
        /// Breaking participant
        participant: ParticipantId,
        /// Broken block position
        block: BlockPos,
    },
    /// An entity changed a block (falling sand, endermen, ...)
    EntityChangeBlock {
        /// Entity causing the change
        entity: EntityRef,
        /// Changed block
        block: BlockPos,
        /// Material the block becomes
        to: String,
    },
}

/// Discriminant of a [`GameEvent`], for logging and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// [`GameEvent::Join`]
    Join,
    /// [`GameEvent::Quit`]
    Quit,
    /// [`GameEvent::Move`]
    Move,
    /// [`GameEvent::DropItem`]
    DropItem,
    /// [`GameEvent::GameModeChange`]
    GameModeChange,
    /// [`GameEvent::ToggleFlight`]
    ToggleFlight,
    /// [`GameEvent::Interact`]
    Interact,
    /// [`GameEvent::InteractEntity`]
    InteractEntity,
    /// [`GameEvent::ArmorStandManipulate`]
    ArmorStandManipulate,
    /// [`GameEvent::ShootBow`]
    ShootBow,
    /// [`GameEvent::ProjectileHit`]
    ProjectileHit,
    /// [`GameEvent::Damage`]
    Damage,
    /// [`GameEvent::DamageByEntity`]
    DamageByEntity,
    /// [`GameEvent::BlockPlace`]
    BlockPlace,
    /// [`GameEvent::BlockBreak`]
    BlockBreak,
    /// [`GameEvent::EntityChangeBlock`]
    EntityChangeBlock,
}

impl EventKind {
    /// Stable snake_case name
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Join => "join",
            EventKind::Quit => "quit",
            EventKind::Move => "move",
            EventKind::DropItem => "drop_item",
            EventKind::GameModeChange => "game_mode_change",
            EventKind::ToggleFlight => "toggle_flight",
            EventKind::Interact => "interact",
            EventKind::InteractEntity => "interact_entity",
            EventKind::ArmorStandManipulate => "armor_stand_manipulate",
            EventKind::ShootBow => "shoot_bow",
            EventKind::ProjectileHit => "projectile_hit",
            EventKind::Damage => "damage",
            EventKind::DamageByEntity => "damage_by_entity",
            EventKind::BlockPlace => "block_place",
            EventKind::BlockBreak => "block_break",
            EventKind::EntityChangeBlock => "entity_change_block",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GameEvent {
    /// The event's discriminant
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Join { .. } => EventKind::Join,
            GameEvent::Quit { .. } => EventKind::Quit,
            GameEvent::Move { .. } => EventKind::Move,
            GameEvent::DropItem { .. } => EventKind::DropItem,
            GameEvent::GameModeChange { .. } => EventKind::GameModeChange,
            GameEvent::ToggleFlight { .. } => EventKind::ToggleFlight,
            GameEvent::Interact { .. } => EventKind::Interact,
            GameEvent::InteractEntity { .. } => EventKind::InteractEntity,
            GameEvent::ArmorStandManipulate { .. } => EventKind::ArmorStandManipulate,
            GameEvent::ShootBow { .. } => EventKind::ShootBow,
            GameEvent::ProjectileHit { .. } => EventKind::ProjectileHit,
            GameEvent::Damage { .. } => EventKind::Damage,
            GameEvent::DamageByEntity { .. } => EventKind::DamageByEntity,
            GameEvent::BlockPlace { .. } => EventKind::BlockPlace,
            GameEvent::BlockBreak { .. } => EventKind::BlockBreak,
            GameEvent::EntityChangeBlock { .. } => EventKind::EntityChangeBlock,
        }
    }

    /// The participant whose session receives this event
    ///
    /// `None` for world-scoped events.
    pub fn actor(&self) -> Option<ParticipantId> {
        match self {
            GameEvent::Join { participant }
            | GameEvent::Quit { participant }
            | GameEvent::Move { participant, .. }
            | GameEvent::DropItem { participant, .. }
            | GameEvent::GameModeChange { participant, .. }
            | GameEvent::ToggleFlight { participant, .. }
            | GameEvent::Interact { participant, .. }
            | GameEvent::InteractEntity { participant, .. }
            | GameEvent::ArmorStandManipulate { participant, .. }
            | GameEvent::ShootBow { participant, .. }
            | GameEvent::ProjectileHit { participant, .. }
            | GameEvent::Damage { participant, .. }
            | GameEvent::DamageByEntity { participant, .. }
            | GameEvent::BlockPlace { participant, .. }
            | GameEvent::BlockBreak { participant, .. } => Some(*participant),
            GameEvent::EntityChangeBlock { .. } => None,
        }
    }

    /// Whether the event is broadcast to every live session
    pub fn is_world_scoped(&self) -> bool {
        self.actor().is_none()
    }
}

/// What a game wants the host to do with the platform event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    /// Let the event proceed
    #[default]
    Continue,
    /// Cancel the platform event
    Cancel,
}

impl EventOutcome {
    /// Combine outcomes of several receivers; any cancel wins
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        if self.is_cancelled() || other.is_cancelled() {
            EventOutcome::Cancel
        } else {
            EventOutcome::Continue
        }
    }

    /// Whether the event should be cancelled
    pub fn is_cancelled(self) -> bool {
        self == EventOutcome::Cancel
    }
}
