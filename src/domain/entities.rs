// Domain entities: ships, debris, players, and their identities.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::domain::grid::Position;
use crate::domain::tuning::ship::ShipTuning;

/// Identity of a player in a room roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(Arc<str>);

/// Identity of a board entity (ship or debris).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

/// Identity of a game room in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(Arc<str>);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Generates a fresh random identity.
            pub fn generate() -> Self {
                Self(Arc::from(uuid::Uuid::new_v4().to_string().as_str()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(Arc::from(value))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(Arc::from(value.as_str()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PlayerId);
string_id!(EntityId);
string_id!(RoomId);

/// Ship hull classes with distinct tuning (see `domain::tuning::ship`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipClass {
    Fighter,
    Cruiser,
}

/// Inert debris kinds. Debris never acts, only absorbs hits or blocks cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebrisKind {
    Asteroid,
    Satellite,
}

/// A player-owned ship on the board.
#[derive(Debug, Clone)]
pub struct Ship {
    pub id: EntityId,
    pub class: ShipClass,
    pub position: Position,
    pub hull: u32,
    /// Per-ship pool consumed by MOVE/ATTACK; distinct from the owner's
    /// donation pool. Refilled on turn rotation.
    pub action_points: u32,
    pub owner: PlayerId,
}

impl Ship {
    /// Builds a fresh ship at class-maximum hull and action points.
    pub fn spawn(class: ShipClass, position: Position, owner: PlayerId) -> Self {
        let tuning = ShipTuning::of(class);
        Self {
            id: EntityId::generate(),
            class,
            position,
            hull: tuning.max_hull,
            action_points: tuning.max_action_points,
            owner,
        }
    }
}

/// Passive obstacle on the board.
#[derive(Debug, Clone)]
pub struct Debris {
    pub id: EntityId,
    pub kind: DebrisKind,
    pub position: Position,
    pub hull: u32,
}

impl Debris {
    pub fn spawn(kind: DebrisKind, position: Position) -> Self {
        let hull = match kind {
            DebrisKind::Asteroid => 6,
            DebrisKind::Satellite => 3,
        };
        Self {
            id: EntityId::generate(),
            kind,
            position,
            hull,
        }
    }
}

/// Any live board occupant.
#[derive(Debug, Clone)]
pub enum Entity {
    Ship(Ship),
    Debris(Debris),
}

/// Result of applying damage to an entity's hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive { hull: u32 },
    Destroyed,
}

impl Entity {
    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Ship(ship) => &ship.id,
            Entity::Debris(debris) => &debris.id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Entity::Ship(ship) => ship.position,
            Entity::Debris(debris) => debris.position,
        }
    }

    pub fn hull(&self) -> u32 {
        match self {
            Entity::Ship(ship) => ship.hull,
            Entity::Debris(debris) => debris.hull,
        }
    }

    /// Reduces hull by `damage` and reports whether the entity survived.
    /// The caller removes `Destroyed` entities from the store in the same
    /// resolution step.
    pub fn apply_damage(&mut self, damage: u32) -> Vitality {
        let hull = match self {
            Entity::Ship(ship) => &mut ship.hull,
            Entity::Debris(debris) => &mut debris.hull,
        };
        *hull = hull.saturating_sub(damage);
        if *hull == 0 {
            Vitality::Destroyed
        } else {
            Vitality::Alive { hull: *hull }
        }
    }
}

/// Roster entry: holds the player-level donation pool and regen bookkeeping.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Donation currency, regenerated by action time windows.
    pub action_points: u32,
    /// Timestamp of the last regeneration window credited to this player.
    pub last_point_gain: SystemTime,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, joined_at: SystemTime) -> Self {
        Self {
            id,
            name: name.into(),
            action_points: 0,
            last_point_gain: joined_at,
        }
    }
}
