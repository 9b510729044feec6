// Domain layer: the game model and its rules.

pub mod action;
pub mod entities;
pub mod grid;
pub mod room;
pub mod store;
pub mod systems;
pub mod tuning;

pub use action::{Action, ActionOutcome, GameEnded, OutcomeKind};
pub use entities::{
    Debris, DebrisKind, Entity, EntityId, Player, PlayerId, RoomId, Ship, ShipClass, Vitality,
};
pub use grid::{GridSize, Position};
pub use room::{ActionTimeWindow, GameRoom, RoomStatus, SetupError};
pub use store::{EntityStore, StoreError};
pub use systems::resolve::InvariantViolation;
pub use systems::validate::ValidationError;
