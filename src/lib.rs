//! Authoritative session engine for grid-based space combat.
//!
//! Players command ships on a shared grid, spending regenerating action
//! points to move, attack, or donate to allies. The engine owns validation,
//! resolution, the point economy, and per-room serialization of concurrent
//! submissions; transport, matchmaking, and rendering live with the
//! embedding host.

pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{
    Action, ActionOutcome, ActionTimeWindow, DebrisKind, EntityId, GameEnded, GridSize,
    InvariantViolation, OutcomeKind, PlayerId, Position, RoomId, RoomStatus, ShipClass,
    ValidationError,
};
pub use use_cases::{
    ActionError, RegistryError, RoomConfig, RoomEvent, RoomRegistry, RoomSettings, RoomSnapshot,
    SessionError,
};
