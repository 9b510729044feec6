// Use-case level inputs/outputs for the room session coordinator.

use crate::domain::room::SetupError;
use crate::domain::systems::regen::RegenReport;
use crate::domain::{
    ActionOutcome, ActionTimeWindow, Debris, GameRoom, GridSize, InvariantViolation, PlayerId,
    RoomId, RoomStatus, Ship, ValidationError,
};

/// Why a submitted action was not resolved. Everything except `Invariant`
/// leaves the room usable; `Invariant` freezes it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("room not found")]
    UnknownRoom,
    #[error("room is not accepting actions yet")]
    RoomNotPlaying,
    #[error("game is over")]
    GameOver,
    #[error("it is another player's turn")]
    NotYourTurn,
    #[error("room is frozen after an invariant violation")]
    RoomFrozen,
    #[error("action rejected: {0}")]
    Rejected(#[from] ValidationError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Errors from the setup surface (join/place/start) routed through the
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("room not found")]
    UnknownRoom,
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Errors returned by registry-level room management.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("room already exists and cannot be re-created")]
    AlreadyExists,
}

/// Configuration the session/lobby layer supplies when constructing a room.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub name: String,
    pub grid: GridSize,
    /// Regeneration schedule; ticks credit a window once its end passes.
    pub windows: Vec<ActionTimeWindow>,
}

/// State-change notifications broadcast to room subscribers.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// The room left `Waiting` and accepts actions.
    Started { first_turn: PlayerId },
    /// An action resolved; carries the delta and the next actor.
    ActionResolved {
        player: PlayerId,
        outcome: ActionOutcome,
        next_turn: Option<PlayerId>,
    },
    /// A regeneration tick credited at least one player.
    PointsRegenerated { report: RegenReport },
    /// Terminal transition; no further actions will be accepted.
    Finished { winner: Option<PlayerId> },
}

/// Read-only copy of a room for the presentation layer.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub name: String,
    pub status: RoomStatus,
    pub grid: GridSize,
    pub current_turn: Option<PlayerId>,
    pub players: Vec<PlayerView>,
    pub ships: Vec<Ship>,
    pub debris: Vec<Debris>,
}

/// Player roster entry as exposed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub action_points: u32,
}

impl From<&GameRoom> for RoomSnapshot {
    fn from(room: &GameRoom) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            status: room.status(),
            grid: room.grid,
            current_turn: room.current_turn().cloned(),
            players: room
                .players()
                .iter()
                .map(|player| PlayerView {
                    id: player.id.clone(),
                    name: player.name.clone(),
                    action_points: player.action_points,
                })
                .collect(),
            ships: room.store.ships().cloned().collect(),
            debris: room.store.debris().cloned().collect(),
        }
    }
}
