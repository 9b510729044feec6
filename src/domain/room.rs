// The GameRoom aggregate: roster, lifecycle status, turn pointer, board
// state, and the action-window schedule. All mutation goes through the
// session coordinator's per-room lock.

use std::time::SystemTime;

use crate::domain::entities::{
    Debris, DebrisKind, Entity, EntityId, Player, PlayerId, RoomId, Ship, ShipClass,
};
use crate::domain::grid::{GridSize, Position};
use crate::domain::store::EntityStore;
use crate::domain::tuning::economy::EconomyTuning;

/// Room lifecycle. Transitions are strictly forward:
/// `Waiting -> Playing -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

/// Interval after which a regeneration tick is credited (at `end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimeWindow {
    pub start: SystemTime,
    pub end: SystemTime,
}

/// Errors from pre-game setup calls (join, placement, start).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("room is no longer accepting setup changes")]
    RoomNotWaiting,
    #[error("player {0} is already in the roster")]
    DuplicatePlayer(PlayerId),
    #[error("player {0} is not in the roster")]
    UnknownPlayer(PlayerId),
    #[error("cannot start a room with an empty roster")]
    EmptyRoster,
    #[error("placement is outside the grid")]
    PlacementOutOfBounds,
    #[error("placement cell is occupied")]
    PlacementOccupied,
}

#[derive(Debug, Clone)]
pub struct GameRoom {
    pub id: RoomId,
    pub name: String,
    /// Join order; significant for turn rotation.
    players: Vec<Player>,
    pub grid: GridSize,
    status: RoomStatus,
    pub created_at: SystemTime,
    current_turn: Option<PlayerId>,
    pub store: EntityStore,
    pub windows: Vec<ActionTimeWindow>,
    pub economy: EconomyTuning,
    /// Set when an invariant violation is detected; the room rejects all
    /// further operations once frozen.
    frozen: bool,
}

impl GameRoom {
    pub fn new(id: RoomId, name: impl Into<String>, grid: GridSize, created_at: SystemTime) -> Self {
        Self {
            id,
            name: name.into(),
            players: Vec::new(),
            grid,
            status: RoomStatus::Waiting,
            created_at,
            current_turn: None,
            store: EntityStore::new(),
            windows: Vec::new(),
            economy: EconomyTuning::default(),
            frozen: false,
        }
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Marks the room dead after an invariant violation. One-way.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn current_turn(&self) -> Option<&PlayerId> {
        self.current_turn.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == id)
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| &player.id == id)
    }

    /// Adds a player to the roster. Only legal while `Waiting`.
    pub fn join(&mut self, player: Player) -> Result<(), SetupError> {
        if self.status != RoomStatus::Waiting {
            return Err(SetupError::RoomNotWaiting);
        }
        if self.players.iter().any(|existing| existing.id == player.id) {
            return Err(SetupError::DuplicatePlayer(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    /// Places a ship for a roster player during setup.
    pub fn place_ship(
        &mut self,
        class: ShipClass,
        position: Position,
        owner: &PlayerId,
    ) -> Result<EntityId, SetupError> {
        if self.status != RoomStatus::Waiting {
            return Err(SetupError::RoomNotWaiting);
        }
        if self.player(owner).is_none() {
            return Err(SetupError::UnknownPlayer(owner.clone()));
        }
        if !self.grid.contains(position) {
            return Err(SetupError::PlacementOutOfBounds);
        }
        self.store
            .insert(Entity::Ship(Ship::spawn(class, position, owner.clone())))
            .map_err(|_| SetupError::PlacementOccupied)
    }

    /// Places debris during setup. Debris is unowned.
    pub fn place_debris(
        &mut self,
        kind: DebrisKind,
        position: Position,
    ) -> Result<EntityId, SetupError> {
        if self.status != RoomStatus::Waiting {
            return Err(SetupError::RoomNotWaiting);
        }
        if !self.grid.contains(position) {
            return Err(SetupError::PlacementOutOfBounds);
        }
        self.store
            .insert(Entity::Debris(Debris::spawn(kind, position)))
            .map_err(|_| SetupError::PlacementOccupied)
    }

    /// `Waiting -> Playing`: the first roster entry becomes the current
    /// actor and every ship pool refills to its class maximum. Returns the
    /// first actor.
    pub fn start(&mut self) -> Result<PlayerId, SetupError> {
        if self.status != RoomStatus::Waiting {
            return Err(SetupError::RoomNotWaiting);
        }
        let first = self.players.first().ok_or(SetupError::EmptyRoster)?.id.clone();
        let owners: Vec<PlayerId> = self.players.iter().map(|player| player.id.clone()).collect();
        for owner in &owners {
            self.store.refill_ship_points(owner);
        }
        self.current_turn = Some(first.clone());
        self.status = RoomStatus::Playing;
        Ok(first)
    }

    /// Rotates `current_turn` to the next roster player still owning ships,
    /// wrapping past the end, and refills that player's ship pools.
    /// Eliminated players are skipped.
    pub fn advance_turn(&mut self) {
        let Some(current) = self.current_turn.clone() else {
            return;
        };
        let Some(start) = self.players.iter().position(|player| player.id == current) else {
            return;
        };
        let count = self.players.len();
        for offset in 1..=count {
            let candidate = &self.players[(start + offset) % count];
            if self.store.ships_of(&candidate.id).next().is_some() {
                let next = candidate.id.clone();
                self.store.refill_ship_points(&next);
                self.current_turn = Some(next);
                return;
            }
        }
    }

    /// `Playing -> Finished`. Terminal, idempotent.
    pub fn finish(&mut self) {
        if self.status == RoomStatus::Playing {
            self.status = RoomStatus::Finished;
        }
    }

    /// Roster players that still own at least one ship.
    pub fn surviving_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| self.store.ships_of(&player.id).next().is_some())
            .collect()
    }
}
