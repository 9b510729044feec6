// Room session coordination: one exclusive critical section per room, a
// registry keyed by room id, and event broadcast to subscribers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{error, info};

use crate::domain::entities::{Player, PlayerId, RoomId};
use crate::domain::grid::Position;
use crate::domain::room::{GameRoom, RoomStatus};
use crate::domain::systems::regen::{self, RegenReport};
use crate::domain::systems::{resolve, validate};
use crate::domain::{Action, ActionOutcome, DebrisKind, EntityId, ShipClass};
use crate::use_cases::types::{
    ActionError, RegistryError, RoomConfig, RoomEvent, RoomSnapshot, SessionError,
};

/// Shared configuration for newly created rooms.
#[derive(Debug, Clone)]
pub struct RoomSettings {
    /// Capacity for broadcast room events.
    pub event_channel_capacity: usize,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            event_channel_capacity: 128,
        }
    }
}

/// Per-room lock and event channel. Cloning shares the same room.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    pub room_id: RoomId,
    room: Arc<Mutex<GameRoom>>,
    events: broadcast::Sender<RoomEvent>,
}

impl RoomHandle {
    /// Subscribes to this room's state-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.events.subscribe()
    }
}

/// Thread-safe registry of active rooms. The map lock only guards handle
/// lookup; all room mutation serializes on the room's own mutex, so rooms
/// never contend with each other.
#[derive(Debug)]
pub struct RoomRegistry {
    settings: RoomSettings,
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
}

impl RoomRegistry {
    pub fn new(settings: RoomSettings) -> Self {
        Self {
            settings,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a room in `Waiting` status for the lobby layer to populate.
    pub async fn create_room(
        &self,
        room_id: RoomId,
        config: RoomConfig,
    ) -> Result<RoomHandle, RegistryError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room_id) {
            return Err(RegistryError::AlreadyExists);
        }

        let mut room = GameRoom::new(
            room_id.clone(),
            config.name,
            config.grid,
            SystemTime::now(),
        );
        room.windows = config.windows;

        let (events, _) = broadcast::channel(self.settings.event_channel_capacity);
        let handle = RoomHandle {
            room_id: room_id.clone(),
            room: Arc::new(Mutex::new(room)),
            events,
        };
        rooms.insert(room_id.clone(), handle.clone());
        info!(room = %room_id, "room created");
        Ok(handle)
    }

    /// Returns a room handle for the provided id, if it exists.
    pub async fn get_room(&self, room_id: &RoomId) -> Option<RoomHandle> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).cloned()
    }

    /// Adds a player to a waiting room's roster.
    pub async fn join(
        &self,
        room_id: &RoomId,
        player_id: PlayerId,
        name: impl Into<String>,
    ) -> Result<(), SessionError> {
        let handle = self.handle(room_id).await?;
        let mut room = handle.room.lock().await;
        room.join(Player::new(player_id, name, SystemTime::now()))?;
        Ok(())
    }

    /// Places a ship for a roster player while the room is waiting.
    pub async fn place_ship(
        &self,
        room_id: &RoomId,
        class: ShipClass,
        position: Position,
        owner: &PlayerId,
    ) -> Result<EntityId, SessionError> {
        let handle = self.handle(room_id).await?;
        let mut room = handle.room.lock().await;
        Ok(room.place_ship(class, position, owner)?)
    }

    /// Places debris while the room is waiting.
    pub async fn place_debris(
        &self,
        room_id: &RoomId,
        kind: DebrisKind,
        position: Position,
    ) -> Result<EntityId, SessionError> {
        let handle = self.handle(room_id).await?;
        let mut room = handle.room.lock().await;
        Ok(room.place_debris(kind, position)?)
    }

    /// Transitions `Waiting -> Playing` and announces the first actor.
    pub async fn start(&self, room_id: &RoomId) -> Result<(), SessionError> {
        let handle = self.handle(room_id).await?;
        let mut room = handle.room.lock().await;
        let first_turn = room.start()?;
        info!(room = %room_id, first_turn = %first_turn, "room started");
        let _ = handle.events.send(RoomEvent::Started { first_turn });
        Ok(())
    }

    /// Submits one action. Coordination gates, validation, and resolution
    /// all run inside the room's critical section, so no other action or
    /// tick can interleave between check and effect.
    pub async fn submit_action(
        &self,
        room_id: &RoomId,
        action: Action,
    ) -> Result<ActionOutcome, ActionError> {
        let handle = self
            .get_room(room_id)
            .await
            .ok_or(ActionError::UnknownRoom)?;
        let mut room = handle.room.lock().await;

        if room.is_frozen() {
            return Err(ActionError::RoomFrozen);
        }
        match room.status() {
            RoomStatus::Waiting => return Err(ActionError::RoomNotPlaying),
            RoomStatus::Finished => return Err(ActionError::GameOver),
            RoomStatus::Playing => {}
        }
        if room.current_turn() != Some(action.player()) {
            return Err(ActionError::NotYourTurn);
        }

        let player = action.player().clone();
        let validated = validate::validate(&room, &action)?;
        let outcome = match resolve::resolve(&mut room, validated) {
            Ok(outcome) => outcome,
            Err(violation) => {
                // Core bug, not user error: freeze the room and surface it.
                room.freeze();
                error!(room = %room_id, %violation, "invariant violation, freezing room");
                return Err(ActionError::Invariant(violation));
            }
        };

        // One action per rotation: a successful resolution hands the turn
        // to the next surviving player. Terminal rooms keep their pointer.
        if outcome.game_ended.is_none() {
            room.advance_turn();
        }
        let next_turn = room.current_turn().cloned();
        drop(room);

        let _ = handle.events.send(RoomEvent::ActionResolved {
            player,
            outcome: outcome.clone(),
            next_turn,
        });
        if let Some(ended) = &outcome.game_ended {
            let _ = handle.events.send(RoomEvent::Finished {
                winner: ended.winner.clone(),
            });
        }
        Ok(outcome)
    }

    /// Applies due regeneration windows. Invoked by an external time
    /// source; serializes on the same room lock as `submit_action`.
    pub async fn tick(&self, room_id: &RoomId, now: SystemTime) -> Result<RegenReport, ActionError> {
        let handle = self
            .get_room(room_id)
            .await
            .ok_or(ActionError::UnknownRoom)?;
        let mut room = handle.room.lock().await;
        if room.is_frozen() {
            return Err(ActionError::RoomFrozen);
        }
        let report = regen::apply_windows(&mut room, now);
        drop(room);

        if !report.is_empty() {
            let _ = handle.events.send(RoomEvent::PointsRegenerated {
                report: report.clone(),
            });
        }
        Ok(report)
    }

    /// Read-only copy of the room for renderers.
    pub async fn snapshot(&self, room_id: &RoomId) -> Result<RoomSnapshot, SessionError> {
        let handle = self.handle(room_id).await?;
        let room = handle.room.lock().await;
        Ok(RoomSnapshot::from(&*room))
    }

    async fn handle(&self, room_id: &RoomId) -> Result<RoomHandle, SessionError> {
        self.get_room(room_id)
            .await
            .ok_or(SessionError::UnknownRoom)
    }
}
