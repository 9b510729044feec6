// Shared fixtures for driving the engine through its public surface.

use std::time::{Duration, SystemTime};

use gridfleet::{
    ActionTimeWindow, EntityId, GridSize, PlayerId, Position, RoomConfig, RoomId, RoomRegistry,
    RoomSettings, ShipClass,
};

/// A started two-player room matching the reference scenario: player "a"
/// owns a fighter at (0,0), player "b" owns a cruiser at (2,0). "a" holds
/// the first turn.
pub struct Duel {
    pub registry: RoomRegistry,
    pub room: RoomId,
    pub a: PlayerId,
    pub b: PlayerId,
    pub fighter: EntityId,
    pub cruiser: EntityId,
}

pub async fn duel() -> Duel {
    duel_with_windows(Vec::new()).await
}

pub async fn duel_with_windows(windows: Vec<ActionTimeWindow>) -> Duel {
    let registry = RoomRegistry::new(RoomSettings::default());
    let room = RoomId::from("duel");
    registry
        .create_room(
            room.clone(),
            RoomConfig {
                name: "duel".into(),
                grid: GridSize::new(10, 10),
                windows,
            },
        )
        .await
        .expect("room id is unique");

    let a = PlayerId::from("a");
    let b = PlayerId::from("b");
    registry.join(&room, a.clone(), "Ada").await.unwrap();
    registry.join(&room, b.clone(), "Brin").await.unwrap();
    let fighter = registry
        .place_ship(&room, ShipClass::Fighter, Position::new(0, 0), &a)
        .await
        .unwrap();
    let cruiser = registry
        .place_ship(&room, ShipClass::Cruiser, Position::new(2, 0), &b)
        .await
        .unwrap();
    registry.start(&room).await.unwrap();

    Duel {
        registry,
        room,
        a,
        b,
        fighter,
        cruiser,
    }
}

/// A single window ending `secs` seconds after `start`.
pub fn window_ending(start: SystemTime, secs: u64) -> ActionTimeWindow {
    ActionTimeWindow {
        start,
        end: start + Duration::from_secs(secs),
    }
}
