// DTOs and conversions for the engine's public snapshot/action surface.
// Transport framing lives with the embedding host, not here.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Action, ActionOutcome, Debris, DebrisKind, EntityId, GameEnded, OutcomeKind, PlayerId,
    Position, RoomStatus, Ship, ShipClass,
};
use crate::use_cases::{PlayerView, RoomSnapshot};

/// Malformed inbound action payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("{0} actions require a shipId")]
    MissingShipId(&'static str),
    #[error("{0} actions require a {1} target")]
    MissingTarget(&'static str, &'static str),
    #[error("DONATE actions require a positive points amount")]
    MissingPoints,
}

/// Cell coordinate on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionDto {
    pub x: i32,
    pub y: i32,
}

impl From<Position> for PositionDto {
    fn from(position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}

impl From<PositionDto> for Position {
    fn from(dto: PositionDto) -> Self {
        Self { x: dto.x, y: dto.y }
    }
}

/// Ship state as consumed by renderers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDto {
    pub id: String,
    #[serde(rename = "type")]
    pub class: ShipClassDto,
    pub position: PositionDto,
    pub health: u32,
    pub action_points: u32,
    pub player_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShipClassDto {
    Fighter,
    Cruiser,
}

impl From<ShipClass> for ShipClassDto {
    fn from(class: ShipClass) -> Self {
        match class {
            ShipClass::Fighter => ShipClassDto::Fighter,
            ShipClass::Cruiser => ShipClassDto::Cruiser,
        }
    }
}

impl From<&Ship> for ShipDto {
    fn from(ship: &Ship) -> Self {
        Self {
            id: ship.id.to_string(),
            class: ship.class.into(),
            position: ship.position.into(),
            health: ship.hull,
            action_points: ship.action_points,
            player_id: ship.owner.to_string(),
        }
    }
}

/// Debris state as consumed by renderers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebrisDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DebrisKindDto,
    pub position: PositionDto,
    pub health: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebrisKindDto {
    Asteroid,
    Satellite,
}

impl From<DebrisKind> for DebrisKindDto {
    fn from(kind: DebrisKind) -> Self {
        match kind {
            DebrisKind::Asteroid => DebrisKindDto::Asteroid,
            DebrisKind::Satellite => DebrisKindDto::Satellite,
        }
    }
}

impl From<&Debris> for DebrisDto {
    fn from(debris: &Debris) -> Self {
        Self {
            id: debris.id.to_string(),
            kind: debris.kind.into(),
            position: debris.position.into(),
            health: debris.hull,
        }
    }
}

/// Roster entry for client display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub action_points: u32,
}

impl From<&PlayerView> for PlayerDto {
    fn from(player: &PlayerView) -> Self {
        Self {
            id: player.id.to_string(),
            name: player.name.clone(),
            action_points: player.action_points,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatusDto {
    Waiting,
    Playing,
    Finished,
}

impl From<RoomStatus> for RoomStatusDto {
    fn from(status: RoomStatus) -> Self {
        match status {
            RoomStatus::Waiting => RoomStatusDto::Waiting,
            RoomStatus::Playing => RoomStatusDto::Playing,
            RoomStatus::Finished => RoomStatusDto::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GridSizeDto {
    pub width: i32,
    pub height: i32,
}

/// Full room snapshot sent to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshotDto {
    pub id: String,
    pub name: String,
    pub status: RoomStatusDto,
    pub grid_size: GridSizeDto,
    pub current_turn: Option<String>,
    pub players: Vec<PlayerDto>,
    pub ships: Vec<ShipDto>,
    pub debris: Vec<DebrisDto>,
}

impl From<&RoomSnapshot> for RoomSnapshotDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            id: snapshot.id.to_string(),
            name: snapshot.name.clone(),
            status: snapshot.status.into(),
            grid_size: GridSizeDto {
                width: snapshot.grid.width,
                height: snapshot.grid.height,
            },
            current_turn: snapshot.current_turn.as_ref().map(PlayerId::to_string),
            players: snapshot.players.iter().map(PlayerDto::from).collect(),
            ships: snapshot.ships.iter().map(ShipDto::from).collect(),
            debris: snapshot.debris.iter().map(DebrisDto::from).collect(),
        }
    }
}

/// Target of an inbound action: a cell for MOVE/ATTACK, a player id for
/// DONATE.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TargetDto {
    Cell(PositionDto),
    Player(String),
}

/// Inbound action payload, mirroring the client-side `GameAction` shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDto {
    #[serde(rename = "type")]
    pub kind: ActionKindDto,
    #[serde(default)]
    pub ship_id: Option<String>,
    pub player_id: String,
    #[serde(default)]
    pub target: Option<TargetDto>,
    #[serde(default)]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKindDto {
    Move,
    Attack,
    Donate,
}

impl TryFrom<ActionDto> for Action {
    type Error = ProtocolError;

    fn try_from(dto: ActionDto) -> Result<Self, Self::Error> {
        let player = PlayerId::from(dto.player_id);
        match dto.kind {
            ActionKindDto::Move => Ok(Action::Move {
                player,
                ship: ship_id(dto.ship_id, "MOVE")?,
                to: cell_target(dto.target, "MOVE")?,
            }),
            ActionKindDto::Attack => Ok(Action::Attack {
                player,
                ship: ship_id(dto.ship_id, "ATTACK")?,
                target: cell_target(dto.target, "ATTACK")?,
            }),
            ActionKindDto::Donate => {
                let to = match dto.target {
                    Some(TargetDto::Player(id)) => PlayerId::from(id),
                    _ => return Err(ProtocolError::MissingTarget("DONATE", "player")),
                };
                let points = dto.points.filter(|points| *points > 0);
                Ok(Action::Donate {
                    player,
                    to,
                    points: points.ok_or(ProtocolError::MissingPoints)?,
                })
            }
        }
    }
}

fn ship_id(id: Option<String>, kind: &'static str) -> Result<EntityId, ProtocolError> {
    id.map(EntityId::from)
        .ok_or(ProtocolError::MissingShipId(kind))
}

fn cell_target(target: Option<TargetDto>, kind: &'static str) -> Result<Position, ProtocolError> {
    match target {
        Some(TargetDto::Cell(cell)) => Ok(cell.into()),
        _ => Err(ProtocolError::MissingTarget(kind, "cell")),
    }
}

/// Outcome record sent back to the submitting client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum OutcomeDto {
    #[serde(rename_all = "camelCase")]
    Moved {
        ship_id: String,
        from: PositionDto,
        to: PositionDto,
        remaining_points: u32,
    },
    #[serde(rename_all = "camelCase")]
    Attacked {
        attacker_id: String,
        target_id: String,
        target: PositionDto,
        damage: u32,
        destroyed: bool,
    },
    #[serde(rename_all = "camelCase")]
    Donated {
        from: String,
        to: String,
        points: u32,
    },
}

/// Terminal marker attached to the final outcome of a game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEndedDto {
    pub winner_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcomeDto {
    pub outcome: OutcomeDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_ended: Option<GameEndedDto>,
}

impl From<&ActionOutcome> for ActionOutcomeDto {
    fn from(outcome: &ActionOutcome) -> Self {
        let kind = match &outcome.kind {
            OutcomeKind::Moved {
                ship,
                from,
                to,
                remaining_points,
            } => OutcomeDto::Moved {
                ship_id: ship.to_string(),
                from: (*from).into(),
                to: (*to).into(),
                remaining_points: *remaining_points,
            },
            OutcomeKind::Attacked {
                attacker,
                target,
                target_position,
                damage,
                destroyed,
            } => OutcomeDto::Attacked {
                attacker_id: attacker.to_string(),
                target_id: target.to_string(),
                target: (*target_position).into(),
                damage: *damage,
                destroyed: *destroyed,
            },
            OutcomeKind::Donated {
                from, to, points, ..
            } => OutcomeDto::Donated {
                from: from.to_string(),
                to: to.to_string(),
                points: *points,
            },
        };
        Self {
            outcome: kind,
            game_ended: outcome.game_ended.as_ref().map(|ended: &GameEnded| {
                GameEndedDto {
                    winner_id: ended.winner.as_ref().map(PlayerId::to_string),
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn move_payload_parses_into_a_move_action() {
        let dto: ActionDto = serde_json::from_value(json!({
            "type": "MOVE",
            "shipId": "s1",
            "playerId": "p1",
            "target": { "x": 2, "y": 3 }
        }))
        .unwrap();
        let action = Action::try_from(dto).unwrap();
        assert_eq!(
            action,
            Action::Move {
                player: PlayerId::from("p1"),
                ship: EntityId::from("s1"),
                to: Position::new(2, 3),
            }
        );
    }

    #[test]
    fn donate_payload_takes_a_player_target_and_points() {
        let dto: ActionDto = serde_json::from_value(json!({
            "type": "DONATE",
            "playerId": "p1",
            "target": "p2",
            "points": 2
        }))
        .unwrap();
        let action = Action::try_from(dto).unwrap();
        assert_eq!(
            action,
            Action::Donate {
                player: PlayerId::from("p1"),
                to: PlayerId::from("p2"),
                points: 2,
            }
        );
    }

    #[test]
    fn attack_without_a_cell_target_is_malformed() {
        let dto: ActionDto = serde_json::from_value(json!({
            "type": "ATTACK",
            "shipId": "s1",
            "playerId": "p1",
            "target": "p2"
        }))
        .unwrap();
        assert_eq!(
            Action::try_from(dto).unwrap_err(),
            ProtocolError::MissingTarget("ATTACK", "cell")
        );
    }

    #[test]
    fn ship_dto_serializes_with_client_facing_field_names() {
        let ship = Ship::spawn(ShipClass::Fighter, Position::new(1, 2), PlayerId::from("p1"));
        let value = serde_json::to_value(ShipDto::from(&ship)).unwrap();
        assert_eq!(value["type"], "fighter");
        assert_eq!(value["position"], json!({ "x": 1, "y": 2 }));
        assert_eq!(value["actionPoints"], 3);
        assert_eq!(value["playerId"], "p1");
    }
}
