// Pure legality checks for submitted actions. Validation never mutates
// state; resolution consumes the token this module hands out.

use crate::domain::action::Action;
use crate::domain::entities::{Entity, EntityId, PlayerId, Ship};
use crate::domain::grid;
use crate::domain::room::GameRoom;
use crate::domain::tuning::ship::ShipTuning;

/// Reasons an action is rejected. State is untouched on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("acting ship does not exist")]
    UnknownEntity,
    #[error("ship is not owned by the acting player")]
    NotOwner,
    #[error("action-point balance cannot cover the cost")]
    InsufficientPoints,
    #[error("target is outside the ship's range")]
    OutOfRange,
    #[error("destination cell is occupied")]
    CellOccupied,
    #[error("position is outside the grid")]
    OutOfBounds,
    #[error("target is not a legal recipient")]
    InvalidTarget,
}

/// Proof that an action passed validation against a specific room state.
/// Move-only: the resolver consumes it, so resolution cannot run on an
/// unchecked action. Only valid while the room lock that produced it is
/// still held.
#[derive(Debug)]
pub struct ValidatedAction {
    pub(crate) action: Action,
}

/// Checks one action against the current room state.
pub fn validate(room: &GameRoom, action: &Action) -> Result<ValidatedAction, ValidationError> {
    match action {
        Action::Move { player, ship, to } => {
            let ship_state = acting_ship(room, ship, player)?;
            if ship_state.action_points < room.economy.move_cost {
                return Err(ValidationError::InsufficientPoints);
            }
            if !room.grid.contains(*to) {
                return Err(ValidationError::OutOfBounds);
            }
            if !grid::adjacent(ship_state.position, *to) {
                return Err(ValidationError::OutOfRange);
            }
            if room.store.entity_at(*to).is_some() {
                return Err(ValidationError::CellOccupied);
            }
        }
        Action::Attack {
            player,
            ship,
            target,
        } => {
            let ship_state = acting_ship(room, ship, player)?;
            if ship_state.action_points < room.economy.attack_cost {
                return Err(ValidationError::InsufficientPoints);
            }
            let occupant = room
                .store
                .entity_at(*target)
                .ok_or(ValidationError::InvalidTarget)?;
            // Own ships are never legal targets; debris is unowned and
            // always attackable.
            if let Entity::Ship(target_ship) = occupant {
                if &target_ship.owner == player {
                    return Err(ValidationError::InvalidTarget);
                }
            }
            let distance = grid::manhattan(ship_state.position, *target);
            if distance == 0 || distance > ShipTuning::of(ship_state.class).attack_range {
                return Err(ValidationError::OutOfRange);
            }
        }
        Action::Donate { player, to, points } => {
            let donor = room
                .player(player)
                .ok_or(ValidationError::UnknownEntity)?;
            if to == player || room.player(to).is_none() {
                return Err(ValidationError::InvalidTarget);
            }
            // A donation must be positive and fully covered by the donor.
            if *points == 0 || donor.action_points < *points {
                return Err(ValidationError::InsufficientPoints);
            }
        }
    }
    Ok(ValidatedAction {
        action: action.clone(),
    })
}

fn acting_ship<'a>(
    room: &'a GameRoom,
    ship: &EntityId,
    player: &PlayerId,
) -> Result<&'a Ship, ValidationError> {
    match room.store.get(ship) {
        Some(Entity::Ship(ship_state)) => {
            if &ship_state.owner != player {
                return Err(ValidationError::NotOwner);
            }
            Ok(ship_state)
        }
        _ => Err(ValidationError::UnknownEntity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DebrisKind, Player, PlayerId, RoomId, ShipClass};
    use crate::domain::grid::{GridSize, Position};
    use std::time::SystemTime;

    struct Fixture {
        room: GameRoom,
        a: PlayerId,
        b: PlayerId,
        fighter: EntityId,
        cruiser: EntityId,
    }

    /// Two-player board: A's fighter at (0,0), B's cruiser at (3,0),
    /// an asteroid at (1,1).
    fn fixture() -> Fixture {
        let mut room = GameRoom::new(
            RoomId::from("r"),
            "r",
            GridSize::new(8, 8),
            SystemTime::now(),
        );
        let a = PlayerId::from("a");
        let b = PlayerId::from("b");
        room.join(Player::new(a.clone(), "a", SystemTime::now()))
            .unwrap();
        room.join(Player::new(b.clone(), "b", SystemTime::now()))
            .unwrap();
        let fighter = room
            .place_ship(ShipClass::Fighter, Position::new(0, 0), &a)
            .unwrap();
        let cruiser = room
            .place_ship(ShipClass::Cruiser, Position::new(3, 0), &b)
            .unwrap();
        room.place_debris(DebrisKind::Asteroid, Position::new(1, 1))
            .unwrap();
        room.start().unwrap();
        Fixture {
            room,
            a,
            b,
            fighter,
            cruiser,
        }
    }

    #[test]
    fn move_to_adjacent_free_cell_is_valid() {
        let f = fixture();
        let action = Action::Move {
            player: f.a.clone(),
            ship: f.fighter.clone(),
            to: Position::new(1, 0),
        };
        assert!(validate(&f.room, &action).is_ok());
    }

    #[test]
    fn move_rejections_cover_the_error_matrix() {
        let f = fixture();
        let base = |to| Action::Move {
            player: f.a.clone(),
            ship: f.fighter.clone(),
            to,
        };
        // Not adjacent.
        assert_eq!(
            validate(&f.room, &base(Position::new(2, 0))).unwrap_err(),
            ValidationError::OutOfRange
        );
        // Out of the grid.
        assert_eq!(
            validate(&f.room, &base(Position::new(0, -1))).unwrap_err(),
            ValidationError::OutOfBounds
        );
        // Someone else's ship.
        let stolen = Action::Move {
            player: f.b.clone(),
            ship: f.fighter.clone(),
            to: Position::new(1, 0),
        };
        assert_eq!(
            validate(&f.room, &stolen).unwrap_err(),
            ValidationError::NotOwner
        );
        // Unknown ship id.
        let ghost = Action::Move {
            player: f.a.clone(),
            ship: EntityId::from("ghost"),
            to: Position::new(1, 0),
        };
        assert_eq!(
            validate(&f.room, &ghost).unwrap_err(),
            ValidationError::UnknownEntity
        );
    }

    #[test]
    fn move_into_adjacent_debris_is_cell_occupied() {
        let mut f = fixture();
        // Walk the fighter next to the asteroid first.
        f.room
            .store
            .relocate(&f.fighter, Position::new(1, 0))
            .unwrap();
        let action = Action::Move {
            player: f.a.clone(),
            ship: f.fighter.clone(),
            to: Position::new(1, 1),
        };
        assert_eq!(
            validate(&f.room, &action).unwrap_err(),
            ValidationError::CellOccupied
        );
    }

    #[test]
    fn attack_respects_class_range() {
        let mut f = fixture();
        // Fighter at (0,0) vs cruiser at (3,0): distance 3, fighter range 1.
        let fighter_shot = Action::Attack {
            player: f.a.clone(),
            ship: f.fighter.clone(),
            target: Position::new(3, 0),
        };
        assert_eq!(
            validate(&f.room, &fighter_shot).unwrap_err(),
            ValidationError::OutOfRange
        );
        // Cruiser range 2 cannot reach the fighter at distance 3 either.
        let cruiser_long = Action::Attack {
            player: f.b.clone(),
            ship: f.cruiser.clone(),
            target: Position::new(0, 0),
        };
        assert_eq!(
            validate(&f.room, &cruiser_long).unwrap_err(),
            ValidationError::OutOfRange
        );
        // Bring the fighter within two cells and the cruiser reaches it.
        f.room
            .store
            .relocate(&f.fighter, Position::new(2, 1))
            .unwrap();
        let cruiser_hit = Action::Attack {
            player: f.b.clone(),
            ship: f.cruiser.clone(),
            target: Position::new(2, 1),
        };
        assert!(validate(&f.room, &cruiser_hit).is_ok());
    }

    #[test]
    fn attack_on_empty_or_own_cell_is_invalid_target() {
        let f = fixture();
        let empty = Action::Attack {
            player: f.a.clone(),
            ship: f.fighter.clone(),
            target: Position::new(0, 1),
        };
        assert_eq!(
            validate(&f.room, &empty).unwrap_err(),
            ValidationError::InvalidTarget
        );
        let own = Action::Attack {
            player: f.a.clone(),
            ship: f.fighter.clone(),
            target: Position::new(0, 0),
        };
        assert_eq!(
            validate(&f.room, &own).unwrap_err(),
            ValidationError::InvalidTarget
        );
    }

    #[test]
    fn donate_requires_positive_covered_amount_and_a_real_recipient() {
        let mut f = fixture();
        f.room.player_mut(&f.a).unwrap().action_points = 2;

        let over = Action::Donate {
            player: f.a.clone(),
            to: f.b.clone(),
            points: 3,
        };
        assert_eq!(
            validate(&f.room, &over).unwrap_err(),
            ValidationError::InsufficientPoints
        );
        let zero = Action::Donate {
            player: f.a.clone(),
            to: f.b.clone(),
            points: 0,
        };
        assert_eq!(
            validate(&f.room, &zero).unwrap_err(),
            ValidationError::InsufficientPoints
        );
        let to_self = Action::Donate {
            player: f.a.clone(),
            to: f.a.clone(),
            points: 1,
        };
        assert_eq!(
            validate(&f.room, &to_self).unwrap_err(),
            ValidationError::InvalidTarget
        );
        let ok = Action::Donate {
            player: f.a.clone(),
            to: f.b.clone(),
            points: 2,
        };
        assert!(validate(&f.room, &ok).is_ok());
    }
}
