// Applies validated actions to the room: moves, combat, donations, and the
// terminal-condition check that runs after every resolution.

use tracing::info;

use crate::domain::action::{Action, ActionOutcome, GameEnded, OutcomeKind};
use crate::domain::entities::{Entity, Vitality};
use crate::domain::room::GameRoom;
use crate::domain::systems::validate::ValidatedAction;
use crate::domain::tuning::ship::ShipTuning;

/// A core-bug signal, never a user error: validated actions that fail to
/// apply, broken occupancy indexes, or balances that would go negative.
/// The coordinator freezes the room when one surfaces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("room invariant violated: {detail}")]
pub struct InvariantViolation {
    pub detail: String,
}

impl InvariantViolation {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Mutates the room according to one validated action. Deterministic and
/// single-threaded; the caller holds the room's exclusive lock.
pub fn resolve(
    room: &mut GameRoom,
    validated: ValidatedAction,
) -> Result<ActionOutcome, InvariantViolation> {
    let kind = match validated.action {
        Action::Move { ship, to, .. } => {
            let from = match room.store.get(&ship) {
                Some(entity) => entity.position(),
                None => return Err(InvariantViolation::new("validated mover vanished")),
            };
            let move_cost = room.economy.move_cost;
            let remaining_points = room
                .store
                .deduct_ship_points(&ship, move_cost)
                .map_err(|err| InvariantViolation::new(err.to_string()))?;
            room.store
                .relocate(&ship, to)
                .map_err(|err| InvariantViolation::new(err.to_string()))?;
            OutcomeKind::Moved {
                ship,
                from,
                to,
                remaining_points,
            }
        }
        Action::Attack { ship, target, .. } => {
            let damage = match room.store.get(&ship) {
                Some(Entity::Ship(attacker)) => ShipTuning::of(attacker.class).attack_damage,
                _ => return Err(InvariantViolation::new("validated attacker vanished")),
            };
            let target_id = match room.store.entity_at(target) {
                Some(entity) => entity.id().clone(),
                None => return Err(InvariantViolation::new("validated target vanished")),
            };
            let attack_cost = room.economy.attack_cost;
            room.store
                .deduct_ship_points(&ship, attack_cost)
                .map_err(|err| InvariantViolation::new(err.to_string()))?;
            let vitality = room
                .store
                .damage(&target_id, damage)
                .map_err(|err| InvariantViolation::new(err.to_string()))?;
            // Destroyed entities leave the board in the same resolution
            // step; the vacated cell is immediately reusable.
            let destroyed = vitality == Vitality::Destroyed;
            if destroyed {
                room.store
                    .remove(&target_id)
                    .map_err(|err| InvariantViolation::new(err.to_string()))?;
            }
            info!(
                room = %room.id,
                attacker = %ship,
                target = %target_id,
                damage,
                destroyed,
                "attack resolved"
            );
            OutcomeKind::Attacked {
                attacker: ship,
                target: target_id,
                target_position: target,
                damage,
                destroyed,
            }
        }
        Action::Donate { player, to, points } => {
            // Both balance updates happen under the same exclusive borrow:
            // a failed debit leaves the recipient untouched.
            let donor_balance = {
                let donor = room
                    .player_mut(&player)
                    .ok_or_else(|| InvariantViolation::new("validated donor vanished"))?;
                donor.action_points = donor
                    .action_points
                    .checked_sub(points)
                    .ok_or_else(|| InvariantViolation::new("donation would overdraw donor"))?;
                donor.action_points
            };
            let recipient_balance = {
                let recipient = room
                    .player_mut(&to)
                    .ok_or_else(|| InvariantViolation::new("validated recipient vanished"))?;
                recipient.action_points += points;
                recipient.action_points
            };
            OutcomeKind::Donated {
                from: player,
                to,
                points,
                donor_balance,
                recipient_balance,
            }
        }
    };

    room.store
        .check_consistency()
        .map_err(InvariantViolation::new)?;

    Ok(ActionOutcome {
        game_ended: check_terminal(room),
        kind,
    })
}

/// Terminal condition, re-evaluated after every single resolution: when at
/// most one roster player still owns ships the room finishes.
fn check_terminal(room: &mut GameRoom) -> Option<GameEnded> {
    let survivors = room.surviving_players();
    if survivors.len() > 1 {
        return None;
    }
    let winner = survivors.first().map(|player| player.id.clone());
    room.finish();
    info!(room = %room.id, winner = winner.as_ref().map(crate::domain::entities::PlayerId::as_str), "game ended");
    Some(GameEnded { winner })
}
