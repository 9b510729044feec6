// Canonical entity collections for one room, with an incrementally maintained
// position index for O(1) occupancy lookups.

use std::collections::HashMap;

use crate::domain::entities::{Debris, Entity, EntityId, PlayerId, Ship, Vitality};
use crate::domain::grid::Position;
use crate::domain::tuning::ship::ShipTuning;

/// Errors raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("cell ({};{}) is already occupied", .0.x, .0.y)]
    OccupiedCell(Position),
    #[error("no entity with id {0}")]
    UnknownEntity(EntityId),
    #[error("ship {0} cannot cover the deducted cost")]
    InsufficientBalance(EntityId),
}

/// Owns all live ships and debris for a room. The position index is updated
/// in the same `&mut` scope as the primary map, never recomputed by scan, so
/// occupancy queries cannot observe a half-applied relocation.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    entities: HashMap<EntityId, Entity>,
    by_position: HashMap<Position, EntityId>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entity occupying the cell, if any.
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        let id = self.by_position.get(&position)?;
        self.entities.get(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Ships currently owned by the player (derived view, never stored).
    pub fn ships_of<'a>(&'a self, owner: &'a PlayerId) -> impl Iterator<Item = &'a Ship> {
        self.ships().filter(move |ship| &ship.owner == owner)
    }

    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.entities.values().filter_map(|entity| match entity {
            Entity::Ship(ship) => Some(ship),
            Entity::Debris(_) => None,
        })
    }

    pub fn debris(&self) -> impl Iterator<Item = &Debris> {
        self.entities.values().filter_map(|entity| match entity {
            Entity::Debris(debris) => Some(debris),
            Entity::Ship(_) => None,
        })
    }

    pub fn insert(&mut self, entity: Entity) -> Result<EntityId, StoreError> {
        let position = entity.position();
        if self.by_position.contains_key(&position) {
            return Err(StoreError::OccupiedCell(position));
        }
        let id = entity.id().clone();
        self.by_position.insert(position, id.clone());
        self.entities.insert(id.clone(), entity);
        Ok(id)
    }

    /// Removes an entity and frees its cell in one step.
    pub fn remove(&mut self, id: &EntityId) -> Result<Entity, StoreError> {
        let entity = self
            .entities
            .remove(id)
            .ok_or_else(|| StoreError::UnknownEntity(id.clone()))?;
        self.by_position.remove(&entity.position());
        Ok(entity)
    }

    /// Moves an entity to a new cell, keeping the index transactional with
    /// the primary map: the old cell is vacated and the new one claimed
    /// within one exclusive borrow.
    pub fn relocate(&mut self, id: &EntityId, to: Position) -> Result<(), StoreError> {
        if let Some(occupant) = self.by_position.get(&to) {
            if occupant != id {
                return Err(StoreError::OccupiedCell(to));
            }
        }
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownEntity(id.clone()))?;
        let from = entity.position();
        match entity {
            Entity::Ship(ship) => ship.position = to,
            Entity::Debris(debris) => debris.position = to,
        }
        self.by_position.remove(&from);
        self.by_position.insert(to, id.clone());
        Ok(())
    }

    pub fn damage(&mut self, id: &EntityId, amount: u32) -> Result<Vitality, StoreError> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownEntity(id.clone()))?;
        Ok(entity.apply_damage(amount))
    }

    pub fn deduct_ship_points(&mut self, id: &EntityId, cost: u32) -> Result<u32, StoreError> {
        match self.entities.get_mut(id) {
            Some(Entity::Ship(ship)) => {
                // Balances are rejected, never clamped: a shortfall here is
                // an invariant breach for the caller to escalate.
                ship.action_points = ship
                    .action_points
                    .checked_sub(cost)
                    .ok_or_else(|| StoreError::InsufficientBalance(id.clone()))?;
                Ok(ship.action_points)
            }
            _ => Err(StoreError::UnknownEntity(id.clone())),
        }
    }

    /// Refills every ship of the player to its class maximum pool.
    pub fn refill_ship_points(&mut self, owner: &PlayerId) {
        for entity in self.entities.values_mut() {
            if let Entity::Ship(ship) = entity {
                if &ship.owner == owner {
                    ship.action_points = ShipTuning::of(ship.class).max_action_points;
                }
            }
        }
    }

    /// Cross-checks the position index against the entity map. A mismatch
    /// means the store's occupancy invariant is broken and the room must be
    /// frozen by the caller.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.by_position.len() != self.entities.len() {
            return Err(format!(
                "position index holds {} cells for {} entities",
                self.by_position.len(),
                self.entities.len()
            ));
        }
        for (position, id) in &self.by_position {
            match self.entities.get(id) {
                Some(entity) if entity.position() == *position => {}
                Some(entity) => {
                    return Err(format!(
                        "entity {} indexed at ({};{}) but located at ({};{})",
                        id,
                        position.x,
                        position.y,
                        entity.position().x,
                        entity.position().y
                    ));
                }
                None => return Err(format!("index points at missing entity {id}")),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DebrisKind, ShipClass};

    fn ship_at(x: i32, y: i32, owner: &str) -> Entity {
        Entity::Ship(Ship::spawn(
            ShipClass::Fighter,
            Position::new(x, y),
            PlayerId::from(owner),
        ))
    }

    #[test]
    fn insert_rejects_occupied_cell() {
        let mut store = EntityStore::new();
        store.insert(ship_at(1, 1, "a")).unwrap();
        let err = store.insert(ship_at(1, 1, "b")).unwrap_err();
        assert_eq!(err, StoreError::OccupiedCell(Position::new(1, 1)));
    }

    #[test]
    fn relocate_moves_entity_and_frees_old_cell() {
        let mut store = EntityStore::new();
        let id = store.insert(ship_at(0, 0, "a")).unwrap();
        store.relocate(&id, Position::new(0, 1)).unwrap();

        assert!(store.entity_at(Position::new(0, 0)).is_none());
        assert_eq!(
            store.entity_at(Position::new(0, 1)).map(|e| e.id().clone()),
            Some(id)
        );
        store.check_consistency().unwrap();
    }

    #[test]
    fn relocate_into_occupied_cell_fails_and_changes_nothing() {
        let mut store = EntityStore::new();
        let mover = store.insert(ship_at(0, 0, "a")).unwrap();
        store
            .insert(Entity::Debris(Debris::spawn(
                DebrisKind::Asteroid,
                Position::new(0, 1),
            )))
            .unwrap();

        let err = store.relocate(&mover, Position::new(0, 1)).unwrap_err();
        assert_eq!(err, StoreError::OccupiedCell(Position::new(0, 1)));
        assert_eq!(
            store.entity_at(Position::new(0, 0)).map(|e| e.id().clone()),
            Some(mover)
        );
        store.check_consistency().unwrap();
    }

    #[test]
    fn remove_frees_the_cell() {
        let mut store = EntityStore::new();
        let id = store.insert(ship_at(2, 2, "a")).unwrap();
        store.remove(&id).unwrap();
        assert!(store.entity_at(Position::new(2, 2)).is_none());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn ships_of_filters_by_owner() {
        let mut store = EntityStore::new();
        store.insert(ship_at(0, 0, "a")).unwrap();
        store.insert(ship_at(1, 0, "a")).unwrap();
        store.insert(ship_at(2, 0, "b")).unwrap();

        let owner = PlayerId::from("a");
        assert_eq!(store.ships_of(&owner).count(), 2);
    }
}
