/// Gameplay tuning for ship classes.
///
/// Keep this separate from runtime configuration (channel capacities, etc.).
use crate::domain::entities::ShipClass;

#[derive(Debug, Clone, Copy)]
pub struct ShipTuning {
    /// Hull points a fresh ship spawns with.
    pub max_hull: u32,

    /// Per-ship action points restored on each turn rotation.
    pub max_action_points: u32,

    /// Hull damage one attack deals.
    pub attack_damage: u32,

    /// Maximum Manhattan distance to a legal attack target.
    pub attack_range: u32,
}

impl ShipTuning {
    /// Declared per-class stat table.
    pub const fn of(class: ShipClass) -> Self {
        match class {
            ShipClass::Fighter => Self {
                max_hull: 4,
                max_action_points: 3,
                attack_damage: 2,
                attack_range: 1,
            },
            ShipClass::Cruiser => Self {
                max_hull: 8,
                max_action_points: 3,
                attack_damage: 4,
                attack_range: 2,
            },
        }
    }
}
