/// Gameplay tuning for the action-point economy.

#[derive(Debug, Clone, Copy)]
pub struct EconomyTuning {
    /// Ship action points spent by one MOVE.
    pub move_cost: u32,

    /// Ship action points spent by one ATTACK.
    pub attack_cost: u32,

    /// Player points credited per regeneration window tick.
    pub regen_increment: u32,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            move_cost: 1,
            attack_cost: 1,
            regen_increment: 1,
        }
    }
}
