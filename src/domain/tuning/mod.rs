// Gameplay tuning tables, separate from runtime configuration.

pub mod economy;
pub mod ship;
