// Game rule systems: validation, resolution, regeneration.

pub mod regen;
pub mod resolve;
pub mod validate;
