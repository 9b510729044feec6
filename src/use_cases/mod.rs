// Use cases layer: application workflows for room sessions.

pub mod registry;
pub mod types;

pub use registry::{RoomHandle, RoomRegistry, RoomSettings};
pub use types::{
    ActionError, PlayerView, RegistryError, RoomConfig, RoomEvent, RoomSnapshot, SessionError,
};
