use std::{env, time::Duration};

// Runtime constants and env-overridable knobs (not gameplay tuning).

pub const EVENT_BROADCAST_CAPACITY: usize = 128;

// Default board dimensions for hosts that do not configure their own.
pub const DEFAULT_GRID_WIDTH: i32 = 10;
pub const DEFAULT_GRID_HEIGHT: i32 = 10;

/// Length of one regeneration window for hosts that synthesize schedules.
pub fn regen_window_length() -> Duration {
    let seconds = env::var("REGEN_WINDOW_SECONDS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(30);
    Duration::from_secs(seconds)
}

/// How often the external scheduler is expected to call `tick`.
pub fn tick_interval() -> Duration {
    let millis = env::var("TICK_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1_000);
    Duration::from_millis(millis)
}
