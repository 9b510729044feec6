// Time-window regeneration for the player-level point pools.
//
// Each window credits every player once when its end has passed. Ticks are
// idempotent: a player whose `last_point_gain` already covers a window end
// is skipped, so duplicate delivery from a retried scheduler cannot
// double-credit.

use std::time::SystemTime;

use crate::domain::entities::PlayerId;
use crate::domain::room::GameRoom;
use tracing::debug;

/// Players credited by one tick, with their new balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegenReport {
    pub credited: Vec<(PlayerId, u32)>,
}

impl RegenReport {
    pub fn is_empty(&self) -> bool {
        self.credited.is_empty()
    }
}

/// Applies every due window (`end <= now`) to the roster.
pub fn apply_windows(room: &mut GameRoom, now: SystemTime) -> RegenReport {
    let increment = room.economy.regen_increment;
    let due: Vec<SystemTime> = room
        .windows
        .iter()
        .filter(|window| window.end <= now)
        .map(|window| window.end)
        .collect();

    let mut report = RegenReport::default();
    for end in due {
        for player in room.players_mut() {
            if player.last_point_gain >= end {
                continue;
            }
            player.action_points += increment;
            player.last_point_gain = end;
            let id = player.id.clone();
            let balance = player.action_points;
            match report.credited.iter_mut().find(|(credited, _)| credited == &id) {
                Some(entry) => entry.1 = balance,
                None => report.credited.push((id, balance)),
            }
        }
    }
    if !report.is_empty() {
        debug!(room = %room.id, players = report.credited.len(), "regeneration tick credited");
    }
    report
}
