// Player commands and the outcomes resolution produces for them.

use crate::domain::entities::{EntityId, PlayerId};
use crate::domain::grid::Position;

/// A command submitted against a room. MOVE and ATTACK spend the acting
/// ship's pool; DONATE moves points between player pools only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move {
        player: PlayerId,
        ship: EntityId,
        to: Position,
    },
    Attack {
        player: PlayerId,
        ship: EntityId,
        target: Position,
    },
    Donate {
        player: PlayerId,
        to: PlayerId,
        points: u32,
    },
}

impl Action {
    /// The player issuing the command.
    pub fn player(&self) -> &PlayerId {
        match self {
            Action::Move { player, .. }
            | Action::Attack { player, .. }
            | Action::Donate { player, .. } => player,
        }
    }
}

/// Marker set on an outcome when resolution ended the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEnded {
    /// Last player retaining ships; `None` if no player survived.
    pub winner: Option<PlayerId>,
}

/// Effect record for one resolved action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Moved {
        ship: EntityId,
        from: Position,
        to: Position,
        remaining_points: u32,
    },
    Attacked {
        attacker: EntityId,
        target: EntityId,
        target_position: Position,
        damage: u32,
        destroyed: bool,
    },
    Donated {
        from: PlayerId,
        to: PlayerId,
        points: u32,
        donor_balance: u32,
        recipient_balance: u32,
    },
}

/// What one resolved action did, plus the terminal marker when it ended
/// the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: OutcomeKind,
    pub game_ended: Option<GameEnded>,
}
