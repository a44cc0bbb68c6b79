//! Action representation.
//!
//! An action is one of four moves, each tagged with the seat that makes it.
//! Every move except `Pass` plays one tile, named by its index in the
//! actor's hand at the time the action is applied.
//!
//! Actions are ephemeral: generated by `rules::legal_actions`, validated and
//! applied by `rules::apply_action`, then dropped.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A complete game action.
///
/// ```
/// use tiger_dragon::core::{Action, ActionKind, PlayerId};
///
/// let attack = Action::Attack { player: PlayerId::new(0), hand_index: 3 };
/// assert_eq!(attack.kind(), ActionKind::Attack);
/// assert_eq!(attack.hand_index(), Some(3));
///
/// let pass = Action::Pass { player: PlayerId::new(1) };
/// assert_eq!(pass.hand_index(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Open an attack with a tile.
    Attack { player: PlayerId, hand_index: usize },
    /// Answer the pending attack with a compatible tile.
    Defend { player: PlayerId, hand_index: usize },
    /// Decline to defend.
    Pass { player: PlayerId },
    /// Discard a tile after an undefended attack.
    BonusReceive { player: PlayerId, hand_index: usize },
}

impl Action {
    /// The seat making this action.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            Action::Attack { player, .. }
            | Action::Defend { player, .. }
            | Action::Pass { player }
            | Action::BonusReceive { player, .. } => player,
        }
    }

    /// Hand index of the tile played, `None` for `Pass`.
    #[must_use]
    pub fn hand_index(&self) -> Option<usize> {
        match *self {
            Action::Attack { hand_index, .. }
            | Action::Defend { hand_index, .. }
            | Action::BonusReceive { hand_index, .. } => Some(hand_index),
            Action::Pass { .. } => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Attack { .. } => ActionKind::Attack,
            Action::Defend { .. } => ActionKind::Defend,
            Action::Pass { .. } => ActionKind::Pass,
            Action::BonusReceive { .. } => ActionKind::BonusReceive,
        }
    }
}

/// Discriminant of an [`Action`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    Defend,
    Pass,
    BonusReceive,
}

impl ActionKind {
    /// One-letter suffix used in discard histories (`4A`, `TD`, `2B`).
    /// `Pass` never appears there.
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            ActionKind::Attack => 'A',
            ActionKind::Defend => 'D',
            ActionKind::BonusReceive => 'B',
            ActionKind::Pass => '?',
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Attack => "Attack",
            ActionKind::Defend => "Defend",
            ActionKind::Pass => "Pass",
            ActionKind::BonusReceive => "BonusReceive",
        };
        f.write_str(name)
    }
}
