//! Error types.
//!
//! - `ConfigError`: fatal at startup (player count, score rules).
//! - `IllegalAction`: an action failed engine validation; nothing changed.
//! - `MatchError`: a submission was refused by the orchestrator; nothing
//!   changed and the same seat is asked again.

use std::path::PathBuf;

use thiserror::Error;

use super::action::ActionKind;
use super::player::PlayerId;
use super::state::Phase;
use super::tile::TileKind;

/// Configuration errors. Never recovered from.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported player count {0} (supported: 2-5)")]
    UnsupportedPlayerCount(usize),

    #[error("score table has no rule for {}", format_kinds(.missing))]
    IncompleteScoreTable { missing: Vec<TileKind> },

    #[error("score rules line {line}: {message}")]
    ScoreRules { line: usize, message: String },

    #[error("failed to read score rules from {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("target score must be positive, got {0}")]
    InvalidTargetScore(i32),
}

fn format_kinds(kinds: &[TileKind]) -> String {
    kinds
        .iter()
        .map(|k| k.label())
        .collect::<Vec<_>>()
        .join(",")
}

/// Reasons the engine rejects an action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("round is finished")]
    Finished,

    #[error("{actual} acted but it is {expected}'s turn")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },

    #[error("{action} is not allowed in the {phase} phase")]
    WrongPhase { phase: Phase, action: ActionKind },

    #[error("hand index {index} out of range for a hand of {len}")]
    HandIndexOutOfRange { index: usize, len: usize },

    #[error("{defend} cannot defend against {attack}")]
    CannotDefend { attack: TileKind, defend: TileKind },

    #[error("defend phase without an attack tile")]
    MissingAttackTile,
}

/// Orchestrator-level rejections of player input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("game not started")]
    NotStarted,

    #[error("match over")]
    MatchOver,

    #[error("spectator cannot act")]
    Spectator,

    #[error("unknown client")]
    UnknownClient,

    #[error("not your turn")]
    NotYourTurn { seat: PlayerId, current: PlayerId },

    #[error("room full")]
    RoomFull,

    #[error("invalid choice {0:?}")]
    InvalidChoice(String),

    #[error("illegal action {0:?}")]
    IllegalChoice(String),

    #[error(transparent)]
    Illegal(#[from] IllegalAction),
}

/// Lobby errors.
#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("room {0:?} already exists")]
    RoomExists(String),

    #[error("no room {0:?}")]
    NoSuchRoom(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
