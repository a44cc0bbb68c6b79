//! # tiger-dragon
//!
//! Rules engine and match orchestrator for the Tiger & Dragon tile game.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every deal comes from a seeded `GameRng`; the same
//!    seed and player count always give the same hands.
//!
//! 2. **Validate Then Commit**: `apply_action` either applies an action in
//!    full or rejects it with a typed reason and leaves the state untouched.
//!
//! 3. **Engine Knows One Round**: the engine drives the phase machine of a
//!    single round. Round end, scoring and match flow live in the
//!    orchestrator.
//!
//! ## Modules
//!
//! - `core`: seats, tiles, actions, round state, RNG, configuration, errors
//! - `rules`: dealing, legal actions, action application
//! - `scoring`: score table and its text loader
//! - `orchestrator`: seats, turn gating, rounds, snapshots, lobby
//! - `agents`: automated players

pub mod core;
pub mod rules;
pub mod scoring;
pub mod orchestrator;
pub mod agents;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng,
    Tile, TileKind, Hand,
    GameConfig, MatchConfig, RoundSeeding,
    Action, ActionKind,
    GameState, Phase,
    ConfigError, IllegalAction, LobbyError, MatchError,
};

pub use crate::rules::{apply_action, can_defend_with, create_initial_state, legal_actions};

pub use crate::scoring::{ScoreRule, ScoreTable};

pub use crate::orchestrator::{
    ClientId, Role, Viewer,
    Match, MatchEvent, MatchState, Lobby,
    JoinAck, RoundResult, StateSnapshot,
};

pub use crate::agents::{play_out, Agent, PlayOutcome, RandomAgent};
