//! Round and match configuration.
//!
//! - `GameConfig`: what the engine needs to deal one round.
//! - `MatchConfig`: what the orchestrator needs to run a whole match.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Starting hand size for a player count, `None` if unsupported.
///
/// Seat 0 receives one tile more than this.
#[must_use]
pub const fn hand_size_for_players(players: usize) -> Option<usize> {
    match players {
        2 => Some(12),
        3 => Some(11),
        4 => Some(9),
        5 => Some(7),
        _ => None,
    }
}

/// Configuration for dealing a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: usize,
    pub seed: u64,
}

impl GameConfig {
    #[must_use]
    pub const fn new(players: usize, seed: u64) -> Self {
        Self { players, seed }
    }

    /// Hand size for this player count.
    pub fn hand_size(&self) -> Result<usize, ConfigError> {
        hand_size_for_players(self.players).ok_or(ConfigError::UnsupportedPlayerCount(self.players))
    }
}

/// How each round's deal seed is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundSeeding {
    /// Every round reuses the match seed, so every round gets the same deal.
    Fixed,
    /// Each round derives its own seed from the match seed and round index.
    #[default]
    PerRound,
}

/// Derive the deal seed for a round. Round 0 keeps the base seed.
#[must_use]
pub fn derive_round_seed(base: u64, round: u32) -> u64 {
    base.wrapping_add(u64::from(round).wrapping_mul(0x9E3779B97F4A7C15))
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Room identifier echoed in snapshots.
    pub room_id: String,

    /// Number of seats (2-5).
    pub players: usize,

    /// Base seed for dealing.
    pub seed: u64,

    /// First seat to reach this cumulative score wins the match.
    pub target_score: i32,

    pub round_seeding: RoundSeeding,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            room_id: "room1".to_string(),
            players: 4,
            seed: 42,
            target_score: 10,
            round_seeding: RoundSeeding::default(),
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_target_score(mut self, target: i32) -> Self {
        self.target_score = target;
        self
    }

    #[must_use]
    pub fn with_round_seeding(mut self, seeding: RoundSeeding) -> Self {
        self.round_seeding = seeding;
        self
    }

    #[must_use]
    pub fn with_room_id(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = room_id.into();
        self
    }

    /// Check the configuration before a match is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        GameConfig::new(self.players, self.seed).hand_size()?;
        if self.target_score <= 0 {
            return Err(ConfigError::InvalidTargetScore(self.target_score));
        }
        Ok(())
    }

    /// Engine configuration for the given round.
    #[must_use]
    pub fn round_config(&self, round: u32) -> GameConfig {
        let seed = match self.round_seeding {
            RoundSeeding::Fixed => self.seed,
            RoundSeeding::PerRound => derive_round_seed(self.seed, round),
        };
        GameConfig::new(self.players, seed)
    }
}
