//! Core types: seats, tiles, actions, round state, RNG, configuration, errors.

pub mod player;
pub mod rng;
pub mod tile;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use tile::{build_deck, Hand, Tile, TileKind, DECK_SIZE};
pub use config::{derive_round_seed, hand_size_for_players, GameConfig, MatchConfig, RoundSeeding};
pub use action::{Action, ActionKind};
pub use state::{GameState, Phase};
pub use error::{ConfigError, IllegalAction, LobbyError, MatchError};
