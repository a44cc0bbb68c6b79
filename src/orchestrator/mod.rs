//! Match orchestration around the rules engine.
//!
//! The engine knows one round. This layer adds seats, turn gating, symbolic
//! choices, scoring across rounds and per-viewer snapshots. It never talks to
//! a network: callers feed it joins and choices and forward the events it
//! returns.

pub mod events;
pub mod game_match;
pub mod lobby;
pub mod match_state;
pub mod seats;

pub use events::{JoinAck, MatchEvent, MatchOver, RoundResult, StateSnapshot};
pub use game_match::Match;
pub use lobby::{Lobby, SharedMatch};
pub use match_state::{DiscardRecord, MatchState};
pub use seats::{ClientId, ClientInfo, Role, SeatRegistry, Viewer};
