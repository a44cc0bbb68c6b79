//! Rules engine.
//!
//! Deals a round and drives its phase machine:
//! - what actions the seat to act may take
//! - how an action changes the state
//!
//! The engine never decides that a round is over; the orchestrator does
//! that by watching hand sizes.

pub mod engine;

pub use engine::{
    apply_action, can_defend_with, create_initial_state, legal_actions, tile_action_kind,
    tile_for_action,
};
