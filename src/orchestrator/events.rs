//! Values the orchestrator hands to the transport layer.
//!
//! All of them serialize with serde; the transport picks the encoding.

use serde::{Deserialize, Serialize};

use crate::core::{Phase, PlayerId, PlayerMap};

/// Reply to a join request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinAck {
    pub room_id: String,
    pub player_id: String,
    pub seat: Option<PlayerId>,
    pub players: usize,
}

/// A round as seen by one viewer.
///
/// Only the viewer's own hand is included, and legal choices only when it is
/// that viewer's turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub room_id: String,
    pub round: u32,
    pub turn: u32,
    pub phase: Phase,
    pub current_player: PlayerId,
    pub attack_tile: Option<String>,
    pub hand: Vec<String>,
    pub hand_sizes: PlayerMap<usize>,
    pub bonus_discards: PlayerMap<u32>,
    /// Sorted choice labels (`"4"`, `"T"`, `"pass"`...).
    pub legal: Vec<String>,
    pub scores: PlayerMap<i32>,
}

/// Summary of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub winner: PlayerId,
    pub last_tile: Option<String>,
    pub bonus_discards: u32,
    pub round_points: i32,
    pub winner_hand: Vec<String>,
    pub winner_hand_size: usize,
    /// Winner's discards this round, e.g. `["4A", "TB", "3D"]`.
    pub winner_discards: Vec<String>,
    pub scores: PlayerMap<i32>,
    /// Rounds completed, including this one.
    pub round: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOver {
    pub winner: PlayerId,
    pub scores: PlayerMap<i32>,
}

/// What changed after a join or an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    Started,
    StateChanged,
    RoundFinished(RoundResult),
    RoundStarted { round: u32 },
    MatchOver(MatchOver),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tags() {
        let json = serde_json::to_value(MatchEvent::RoundStarted { round: 2 }).unwrap();
        assert_eq!(json["type"], "round_started");
        assert_eq!(json["round"], 2);

        let over = MatchEvent::MatchOver(MatchOver {
            winner: PlayerId::new(1),
            scores: PlayerMap::new(2, |p| p.index() as i32 * 10),
        });
        let json = serde_json::to_value(&over).unwrap();
        assert_eq!(json["type"], "match_over");
        assert_eq!(json["winner"], 1);
        assert_eq!(json["scores"], serde_json::json!([0, 10]));
    }
}
