//! Match-level bookkeeping that outlives individual rounds.

use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, PlayerId, PlayerMap, TileKind};

/// One tile a seat gave up during the round, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardRecord {
    pub kind: TileKind,
    pub action: ActionKind,
}

impl std::fmt::Display for DiscardRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.label(), self.action.suffix())
    }
}

/// Scores, counters and per-round history of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: usize,
    pub scores: PlayerMap<i32>,
    pub target_score: i32,
    /// Rounds completed so far.
    pub round: u32,
    /// Actions applied in the current round.
    pub turn: u32,
    /// Kind of the tile used by the most recent action; `None` after a pass.
    pub last_tile: Option<TileKind>,
    pub discards: PlayerMap<Vec<DiscardRecord>>,
    pub winner: Option<PlayerId>,
}

impl MatchState {
    #[must_use]
    pub fn new(players: usize, target_score: i32) -> Self {
        Self {
            players,
            scores: PlayerMap::with_value(players, 0),
            target_score,
            round: 0,
            turn: 0,
            last_tile: None,
            discards: PlayerMap::with_default(players),
            winner: None,
        }
    }

    /// Note an applied action.
    pub fn record(&mut self, player: PlayerId, action: ActionKind, tile: Option<TileKind>) {
        self.last_tile = tile;
        match tile {
            Some(kind) if action != ActionKind::Pass => {
                self.discards[player].push(DiscardRecord { kind, action });
            }
            _ => {}
        }
        self.turn += 1;
    }

    /// Credit a round win. Returns true when the winner reached the target.
    pub fn award(&mut self, winner: PlayerId, points: i32) -> bool {
        self.scores[winner] = self.scores[winner].saturating_add(points);
        self.round += 1;
        let reached = self.scores[winner] >= self.target_score;
        if reached {
            self.winner = Some(winner);
        }
        reached
    }

    /// Clear per-round history before a new deal.
    pub fn reset_round(&mut self) {
        self.turn = 0;
        self.last_tile = None;
        for history in self.discards.values_mut() {
            history.clear();
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Discard history of `player` as labels, e.g. `["4A", "TB"]`.
    #[must_use]
    pub fn discard_labels(&self, player: PlayerId) -> Vec<String> {
        self.discards[player].iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_skips_passes() {
        let mut state = MatchState::new(3, 10);
        let p1 = PlayerId::new(1);

        state.record(p1, ActionKind::Attack, Some(TileKind::Num4));
        state.record(p1, ActionKind::Pass, None);
        assert_eq!(state.last_tile, None);
        state.record(p1, ActionKind::BonusReceive, Some(TileKind::Tiger));

        assert_eq!(state.discard_labels(p1), vec!["4A", "TB"]);
        assert_eq!(state.last_tile, Some(TileKind::Tiger));
        assert_eq!(state.turn, 3);
    }

    #[test]
    fn test_award_and_target() {
        let mut state = MatchState::new(2, 5);
        let p0 = PlayerId::new(0);

        assert!(!state.award(p0, 3));
        assert_eq!(state.round, 1);
        assert!(!state.is_over());

        assert!(state.award(p0, 2));
        assert_eq!(state.scores[p0], 5);
        assert_eq!(state.winner, Some(p0));
    }

    #[test]
    fn test_award_saturates_at_max_score() {
        let table = crate::scoring::ScoreTable::parse("1,2,3,4,5,6,7,8: 1\nT: 2147483647\nD: 1").unwrap();
        let mut state = MatchState::new(2, 10);
        let p0 = PlayerId::new(0);

        assert!(!state.award(p0, table.lookup(TileKind::Num3, 0)));
        assert!(state.award(p0, table.lookup(TileKind::Tiger, 0)));

        assert_eq!(state.scores[p0], i32::MAX);
        assert_eq!(state.winner, Some(p0));
    }

    #[test]
    fn test_reset_round_keeps_scores() {
        let mut state = MatchState::new(2, 5);
        let p0 = PlayerId::new(0);
        state.record(p0, ActionKind::Attack, Some(TileKind::Num1));
        state.award(p0, 1);

        state.reset_round();

        assert_eq!(state.turn, 0);
        assert_eq!(state.last_tile, None);
        assert!(state.discards[p0].is_empty());
        assert_eq!(state.scores[p0], 1);
        assert_eq!(state.round, 1);
    }
}
