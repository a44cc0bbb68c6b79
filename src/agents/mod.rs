//! Automated seat players.
//!
//! An [`Agent`] picks one of the legal actions for the seat it controls.
//! [`play_out`] drives a whole match with one agent per seat through the
//! same [`Match::apply`] path human input takes.

pub mod random;

pub use random::RandomAgent;

use crate::core::{Action, GameState, MatchError, PlayerId, PlayerMap};
use crate::orchestrator::Match;

/// Chooses actions for one seat.
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose one of `legal`.
    ///
    /// Returns `None` if `legal` is empty.
    fn choose(&mut self, state: &GameState, legal: &[Action]) -> Option<Action>;
}

/// Always plays the first legal action.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalAgent;

impl Agent for FirstLegalAgent {
    fn name(&self) -> &str {
        "FirstLegalAgent"
    }

    fn choose(&mut self, _state: &GameState, legal: &[Action]) -> Option<Action> {
        legal.first().copied()
    }
}

/// How an automated match ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// `None` if the action limit was hit first.
    pub winner: Option<PlayerId>,
    pub scores: PlayerMap<i32>,
    pub rounds: u32,
    pub actions: usize,
}

/// Play `game` to completion with one agent per seat.
///
/// Starts the match if needed. Stops early after `max_actions` actions or
/// if an agent declines to act.
pub fn play_out<A: Agent>(
    game: &mut Match,
    agents: &mut PlayerMap<A>,
    max_actions: usize,
) -> Result<PlayOutcome, MatchError> {
    game.start();

    let mut actions = 0;
    while !game.is_over() && actions < max_actions {
        let legal = game.legal_actions();
        let state = game.round_state().ok_or(MatchError::NotStarted)?;
        let seat = state.current_player();
        let Some(action) = agents[seat].choose(state, &legal) else {
            break;
        };
        game.apply(seat, action)?;
        actions += 1;
    }

    let record = game.match_state();
    Ok(PlayOutcome {
        winner: game.winner(),
        scores: record.scores.clone(),
        rounds: record.round,
        actions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MatchConfig, TileKind};
    use crate::scoring::{ScoreRule, ScoreTable};
    use std::sync::Arc;

    fn table() -> Arc<ScoreTable> {
        Arc::new(
            ScoreTable::builder()
                .numbers(ScoreRule::flat(1))
                .rule(TileKind::Tiger, ScoreRule::with_bonus(2))
                .rule(TileKind::Dragon, ScoreRule::with_bonus(2))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_first_legal_agent_finishes_match() {
        let mut game = Match::new(MatchConfig::default().with_players(3), table()).unwrap();
        let mut agents = PlayerMap::with_value(3, FirstLegalAgent);

        let outcome = play_out(&mut game, &mut agents, 100_000).unwrap();

        let winner = outcome.winner.unwrap();
        assert!(outcome.scores[winner] >= 10);
        assert!(outcome.rounds >= 1);
        assert!(game.is_over());
    }

    #[test]
    fn test_action_limit() {
        let mut game = Match::new(MatchConfig::default().with_players(2), table()).unwrap();
        let mut agents = PlayerMap::with_value(2, FirstLegalAgent);

        let outcome = play_out(&mut game, &mut agents, 3).unwrap();

        assert_eq!(outcome.actions, 3);
        assert_eq!(outcome.winner, None);
    }
}
