//! Uniform random agent.

use crate::core::{Action, GameRng, GameState, PlayerId, PlayerMap};

use super::Agent;

/// Picks uniformly among legal actions from its own seeded stream.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    /// One agent per seat, each forked from a master seed.
    #[must_use]
    pub fn for_seats(players: usize, seed: u64) -> PlayerMap<Self> {
        let mut master = GameRng::new(seed);
        let agents = PlayerId::all(players)
            .map(|_| Self { rng: master.fork() })
            .collect();
        PlayerMap::from_vec(agents)
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "RandomAgent"
    }

    fn choose(&mut self, _state: &GameState, legal: &[Action]) -> Option<Action> {
        self.rng.choose(legal).copied()
    }
}
