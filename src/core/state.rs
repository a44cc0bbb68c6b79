//! Round state.
//!
//! `GameState` is the single mutable aggregate of one round: phase, whose
//! turn it is, the pending attack, every hand and every bonus-discard
//! counter. It is replaced wholesale when a new round is dealt.
//!
//! Fields that carry invariants are crate-private and only change through
//! `rules::apply_action` (phase, turn, hands) or [`GameState::finish`].

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use super::tile::{Hand, Tile, TileKind};

/// Phase of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The current seat must open an attack.
    Attack,
    /// The current seat may defend against the attack tile or pass.
    Defend,
    /// The attack went round undefended; the attacker discards a bonus tile.
    BonusReceive,
    /// Terminal. Only the orchestrator moves a round here.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Attack => "Attack",
            Phase::Defend => "Defend",
            Phase::BonusReceive => "BonusReceive",
            Phase::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// Complete state of one round.
///
/// Deserializing checks [`GameState::invariants_hold`] and rejects states
/// that break it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct GameState {
    pub(crate) phase: Phase,
    pub(crate) players: usize,
    pub(crate) current_player: PlayerId,
    pub(crate) attack_player: PlayerId,
    /// Present iff `phase == Defend`.
    pub(crate) attack_tile: Option<Tile>,
    pub(crate) hands: PlayerMap<Hand>,
    pub(crate) bonus_discards: PlayerMap<u32>,
    pub(crate) winner: Option<PlayerId>,
}

/// Unchecked wire form of [`GameState`].
#[derive(Deserialize)]
struct StateRecord {
    phase: Phase,
    players: usize,
    current_player: PlayerId,
    attack_player: PlayerId,
    attack_tile: Option<Tile>,
    hands: PlayerMap<Hand>,
    bonus_discards: PlayerMap<u32>,
    winner: Option<PlayerId>,
}

impl TryFrom<StateRecord> for GameState {
    type Error = &'static str;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let state = Self {
            phase: record.phase,
            players: record.players,
            current_player: record.current_player,
            attack_player: record.attack_player,
            attack_tile: record.attack_tile,
            hands: record.hands,
            bonus_discards: record.bonus_discards,
            winner: record.winner,
        };
        if state.invariants_hold() {
            Ok(state)
        } else {
            Err("round state violates its invariants")
        }
    }
}

impl GameState {
    /// Build a state in the Attack phase with seat 0 to act, holding the
    /// given hands.
    ///
    /// `rules::create_initial_state` is the normal way to get a state; this
    /// is for setting up a specific deal.
    #[must_use]
    pub fn from_hands(hands: Vec<Vec<TileKind>>) -> Self {
        let players = hands.len();
        let hands = PlayerMap::new(players, |p| {
            hands[p.index()].iter().copied().map(Tile::new).collect()
        });
        Self {
            phase: Phase::Attack,
            players,
            current_player: PlayerId::new(0),
            attack_player: PlayerId::new(0),
            attack_tile: None,
            hands,
            bonus_discards: PlayerMap::with_value(players, 0),
            winner: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players
    }

    /// Seat that must act next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Seat that opened the pending attack (or will open the next one).
    #[must_use]
    pub fn attack_player(&self) -> PlayerId {
        self.attack_player
    }

    #[must_use]
    pub fn attack_tile(&self) -> Option<Tile> {
        self.attack_tile
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Tile] {
        &self.hands[player]
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    #[must_use]
    pub fn hand_sizes(&self) -> PlayerMap<usize> {
        self.hands.map(|h| h.len())
    }

    #[must_use]
    pub fn bonus_discards(&self, player: PlayerId) -> u32 {
        self.bonus_discards[player]
    }

    #[must_use]
    pub fn all_bonus_discards(&self) -> &PlayerMap<u32> {
        &self.bonus_discards
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Total tiles still held across all seats.
    #[must_use]
    pub fn tiles_in_hands(&self) -> usize {
        self.hands.values().map(|h| h.len()).sum()
    }

    /// Close the round with `winner`. Further actions are rejected.
    pub fn finish(&mut self, winner: PlayerId) {
        self.phase = Phase::Finished;
        self.attack_tile = None;
        self.winner = Some(winner);
    }

    /// Structural invariants: seats in range, one hand and one counter per
    /// seat, attack tile present exactly in the Defend phase.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let seats_valid = self.current_player.index() < self.players
            && self.attack_player.index() < self.players
            && self.hands.player_count() == self.players
            && self.bonus_discards.player_count() == self.players
            && self.winner.map_or(true, |w| w.index() < self.players);
        let attack_tile_valid = self.attack_tile.is_some() == (self.phase == Phase::Defend);
        seats_valid && attack_tile_valid
    }
}
