//! A single match: seating, turn gating, rounds and scoring.
//!
//! ## Lifecycle
//!
//! 1. Clients join; the match starts when the last seat fills (or when a
//!    headless driver calls [`Match::start`]).
//! 2. Each accepted action is applied to the round's `GameState`.
//! 3. When the acting seat's hand is empty the round ends with that seat as
//!    winner, whatever the phase. The winning tile is scored.
//! 4. If the winner reached the target score the match is over; otherwise a
//!    new round is dealt.
//!
//! A `Match` is not internally synchronized. Hosts serving several matches
//! put each behind its own lock (see [`super::lobby::Lobby`]).

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{
    Action, ActionKind, ConfigError, GameState, MatchConfig, MatchError, PlayerId, TileKind,
};
use crate::rules::{self, engine::deal};
use crate::scoring::ScoreTable;

use super::events::{JoinAck, MatchEvent, MatchOver, RoundResult, StateSnapshot};
use super::match_state::MatchState;
use super::seats::{ClientId, Role, SeatRegistry, Viewer};

const PASS_CHOICE: &str = "pass";

/// One match between a fixed set of seats.
#[derive(Clone, Debug)]
pub struct Match {
    config: MatchConfig,
    hand_size: usize,
    table: Arc<ScoreTable>,
    seats: SeatRegistry,
    round_state: Option<GameState>,
    record: MatchState,
}

impl Match {
    /// Create a match. Fails if the configuration is unusable.
    pub fn new(config: MatchConfig, table: Arc<ScoreTable>) -> Result<Self, ConfigError> {
        config.validate()?;
        let hand_size = config.round_config(0).hand_size()?;
        Ok(Self {
            seats: SeatRegistry::new(config.players),
            record: MatchState::new(config.players, config.target_score),
            hand_size,
            table,
            round_state: None,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn score_table(&self) -> &ScoreTable {
        &self.table
    }

    #[must_use]
    pub fn seats(&self) -> &SeatRegistry {
        &self.seats
    }

    /// State of the current (or, after the match, the final) round.
    #[must_use]
    pub fn round_state(&self) -> Option<&GameState> {
        self.round_state.as_ref()
    }

    #[must_use]
    pub fn match_state(&self) -> &MatchState {
        &self.record
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.round_state.is_some()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.record.is_over()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.record.winner
    }

    // === Seating ===

    /// Register a client. Starts the match when the last seat is taken.
    pub fn join(
        &mut self,
        client: ClientId,
        player_id: impl Into<String>,
        role: Role,
    ) -> Result<(JoinAck, Vec<MatchEvent>), MatchError> {
        let player_id = player_id.into();
        let seat = self.seats.join(client, player_id.clone(), role)?;
        info!(room = %self.config.room_id, client = client.0, seat = ?seat, "client joined");

        let ack = JoinAck {
            room_id: self.config.room_id.clone(),
            player_id,
            seat,
            players: self.config.players,
        };

        let events = if self.seats.is_full() { self.start() } else { Vec::new() };
        Ok((ack, events))
    }

    pub fn leave(&mut self, client: ClientId) {
        if let Some(info) = self.seats.leave(client) {
            info!(room = %self.config.room_id, client = client.0, seat = ?info.seat, "client left");
        }
    }

    /// Deal the first round. Does nothing if the match already started.
    pub fn start(&mut self) -> Vec<MatchEvent> {
        if self.is_started() {
            return Vec::new();
        }
        info!(room = %self.config.room_id, players = self.config.players, "starting match");
        self.deal_round();
        vec![MatchEvent::Started]
    }

    fn deal_round(&mut self) {
        let config = self.config.round_config(self.record.round);
        self.round_state = Some(deal(&config, self.hand_size));
        self.record.reset_round();
        debug!(room = %self.config.room_id, round = self.record.round, seed = config.seed, "dealt round");
    }

    // === Turn handling ===

    /// Current round, if the match is running.
    fn active_state(&self) -> Result<&GameState, MatchError> {
        let state = self.round_state.as_ref().ok_or(MatchError::NotStarted)?;
        if self.record.is_over() {
            return Err(MatchError::MatchOver);
        }
        Ok(state)
    }

    fn check_turn(&self, seat: PlayerId) -> Result<(), MatchError> {
        let current = self.active_state()?.current_player();
        if seat != current {
            return Err(MatchError::NotYourTurn { seat, current });
        }
        Ok(())
    }

    /// Legal actions of the seat to act; empty when nothing is running.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.active_state()
            .map(rules::legal_actions)
            .unwrap_or_default()
    }

    /// Legal actions as sorted, de-duplicated choice labels.
    #[must_use]
    pub fn legal_choices(&self) -> Vec<String> {
        let Ok(state) = self.active_state() else {
            return Vec::new();
        };
        let choices: BTreeSet<String> = rules::legal_actions(state)
            .iter()
            .filter_map(|action| match action {
                Action::Pass { .. } => Some(PASS_CHOICE.to_string()),
                _ => rules::tile_for_action(state, action).map(|k| k.label().to_string()),
            })
            .collect();
        choices.into_iter().collect()
    }

    /// Translate a symbolic choice into one of the current legal actions.
    ///
    /// `"pass"` (any case) selects Pass. A tile label selects the first legal
    /// action of the current phase's type that plays a tile of that kind.
    pub fn resolve_choice(&self, choice: &str) -> Result<Action, MatchError> {
        let state = self.active_state()?;
        let token = choice.trim();
        let legal = rules::legal_actions(state);

        if token.eq_ignore_ascii_case(PASS_CHOICE) {
            return legal
                .into_iter()
                .find(|a| a.kind() == ActionKind::Pass)
                .ok_or_else(|| MatchError::IllegalChoice(token.to_string()));
        }

        let kind = TileKind::from_label(token)
            .ok_or_else(|| MatchError::InvalidChoice(token.to_string()))?;
        let wanted = rules::tile_action_kind(state.phase());
        legal
            .into_iter()
            .find(|a| Some(a.kind()) == wanted && rules::tile_for_action(state, a) == Some(kind))
            .ok_or_else(|| MatchError::IllegalChoice(token.to_string()))
    }

    /// Apply a symbolic choice from a connected client.
    pub fn submit_choice(&mut self, client: ClientId, choice: &str) -> Result<Vec<MatchEvent>, MatchError> {
        let result = self.try_submit_choice(client, choice);
        if let Err(err) = &result {
            warn!(room = %self.config.room_id, client = client.0, choice, error = %err, "choice rejected");
        }
        result
    }

    fn try_submit_choice(&mut self, client: ClientId, choice: &str) -> Result<Vec<MatchEvent>, MatchError> {
        self.active_state()?;
        let seat = self.seats.seat_of(client)?;
        self.check_turn(seat)?;
        let action = self.resolve_choice(choice)?;
        self.apply(seat, action)
    }

    /// Apply an action on behalf of `seat`.
    ///
    /// Rejections leave both the round and the match untouched.
    pub fn apply(&mut self, seat: PlayerId, action: Action) -> Result<Vec<MatchEvent>, MatchError> {
        self.check_turn(seat)?;
        let state = self.round_state.as_mut().ok_or(MatchError::NotStarted)?;

        let tile = rules::tile_for_action(state, &action);
        rules::apply_action(state, &action)?;

        let actor = action.player();
        let hand_empty = state.hand(actor).is_empty();
        self.record.record(actor, action.kind(), tile);
        debug!(
            room = %self.config.room_id,
            seat = actor.index(),
            action = %action.kind(),
            tile = tile.map(TileKind::label),
            turn = self.record.turn,
            "action applied"
        );

        match tile {
            Some(kind) if hand_empty => Ok(self.finish_round(actor, kind)),
            _ => Ok(vec![MatchEvent::StateChanged]),
        }
    }

    // === Round end ===

    fn finish_round(&mut self, winner: PlayerId, kind: TileKind) -> Vec<MatchEvent> {
        let Some(state) = self.round_state.as_mut() else {
            return Vec::new();
        };
        state.finish(winner);

        let bonus = state.bonus_discards(winner);
        let winner_hand: Vec<String> = state
            .hand(winner)
            .iter()
            .map(|t| t.kind.label().to_string())
            .collect();
        let round_points = self.table.lookup(kind, bonus);
        let reached = self.record.award(winner, round_points);

        let result = RoundResult {
            winner,
            last_tile: self.record.last_tile.map(|k| k.label().to_string()),
            bonus_discards: bonus,
            round_points,
            winner_hand_size: winner_hand.len(),
            winner_hand,
            winner_discards: self.record.discard_labels(winner),
            scores: self.record.scores.clone(),
            round: self.record.round,
        };
        info!(
            room = %self.config.room_id,
            round = result.round,
            winner = winner.index(),
            tile = kind.label(),
            bonus,
            points = round_points,
            "round finished"
        );

        let mut events = vec![MatchEvent::RoundFinished(result)];
        if reached {
            info!(
                room = %self.config.room_id,
                winner = winner.index(),
                score = self.record.scores[winner],
                rounds = self.record.round,
                "match over"
            );
            events.push(MatchEvent::MatchOver(MatchOver {
                winner,
                scores: self.record.scores.clone(),
            }));
        } else {
            self.deal_round();
            events.push(MatchEvent::RoundStarted { round: self.record.round });
        }
        events
    }

    // === Views ===

    /// Snapshot of the round for `viewer`. `None` before the match starts.
    #[must_use]
    pub fn snapshot(&self, viewer: Viewer) -> Option<StateSnapshot> {
        let state = self.round_state.as_ref()?;

        let hand = match viewer {
            Viewer::Seat(seat) if state.hands().contains(seat) => state
                .hand(seat)
                .iter()
                .map(|t| t.kind.label().to_string())
                .collect(),
            _ => Vec::new(),
        };
        let legal = match viewer {
            Viewer::Seat(seat) if seat == state.current_player() => self.legal_choices(),
            _ => Vec::new(),
        };

        Some(StateSnapshot {
            room_id: self.config.room_id.clone(),
            round: self.record.round,
            turn: self.record.turn,
            phase: state.phase(),
            current_player: state.current_player(),
            attack_tile: state.attack_tile().map(|t| t.kind.label().to_string()),
            hand,
            hand_sizes: state.hand_sizes(),
            bonus_discards: state.all_bonus_discards().clone(),
            legal,
            scores: self.record.scores.clone(),
        })
    }

    /// Snapshot for a registered client.
    #[must_use]
    pub fn snapshot_for(&self, client: ClientId) -> Option<StateSnapshot> {
        let viewer = self.seats.get(client)?.viewer();
        self.snapshot(viewer)
    }
}
