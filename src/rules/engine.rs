//! Dealing, legal-action generation and action application.
//!
//! ## Phase machine
//!
//! ```text
//!            Attack ──────────────► Defend ──(Defend)──► Attack (defender attacks)
//!              ▲                      │
//!              │                  (Pass × n-1)
//!              │                      ▼
//!              └───(BonusReceive)── BonusReceive
//! ```
//!
//! `Finished` is never entered here; the orchestrator closes a round when a
//! hand runs out.
//!
//! ## Implementation Notes
//!
//! - `legal_actions` is pure and never returns an out-of-range hand index
//! - `apply_action` validates everything itself, including defend
//!   compatibility, and either commits the whole transition or changes nothing

use crate::core::{
    build_deck, Action, ActionKind, ConfigError, GameConfig, GameRng, GameState, Hand, IllegalAction,
    Phase, PlayerId, PlayerMap, Tile, TileKind,
};

/// Whether `defend` answers an attack with `attack`.
///
/// - two numbered tiles match on equal face value
/// - Tiger answers any even number
/// - Dragon answers any odd number
/// - nothing answers a Tiger or Dragon attack
#[must_use]
pub fn can_defend_with(attack: TileKind, defend: TileKind) -> bool {
    match (attack.value(), defend) {
        (Some(a), d) if d.is_number() => d.value() == Some(a),
        (Some(_), TileKind::Tiger) => attack.is_even(),
        (Some(_), TileKind::Dragon) => attack.is_odd(),
        _ => false,
    }
}

/// Shuffle a fresh deck with `config.seed` and deal a round.
///
/// Each seat gets a contiguous chunk of the shuffled deck in seat order; seat
/// 0 then takes the next undealt tile as its extra tile and opens the first
/// attack.
pub fn create_initial_state(config: &GameConfig) -> Result<GameState, ConfigError> {
    let hand_size = config.hand_size()?;
    Ok(deal(config, hand_size))
}

/// Deal with an already validated hand size.
pub(crate) fn deal(config: &GameConfig, hand_size: usize) -> GameState {
    let players = config.players;

    let mut deck = build_deck();
    GameRng::new(config.seed).shuffle(&mut deck);

    let mut chunks = deck.chunks(hand_size);
    let mut hands: PlayerMap<Hand> = PlayerMap::with_default(players);
    for hand in hands.values_mut() {
        if let Some(chunk) = chunks.next() {
            hand.extend_from_slice(chunk);
        }
    }

    let start = PlayerId::new(0);
    if let Some(&extra) = deck.get(hand_size * players) {
        hands[start].push(extra);
    }

    GameState {
        phase: Phase::Attack,
        players,
        current_player: start,
        attack_player: start,
        attack_tile: None,
        hands,
        bonus_discards: PlayerMap::with_value(players, 0),
        winner: None,
    }
}

/// Enumerate the legal actions of the seat to act.
///
/// Empty once the round is finished. In the Defend phase the list ends with
/// exactly one `Pass`, whether or not a defense exists.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let player = state.current_player;
    let hand = &state.hands[player];

    match state.phase {
        Phase::Finished => Vec::new(),
        Phase::Attack => (0..hand.len())
            .map(|hand_index| Action::Attack { player, hand_index })
            .collect(),
        Phase::BonusReceive => (0..hand.len())
            .map(|hand_index| Action::BonusReceive { player, hand_index })
            .collect(),
        Phase::Defend => {
            let Some(attack) = state.attack_tile else {
                return Vec::new();
            };
            hand.iter()
                .enumerate()
                .filter(|(_, tile)| can_defend_with(attack.kind, tile.kind))
                .map(|(hand_index, _)| Action::Defend { player, hand_index })
                .chain(std::iter::once(Action::Pass { player }))
                .collect()
        }
    }
}

/// Validate `action` against `state` and apply it.
///
/// On `Err` the state is untouched.
pub fn apply_action(state: &mut GameState, action: &Action) -> Result<(), IllegalAction> {
    if state.is_finished() {
        return Err(IllegalAction::Finished);
    }
    let player = action.player();
    if player != state.current_player {
        return Err(IllegalAction::OutOfTurn {
            expected: state.current_player,
            actual: player,
        });
    }
    if (state.phase == Phase::Defend) != state.attack_tile.is_some() {
        return Err(IllegalAction::MissingAttackTile);
    }

    match (state.phase, *action) {
        (Phase::Attack, Action::Attack { hand_index, .. }) => {
            let tile = take_tile(state, player, hand_index)?;
            state.attack_tile = Some(tile);
            state.attack_player = player;
            state.current_player = player.next(state.players);
            state.phase = Phase::Defend;
        }
        (Phase::BonusReceive, Action::BonusReceive { hand_index, .. }) => {
            take_tile(state, player, hand_index)?;
            state.bonus_discards[player] += 1;
            state.phase = Phase::Attack;
        }
        (Phase::Defend, Action::Pass { .. }) => {
            state.current_player = player.next(state.players);
            if state.current_player == state.attack_player {
                state.attack_tile = None;
                state.phase = Phase::BonusReceive;
            }
        }
        (Phase::Defend, Action::Defend { hand_index, .. }) => {
            let attack = state.attack_tile.ok_or(IllegalAction::MissingAttackTile)?;
            let defend = tile_at(state, player, hand_index)?;
            if !can_defend_with(attack.kind, defend.kind) {
                return Err(IllegalAction::CannotDefend {
                    attack: attack.kind,
                    defend: defend.kind,
                });
            }
            take_tile(state, player, hand_index)?;
            state.attack_tile = None;
            state.attack_player = player;
            state.current_player = player;
            state.phase = Phase::Attack;
        }
        (phase, action) => {
            return Err(IllegalAction::WrongPhase {
                phase,
                action: action.kind(),
            });
        }
    }

    debug_assert!(state.invariants_hold());
    Ok(())
}

fn tile_at(state: &GameState, player: PlayerId, hand_index: usize) -> Result<Tile, IllegalAction> {
    let hand = &state.hands[player];
    hand.get(hand_index)
        .copied()
        .ok_or(IllegalAction::HandIndexOutOfRange {
            index: hand_index,
            len: hand.len(),
        })
}

fn take_tile(state: &mut GameState, player: PlayerId, hand_index: usize) -> Result<Tile, IllegalAction> {
    let tile = tile_at(state, player, hand_index)?;
    state.hands[player].remove(hand_index);
    Ok(tile)
}

/// The kind of tile an action would play, if it plays one that exists.
#[must_use]
pub fn tile_for_action(state: &GameState, action: &Action) -> Option<TileKind> {
    let player = action.player();
    if !state.hands.contains(player) {
        return None;
    }
    action
        .hand_index()
        .and_then(|i| state.hands[player].get(i))
        .map(|t| t.kind)
}

/// Action kind a tile choice maps to in the current phase.
#[must_use]
pub fn tile_action_kind(phase: Phase) -> Option<ActionKind> {
    match phase {
        Phase::Attack => Some(ActionKind::Attack),
        Phase::Defend => Some(ActionKind::Defend),
        Phase::BonusReceive => Some(ActionKind::BonusReceive),
        Phase::Finished => None,
    }
}
