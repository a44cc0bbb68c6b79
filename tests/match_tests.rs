//! Orchestrator behaviour: admission, choices, round flow and scoring.

use std::sync::Arc;

use tiger_dragon::agents::{play_out, Agent, RandomAgent};
use tiger_dragon::core::{
    Action, GameRng, GameState, MatchConfig, MatchError, Phase, PlayerId, RoundSeeding, TileKind,
};
use tiger_dragon::orchestrator::{ClientId, Match, MatchEvent, Role, Viewer};
use tiger_dragon::scoring::{ScoreRule, ScoreTable};

const RULES: &str = "\
# numbers
1,2,3,4,5,6,7,8: 1
T: 3
D: 5 +bonus
";

fn table() -> Arc<ScoreTable> {
    Arc::new(ScoreTable::parse(RULES).unwrap())
}

fn seated(config: MatchConfig) -> Match {
    let players = config.players;
    let mut game = Match::new(config, table()).unwrap();
    for i in 0..players {
        game.join(ClientId(i as u64), format!("player{i}"), Role::Player).unwrap();
    }
    game
}

/// Drive the match with random legal actions, returning every event.
fn drive(game: &mut Match, seed: u64, max_actions: usize) -> Vec<MatchEvent> {
    let mut agents = RandomAgent::for_seats(game.config().players, seed);
    let mut events = Vec::new();
    for _ in 0..max_actions {
        if game.is_over() {
            break;
        }
        let state = game.round_state().unwrap();
        let seat = state.current_player();
        let legal = game.legal_actions();
        let action = agents[seat].choose(state, &legal).unwrap();
        events.extend(game.apply(seat, action).unwrap());
    }
    events
}

#[test]
fn test_dragon_scores_base_plus_bonus() {
    let table = ScoreTable::builder()
        .numbers(ScoreRule::flat(1))
        .rule(TileKind::Tiger, ScoreRule::flat(1))
        .rule(TileKind::Dragon, ScoreRule::with_bonus(5))
        .build()
        .unwrap();
    assert_eq!(table.lookup(TileKind::Dragon, 3), 8);
    assert_eq!(table.lookup(TileKind::Tiger, 3), 1);
}

#[test]
fn test_room_full_and_spectators() {
    let mut game = seated(MatchConfig::default().with_players(2));
    assert!(game.is_started());

    assert_eq!(
        game.join(ClientId(50), "late", Role::Player).map(|(ack, _)| ack),
        Err(MatchError::RoomFull)
    );
    let (ack, events) = game.join(ClientId(51), "watcher", Role::Spectator).unwrap();
    assert_eq!(ack.seat, None);
    assert!(events.is_empty());

    let snapshot = game.snapshot_for(ClientId(51)).unwrap();
    assert!(snapshot.hand.is_empty());
    assert!(snapshot.legal.is_empty());
    assert_eq!(snapshot.hand_sizes[PlayerId::new(0)], 13);
}

#[test]
fn test_leave_does_not_free_seat() {
    let mut game = Match::new(MatchConfig::default().with_players(2), table()).unwrap();
    game.join(ClientId(1), "a", Role::Player).unwrap();
    game.leave(ClientId(1));

    let (ack, events) = game.join(ClientId(2), "b", Role::Player).unwrap();
    assert_eq!(ack.seat, Some(PlayerId::new(1)));
    assert_eq!(events, vec![MatchEvent::Started]);
    assert_eq!(game.submit_choice(ClientId(1), "pass"), Err(MatchError::UnknownClient));
}

#[test]
fn test_choice_is_trimmed_and_case_insensitive() {
    let mut game = seated(MatchConfig::default().with_players(2));
    let p0 = PlayerId::new(0);
    let opener = game.round_state().unwrap().hand(p0)[0].kind;
    game.submit_choice(ClientId(0), opener.label()).unwrap();

    assert_eq!(game.round_state().unwrap().phase(), Phase::Defend);
    let p1 = PlayerId::new(1);
    assert_eq!(game.resolve_choice("  PaSs "), Ok(Action::Pass { player: p1 }));

    let events = game.submit_choice(ClientId(1), " Pass").unwrap();
    assert_eq!(events, vec![MatchEvent::StateChanged]);
    assert_eq!(game.round_state().unwrap().phase(), Phase::BonusReceive);
    assert_eq!(game.round_state().unwrap().current_player(), p0);
}

#[test]
fn test_unheld_label_is_illegal() {
    // Seat 0 holds 8 tiles, so at least two kinds are missing.
    let game = seated(MatchConfig::default().with_players(5));
    let hand = game.round_state().unwrap().hand(PlayerId::new(0)).to_vec();
    let missing = TileKind::ALL
        .into_iter()
        .find(|k| hand.iter().all(|t| t.kind != *k))
        .unwrap();

    assert_eq!(
        game.resolve_choice(missing.label()),
        Err(MatchError::IllegalChoice(missing.label().to_string()))
    );
    assert_eq!(game.resolve_choice("9"), Err(MatchError::InvalidChoice("9".into())));
}

#[test]
fn test_rejections_do_not_advance_turn() {
    let mut game = seated(MatchConfig::default().with_players(3));
    let before = game.round_state().unwrap().clone();

    assert!(game.apply(PlayerId::new(0), Action::Pass { player: PlayerId::new(0) }).is_err());
    assert!(game.apply(PlayerId::new(1), Action::Attack { player: PlayerId::new(1), hand_index: 0 }).is_err());
    assert!(game.apply(PlayerId::new(0), Action::Attack { player: PlayerId::new(0), hand_index: 99 }).is_err());

    assert_eq!(game.round_state(), Some(&before));
    assert_eq!(game.match_state().turn, 0);
}

#[test]
fn test_rounds_end_on_empty_hand_and_score() {
    let mut game = seated(MatchConfig::default().with_players(4).with_seed(7));
    let events = drive(&mut game, 3, 1_000_000);
    assert!(game.is_over());

    let results: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::RoundFinished(result) => Some(result),
            _ => None,
        })
        .collect();
    assert!(!results.is_empty());

    let mut running = [0i32; 4];
    for (i, result) in results.iter().enumerate() {
        assert!(result.winner_hand.is_empty());
        assert_eq!(result.winner_hand_size, 0);
        assert_eq!(result.round as usize, i + 1);

        let kind = TileKind::from_label(result.last_tile.as_deref().unwrap()).unwrap();
        let expected = game.score_table().lookup(kind, result.bonus_discards);
        assert_eq!(result.round_points, expected);

        let last = result.winner_discards.last().unwrap();
        assert!(last.starts_with(kind.label()));

        running[result.winner.index()] += result.round_points;
        assert_eq!(result.scores.values().copied().collect::<Vec<_>>(), running.to_vec());
    }

    let winner = game.winner().unwrap();
    assert!(game.match_state().scores[winner] >= 10);
    assert!(matches!(events.last(), Some(MatchEvent::MatchOver(over)) if over.winner == winner));

    let round_starts = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::RoundStarted { .. }))
        .count();
    assert_eq!(round_starts, results.len() - 1);
}

#[test]
fn test_match_over_refuses_input() {
    let mut game = seated(MatchConfig::default().with_players(2).with_target_score(1));
    drive(&mut game, 11, 1_000_000);
    assert!(game.is_over());
    assert_eq!(game.match_state().round, 1);

    assert_eq!(game.submit_choice(ClientId(0), "1"), Err(MatchError::MatchOver));
    assert!(game.legal_actions().is_empty());
    let snapshot = game.snapshot(Viewer::Seat(PlayerId::new(0))).unwrap();
    assert_eq!(snapshot.phase, Phase::Finished);
    assert!(snapshot.legal.is_empty());
}

/// Play until the second round has been dealt and return its opening state.
fn second_deal(seeding: RoundSeeding) -> (Match, GameState) {
    let config = MatchConfig::default()
        .with_players(3)
        .with_target_score(1000)
        .with_round_seeding(seeding);
    let mut game = seated(config);
    let first = game.round_state().unwrap().clone();

    let mut rng = GameRng::new(5);
    while game.match_state().round == 0 {
        let seat = game.round_state().unwrap().current_player();
        let legal = game.legal_actions();
        let action = *rng.choose(&legal).unwrap();
        game.apply(seat, action).unwrap();
    }
    (game, first)
}

#[test]
fn test_fixed_seeding_repeats_the_deal() {
    let (game, first) = second_deal(RoundSeeding::Fixed);
    assert_eq!(game.round_state(), Some(&first));
}

#[test]
fn test_per_round_seeding_varies_the_deal() {
    let (game, first) = second_deal(RoundSeeding::PerRound);
    let second = game.round_state().unwrap();
    assert_eq!(second.phase(), Phase::Attack);
    assert_eq!(second.tiles_in_hands(), first.tiles_in_hands());
    assert_ne!(second.hands(), first.hands());
    assert_eq!(game.match_state().turn, 0);
}

#[test]
fn test_random_matches_terminate() {
    for players in 2..=5 {
        for seed in 0..5u64 {
            let config = MatchConfig::default().with_players(players).with_seed(seed);
            let mut game = Match::new(config, table()).unwrap();
            let mut agents = RandomAgent::for_seats(players, seed + 100);

            let outcome = play_out(&mut game, &mut agents, 1_000_000).unwrap();

            let winner = outcome.winner.unwrap();
            assert!(outcome.scores[winner] >= 10);
            assert!(outcome.rounds >= 1);
        }
    }
}
