use pokedex_battle::battle::{Achievement, Action, BattleSession, Controller, Phase};
use pokedex_battle::config::{BattleFormat, BattleSetupConfig, Difficulty};
use pokedex_battle::effect::TypeChartEffect;
use pokedex_battle::error::BattleError;
use pokedex_battle::model::{BaseStats, BattleMove, BattlePokemon, MoveCategory, Side, Winner};
use pokedex_battle::policy::FixedPolicy;
use pokedex_battle::roster;

fn make_move(name: &str, category: MoveCategory, power: u32, pp: u8) -> BattleMove {
    BattleMove::new(1, name, "normal", category, power, 100, pp)
}

fn make_mon(name: &str, hp: u32, attack: u32, defense: u32, moves: Vec<BattleMove>) -> BattlePokemon {
    BattlePokemon::new(
        1,
        name,
        vec!["normal".to_string()],
        50,
        BaseStats {
            hp,
            attack,
            defense,
            special_attack: attack,
            special_defense: defense,
            speed: 80,
        },
        moves,
    )
}

fn striker() -> BattlePokemon {
    make_mon(
        "Striker",
        100,
        110,
        80,
        vec![
            make_move("Strike", MoveCategory::Physical, 90, 10),
            make_move("Growl", MoveCategory::Status, 0, 40),
        ],
    )
}

fn target(hp: u32) -> BattlePokemon {
    make_mon(
        "Target",
        hp,
        60,
        80,
        vec![
            make_move("Tackle", MoveCategory::Physical, 40, 35),
            make_move("Harden", MoveCategory::Status, 0, 30),
        ],
    )
}

fn external_session(player: BattlePokemon, opponent: BattlePokemon, seed: u64) -> BattleSession {
    BattleSession::start(vec![player], vec![opponent], seed)
        .expect("valid teams")
        .with_opponent(Controller::External)
}

#[test]
fn reference_damage_lands_in_window() {
    for seed in 0..20 {
        let mut session = external_session(striker(), target(1000), seed);
        let outcome = session.select_move(0).expect("legal move");
        let lost = 1000 - outcome.opponent.current_hp;
        assert!((47..=56).contains(&lost), "seed {seed}: dealt {lost}");
        assert_eq!(
            outcome.events,
            vec![
                "Striker used Strike!".to_string(),
                format!("It dealt {lost} damage!")
            ]
        );
        assert_eq!(outcome.turn_owner, Side::Opponent);
        assert_eq!(session.phase(), Phase::AwaitingChoice(Side::Opponent));
        assert!(outcome.result.is_none());
    }
}

#[test]
fn knockout_ends_battle_for_attacker() {
    let mut defender = target(100);
    defender.current_hp = 10;
    let mut session = external_session(striker(), defender, 4);
    let outcome = session.select_move(0).expect("legal move");

    assert!(outcome.is_terminal());
    assert_eq!(outcome.opponent.current_hp, 0);
    assert_eq!(session.active(Side::Opponent).hp_percent(), 0.0);
    assert_eq!(session.phase(), Phase::Terminal(Winner::Player));
    let result = outcome.result.expect("battle is over");
    assert_eq!(result.winner, Winner::Player);
    assert_eq!(result.turns, 1);
    assert_eq!(result.player_pokemon_remaining, 1);
    assert_eq!(result.opponent_pokemon_remaining, 0);
    assert_eq!(result.experience_gained, 100);
    assert_eq!(result.battle_log.len(), 4);
    assert_eq!(result.battle_log[0], "Battle started!");
    assert_eq!(result.battle_log[3], "Target fainted!");
    assert!(result.battle_log[2].starts_with("It dealt "));
    assert_eq!(
        result.achievements(),
        vec![Achievement::QuickVictory, Achievement::HighExp]
    );
}

#[test]
fn opponent_knockout_awards_no_experience() {
    let mut player = striker();
    player.current_hp = 1;
    let opponent = make_mon(
        "Bruiser",
        300,
        120,
        80,
        vec![make_move("Slam", MoveCategory::Physical, 80, 20)],
    );
    let mut session = BattleSession::start(vec![player], vec![opponent], 2).expect("valid teams");
    let outcome = session.select_move(1).expect("status move is legal");
    let result = outcome.result.expect("opponent knocked the player out");
    assert_eq!(result.winner, Winner::Opponent);
    assert_eq!(result.player_pokemon_remaining, 0);
    assert_eq!(result.opponent_pokemon_remaining, 1);
    assert_eq!(result.experience_gained, 0);
    assert_eq!(result.turns, 2);
    assert!(result.achievements().is_empty());
}

#[test]
fn zero_pp_move_is_rejected_without_side_effects() {
    let mut player = striker();
    player.moves[0].current_pp = 0;
    let mut session = external_session(player, target(100), 1);
    let log_before = session.log().to_vec();

    let err = session.select_move(0).expect_err("no PP left");
    assert_eq!(err, BattleError::OutOfPp { index: 0 });
    assert!(err.is_invalid_action());
    assert_eq!(session.log(), log_before.as_slice());
    assert_eq!(session.active(Side::Player).current_hp, 100);
    assert_eq!(session.active(Side::Opponent).current_hp, 100);
    assert_eq!(session.active(Side::Player).moves[0].current_pp, 0);
    assert_eq!(session.active(Side::Player).moves[1].current_pp, 40);
    assert_eq!(session.phase(), Phase::AwaitingChoice(Side::Player));
    assert_eq!(session.turns(), 0);
}

#[test]
fn out_of_range_index_is_rejected() {
    let mut session = external_session(striker(), target(100), 1);
    let err = session.select_move(4).expect_err("no fifth move");
    assert_eq!(
        err,
        BattleError::InvalidMoveIndex {
            index: 4,
            available: 2
        }
    );
    assert_eq!(session.log().len(), 1);
}

#[test]
fn finished_battle_rejects_every_action() {
    let mut defender = target(100);
    defender.current_hp = 1;
    let mut session = external_session(striker(), defender, 8);
    session.select_move(0).expect("knockout");
    let log_len = session.log().len();

    for _ in 0..3 {
        assert_eq!(session.select_move(1).unwrap_err(), BattleError::Finished);
        assert_eq!(
            session.act(Side::Opponent, Action::Move(0)).unwrap_err(),
            BattleError::Finished
        );
    }
    assert_eq!(session.log().len(), log_len);
    assert!(session.result().is_some());
}

#[test]
fn status_move_never_changes_hp() {
    let mut session = external_session(striker(), target(100), 3);
    let outcome = session.select_move(1).expect("status move");
    assert_eq!(outcome.opponent.current_hp, 100);
    assert_eq!(outcome.player.current_hp, 100);
    assert_eq!(
        outcome.events,
        vec!["Striker used Growl!".to_string(), "It had no effect!".to_string()]
    );
    assert_eq!(session.active(Side::Player).moves[1].current_pp, 39);
    assert_eq!(session.active(Side::Opponent).hp_percent(), 100.0);
}

#[test]
fn autonomous_opponent_replies_in_same_call() {
    let mut session =
        BattleSession::start(vec![striker()], vec![target(500)], 12).expect("valid teams");
    let outcome = session.select_move(0).expect("legal move");

    assert_eq!(outcome.events.len(), 4);
    assert_eq!(outcome.events[0], "Striker used Strike!");
    assert!(outcome.events[2].starts_with("Target used "));
    assert_eq!(outcome.turn_owner, Side::Player);
    assert!(!outcome.is_terminal());
    assert_eq!(session.phase(), Phase::AwaitingChoice(Side::Player));
    assert_eq!(session.turns(), 2);
    assert!(!session.is_busy());

    let opponent_pp: u32 = session
        .active(Side::Opponent)
        .moves
        .iter()
        .map(|mv| (mv.pp - mv.current_pp) as u32)
        .sum();
    assert_eq!(opponent_pp, 1);
    assert_eq!(session.active(Side::Player).moves[0].current_pp, 9);
}

#[test]
fn external_opponent_waits_for_its_turn() {
    let mut session = external_session(striker(), target(500), 5);
    session.select_move(1).expect("player move");
    assert_eq!(
        session.select_move(1).unwrap_err(),
        BattleError::NotYourTurn(Side::Player)
    );
    let outcome = session
        .act(Side::Opponent, Action::Move(1))
        .expect("opponent move");
    assert_eq!(outcome.events[0], "Target used Harden!");
    assert_eq!(outcome.turn_owner, Side::Player);
}

#[test]
fn hp_never_rises_and_stays_in_bounds() {
    let player = roster::pikachu().expect("preset");
    let opponent = roster::charizard().expect("preset");
    let mut session = BattleSession::start(vec![player], vec![opponent], 21).expect("valid teams");
    let mut last = (100u32, 150u32);
    let mut log_len = session.log().len();

    while !session.is_terminal() {
        let action = session.legal_actions(Side::Player)[0];
        let outcome = session.act(Side::Player, action).expect("legal action");
        assert!(outcome.player.current_hp <= last.0);
        assert!(outcome.opponent.current_hp <= last.1);
        assert!(outcome.player.current_hp <= outcome.player.max_hp);
        assert!(outcome.opponent.current_hp <= outcome.opponent.max_hp);
        assert_eq!(&session.log()[log_len..], outcome.events.as_slice());
        log_len = session.log().len();
        last = (outcome.player.current_hp, outcome.opponent.current_hp);
    }
    let result = session.result().expect("finished");
    assert_eq!(result.battle_log, session.log());
}

#[test]
fn exhausted_moves_require_struggle() {
    let player = make_mon(
        "Tired",
        100,
        100,
        80,
        vec![make_move("Strike", MoveCategory::Physical, 90, 1)],
    );
    let mut session = external_session(player, target(1000), 6);

    assert_eq!(
        session.act(Side::Player, Action::Struggle).unwrap_err(),
        BattleError::MovesRemaining
    );
    session.select_move(0).expect("last PP");
    session
        .act(Side::Opponent, Action::Move(1))
        .expect("opponent move");

    assert_eq!(
        session.select_move(0).unwrap_err(),
        BattleError::NoUsableMove(Side::Player)
    );
    assert!(!BattleError::NoUsableMove(Side::Player).is_invalid_action());
    assert_eq!(session.legal_actions(Side::Player), vec![Action::Struggle]);

    let outcome = session.act(Side::Player, Action::Struggle).expect("struggle");
    assert_eq!(outcome.events[0], "Tired has no moves left!");
    assert_eq!(outcome.events[1], "Tired used Struggle!");
    assert!(outcome.events[2].starts_with("It dealt "));
    assert_eq!(outcome.events[3], "Tired is damaged by recoil! (25 HP)");
    assert_eq!(outcome.player.current_hp, 75);
}

#[test]
fn autonomous_opponent_struggles_when_out_of_pp() {
    let mut opponent = target(500);
    for mv in &mut opponent.moves {
        mv.current_pp = 0;
    }
    let mut session =
        BattleSession::start(vec![striker()], vec![opponent], 10).expect("valid teams");
    let outcome = session.select_move(1).expect("status move");
    assert!(outcome
        .events
        .contains(&"Target used Struggle!".to_string()));
    assert_eq!(outcome.opponent.current_hp, 375);
}

#[test]
fn unusable_policy_choice_falls_back_to_usable_slot() {
    let mut opponent = target(500);
    opponent.moves[0].current_pp = 0;
    let mut session = BattleSession::start(vec![striker()], vec![opponent], 10)
        .expect("valid teams")
        .with_opponent(Controller::policy(FixedPolicy(0)));
    let outcome = session.select_move(1).expect("status move");
    assert_eq!(outcome.events[2], "Target used Harden!");
}

#[test]
fn struggle_recoil_can_draw() {
    let mut player = make_mon(
        "Fragile",
        100,
        100,
        80,
        vec![make_move("Strike", MoveCategory::Physical, 90, 5)],
    );
    player.moves[0].current_pp = 0;
    player.current_hp = 1;
    let mut opponent = target(100);
    opponent.current_hp = 1;
    let mut session = external_session(player, opponent, 0);

    let outcome = session.act(Side::Player, Action::Struggle).expect("struggle");
    let result = outcome.result.expect("both fainted");
    assert_eq!(result.winner, Winner::Draw);
    assert_eq!(result.player_pokemon_remaining, 0);
    assert_eq!(result.opponent_pokemon_remaining, 0);
    assert_eq!(result.experience_gained, 0);
    assert_eq!(session.phase(), Phase::Terminal(Winner::Draw));
}

#[test]
fn same_seed_replays_identically() {
    let play = |seed: u64| {
        let mut session = BattleSession::start(
            vec![roster::pikachu().expect("preset")],
            vec![roster::charizard().expect("preset")],
            seed,
        )
        .expect("valid teams");
        while !session.is_terminal() {
            let action = session.legal_actions(Side::Player)[0];
            session.act(Side::Player, action).expect("legal action");
        }
        session.log().to_vec()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn config_controls_format_and_difficulty() {
    let double = BattleSetupConfig {
        battle_type: BattleFormat::Double,
        ..BattleSetupConfig::default()
    };
    let err = BattleSession::with_config(
        roster::quick_start_team().expect("preset"),
        roster::default_opponent().expect("preset"),
        double,
        1,
    )
    .unwrap_err();
    assert!(matches!(err, BattleError::Unsupported(_)));

    let hard = BattleSetupConfig {
        difficulty: Difficulty::Hard,
        ..BattleSetupConfig::default()
    };
    let mut session = BattleSession::with_config(
        roster::quick_start_team().expect("preset"),
        roster::default_opponent().expect("preset"),
        hard,
        1,
    )
    .expect("valid setup");
    let outcome = session.select_move(3).expect("agility");
    assert_eq!(outcome.events[2], "charizard used Flamethrower!");
    assert_eq!(session.config().difficulty, Difficulty::Hard);
}

#[test]
fn type_chart_effect_is_opt_in() {
    let mut attacker = striker();
    attacker.moves[0].move_type = "electric".to_string();
    let mut defender = target(300);
    defender.types = vec!["ground".to_string()];

    let mut plain = external_session(attacker.clone(), defender.clone(), 1);
    let outcome = plain.select_move(0).expect("legal move");
    assert!(outcome.opponent.current_hp < 300);

    let mut charted = external_session(attacker, defender, 1).with_effect(TypeChartEffect);
    let outcome = charted.select_move(0).expect("legal move");
    assert_eq!(outcome.opponent.current_hp, 300);
    assert_eq!(outcome.events[1], "It had no effect!");
}

#[test]
fn invalid_teams_cannot_start() {
    let err = BattleSession::start(Vec::new(), vec![target(100)], 0).unwrap_err();
    assert!(matches!(err, BattleError::InvalidTeam(_)));

    let moveless = make_mon("Empty", 100, 10, 10, Vec::new());
    assert!(BattleSession::start(vec![moveless], vec![target(100)], 0).is_err());

    let mut fainted = roster::pikachu().expect("preset");
    fainted.current_hp = 0;
    let charizard = roster::charizard().expect("preset");
    let err = BattleSession::start(vec![fainted.clone()], vec![charizard.clone()], 0).unwrap_err();
    assert!(matches!(err, BattleError::InvalidTeam(_)));
    let err = BattleSession::start(vec![charizard], vec![fainted], 0).unwrap_err();
    assert!(matches!(err, BattleError::InvalidTeam(_)));

    let mut benched = target(100);
    benched.current_hp = 0;
    let session = BattleSession::start(vec![striker(), benched], vec![target(100)], 0)
        .expect("only the lead has to be able to battle");
    assert_eq!(session.team(Side::Player).len(), 2);
    assert_eq!(session.active(Side::Player).name, "Striker");
}

#[test]
fn abandon_returns_transcript() {
    let mut session = external_session(striker(), target(500), 3);
    session.select_move(1).expect("status move");
    let log = session.abandon();
    assert_eq!(log.len(), 3);
    assert_eq!(log[1], "Striker used Growl!");
}
