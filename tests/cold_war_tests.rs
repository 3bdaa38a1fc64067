//! Cold-war game played through the session, the way a console user would.

use strategy_console::choice::{ChoiceKind, OptionId};
use strategy_console::core::Side;
use strategy_console::games::cold_war::cards::card_info;
use strategy_console::games::cold_war::{CardAction, ColdWarBuilder, ColdWarGame, GameResult};
use strategy_console::rules::RulesEngine;
use strategy_console::session::{Confirmation, Session};

/// Submit the lowest-numbered option (the stop option if nothing else is left).
fn play_step(session: &mut Session<ColdWarGame>) {
    let (id, _) = session
        .options()
        .iter()
        .find(|(id, _)| !id.is_stop())
        .or_else(|| session.options().iter().next())
        .unwrap();
    let outcome = session.submit(&id.to_string()).unwrap();
    assert!(outcome.failure.is_none());
    if outcome.complete {
        assert_eq!(session.confirm("yes").unwrap(), Confirmation::Committed);
    }
}

// =============================================================================
// Full Games
// =============================================================================

/// Always taking the first option finishes the game.
#[test]
fn test_full_game_through_session() {
    let game = ColdWarBuilder::new().seed(99).turns(2).action_rounds(3).build();
    let mut session = Session::new(game).unwrap();

    for _ in 0..5_000 {
        if session.engine().result().is_some() {
            break;
        }
        play_step(&mut session);
    }

    let game = session.engine();
    assert!(game.result().is_some());
    assert!(session.options().is_empty());
    assert!(game.choice().prompt.starts_with("Game over"));
}

/// The same seed and inputs replay identically.
#[test]
fn test_replay_is_deterministic() {
    let play = || {
        let mut session = Session::new(ColdWarBuilder::new().seed(5).build()).unwrap();
        for _ in 0..40 {
            if session.engine().result().is_some() {
                break;
            }
            play_step(&mut session);
        }
        session.engine().clone()
    };

    assert_eq!(play(), play());
}

// =============================================================================
// Identifiers Across Prompts
// =============================================================================

/// A country keeps its identifier no matter which prompt lists it.
#[test]
fn test_country_id_stable_across_prompts() {
    let mut session = Session::new(ColdWarBuilder::new().seed(2).build()).unwrap();
    play_step(&mut session);

    // Influence placement lists every country.
    session.submit("influence").unwrap();
    session.confirm("y").unwrap();
    let france = session.options().id_of("France").unwrap();
    let poland = session.options().id_of("Poland").unwrap();

    session.rollback().unwrap();

    // A coup lists only countries with opposing influence.
    session.submit("coup").unwrap();
    session.confirm("y").unwrap();
    assert_eq!(session.options().id_of("Poland"), Some(poland));
    assert_eq!(session.options().id_of("France"), None);
    assert_eq!(poland, OptionId(1));
    assert_eq!(france, OptionId(3));
}

/// Action identifiers are the fixed enumeration values.
#[test]
fn test_action_ids_fixed() {
    let mut session = Session::new(ColdWarBuilder::new().seed(8).build()).unwrap();
    play_step(&mut session);

    assert_eq!(session.engine().choice().kind, ChoiceKind::ActionSelect);
    assert_eq!(
        session.options().id_of("Influence"),
        Some(OptionId(i64::from(CardAction::Influence.id())))
    );
    assert_eq!(
        session.options().id_of("Space"),
        Some(OptionId(i64::from(CardAction::Space.id())))
    );
}

/// Opposing events are never offered as an action.
#[test]
fn test_opponent_event_not_offered() {
    for seed in 0..20 {
        let mut session = Session::new(ColdWarBuilder::new().seed(seed).build()).unwrap();
        let card = session.engine().hand(Side::FactionA)[0];
        let info = card_info(card).unwrap();
        session.submit(&card.0.to_string()).unwrap();
        session.confirm("y").unwrap();

        let has_event = session.options().id_of("Event").is_some();
        assert_eq!(has_event, info.owner != Side::FactionB, "{}", info.name);
    }
}

// =============================================================================
// Game End
// =============================================================================

/// Reaching the victory-point threshold ends the game at once.
#[test]
fn test_vp_threshold_closes_choice() {
    let game = ColdWarBuilder::new().seed(3).vp_to_win(1).build();
    let mut session = Session::new(game).unwrap();

    session.open_debug().unwrap();
    session
        .debug_trigger_effect("Captured Nazi Scientist", Side::FactionA)
        .unwrap();

    assert_eq!(session.engine().space_race(Side::FactionA), 1);
    assert_eq!(
        session.engine().result(),
        Some(GameResult::Winner(Side::FactionA))
    );
    assert!(session.options().is_empty());

    let outcome = session.submit("1").unwrap();
    assert!(outcome.applied.is_empty());
    assert!(outcome.failure.is_some());
}

/// Probed events do not move cards between piles.
#[test]
fn test_probe_leaves_piles_alone() {
    let mut session = Session::new(ColdWarBuilder::new().seed(3).build()).unwrap();
    let hand = session.engine().hand(Side::FactionB).clone();

    session.open_debug().unwrap();
    session
        .debug_trigger_effect("Captured Nazi Scientist", Side::FactionB)
        .unwrap();

    assert_eq!(session.engine().vp(), -1);
    assert_eq!(session.engine().hand(Side::FactionB), &hand);
    assert!(session.engine().removed_pile().is_empty());
    assert!(session.engine().discard_pile().is_empty());
}
