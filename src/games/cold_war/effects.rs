//! Card events.
//!
//! Each event is a plain function over the game state. Events that need a
//! decision queue an input with a `Resolution`; the game applies it once the
//! choice is committed. Handlers are looked up by card rather than stored in
//! the state, so game values stay comparable and serializable.

use super::cards::{card_info, CardId};
use super::game::{ColdWarGame, Resolution};
use super::map::{find_country, Region};
use crate::choice::{ChoiceDescriptor, ChoiceKind};
use crate::core::Side;

/// Runs a card's event for the given side.
pub type EffectHandler = fn(&mut ColdWarGame, Side);

/// The event handler of a card, if it has one.
#[must_use]
pub fn effect_for(card: CardId) -> Option<EffectHandler> {
    let handler: EffectHandler = match card_info(card)?.name {
        "Duck and Cover" => duck_and_cover,
        "Fidel" => fidel,
        "Marshall Plan" => marshall_plan,
        "Comecon" => comecon,
        "Decolonization" => decolonization,
        "Olympic Games" => olympic_games,
        "Nuclear Test Ban" => nuclear_test_ban,
        "Arab-Israeli War" => arab_israeli_war,
        "Truman Doctrine" => truman_doctrine,
        "Socialist Governments" => socialist_governments,
        "Warsaw Pact Formed" => warsaw_pact_formed,
        "Captured Nazi Scientist" => captured_nazi_scientist,
        "De Gaulle Leads France" => de_gaulle_leads_france,
        "Independent Reds" => independent_reds,
        "Voice of America" => voice_of_america,
        "Nasser" => nasser,
        _ => return None,
    };
    Some(handler)
}

fn duck_and_cover(game: &mut ColdWarGame, side: Side) {
    game.degrade_defcon(side);
    let gain = 5 - i32::from(game.defcon());
    game.gain_vp(side, gain);
}

fn fidel(game: &mut ColdWarGame, side: Side) {
    let Some(cuba) = find_country("Cuba") else {
        return;
    };
    let opponent = side.opponent();
    game.remove_influence(cuba.id, opponent, game.map().influence(cuba.id, opponent));
    let own = game.map().influence(cuba.id, side);
    game.add_influence(cuba.id, side, cuba.stability.saturating_sub(own));
}

/// One influence in each of up to `count` European countries the opponent
/// does not control.
fn european_aid(game: &mut ColdWarGame, side: Side, count: u32, prompt: &str) {
    let opponent = side.opponent();
    let names = game.country_names(|info, state| {
        info.region == Region::Europe && state.controller(info.stability) != Some(opponent)
    });
    game.offer(
        ChoiceDescriptor::new(ChoiceKind::CountrySelect, side, prompt, names)
            .with_reps(count)
            .distinct()
            .with_early_stop("Done"),
        Resolution::AddInfluence { side },
    );
}

fn marshall_plan(game: &mut ColdWarGame, side: Side) {
    european_aid(game, side, 7, "Marshall Plan: add influence in up to 7 European countries");
}

fn comecon(game: &mut ColdWarGame, side: Side) {
    european_aid(game, side, 4, "Comecon: add influence in up to 4 European countries");
}

fn decolonization(game: &mut ColdWarGame, side: Side) {
    let names = game.country_names(|info, _| matches!(info.region, Region::Africa | Region::Asia));
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::CountrySelect,
            side,
            "Decolonization: add influence in 4 countries in Africa or Asia",
            names,
        )
        .with_reps(4)
        .distinct()
        .with_early_stop("Done"),
        Resolution::AddInfluence { side },
    );
}

fn olympic_games(game: &mut ColdWarGame, sponsor: Side) {
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::GenericMultiSelect,
            sponsor.opponent(),
            format!("Olympic Games sponsored by {sponsor}: take part or boycott?"),
            ["Participate", "Boycott"],
        ),
        Resolution::OlympicDecision { sponsor },
    );
}

fn nuclear_test_ban(game: &mut ColdWarGame, side: Side) {
    let gain = (i32::from(game.defcon()) - 2).max(0);
    game.gain_vp(side, gain);
    game.improve_defcon(2);
}

fn arab_israeli_war(game: &mut ColdWarGame, side: Side) {
    let Some(israel) = find_country("Israel") else {
        return;
    };
    game.offer_roll(
        format!("Arab-Israeli War for {side}: enter a die roll (4-6 wins)"),
        Resolution::WarRoll {
            side,
            country: israel.id,
            target: 4,
        },
    );
}

fn truman_doctrine(game: &mut ColdWarGame, side: Side) {
    let opponent = side.opponent();
    let names = game.country_names(|info, state| {
        info.region == Region::Europe
            && state.influence[opponent] > 0
            && state.controller(info.stability).is_none()
    });
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::CountrySelect,
            side,
            format!("Truman Doctrine: remove all {opponent} influence from one country"),
            names,
        ),
        Resolution::ClearInfluence { side: opponent },
    );
}

fn socialist_governments(game: &mut ColdWarGame, side: Side) {
    let opponent = side.opponent();
    let names = game.country_names(|info, state| {
        info.region == Region::Europe && state.influence[opponent] > 0
    });
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::CountrySelect,
            side,
            format!("Socialist Governments: remove {opponent} influence (max 2 per country)"),
            names,
        )
        .with_reps(3)
        .with_unit("influence points")
        .with_early_stop("Done"),
        Resolution::RemoveInfluence {
            side: opponent,
            cap: Some(2),
        },
    );
}

fn warsaw_pact_formed(game: &mut ColdWarGame, side: Side) {
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::GenericMultiSelect,
            side,
            "Warsaw Pact Formed: remove opposing influence or add your own?",
            ["Remove", "Add"],
        ),
        Resolution::WarsawChoice { side },
    );
}

fn captured_nazi_scientist(game: &mut ColdWarGame, side: Side) {
    game.advance_space_race(side);
}

fn de_gaulle_leads_france(game: &mut ColdWarGame, side: Side) {
    let Some(france) = find_country("France") else {
        return;
    };
    game.remove_influence(france.id, side.opponent(), 2);
    game.add_influence(france.id, side, 1);
}

fn independent_reds(game: &mut ColdWarGame, side: Side) {
    let opponent = side.opponent();
    let names = game.country_names(|info, state| {
        matches!(info.name, "Poland" | "East Germany")
            && state.influence[opponent] > state.influence[side]
    });
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::CountrySelect,
            side,
            format!("Independent Reds: match {opponent} influence in one country"),
            names,
        ),
        Resolution::MatchInfluence { side },
    );
}

fn voice_of_america(game: &mut ColdWarGame, side: Side) {
    let opponent = side.opponent();
    let names = game.country_names(|info, state| {
        info.region != Region::Europe && state.influence[opponent] > 0
    });
    game.offer(
        ChoiceDescriptor::new(
            ChoiceKind::CountrySelect,
            side,
            format!("Voice of America: remove {opponent} influence (max 2 per country)"),
            names,
        )
        .with_reps(4)
        .with_unit("influence points")
        .with_early_stop("Done"),
        Resolution::RemoveInfluence {
            side: opponent,
            cap: Some(2),
        },
    );
}

fn nasser(game: &mut ColdWarGame, side: Side) {
    let Some(egypt) = find_country("Egypt") else {
        return;
    };
    let opponent = side.opponent();
    let lost = game.map().influence(egypt.id, opponent).div_ceil(2);
    game.remove_influence(egypt.id, opponent, lost);
    game.add_influence(egypt.id, side, 2);
}
