//! Cold-war game state and stage machine.
//!
//! ## Flow
//!
//! Pending work is a LIFO stack of `Stage`s. `advance` pops stages until one
//! of them publishes an input, so the game is always either waiting on a
//! `ChoiceDescriptor` or over. A finished input carries its `Resolution`,
//! which is applied by `stage_complete` and may push further stages.
//!
//! ## Snapshots
//!
//! Every field is an owned value or an `im` persistent collection, so
//! `clone()` is a complete, independent snapshot.

use im::Vector;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::cards::{card_info, cards, find_card, CardAction, CardId, CardInfo};
use super::effects::effect_for;
use super::map::{
    countries, country_info, find_country, CountryId, CountryInfo, CountryState, Region, WorldMap,
};
use crate::choice::{ChoiceDescriptor, ChoiceKind, OptionValue};
use crate::core::{GameRng, Side, SideMap};
use crate::error::EngineError;
use crate::rules::{OptionCatalog, RulesEngine};

/// Highest (safest) DEFCON level.
pub const DEFCON_MAX: u8 = 5;

const DIE_FACES: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

/// Game parameters fixed at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub seed: u64,
    pub hand_size: usize,
    pub turns: u32,
    pub action_rounds: u32,
    pub vp_to_win: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            hand_size: 5,
            turns: 3,
            action_rounds: 4,
            vp_to_win: 20,
        }
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Side),
    Draw,
}

/// What to do with a pending input once it is complete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Nothing; the input is informational or set up by hand.
    Nothing,
    /// A hand card was chosen; ask what to do with it.
    PlayCard { side: Side },
    /// An action was chosen for `card`.
    ChooseAction { side: Side, card: CardId },
    /// Add one influence of `side` per pick.
    AddInfluence { side: Side },
    /// Remove one influence of `side` per pick, at most `cap` per country.
    RemoveInfluence { side: Side, cap: Option<u32> },
    /// Remove all influence of `side` from each picked country.
    ClearInfluence { side: Side },
    /// Raise `side`'s influence in the picked country to the opponent's.
    MatchInfluence { side: Side },
    /// Coup target chosen; roll next.
    CoupTarget { side: Side, ops: u32 },
    /// Coup die roll.
    CoupRoll { side: Side, country: CountryId, ops: u32 },
    /// Space race die roll.
    SpaceRoll { side: Side },
    /// Opponent of `sponsor` decided whether to take part in the games.
    OlympicDecision { sponsor: Side },
    /// Olympic die roll: first the sponsor's, then the opponent's.
    OlympicRoll { sponsor: Side, sponsor_roll: Option<u32> },
    /// War die roll against `country`, won on `target` or more.
    WarRoll { side: Side, country: CountryId, target: u32 },
    /// Warsaw Pact mode chosen.
    WarsawChoice { side: Side },
}

/// A pending decision and its continuation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub choice: ChoiceDescriptor,
    pub on_complete: Resolution,
}

impl InputState {
    fn idle() -> Self {
        Self {
            choice: ChoiceDescriptor::closed(Side::Neutral, "Waiting"),
            on_complete: Resolution::Nothing,
        }
    }
}

/// Pending work on the stage stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// `side` plays one card.
    ActionRound { side: Side, round: u32 },
    /// Refill hands, recover DEFCON, start the next turn.
    EndTurn,
    /// Move a played card to the discard pile or out of the game.
    Discard { card: CardId, removed: bool },
    /// Publish an input.
    Input(Box<InputState>),
    /// Put back the input that was pending before a debug probe.
    RestoreInput(Box<InputState>),
}

/// Builder for a started `ColdWarGame`.
#[derive(Clone, Debug, Default)]
pub struct ColdWarBuilder {
    settings: Settings,
}

impl ColdWarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        assert!(size > 0, "Hand size must be positive");
        self.settings.hand_size = size;
        self
    }

    pub fn turns(mut self, turns: u32) -> Self {
        assert!(turns > 0, "Game needs at least one turn");
        self.settings.turns = turns;
        self
    }

    pub fn action_rounds(mut self, rounds: u32) -> Self {
        self.settings.action_rounds = rounds;
        self
    }

    pub fn vp_to_win(mut self, vp: i32) -> Self {
        self.settings.vp_to_win = vp;
        self
    }

    /// Build the game and deal the opening hands.
    pub fn build(self) -> ColdWarGame {
        let mut game = ColdWarGame {
            rng: GameRng::new(self.settings.seed),
            settings: self.settings,
            map: WorldMap::opening(),
            hands: SideMap::default(),
            draw_pile: Vector::new(),
            discard_pile: Vector::new(),
            removed_pile: Vector::new(),
            vp: 0,
            defcon: DEFCON_MAX,
            space_race: SideMap::default(),
            turn: 0,
            round: 0,
            input: InputState::idle(),
            stages: Vector::new(),
            result: None,
        };
        game.start();
        game
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColdWarGame {
    settings: Settings,
    map: WorldMap,
    hands: SideMap<Vector<CardId>>,
    draw_pile: Vector<CardId>,
    discard_pile: Vector<CardId>,
    removed_pile: Vector<CardId>,
    /// Positive favours Faction A.
    vp: i32,
    defcon: u8,
    space_race: SideMap<u32>,
    turn: u32,
    round: u32,
    input: InputState,
    /// Top of the stack is the back.
    stages: Vector<Stage>,
    rng: GameRng,
    result: Option<GameResult>,
}

impl ColdWarGame {
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    #[must_use]
    pub fn vp(&self) -> i32 {
        self.vp
    }

    #[must_use]
    pub fn defcon(&self) -> u8 {
        self.defcon
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn space_race(&self, side: Side) -> u32 {
        self.space_race[side]
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Vector<CardId> {
        &self.hands[side]
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<CardId> {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardId> {
        &self.discard_pile
    }

    #[must_use]
    pub fn removed_pile(&self) -> &Vector<CardId> {
        &self.removed_pile
    }

    /// The pending input with its continuation.
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Set once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Number of stages waiting below the current input.
    #[must_use]
    pub fn pending_stages(&self) -> usize {
        self.stages.len()
    }

    /// Replace the pending input.
    ///
    /// Meant for debugging and tests; the previous input is dropped.
    pub fn set_input(&mut self, choice: ChoiceDescriptor, on_complete: Resolution) {
        self.input = InputState {
            choice,
            on_complete,
        };
    }

    /// Overwrite both factions' influence in a country.
    pub fn set_influence(&mut self, country: CountryId, faction_a: u32, faction_b: u32) {
        if let Some(state) = self.map.get_mut(country) {
            state.influence[Side::FactionA] = faction_a;
            state.influence[Side::FactionB] = faction_b;
        }
    }

    // === Helpers used by card effects ===

    pub(crate) fn add_influence(&mut self, country: CountryId, side: Side, amount: u32) {
        if let Some(state) = self.map.get_mut(country) {
            state.influence[side] = state.influence[side].saturating_add(amount);
        }
    }

    pub(crate) fn remove_influence(&mut self, country: CountryId, side: Side, amount: u32) {
        if let Some(state) = self.map.get_mut(country) {
            state.influence[side] = state.influence[side].saturating_sub(amount);
        }
    }

    pub(crate) fn gain_vp(&mut self, side: Side, amount: i32) {
        self.vp += side.vp_sign() * amount;
        debug!(%side, amount, vp = self.vp, "victory points");
    }

    /// Lower DEFCON by one; reaching 1 loses the game for `by`.
    pub(crate) fn degrade_defcon(&mut self, by: Side) {
        self.defcon = self.defcon.saturating_sub(1).max(1);
        debug!(%by, defcon = self.defcon, "DEFCON degraded");
        if self.defcon == 1 && self.result.is_none() {
            self.result = Some(if by.is_faction() {
                GameResult::Winner(by.opponent())
            } else {
                GameResult::Draw
            });
        }
    }

    pub(crate) fn improve_defcon(&mut self, steps: u8) {
        self.defcon = self.defcon.saturating_add(steps).min(DEFCON_MAX);
    }

    pub(crate) fn advance_space_race(&mut self, side: Side) {
        self.space_race[side] += 1;
        self.gain_vp(side, 1);
    }

    /// Names of countries matching `filter`, in catalog order.
    pub(crate) fn country_names(
        &self,
        filter: impl Fn(&CountryInfo, &CountryState) -> bool,
    ) -> Vec<String> {
        countries()
            .iter()
            .filter(|info| self.map.get(info.id).is_some_and(|state| filter(info, state)))
            .map(|info| info.name.to_string())
            .collect()
    }

    /// Queue an input. Choices with nothing to pick are skipped.
    pub(crate) fn offer(&mut self, choice: ChoiceDescriptor, on_complete: Resolution) {
        if choice.available_options().is_empty() {
            debug!(prompt = %choice.prompt, "no legal options, choice skipped");
            return;
        }
        self.stages.push_back(Stage::Input(Box::new(InputState {
            choice,
            on_complete,
        })));
    }

    /// Queue a die roll entered by the chance player.
    pub(crate) fn offer_roll(&mut self, prompt: impl Into<String>, on_complete: Resolution) {
        let choice = ChoiceDescriptor::new(
            ChoiceKind::RandomDrawSelect,
            Side::Neutral,
            prompt,
            DIE_FACES,
        );
        self.offer(choice, on_complete);
    }

    // === Stage machine ===

    fn begin_turn(&mut self) {
        self.turn += 1;
        for side in Side::FACTIONS {
            self.deal(side);
        }

        self.stages.push_back(Stage::EndTurn);
        for round in (1..=self.settings.action_rounds).rev() {
            self.stages.push_back(Stage::ActionRound {
                side: Side::FactionB,
                round,
            });
            self.stages.push_back(Stage::ActionRound {
                side: Side::FactionA,
                round,
            });
        }
        info!(turn = self.turn, "turn started");
    }

    fn deal(&mut self, side: Side) {
        while self.hands[side].len() < self.settings.hand_size {
            if self.draw_pile.is_empty() && !self.reshuffle() {
                break;
            }
            if let Some(card) = self.draw_pile.pop_back() {
                self.hands[side].push_back(card);
            }
        }
    }

    /// Move the discard pile into the draw pile. False if there was nothing to move.
    fn reshuffle(&mut self) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }
        let mut cards: Vec<CardId> = std::mem::take(&mut self.discard_pile).into_iter().collect();
        self.rng.shuffle(&mut cards);
        debug!(cards = cards.len(), "discards reshuffled");
        self.draw_pile.extend(cards);
        true
    }

    fn end_turn(&mut self) {
        self.improve_defcon(1);
        info!(turn = self.turn, vp = self.vp, defcon = self.defcon, "turn ended");
        if self.turn < self.settings.turns {
            self.begin_turn();
        }
    }

    fn decided(&self) -> Option<GameResult> {
        if self.result.is_some() {
            return self.result;
        }
        if self.vp >= self.settings.vp_to_win {
            Some(GameResult::Winner(Side::FactionA))
        } else if self.vp <= -self.settings.vp_to_win {
            Some(GameResult::Winner(Side::FactionB))
        } else {
            None
        }
    }

    fn final_score(&self) -> GameResult {
        match self.vp {
            vp if vp > 0 => GameResult::Winner(Side::FactionA),
            vp if vp < 0 => GameResult::Winner(Side::FactionB),
            _ => GameResult::Draw,
        }
    }

    fn finish(&mut self, result: GameResult) {
        self.result = Some(result);
        self.stages.clear();
        let prompt = match result {
            GameResult::Winner(side) => format!("Game over: {side} wins"),
            GameResult::Draw => "Game over: draw".to_string(),
        };
        info!(vp = self.vp, defcon = self.defcon, "{prompt}");
        self.set_input(ChoiceDescriptor::closed(Side::Neutral, prompt), Resolution::Nothing);
    }

    /// Pop stages until one publishes an input or the game ends.
    fn advance(&mut self) {
        loop {
            if let Some(result) = self.decided() {
                self.finish(result);
                return;
            }

            let Some(stage) = self.stages.pop_back() else {
                let result = self.final_score();
                self.finish(result);
                return;
            };

            match stage {
                Stage::Input(input) => {
                    self.input = *input;
                    return;
                }
                Stage::RestoreInput(input) => {
                    info!("probe finished, pending input restored");
                    self.input = *input;
                    return;
                }
                Stage::ActionRound { side, round } => {
                    if self.hands[side].is_empty() {
                        debug!(%side, round, "empty hand, action round skipped");
                        continue;
                    }
                    self.round = round;
                    let names: Vec<&str> = self
                        .hands[side]
                        .iter()
                        .filter_map(|&card| card_info(card).map(|c| c.name))
                        .collect();
                    let prompt = format!(
                        "Turn {}, action round {round}: choose a card to play",
                        self.turn
                    );
                    self.set_input(
                        ChoiceDescriptor::new(ChoiceKind::HandCardSelect, side, prompt, names),
                        Resolution::PlayCard { side },
                    );
                    return;
                }
                Stage::EndTurn => self.end_turn(),
                Stage::Discard { card, removed } => {
                    if removed {
                        self.removed_pile.push_back(card);
                    } else {
                        self.discard_pile.push_back(card);
                    }
                }
            }
        }
    }

    fn legal_actions(&self, side: Side, card: CardId) -> Vec<String> {
        let owner = card_info(card).map_or(Side::Neutral, |c| c.owner);
        let opponent_present = countries()
            .iter()
            .any(|c| self.map.influence(c.id, side.opponent()) > 0);

        CardAction::iter()
            .filter(|action| match action {
                CardAction::Event => {
                    (owner == side || owner == Side::Neutral) && effect_for(card).is_some()
                }
                CardAction::Coup => opponent_present,
                CardAction::Influence | CardAction::Space => true,
            })
            .map(|action| action.to_string())
            .collect()
    }

    fn apply(&mut self, input: InputState) -> Result<(), EngineError> {
        let choice = &input.choice;

        match input.on_complete {
            Resolution::Nothing => {}

            Resolution::PlayCard { side } => {
                let info = picked_card(choice)?;
                if let Some(pos) = self.hands[side].index_of(&info.id) {
                    self.hands[side].remove(pos);
                }
                info!(%side, card = info.name, "card played");
                let actions = self.legal_actions(side, info.id);
                self.offer(
                    ChoiceDescriptor::new(
                        ChoiceKind::ActionSelect,
                        side,
                        format!("Use {} ({} ops) for", info.name, info.ops),
                        actions,
                    ),
                    Resolution::ChooseAction {
                        side,
                        card: info.id,
                    },
                );
            }

            Resolution::ChooseAction { side, card } => {
                let name = picked(choice)?;
                let action: CardAction = name
                    .parse()
                    .map_err(|_| EngineError::NotOffered(name.to_string()))?;
                let info =
                    card_info(card).ok_or_else(|| EngineError::UnknownCard(card.0.to_string()))?;

                self.stages.push_back(Stage::Discard {
                    card,
                    removed: action == CardAction::Event && info.removed_after_event,
                });

                match action {
                    CardAction::Event => {
                        let handler = effect_for(card)
                            .ok_or_else(|| EngineError::NoEffect(info.name.to_string()))?;
                        let beneficiary = if info.owner.is_faction() {
                            info.owner
                        } else {
                            side
                        };
                        info!(card = info.name, side = %beneficiary, "event");
                        handler(self, beneficiary);
                    }
                    CardAction::Influence => {
                        let names = self.country_names(|_, _| true);
                        self.offer(
                            ChoiceDescriptor::new(
                                ChoiceKind::CountrySelect,
                                side,
                                "Place influence",
                                names,
                            )
                            .with_reps(info.ops)
                            .with_unit("influence points"),
                            Resolution::AddInfluence { side },
                        );
                    }
                    CardAction::Coup => {
                        let opponent = side.opponent();
                        let names = self.country_names(|_, state| state.influence[opponent] > 0);
                        self.offer(
                            ChoiceDescriptor::new(
                                ChoiceKind::CountrySelect,
                                side,
                                format!("Choose a coup target ({} ops)", info.ops),
                                names,
                            ),
                            Resolution::CoupTarget {
                                side,
                                ops: info.ops,
                            },
                        );
                    }
                    CardAction::Space => {
                        self.offer_roll(
                            format!("Space race attempt for {side}: enter a die roll (1-3 succeeds)"),
                            Resolution::SpaceRoll { side },
                        );
                    }
                }
            }

            Resolution::AddInfluence { side } => {
                for (name, count) in choice.selections() {
                    let country = country_id(name)?;
                    self.add_influence(country, side, count);
                }
            }

            Resolution::RemoveInfluence { side, cap } => {
                for (name, count) in choice.selections() {
                    let country = country_id(name)?;
                    let amount = cap.map_or(count, |cap| count.min(cap));
                    self.remove_influence(country, side, amount);
                }
            }

            Resolution::ClearInfluence { side } => {
                for (name, _) in choice.selections() {
                    let country = country_id(name)?;
                    let present = self.map.influence(country, side);
                    self.remove_influence(country, side, present);
                }
            }

            Resolution::MatchInfluence { side } => {
                let country = country_id(picked(choice)?)?;
                let target = self.map.influence(country, side.opponent());
                let own = self.map.influence(country, side);
                self.add_influence(country, side, target.saturating_sub(own));
            }

            Resolution::CoupTarget { side, ops } => {
                let country = country_id(picked(choice)?)?;
                let name = country_info(country).map_or("?", |c| c.name);
                self.offer_roll(
                    format!("Coup in {name} by {side}: enter a die roll"),
                    Resolution::CoupRoll { side, country, ops },
                );
            }

            Resolution::CoupRoll { side, country, ops } => {
                let roll = picked_roll(choice)?;
                self.coup(side, country, ops, roll);
            }

            Resolution::SpaceRoll { side } => {
                let roll = picked_roll(choice)?;
                if roll <= 3 {
                    self.advance_space_race(side);
                    info!(%side, roll, "space race advanced");
                } else {
                    info!(%side, roll, "space race attempt failed");
                }
            }

            Resolution::OlympicDecision { sponsor } => {
                if picked(choice)? == "Participate" {
                    self.offer_roll(
                        format!("Olympic Games: enter {sponsor}'s die roll"),
                        Resolution::OlympicRoll {
                            sponsor,
                            sponsor_roll: None,
                        },
                    );
                } else {
                    self.degrade_defcon(sponsor.opponent());
                    let names = self.country_names(|_, _| true);
                    self.offer(
                        ChoiceDescriptor::new(
                            ChoiceKind::CountrySelect,
                            sponsor,
                            "Olympic boycott: place influence",
                            names,
                        )
                        .with_reps(4)
                        .with_unit("influence points"),
                        Resolution::AddInfluence { side: sponsor },
                    );
                }
            }

            Resolution::OlympicRoll {
                sponsor,
                sponsor_roll,
            } => {
                let roll = picked_roll(choice)?;
                match sponsor_roll {
                    None => self.offer_roll(
                        format!("Olympic Games: enter {}'s die roll", sponsor.opponent()),
                        Resolution::OlympicRoll {
                            sponsor,
                            sponsor_roll: Some(roll),
                        },
                    ),
                    Some(sponsor_roll) => {
                        let sponsor_total = sponsor_roll + 2;
                        if sponsor_total > roll {
                            self.gain_vp(sponsor, 2);
                        } else if roll > sponsor_total {
                            self.gain_vp(sponsor.opponent(), 2);
                        }
                    }
                }
            }

            Resolution::WarRoll {
                side,
                country,
                target,
            } => {
                let roll = picked_roll(choice)?;
                if roll >= target {
                    let opponent = side.opponent();
                    let taken = self.map.influence(country, opponent);
                    self.remove_influence(country, opponent, taken);
                    self.add_influence(country, side, taken);
                    self.gain_vp(side, 2);
                    info!(%side, roll, "war won");
                } else {
                    info!(%side, roll, "war lost");
                }
            }

            Resolution::WarsawChoice { side } => {
                let opponent = side.opponent();
                if picked(choice)? == "Remove" {
                    let names = self.country_names(|info, state| {
                        info.region == Region::Europe && state.influence[opponent] > 0
                    });
                    self.offer(
                        ChoiceDescriptor::new(
                            ChoiceKind::CountrySelect,
                            side,
                            format!("Remove all {opponent} influence from up to 4 countries"),
                            names,
                        )
                        .with_reps(4)
                        .distinct()
                        .with_early_stop("Done"),
                        Resolution::ClearInfluence { side: opponent },
                    );
                } else {
                    let names = self
                        .country_names(|info, _| info.region == Region::Europe);
                    self.offer(
                        ChoiceDescriptor::new(
                            ChoiceKind::CountrySelect,
                            side,
                            "Add influence in Europe",
                            names,
                        )
                        .with_reps(5)
                        .with_unit("influence points"),
                        Resolution::AddInfluence { side },
                    );
                }
            }
        }

        Ok(())
    }

    fn coup(&mut self, side: Side, country: CountryId, ops: u32, roll: u32) {
        let Some(info) = country_info(country) else {
            return;
        };
        let margin = i64::from(roll) + i64::from(ops) - 2 * i64::from(info.stability);
        if margin > 0 {
            let margin = margin as u32;
            let opponent = side.opponent();
            let removed = margin.min(self.map.influence(country, opponent));
            self.remove_influence(country, opponent, removed);
            self.add_influence(country, side, margin - removed);
        }
        info!(%side, country = info.name, roll, margin, "coup");
        if info.battleground {
            self.degrade_defcon(side);
        }
    }
}

fn picked(choice: &ChoiceDescriptor) -> Result<&str, EngineError> {
    choice.first_selection().ok_or(EngineError::Incomplete)
}

fn picked_card(choice: &ChoiceDescriptor) -> Result<&'static CardInfo, EngineError> {
    let name = picked(choice)?;
    find_card(name).ok_or_else(|| EngineError::UnknownCard(name.to_string()))
}

fn picked_roll(choice: &ChoiceDescriptor) -> Result<u32, EngineError> {
    let name = picked(choice)?;
    name.parse()
        .map_err(|_| EngineError::NotOffered(name.to_string()))
}

fn country_id(name: &str) -> Result<CountryId, EngineError> {
    find_country(name)
        .map(|c| c.id)
        .ok_or_else(|| EngineError::NotOffered(name.to_string()))
}

impl OptionCatalog for ColdWarGame {
    fn action_id(&self, option: &str) -> Option<u32> {
        option.parse::<CardAction>().ok().map(CardAction::id)
    }

    fn card_id(&self, option: &str) -> Option<u32> {
        find_card(option).map(|c| c.id.0)
    }

    fn country_id(&self, option: &str) -> Option<u32> {
        find_country(option).map(|c| c.id.0)
    }
}

impl RulesEngine for ColdWarGame {
    /// Reset to a fresh deal. The random stream continues, so consecutive
    /// games from one seed differ but replay identically.
    fn start(&mut self) {
        self.map = WorldMap::opening();
        self.hands = SideMap::default();
        self.discard_pile.clear();
        self.removed_pile.clear();
        self.vp = 0;
        self.defcon = DEFCON_MAX;
        self.space_race = SideMap::default();
        self.turn = 0;
        self.round = 0;
        self.stages.clear();
        self.result = None;
        self.input = InputState::idle();

        let mut deck: Vec<CardId> = cards().iter().map(|c| c.id).collect();
        self.rng.shuffle(&mut deck);
        self.draw_pile = deck.into_iter().collect();

        info!(seed = self.rng.seed(), "new game");
        self.begin_turn();
        self.advance();
    }

    fn choice(&self) -> &ChoiceDescriptor {
        &self.input.choice
    }

    fn receive(&mut self, value: &OptionValue) -> Result<(), EngineError> {
        self.input.choice.recv(value)?;
        debug!(?value, reps = self.input.choice.reps(), "selection received");
        Ok(())
    }

    fn stage_complete(&mut self) -> Result<(), EngineError> {
        if !self.input.choice.is_complete() {
            return Err(EngineError::Incomplete);
        }
        let input = self.input.clone();
        self.apply(input)?;
        self.advance();
        Ok(())
    }

    fn trigger_effect(&mut self, card: &str, side: Side) -> Result<(), EngineError> {
        let info = find_card(card).ok_or_else(|| EngineError::UnknownCard(card.to_string()))?;
        let handler =
            effect_for(info.id).ok_or_else(|| EngineError::NoEffect(card.to_string()))?;

        let pending = std::mem::replace(&mut self.input, InputState::idle());
        self.stages.push_back(Stage::RestoreInput(Box::new(pending)));
        info!(card = info.name, %side, "event triggered directly");
        handler(self, side);
        self.advance();
        Ok(())
    }
}
