//! The "awaiting input" descriptor published by a rules engine.
//!
//! A `ChoiceDescriptor` says who must act, what shape of choice is pending,
//! which options are legal right now, what has been picked so far and how
//! many more picks are needed. The descriptor owns its selection-accumulation
//! logic ([`ChoiceDescriptor::recv`]) so every rules engine counts picks the
//! same way.
//!
//! ## Completion
//!
//! `complete` is true exactly when `reps` reached zero or the choice
//! terminated itself: the stop pseudo-option was picked, or a `distinct`
//! choice ran out of options.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Side;
use crate::error::EngineError;

/// Shape of the pending choice. Decides how options are numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// Pick what to do with a card. Options are action names.
    ActionSelect,
    /// Pick a card from the acting side's hand.
    HandCardSelect,
    /// Pick a map location.
    CountrySelect,
    /// Pick from an arbitrary list of labels.
    GenericMultiSelect,
    /// Enter a randomly drawn value. Options are numeric tokens.
    RandomDrawSelect,
}

/// A value fed back into a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionValue {
    /// One of the descriptor's available options.
    Choice(String),
    /// The synthetic "stop early" pseudo-option.
    StopEarly,
}

/// A pending decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDescriptor {
    /// Kind of choice.
    pub kind: ChoiceKind,

    /// Side that must act.
    pub side: Side,

    /// Human-readable question.
    pub prompt: String,

    /// Label for the repetition counter ("influence points"), if shown.
    pub reps_unit: Option<String>,

    available_options: Vec<String>,
    selection: FxHashMap<String, u32>,
    reps: u32,
    allow_early_stop: bool,
    stop_label: String,
    distinct: bool,
    complete: bool,
}

impl ChoiceDescriptor {
    /// Create a single-pick choice over `options`.
    pub fn new(
        kind: ChoiceKind,
        side: Side,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            kind,
            side,
            prompt: prompt.into(),
            reps_unit: None,
            available_options: options.into_iter().map(Into::into).collect(),
            selection: FxHashMap::default(),
            reps: 1,
            allow_early_stop: false,
            stop_label: String::new(),
            distinct: false,
            complete: false,
        }
    }

    /// A choice that can never be satisfied (e.g. the game is over).
    pub fn closed(side: Side, prompt: impl Into<String>) -> Self {
        Self::new(
            ChoiceKind::GenericMultiSelect,
            side,
            prompt,
            std::iter::empty::<String>(),
        )
    }

    /// Require `reps` picks (builder pattern).
    ///
    /// Zero repetitions makes the choice complete immediately.
    #[must_use]
    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = reps;
        self.complete = reps == 0;
        self
    }

    /// Set the repetition unit label (builder pattern).
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.reps_unit = Some(unit.into());
        self
    }

    /// Offer a stop pseudo-option named `label` (builder pattern).
    #[must_use]
    pub fn with_early_stop(mut self, label: impl Into<String>) -> Self {
        self.allow_early_stop = true;
        self.stop_label = label.into();
        self
    }

    /// Withdraw each option once it has been picked (builder pattern).
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Options that may be picked now, in engine order.
    #[must_use]
    pub fn available_options(&self) -> &[String] {
        &self.available_options
    }

    /// Picks still required.
    #[must_use]
    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Whether the stop pseudo-option is offered.
    #[must_use]
    pub fn allow_early_stop(&self) -> bool {
        self.allow_early_stop
    }

    /// Display name of the stop pseudo-option.
    #[must_use]
    pub fn stop_label(&self) -> &str {
        &self.stop_label
    }

    /// Whether picked options are withdrawn.
    #[must_use]
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Whether the choice is ready to be committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// How many times `option` has been picked.
    #[must_use]
    pub fn count(&self, option: &str) -> u32 {
        self.selection.get(option).copied().unwrap_or(0)
    }

    /// Total picks of real options so far.
    #[must_use]
    pub fn total_selected(&self) -> u32 {
        self.selection.values().sum()
    }

    /// Picks so far as `(option, count)`, sorted by option name.
    #[must_use]
    pub fn selections(&self) -> Vec<(&str, u32)> {
        let mut picks: Vec<_> = self
            .selection
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        picks.sort_unstable();
        picks
    }

    /// The single picked option, for one-shot choices.
    #[must_use]
    pub fn first_selection(&self) -> Option<&str> {
        self.selections().first().map(|&(name, _)| name)
    }

    /// Accumulate one resolved pick.
    ///
    /// Decrements `reps` by one and recomputes completion. Values that are not
    /// currently offered are rejected without touching the descriptor.
    pub fn recv(&mut self, value: &OptionValue) -> Result<(), EngineError> {
        if self.complete {
            return Err(EngineError::AlreadyComplete);
        }

        match value {
            OptionValue::StopEarly => {
                if !self.allow_early_stop {
                    return Err(EngineError::StopNotAllowed);
                }
                self.reps = self.reps.saturating_sub(1);
                self.complete = true;
            }
            OptionValue::Choice(name) => {
                let Some(pos) = self.available_options.iter().position(|o| o == name) else {
                    return Err(EngineError::NotOffered(name.clone()));
                };
                *self.selection.entry(name.clone()).or_insert(0) += 1;
                self.reps = self.reps.saturating_sub(1);
                if self.distinct {
                    self.available_options.remove(pos);
                }
                self.complete =
                    self.reps == 0 || (self.distinct && self.available_options.is_empty());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> ChoiceDescriptor {
        ChoiceDescriptor::new(
            ChoiceKind::CountrySelect,
            Side::FactionA,
            "Place influence",
            ["Portugal", "Poland"],
        )
        .with_reps(2)
        .with_unit("influence points")
    }

    #[test]
    fn test_recv_counts_and_completes() {
        let mut choice = countries();
        assert!(!choice.is_complete());

        choice.recv(&OptionValue::Choice("Portugal".into())).unwrap();
        assert_eq!(choice.reps(), 1);
        assert_eq!(choice.count("Portugal"), 1);
        assert!(!choice.is_complete());

        choice.recv(&OptionValue::Choice("Portugal".into())).unwrap();
        assert_eq!(choice.reps(), 0);
        assert_eq!(choice.count("Portugal"), 2);
        assert!(choice.is_complete());
    }

    #[test]
    fn test_recv_rejects_unoffered() {
        let mut choice = countries();
        let before = choice.clone();

        let err = choice.recv(&OptionValue::Choice("Spain".into())).unwrap_err();

        assert_eq!(err, EngineError::NotOffered("Spain".into()));
        assert_eq!(choice, before);
    }

    #[test]
    fn test_recv_after_complete_rejected() {
        let mut choice = countries().with_reps(1);
        choice.recv(&OptionValue::Choice("Poland".into())).unwrap();

        assert_eq!(
            choice.recv(&OptionValue::Choice("Poland".into())),
            Err(EngineError::AlreadyComplete)
        );
        assert_eq!(choice.reps(), 0);
    }

    #[test]
    fn test_early_stop() {
        let mut plain = countries();
        assert_eq!(
            plain.recv(&OptionValue::StopEarly),
            Err(EngineError::StopNotAllowed)
        );

        let mut choice = countries().with_reps(5).with_early_stop("Done");
        choice.recv(&OptionValue::Choice("Poland".into())).unwrap();
        choice.recv(&OptionValue::StopEarly).unwrap();

        assert!(choice.is_complete());
        assert_eq!(choice.reps(), 3);
        assert_eq!(choice.total_selected(), 1);
    }

    #[test]
    fn test_distinct_withdraws_and_self_terminates() {
        let mut choice = countries().with_reps(7).distinct();

        choice.recv(&OptionValue::Choice("Poland".into())).unwrap();
        assert_eq!(choice.available_options(), ["Portugal".to_string()]);
        assert!(!choice.is_complete());

        assert_eq!(
            choice.recv(&OptionValue::Choice("Poland".into())),
            Err(EngineError::NotOffered("Poland".into()))
        );

        choice.recv(&OptionValue::Choice("Portugal".into())).unwrap();
        assert!(choice.is_complete());
        assert_eq!(choice.reps(), 5);
    }

    #[test]
    fn test_zero_reps_is_complete() {
        let choice = countries().with_reps(0);
        assert!(choice.is_complete());
    }

    #[test]
    fn test_closed_never_completes() {
        let mut choice = ChoiceDescriptor::closed(Side::Neutral, "Game over");
        assert!(!choice.is_complete());
        assert!(choice.available_options().is_empty());
        assert!(choice.recv(&OptionValue::Choice("anything".into())).is_err());
    }

    #[test]
    fn test_selections_sorted() {
        let mut choice = countries().with_reps(3);
        choice.recv(&OptionValue::Choice("Portugal".into())).unwrap();
        choice.recv(&OptionValue::Choice("Poland".into())).unwrap();
        choice.recv(&OptionValue::Choice("Portugal".into())).unwrap();

        assert_eq!(choice.selections(), vec![("Poland", 1), ("Portugal", 2)]);
        assert_eq!(choice.first_selection(), Some("Poland"));
    }

    #[test]
    fn test_descriptor_serialization() {
        let mut choice = countries().with_early_stop("Done");
        choice.recv(&OptionValue::Choice("Poland".into())).unwrap();

        let json = serde_json::to_string(&choice).unwrap();
        let restored: ChoiceDescriptor = serde_json::from_str(&json).unwrap();

        assert_eq!(choice, restored);
    }
}
