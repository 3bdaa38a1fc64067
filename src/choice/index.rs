//! Option Indexer: numbers the options of a choice descriptor.
//!
//! The table is rebuilt from scratch whenever the descriptor changes. How an
//! option gets its number depends only on the choice kind:
//!
//! | Kind                 | Identifier                          | Stable? |
//! |----------------------|-------------------------------------|---------|
//! | `ActionSelect`       | action enumeration value            | yes     |
//! | `HandCardSelect`     | card catalog index                  | yes     |
//! | `CountrySelect`      | country catalog index               | yes     |
//! | `GenericMultiSelect` | 0-based position in the option list | no      |
//! | `RandomDrawSelect`   | the option's own numeric value      | yes     |
//!
//! The stop pseudo-option always sits at [`OptionId::STOP_EARLY`] (`-1`).
//! Every real identifier is non-negative, so the two never collide, not even
//! with position 0 of a generic list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::descriptor::{ChoiceDescriptor, ChoiceKind, OptionValue};
use crate::error::IndexError;
use crate::rules::OptionCatalog;

/// User-addressable identifier of an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(pub i64);

impl OptionId {
    /// Identifier of the stop pseudo-option.
    pub const STOP_EARLY: OptionId = OptionId(-1);

    /// Whether this is the stop sentinel.
    #[must_use]
    pub const fn is_stop(self) -> bool {
        self.0 == Self::STOP_EARLY.0
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the option table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedOption {
    /// Value to feed back into the descriptor.
    pub value: OptionValue,
    /// Name shown to the user and matched against typed prefixes.
    pub name: String,
}

/// Mapping from identifier to option, ordered by identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionIndex {
    entries: BTreeMap<OptionId, IndexedOption>,
}

impl OptionIndex {
    /// Number every option currently offered by `choice`.
    ///
    /// Fails if the catalog does not know an option, a random-draw option is
    /// not numeric, or two different options end up on the same identifier.
    pub fn build(
        choice: &ChoiceDescriptor,
        catalog: &impl OptionCatalog,
    ) -> Result<Self, IndexError> {
        let mut entries = BTreeMap::new();

        if choice.allow_early_stop() {
            entries.insert(
                OptionId::STOP_EARLY,
                IndexedOption {
                    value: OptionValue::StopEarly,
                    name: choice.stop_label().to_string(),
                },
            );
        }

        for (position, option) in choice.available_options().iter().enumerate() {
            let raw = match choice.kind {
                ChoiceKind::ActionSelect => catalog.action_id(option),
                ChoiceKind::HandCardSelect => catalog.card_id(option),
                ChoiceKind::CountrySelect => catalog.country_id(option),
                ChoiceKind::GenericMultiSelect => Some(position as u32),
                ChoiceKind::RandomDrawSelect => Some(option.parse::<u32>().map_err(|_| {
                    IndexError::NotNumeric {
                        option: option.clone(),
                    }
                })?),
            };
            let id = raw.map(|n| OptionId(i64::from(n))).ok_or_else(|| {
                IndexError::Uncataloged {
                    kind: choice.kind,
                    option: option.clone(),
                }
            })?;

            if let Some(existing) = entries.get(&id) {
                // The same option listed twice is still one option.
                if existing.value == OptionValue::Choice(option.clone()) {
                    continue;
                }
                return Err(IndexError::Collision {
                    id,
                    first: existing.name.clone(),
                    second: option.clone(),
                });
            }

            entries.insert(
                id,
                IndexedOption {
                    value: OptionValue::Choice(option.clone()),
                    name: option.clone(),
                },
            );
        }

        Ok(Self { entries })
    }

    /// Look up an identifier.
    #[must_use]
    pub fn get(&self, id: OptionId) -> Option<&IndexedOption> {
        self.entries.get(&id)
    }

    /// Identifier currently assigned to the option named `name`.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<OptionId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(&id, _)| id)
    }

    /// Iterate in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &IndexedOption)> {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    /// Number of entries, including the stop pseudo-option.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing can be picked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;
    use proptest::prelude::*;
    use rustc_hash::FxHashMap;

    /// Catalog where every known name maps to a fixed number.
    struct FixedCatalog(FxHashMap<String, u32>);

    impl FixedCatalog {
        fn of(names: &[&str]) -> Self {
            // Deliberately not positional: ids start at 10 and step by 3.
            Self(
                names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| (n.to_string(), 10 + 3 * i as u32))
                    .collect(),
            )
        }
    }

    impl OptionCatalog for FixedCatalog {
        fn action_id(&self, option: &str) -> Option<u32> {
            self.0.get(option).copied()
        }
        fn card_id(&self, option: &str) -> Option<u32> {
            self.0.get(option).copied()
        }
        fn country_id(&self, option: &str) -> Option<u32> {
            self.0.get(option).copied()
        }
    }

    fn choice(kind: ChoiceKind, options: &[&str]) -> ChoiceDescriptor {
        ChoiceDescriptor::new(kind, Side::FactionA, "pick", options.iter().copied())
    }

    #[test]
    fn test_catalog_kinds_use_catalog_ids() {
        let catalog = FixedCatalog::of(&["Portugal", "Poland", "France"]);

        for kind in [
            ChoiceKind::ActionSelect,
            ChoiceKind::HandCardSelect,
            ChoiceKind::CountrySelect,
        ] {
            let index = OptionIndex::build(&choice(kind, &["France", "Portugal"]), &catalog).unwrap();

            assert_eq!(index.len(), 2);
            assert_eq!(index.id_of("Portugal"), Some(OptionId(10)));
            assert_eq!(index.id_of("France"), Some(OptionId(16)));
        }
    }

    #[test]
    fn test_generic_is_positional() {
        let catalog = FixedCatalog::of(&[]);
        let index = OptionIndex::build(
            &choice(ChoiceKind::GenericMultiSelect, &["Participate", "Boycott"]),
            &catalog,
        )
        .unwrap();

        assert_eq!(index.get(OptionId(0)).unwrap().name, "Participate");
        assert_eq!(index.get(OptionId(1)).unwrap().name, "Boycott");
    }

    #[test]
    fn test_random_draw_uses_value() {
        let catalog = FixedCatalog::of(&[]);
        let index = OptionIndex::build(
            &choice(ChoiceKind::RandomDrawSelect, &["6", "1", "3"]),
            &catalog,
        )
        .unwrap();

        let ids: Vec<_> = index.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 3, 6]);
    }

    #[test]
    fn test_random_draw_rejects_non_numeric() {
        let catalog = FixedCatalog::of(&[]);
        let err = OptionIndex::build(&choice(ChoiceKind::RandomDrawSelect, &["six"]), &catalog)
            .unwrap_err();

        assert_eq!(
            err,
            IndexError::NotNumeric {
                option: "six".into()
            }
        );
    }

    #[test]
    fn test_uncataloged_option() {
        let catalog = FixedCatalog::of(&["Poland"]);
        let err = OptionIndex::build(&choice(ChoiceKind::CountrySelect, &["Atlantis"]), &catalog)
            .unwrap_err();

        assert!(matches!(err, IndexError::Uncataloged { ref option, .. } if option == "Atlantis"));
    }

    #[test]
    fn test_collision_detected() {
        let mut catalog = FixedCatalog::of(&["Poland"]);
        catalog.0.insert("Portugal".into(), 10);

        let err = OptionIndex::build(
            &choice(ChoiceKind::CountrySelect, &["Poland", "Portugal"]),
            &catalog,
        )
        .unwrap_err();

        assert!(matches!(err, IndexError::Collision { id: OptionId(10), .. }));
    }

    #[test]
    fn test_duplicate_listing_is_one_option() {
        let catalog = FixedCatalog::of(&["Poland"]);
        let index = OptionIndex::build(
            &choice(ChoiceKind::CountrySelect, &["Poland", "Poland"]),
            &catalog,
        )
        .unwrap();

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_stop_sentinel_beside_position_zero() {
        let catalog = FixedCatalog::of(&[]);
        let index = OptionIndex::build(
            &choice(ChoiceKind::GenericMultiSelect, &["Remove", "Add"]).with_early_stop("Done"),
            &catalog,
        )
        .unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(OptionId::STOP_EARLY).unwrap().value, OptionValue::StopEarly);
        assert_eq!(index.get(OptionId(0)).unwrap().name, "Remove");
        assert!(OptionId::STOP_EARLY.is_stop());
        assert!(!OptionId(0).is_stop());
    }

    fn distinct_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[A-Z][a-z]{2,8}", 1..12)
            .prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_ids_distinct_and_stable_for_catalog_kinds(names in distinct_names(), seed in any::<u64>()) {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let catalog = FixedCatalog::of(&refs);

            let mut shuffled = refs.clone();
            crate::core::GameRng::new(seed).shuffle(&mut shuffled);

            for kind in [ChoiceKind::ActionSelect, ChoiceKind::HandCardSelect, ChoiceKind::CountrySelect] {
                let first = OptionIndex::build(&choice(kind, &refs), &catalog).unwrap();
                let again = OptionIndex::build(&choice(kind, &shuffled), &catalog).unwrap();

                prop_assert_eq!(first.len(), refs.len());
                prop_assert_eq!(&first, &again);
            }
        }

        #[test]
        fn prop_random_draw_distinct_and_stable(values in prop::collection::btree_set(0u32..1000, 1..20)) {
            let names: Vec<String> = values.iter().map(u32::to_string).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let catalog = FixedCatalog::of(&[]);

            let mut reversed = refs.clone();
            reversed.reverse();

            let first = OptionIndex::build(&choice(ChoiceKind::RandomDrawSelect, &refs), &catalog).unwrap();
            let again = OptionIndex::build(&choice(ChoiceKind::RandomDrawSelect, &reversed), &catalog).unwrap();

            prop_assert_eq!(first.len(), values.len());
            prop_assert_eq!(first, again);
        }

        #[test]
        fn prop_generic_ids_are_positions(names in distinct_names()) {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let catalog = FixedCatalog::of(&[]);

            let index = OptionIndex::build(
                &choice(ChoiceKind::GenericMultiSelect, &refs).with_early_stop("stop early"),
                &catalog,
            ).unwrap();

            prop_assert_eq!(index.len(), refs.len() + 1);
            for (pos, name) in refs.iter().enumerate() {
                prop_assert_eq!(index.id_of(name), Some(OptionId(pos as i64)));
            }
        }
    }
}
