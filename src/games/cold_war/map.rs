//! Country catalog and influence map.
//!
//! Countries are addressed by a fixed catalog index (`CountryId`), starting at
//! 1. Mutable per-country data lives in an `im::Vector` arena at position
//! `id - 1`, so cloning the map copies the arena and nothing else.

use im::Vector;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::core::{Side, SideMap};

/// Map region.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    #[strum(serialize = "eu", to_string = "Europe")]
    Europe,
    #[strum(serialize = "as", to_string = "Asia")]
    Asia,
    #[strum(serialize = "me", to_string = "Middle East")]
    MiddleEast,
    #[strum(serialize = "af", to_string = "Africa")]
    Africa,
    #[strum(serialize = "na", to_string = "North America")]
    NorthAmerica,
    #[strum(serialize = "sa", to_string = "South America")]
    SouthAmerica,
}

/// Catalog index of a country.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryId(pub u32);

impl CountryId {
    /// Arena position of this country, if the id is in range.
    fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1).filter(|&i| i < COUNTRIES.len())
    }
}

/// Static country data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountryInfo {
    pub id: CountryId,
    pub name: &'static str,
    pub region: Region,
    pub stability: u32,
    pub battleground: bool,
    /// Influence at the start of a game, Faction A then Faction B.
    pub opening: (u32, u32),
}

const fn country(
    id: u32,
    name: &'static str,
    region: Region,
    stability: u32,
    battleground: bool,
    opening: (u32, u32),
) -> CountryInfo {
    CountryInfo {
        id: CountryId(id),
        name,
        region,
        stability,
        battleground,
        opening,
    }
}

use Region::*;

static COUNTRIES: [CountryInfo; 23] = [
    country(1, "Poland", Europe, 3, true, (0, 3)),
    country(2, "Portugal", Europe, 2, false, (0, 0)),
    country(3, "France", Europe, 3, true, (0, 0)),
    country(4, "West Germany", Europe, 4, true, (1, 0)),
    country(5, "East Germany", Europe, 3, true, (0, 3)),
    country(6, "Italy", Europe, 2, true, (0, 0)),
    country(7, "Japan", Asia, 4, true, (1, 0)),
    country(8, "India", Asia, 3, true, (0, 0)),
    country(9, "Pakistan", Asia, 2, true, (0, 0)),
    country(10, "Thailand", Asia, 2, true, (0, 0)),
    country(11, "Egypt", MiddleEast, 2, true, (0, 0)),
    country(12, "Iran", MiddleEast, 2, true, (1, 0)),
    country(13, "Israel", MiddleEast, 4, true, (1, 0)),
    country(14, "Angola", Africa, 1, true, (0, 0)),
    country(15, "Nigeria", Africa, 1, true, (0, 0)),
    country(16, "South Africa", Africa, 3, true, (1, 0)),
    country(17, "Cuba", NorthAmerica, 3, true, (0, 0)),
    country(18, "Mexico", NorthAmerica, 2, true, (0, 0)),
    country(19, "Panama", NorthAmerica, 2, true, (1, 0)),
    country(20, "Argentina", SouthAmerica, 2, true, (0, 0)),
    country(21, "Brazil", SouthAmerica, 2, true, (0, 0)),
    country(22, "Chile", SouthAmerica, 3, true, (0, 0)),
    country(23, "Peru", SouthAmerica, 2, false, (0, 0)),
];

/// All countries in catalog order.
#[must_use]
pub fn countries() -> &'static [CountryInfo] {
    &COUNTRIES
}

/// Look up a country by catalog index.
#[must_use]
pub fn country_info(id: CountryId) -> Option<&'static CountryInfo> {
    id.slot().map(|i| &COUNTRIES[i])
}

/// Look up a country by exact name.
#[must_use]
pub fn find_country(name: &str) -> Option<&'static CountryInfo> {
    COUNTRIES.iter().find(|c| c.name == name)
}

/// Countries of one region, in catalog order.
pub fn in_region(region: Region) -> impl Iterator<Item = &'static CountryInfo> {
    COUNTRIES.iter().filter(move |c| c.region == region)
}

/// Mutable state of one country.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryState {
    pub influence: SideMap<u32>,
}

impl CountryState {
    /// Faction controlling a country of the given stability, if any.
    #[must_use]
    pub fn controller(&self, stability: u32) -> Option<Side> {
        Side::FACTIONS.into_iter().find(|&side| {
            self.influence[side] >= self.influence[side.opponent()].saturating_add(stability)
        })
    }
}

/// Influence on every country, indexed by catalog order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMap {
    countries: Vector<CountryState>,
}

impl WorldMap {
    /// The map as it stands at the start of a game.
    #[must_use]
    pub fn opening() -> Self {
        let countries = COUNTRIES
            .iter()
            .map(|info| {
                let mut state = CountryState::default();
                state.influence[Side::FactionA] = info.opening.0;
                state.influence[Side::FactionB] = info.opening.1;
                state
            })
            .collect();
        Self { countries }
    }

    /// State of a country.
    #[must_use]
    pub fn get(&self, id: CountryId) -> Option<&CountryState> {
        self.countries.get(id.slot()?)
    }

    /// Mutable state of a country.
    pub fn get_mut(&mut self, id: CountryId) -> Option<&mut CountryState> {
        self.countries.get_mut(id.slot()?)
    }

    /// Influence of `side` in a country (0 for unknown ids).
    #[must_use]
    pub fn influence(&self, id: CountryId, side: Side) -> u32 {
        self.get(id).map_or(0, |c| c.influence[side])
    }

    /// Faction controlling a country.
    #[must_use]
    pub fn controller(&self, id: CountryId) -> Option<Side> {
        let info = country_info(id)?;
        self.get(id)?.controller(info.stability)
    }

    /// One-line description used by region listings.
    #[must_use]
    pub fn state_line(&self, id: CountryId) -> String {
        let Some(info) = country_info(id) else {
            return format!("unknown country {}", id.0);
        };
        let control = match self.controller(id) {
            Some(side) => format!("controlled by {side}"),
            None => "uncontrolled".to_string(),
        };
        format!(
            "{:>3} {:<14} stab {} {} A:{} B:{} ({control})",
            info.id.0,
            info.name,
            info.stability,
            if info.battleground { "BG" } else { "  " },
            self.influence(id, Side::FactionA),
            self.influence(id, Side::FactionB),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_match_positions() {
        for (i, info) in countries().iter().enumerate() {
            assert_eq!(info.id.0 as usize, i + 1);
            assert_eq!(country_info(info.id), Some(info));
        }
        assert_eq!(country_info(CountryId(0)), None);
        assert_eq!(country_info(CountryId(99)), None);
    }

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = countries().iter().map(|c| c.name).collect();
        assert_eq!(names.len(), countries().len());
    }

    #[test]
    fn test_region_parse() {
        assert_eq!("eu".parse::<Region>().unwrap(), Region::Europe);
        assert_eq!("SA".parse::<Region>().unwrap(), Region::SouthAmerica);
        assert_eq!(Region::MiddleEast.to_string(), "Middle East");
        assert!("xx".parse::<Region>().is_err());
        assert_eq!(in_region(Region::MiddleEast).count(), 3);
    }

    #[test]
    fn test_opening_control() {
        let map = WorldMap::opening();
        let poland = find_country("Poland").unwrap().id;
        let france = find_country("France").unwrap().id;

        assert_eq!(map.influence(poland, Side::FactionB), 3);
        assert_eq!(map.controller(poland), Some(Side::FactionB));
        assert_eq!(map.controller(france), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = WorldMap::opening();
        let snapshot = map.clone();
        let cuba = find_country("Cuba").unwrap().id;

        map.get_mut(cuba).unwrap().influence[Side::FactionB] = 3;

        assert_eq!(snapshot.influence(cuba, Side::FactionB), 0);
        assert_ne!(map, snapshot);
    }

    #[test]
    fn test_controller_at_max_influence() {
        let mut state = CountryState::default();
        state.influence[Side::FactionB] = u32::MAX;

        assert_eq!(state.controller(3), Some(Side::FactionB));

        state.influence[Side::FactionA] = u32::MAX;
        assert_eq!(state.controller(3), None);
    }

    #[test]
    fn test_state_line() {
        let map = WorldMap::opening();
        let line = map.state_line(find_country("Poland").unwrap().id);

        assert!(line.contains("Poland"));
        assert!(line.contains("controlled by Faction B"));
    }
}
