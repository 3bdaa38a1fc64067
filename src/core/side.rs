//! Acting sides and per-side data storage.
//!
//! ## Side
//!
//! Every choice is made by one of two factions or by chance. `Neutral`
//! stands for the random-number "player" that supplies die rolls.
//!
//! ## SideMap
//!
//! Fixed-size per-side storage indexed by `Side`, backed by an array so
//! cloning a game state never allocates for it.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The side that must act on a pending choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The first faction.
    FactionA,
    /// The second faction.
    FactionB,
    /// Chance: die rolls and other random draws.
    Neutral,
}

impl Side {
    /// Both factions in turn order.
    pub const FACTIONS: [Side; 2] = [Side::FactionA, Side::FactionB];

    /// Get the storage index for this side.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::FactionA => 0,
            Side::FactionB => 1,
            Side::Neutral => 2,
        }
    }

    /// The opposing faction. Chance has no opponent and maps to itself.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::FactionA => Side::FactionB,
            Side::FactionB => Side::FactionA,
            Side::Neutral => Side::Neutral,
        }
    }

    /// Whether this side is one of the two factions.
    #[must_use]
    pub const fn is_faction(self) -> bool {
        !matches!(self, Side::Neutral)
    }

    /// Sign of this side on a shared victory-point track.
    ///
    /// Faction A scores upwards, Faction B downwards, chance never scores.
    #[must_use]
    pub const fn vp_sign(self) -> i32 {
        match self {
            Side::FactionA => 1,
            Side::FactionB => -1,
            Side::Neutral => 0,
        }
    }

    /// Short label used in prompts and command arguments.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Side::FactionA => "A",
            Side::FactionB => "B",
            Side::Neutral => "RNG",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::FactionA => write!(f, "Faction A"),
            Side::FactionB => write!(f, "Faction B"),
            Side::Neutral => write!(f, "RNG"),
        }
    }
}

/// Error returned when a side name cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown side `{0}`")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    /// Parse `a`/`b` (or the full faction names), case-insensitive.
    ///
    /// ```
    /// use strategy_console::core::Side;
    ///
    /// assert_eq!("a".parse::<Side>().unwrap(), Side::FactionA);
    /// assert_eq!("FactionB".parse::<Side>().unwrap(), Side::FactionB);
    /// assert!("c".parse::<Side>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "factiona" => Ok(Side::FactionA),
            "b" | "factionb" => Ok(Side::FactionB),
            "rng" | "neutral" => Ok(Side::Neutral),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// Holds one entry for each faction and one for chance.
///
/// ## Example
///
/// ```
/// use strategy_console::core::{Side, SideMap};
///
/// let mut influence: SideMap<u32> = SideMap::default();
/// influence[Side::FactionA] = 3;
///
/// assert_eq!(influence[Side::FactionA], 3);
/// assert_eq!(influence[Side::FactionB], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 3],
}

impl<T> SideMap<T> {
    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
