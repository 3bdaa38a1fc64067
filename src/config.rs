//! Console configuration.
//!
//! Values come from `Default` and may be overridden by environment variables
//! (a `.env` file is honoured by the binary):
//!
//! | Variable                 | Field           |
//! |--------------------------|-----------------|
//! | `STRATEGY_SEED`          | `seed`          |
//! | `STRATEGY_HAND_SIZE`     | `hand_size`     |
//! | `STRATEGY_TURNS`         | `turns`         |
//! | `STRATEGY_ACTION_ROUNDS` | `action_rounds` |
//! | `STRATEGY_VP_TO_WIN`     | `vp_to_win`     |

use std::env;

use serde::{Deserialize, Serialize};

use crate::games::cold_war::{ColdWarBuilder, ColdWarGame};

/// Settings for one console run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Seed for deck shuffles.
    pub seed: u64,

    /// Cards dealt to each faction at the start of every turn.
    pub hand_size: usize,

    /// Number of turns before the game is scored.
    pub turns: u32,

    /// Action rounds per faction per turn.
    pub action_rounds: u32,

    /// Victory points that end the game immediately.
    pub vp_to_win: i32,
}

impl Default for ConsoleConfig {
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

impl ConsoleConfig {
    /// Defaults overridden by any `STRATEGY_*` variables that parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("STRATEGY_SEED") {
            config.seed = seed;
        }
        if let Some(size) = read_env::<usize>("STRATEGY_HAND_SIZE") {
            config.hand_size = size.max(1);
        }
        if let Some(turns) = read_env::<u32>("STRATEGY_TURNS") {
            config.turns = turns.max(1);
        }
        if let Some(rounds) = read_env::<u32>("STRATEGY_ACTION_ROUNDS") {
            config.action_rounds = rounds.max(1);
        }
        if let Some(vp) = read_env::<i32>("STRATEGY_VP_TO_WIN") {
            config.vp_to_win = vp.max(1);
        }

        config
    }

    /// A builder carrying these settings.
    #[must_use]
    pub fn builder(&self) -> ColdWarBuilder {
        ColdWarBuilder::new()
            .seed(self.seed)
            .hand_size(self.hand_size)
            .turns(self.turns)
            .action_rounds(self.action_rounds)
            .vp_to_win(self.vp_to_win)
    }

    /// Build a started game with these settings.
    #[must_use]
    pub fn build_game(&self) -> ColdWarGame {
        self.builder().build()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
