//! Deterministic random number generation that survives snapshots.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Comparable**: Two generators are equal when their stream position is
//! - **Serializable**: O(1) state capture and restore
//!
//! The generator lives inside the game state, so a rollback also rewinds
//! the random stream: replaying a turn after an undo shuffles the same way.
//!
//! ```
//! use strategy_console::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let snapshot = rng.clone();
//!
//! let mut first = [1, 2, 3, 4, 5];
//! rng.shuffle(&mut first);
//!
//! let mut replay = snapshot;
//! let mut second = [1, 2, 3, 4, 5];
//! replay.shuffle(&mut second);
//! assert_eq!(first, second);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG carried inside the game state.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut deck: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut deck);
        deck
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..10 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        assert_ne!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_equality_tracks_position() {
        let mut rng1 = GameRng::new(7);
        let rng2 = GameRng::new(7);
        assert_eq!(rng1, rng2);

        shuffled(&mut rng1);
        assert_ne!(rng1, rng2);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_state_roundtrip_continues_stream() {
        let mut rng = GameRng::new(42);
        for _ in 0..10 {
            shuffled(&mut rng);
        }

        let state = rng.state();
        let expected = shuffled(&mut rng);

        let mut restored = GameRng::from_state(&state);
        assert_eq!(shuffled(&mut restored), expected);
    }

    #[test]
    fn test_serde_via_state() {
        let mut rng = GameRng::new(9);
        shuffled(&mut rng);

        let json = serde_json::to_string(&rng).unwrap();
        let restored: GameRng = serde_json::from_str(&json).unwrap();

        assert_eq!(rng, restored);
    }
}
