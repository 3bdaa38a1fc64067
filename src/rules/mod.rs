//! Rules engine traits for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - The pending choice at any moment
//! - How picks accumulate and how a finished choice advances the game
//! - Stable numbering of their cards, actions and locations
//!
//! The input-resolution core calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{OptionCatalog, RulesEngine};
