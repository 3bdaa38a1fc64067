//! # strategy-console
//!
//! Input resolution and transaction engine for turn-based strategy games
//! played at a text console.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic Core**: Option numbering, token resolution, batching,
//!    commit/rollback and debugging only talk to a game through the
//!    `RulesEngine` trait.
//!
//! 2. **Stable Identifiers**: Options are numbered from catalogs, never from
//!    list positions, wherever a catalog exists. The same country keeps the
//!    same number in every prompt.
//!
//! 3. **Snapshots by Value**: Game states are `im`-backed values. Commit,
//!    rollback and debug restore are plain clones and assignments.
//!
//! ## Modules
//!
//! - `core`: Sides, per-side storage, deterministic RNG
//! - `choice`: Choice descriptors, option indexer, resolver, batch accumulator
//! - `rules`: `RulesEngine` and `OptionCatalog` traits
//! - `session`: Transaction manager, debug session, the `Session` facade
//! - `games`: The cold-war card game used by the console
//! - `console`: Line-oriented front end
//! - `config`: Environment-driven settings

pub mod choice;
pub mod config;
pub mod console;
pub mod core;
pub mod error;
pub mod games;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, Side, SideMap};

pub use crate::choice::{
    apply_batch, resolve, resolve_among, BatchOutcome, ChoiceDescriptor, ChoiceKind,
    IndexedOption, OptionId, OptionIndex, OptionValue,
};

pub use crate::error::{EngineError, IndexError, Precondition, ResolveError, SessionError};

pub use crate::rules::{OptionCatalog, RulesEngine};

pub use crate::session::{Confirmation, Session, Transaction};

pub use crate::config::ConsoleConfig;
