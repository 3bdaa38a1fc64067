//! Choice handling: descriptors, option numbering, token resolution and
//! batch accumulation.
//!
//! ## Key Types
//!
//! - `ChoiceDescriptor`: The pending decision published by a rules engine
//! - `OptionIndex`: Identifier → option table rebuilt per descriptor change
//! - `resolve`: One token → one option, or a `ResolveError`
//! - `apply_batch`: A line of tokens → picks applied to the engine

pub mod accumulator;
pub mod descriptor;
pub mod index;
pub mod resolver;

pub use accumulator::{apply_batch, BatchOutcome};
pub use descriptor::{ChoiceDescriptor, ChoiceKind, OptionValue};
pub use index::{IndexedOption, OptionId, OptionIndex};
pub use resolver::{resolve, resolve_among};
