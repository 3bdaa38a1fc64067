//! Rules engine boundary.
//!
//! Games implement `RulesEngine` to expose their pending decision and accept
//! resolved picks:
//! - What choice is pending right now
//! - How a resolved pick is accumulated
//! - How a completed choice is finalized
//! - How a single card effect is run on demand (for debugging)
//!
//! The session snapshots engines by cloning them, so `Clone` must produce a
//! fully independent copy of all mutable game data.

use crate::choice::{ChoiceDescriptor, OptionValue};
use crate::core::Side;
use crate::error::EngineError;

/// Stable identity → integer mappings for the engine's catalogs.
///
/// Each mapping must be injective over the names it knows and must not depend
/// on where an option appears in a list.
pub trait OptionCatalog {
    /// Fixed enumeration value of a card action name.
    fn action_id(&self, option: &str) -> Option<u32>;

    /// Catalog index of a card name.
    fn card_id(&self, option: &str) -> Option<u32>;

    /// Catalog index of a location name.
    fn country_id(&self, option: &str) -> Option<u32>;
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `choice`: Always returns the current descriptor; a finished game
///   publishes a choice that can never complete
/// - `receive`: Should delegate to [`ChoiceDescriptor::recv`] unless the game
///   needs extra bookkeeping per pick
/// - `stage_complete`: Only called once `choice().is_complete()`
/// - `trigger_effect`: Must leave the pending input exactly as it was once the
///   effect's own choices are finished
pub trait RulesEngine: OptionCatalog + Clone {
    /// Reset to the opening position of a new game.
    fn start(&mut self);

    /// The pending decision.
    fn choice(&self) -> &ChoiceDescriptor;

    /// Accumulate one resolved pick into the pending decision.
    fn receive(&mut self, value: &OptionValue) -> Result<(), EngineError>;

    /// Finalize the completed decision and advance to the next one.
    fn stage_complete(&mut self) -> Result<(), EngineError>;

    /// Run the event of `card` for `side`, then return to the current input.
    fn trigger_effect(&mut self, card: &str, side: Side) -> Result<(), EngineError>;
}
