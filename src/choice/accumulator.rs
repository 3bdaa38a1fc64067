//! Turn Accumulator: applies a line of tokens to the pending choice.
//!
//! A line is split on whitespace and cut down to the number of picks the
//! choice still needs. Tokens are then resolved and applied one at a time,
//! rebuilding the option table after each pick so the next token is matched
//! against what is offered *now*.
//!
//! A batch is best effort. When a token fails to resolve, processing stops
//! there; every token before it stays applied. Undoing a partial batch is the
//! transaction layer's job, not this one's.

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::index::OptionIndex;
use super::resolver::resolve;
use crate::error::{Precondition, ResolveError, SessionError};
use crate::rules::RulesEngine;

/// What happened to one line of input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Names of the options applied, in order.
    pub applied: SmallVec<[String; 4]>,

    /// The token that stopped the batch, if any.
    pub failure: Option<ResolveError>,

    /// Tokens dropped because the choice needed fewer picks.
    pub truncated: usize,

    /// Whether the choice is now waiting for commit confirmation.
    pub complete: bool,
}

/// Apply the tokens of `line` to `engine`, keeping `index` in sync.
///
/// Fails only on contract breaches: submitting picks to a complete choice, or
/// the engine publishing options it cannot number or rejecting a pick it
/// offered. Unresolvable tokens are reported in the outcome instead.
pub fn apply_batch<E: RulesEngine>(
    engine: &mut E,
    index: &mut OptionIndex,
    line: &str,
) -> Result<BatchOutcome, SessionError> {
    if engine.choice().is_complete() {
        return Err(Precondition::BatchWhileComplete.into());
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let budget = engine.choice().reps() as usize;
    let mut outcome = BatchOutcome {
        truncated: tokens.len().saturating_sub(budget),
        ..BatchOutcome::default()
    };

    for token in tokens.into_iter().take(budget) {
        let (value, name) = match resolve(token, index) {
            Ok((id, entry)) => {
                debug!(token, %id, option = %entry.name, "resolved token");
                (entry.value.clone(), entry.name.clone())
            }
            Err(err) => {
                warn!(token, error = %err, "token rejected, dropping rest of batch");
                outcome.failure = Some(err);
                break;
            }
        };

        engine.receive(&value)?;
        *index = OptionIndex::build(engine.choice(), &*engine)?;
        outcome.applied.push(name);

        if engine.choice().is_complete() {
            break;
        }
    }

    outcome.complete = engine.choice().is_complete();
    Ok(outcome)
}
