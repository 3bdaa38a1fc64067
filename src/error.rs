//! Error types for the input-resolution core.
//!
//! Errors are split by who is at fault:
//!
//! - [`ResolveError`]: the user typed something that does not pick exactly one
//!   option. Recovered locally; the user retries.
//! - [`IndexError`]: the rules engine offered options it cannot identify.
//! - [`EngineError`]: the rules engine refused a request.
//! - [`Precondition`]: the caller invoked an operation in the wrong state.
//!
//! [`SessionError`] wraps all of them for the session-level API.

use thiserror::Error;

use crate::choice::{ChoiceKind, OptionId};

/// Failure to resolve one user token to a single option.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The token matched no currently available option.
    #[error("no matching option for `{token}`")]
    NoMatch { token: String },

    /// The token is a prefix of two or more option names.
    #[error("multiple matching options for `{token}`: {}", candidates.join(", "))]
    Ambiguous {
        token: String,
        candidates: Vec<String>,
    },
}

impl ResolveError {
    /// The token that failed to resolve.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            ResolveError::NoMatch { token } | ResolveError::Ambiguous { token, .. } => token,
        }
    }

    /// Whether the failure was an ambiguity rather than a miss.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveError::Ambiguous { .. })
    }
}

/// Failure to build an option table from a choice descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A catalog-indexed option is unknown to the catalog.
    #[error("option `{option}` has no catalog entry for {kind:?}")]
    Uncataloged { kind: ChoiceKind, option: String },

    /// A random-draw option is not a non-negative integer.
    #[error("random draw option `{option}` is not a number")]
    NotNumeric { option: String },

    /// Two distinct options were given the same identifier.
    #[error("identifier {id} assigned to both `{first}` and `{second}`")]
    Collision {
        id: OptionId,
        first: String,
        second: String,
    },
}

/// Rejection raised by a rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The option is not in the current available set.
    #[error("option `{0}` is not currently offered")]
    NotOffered(String),

    /// The choice already has everything it needs.
    #[error("choice is already complete")]
    AlreadyComplete,

    /// The stop pseudo-option was sent to a choice that does not offer it.
    #[error("choice does not allow stopping early")]
    StopNotAllowed,

    /// The stage was finalized before the choice was complete.
    #[error("choice is not complete")]
    Incomplete,

    /// No card with this name exists.
    #[error("unknown card `{0}`")]
    UnknownCard(String),

    /// The card exists but has no event handler.
    #[error("card `{0}` has no event")]
    NoEffect(String),
}

/// Operations invoked outside their valid state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("commit requested while the choice is incomplete")]
    CommitWhileIncomplete,

    #[error("moves submitted while awaiting commit confirmation")]
    BatchWhileComplete,

    #[error("confirmation requested while the choice is incomplete")]
    ConfirmWhileIncomplete,

    #[error("a debug session is already active")]
    AlreadyDebugging,
}

/// Errors surfaced by [`crate::session::Session`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("option table rebuild failed: {0}")]
    Index(#[from] IndexError),

    #[error("rules engine rejected the request: {0}")]
    Engine(#[from] EngineError),

    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),

    #[error("not in debug mode")]
    NotInDebugMode,
}

impl SessionError {
    /// Whether this error indicates a caller or engine bug rather than bad input.
    #[must_use]
    pub fn is_contract_breach(&self) -> bool {
        matches!(
            self,
            SessionError::PreconditionViolation(_)
                | SessionError::Index(_)
                | SessionError::Engine(_)
        )
    }
}
