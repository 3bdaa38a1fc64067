//! Interactive session: transaction, debug layer and the live option table.
//!
//! `Session` is the single owner of all mutable game data for one player
//! seat. Every operation that can change the pending choice rebuilds the
//! option table before returning, so callers always resolve tokens against
//! what is offered now.
//!
//! ## Example
//!
//! ```
//! use strategy_console::games::cold_war::ColdWarBuilder;
//! use strategy_console::session::{Confirmation, Session};
//!
//! let game = ColdWarBuilder::new().seed(7).build();
//! let mut session = Session::new(game).unwrap();
//!
//! // Pick the lowest-numbered card in hand by its identifier, then confirm.
//! let (id, _) = session.options().iter().next().unwrap();
//! let outcome = session.submit(&id.to_string()).unwrap();
//! assert!(outcome.complete);
//! assert_eq!(session.confirm("y").unwrap(), Confirmation::Committed);
//! ```

mod debug;
mod transaction;

pub use debug::DebugLayer;
pub use transaction::Transaction;

use tracing::info;

use crate::choice::{apply_batch, resolve_among, BatchOutcome, OptionIndex};
use crate::core::Side;
use crate::error::{Precondition, SessionError};
use crate::rules::RulesEngine;

/// Answers accepted when a complete choice asks for confirmation.
pub const COMMIT_ANSWERS: [&str; 2] = ["yes", "no"];

/// Result of answering the commit question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// The choice was finalized and a new rollback point taken.
    Committed,
    /// Everything since the last commit was undone.
    RolledBack,
}

/// One interactive session over a rules engine.
#[derive(Clone, Debug)]
pub struct Session<E: RulesEngine> {
    tx: Transaction<E>,
    debug: DebugLayer<E>,
    options: OptionIndex,
}

impl<E: RulesEngine> Session<E> {
    /// Open a session on `engine` as it currently stands.
    pub fn new(engine: E) -> Result<Self, SessionError> {
        let options = OptionIndex::build(engine.choice(), &engine)?;
        Ok(Self {
            tx: Transaction::new(engine),
            debug: DebugLayer::default(),
            options,
        })
    }

    /// The live engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        self.tx.live()
    }

    /// The state a rollback would restore.
    #[must_use]
    pub fn rollback_point(&self) -> &E {
        self.tx.rollback_point()
    }

    /// The current option table.
    #[must_use]
    pub fn options(&self) -> &OptionIndex {
        &self.options
    }

    /// Whether the pending choice is complete and waiting for yes/no.
    #[must_use]
    pub fn awaiting_commit(&self) -> bool {
        self.tx.live().choice().is_complete()
    }

    /// Whether a debug session is open.
    #[must_use]
    pub fn is_debugging(&self) -> bool {
        self.debug.is_active()
    }

    /// Start a new game and make its opening position the rollback point.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let mut engine = self.tx.live().clone();
        engine.start();
        self.tx.reset(engine);
        info!("new game started");
        self.refresh()
    }

    /// Resolve and apply a whitespace-separated line of option tokens.
    pub fn submit(&mut self, line: &str) -> Result<BatchOutcome, SessionError> {
        apply_batch(self.tx.live_mut(), &mut self.options, line)
    }

    /// Answer the commit question with a prefix of `yes` or `no`.
    pub fn confirm(&mut self, token: &str) -> Result<Confirmation, SessionError> {
        if !self.awaiting_commit() {
            return Err(Precondition::ConfirmWhileIncomplete.into());
        }

        match resolve_among(token, &COMMIT_ANSWERS)? {
            "yes" => {
                self.commit()?;
                Ok(Confirmation::Committed)
            }
            _ => {
                self.rollback()?;
                Ok(Confirmation::RolledBack)
            }
        }
    }

    /// Finalize the complete choice.
    pub fn commit(&mut self) -> Result<(), SessionError> {
        self.tx.commit()?;
        self.refresh()
    }

    /// Undo everything since the last commit.
    pub fn rollback(&mut self) -> Result<(), SessionError> {
        self.tx.rollback();
        self.refresh()
    }

    /// Open a debug session, preserving the live state and rollback point.
    pub fn open_debug(&mut self) -> Result<(), SessionError> {
        self.debug.open(&self.tx)
    }

    /// Close the debug session and bring back the preserved state.
    pub fn restore_debug(&mut self) -> Result<(), SessionError> {
        self.debug.restore(&mut self.tx)?;
        self.refresh()
    }

    /// Run an arbitrary probe against the live engine while debugging.
    pub fn debug_mutate<R>(&mut self, probe: impl FnOnce(&mut E) -> R) -> Result<R, SessionError> {
        self.debug.ensure_active()?;
        let result = probe(self.tx.live_mut());
        self.refresh()?;
        Ok(result)
    }

    /// Fire `card`'s event for `side` while debugging.
    ///
    /// Once the event's own choices are committed the engine returns to the
    /// choice that was pending here.
    pub fn debug_trigger_effect(&mut self, card: &str, side: Side) -> Result<(), SessionError> {
        self.debug.ensure_active()?;
        self.tx.live_mut().trigger_effect(card, side)?;
        info!(card, %side, "debug probe fired card event");
        self.refresh()
    }

    fn refresh(&mut self) -> Result<(), SessionError> {
        let live = self.tx.live();
        self.options = OptionIndex::build(live.choice(), live)?;
        Ok(())
    }
}
