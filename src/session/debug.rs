//! Debug Session: a second snapshot layer above the transaction.
//!
//! Opening a session copies both transaction slots aside. While it is open
//! anything may be done to the live state (including committing and rolling
//! back); restoring puts both slots back exactly as they were and closes the
//! session. Sessions do not nest.

use tracing::info;

use super::transaction::Transaction;
use crate::error::{Precondition, SessionError};
use crate::rules::RulesEngine;

/// Transaction slots saved when debugging began.
#[derive(Clone, Debug)]
struct Preserved<E> {
    live: E,
    rollback_point: E,
}

/// Inactive/active debug state.
#[derive(Clone, Debug)]
pub struct DebugLayer<E> {
    preserved: Option<Preserved<E>>,
}

impl<E> Default for DebugLayer<E> {
    fn default() -> Self {
        Self { preserved: None }
    }
}

impl<E: RulesEngine> DebugLayer<E> {
    /// Whether a debug session is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.preserved.is_some()
    }

    /// Fail with `NotInDebugMode` unless a session is open.
    pub fn ensure_active(&self) -> Result<(), SessionError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(SessionError::NotInDebugMode)
        }
    }

    /// Preserve `tx` and open a session.
    ///
    /// Opening while already open would lose the first preserved pair, so it
    /// is rejected.
    pub fn open(&mut self, tx: &Transaction<E>) -> Result<(), SessionError> {
        if self.is_active() {
            return Err(Precondition::AlreadyDebugging.into());
        }

        let (live, rollback_point) = tx.snapshot_pair();
        self.preserved = Some(Preserved {
            live,
            rollback_point,
        });
        info!("debug session opened");
        Ok(())
    }

    /// Put the preserved pair back into `tx` and close the session.
    pub fn restore(&mut self, tx: &mut Transaction<E>) -> Result<(), SessionError> {
        let preserved = self.preserved.take().ok_or(SessionError::NotInDebugMode)?;
        tx.restore_pair(preserved.live, preserved.rollback_point);
        info!("debug session restored pre-debugging state");
        Ok(())
    }
}
