//! Transaction Manager: one level of all-or-nothing undo.
//!
//! Two engine values are kept: the live one the user is editing and the
//! rollback point taken right after the last commit. A rollback throws the
//! live value away and copies the rollback point back in, so rolling back
//! twice lands in the same place as rolling back once.

use tracing::info;

use crate::error::{Precondition, SessionError};
use crate::rules::RulesEngine;

/// Live engine state plus its last committed snapshot.
#[derive(Clone, Debug)]
pub struct Transaction<E> {
    live: E,
    rollback_point: E,
}

impl<E: RulesEngine> Transaction<E> {
    /// Start a transaction with `engine` as both live state and rollback point.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            rollback_point: engine.clone(),
            live: engine,
        }
    }

    /// The live engine.
    #[must_use]
    pub fn live(&self) -> &E {
        &self.live
    }

    /// The live engine, mutably.
    pub fn live_mut(&mut self) -> &mut E {
        &mut self.live
    }

    /// The state a rollback would restore.
    #[must_use]
    pub fn rollback_point(&self) -> &E {
        &self.rollback_point
    }

    /// Finalize the complete choice and take a new rollback point.
    ///
    /// The engine advances on a copy which only replaces the live state once
    /// it succeeded, so a failed commit leaves both slots untouched.
    pub fn commit(&mut self) -> Result<(), SessionError> {
        if !self.live.choice().is_complete() {
            return Err(Precondition::CommitWhileIncomplete.into());
        }

        let mut next = self.live.clone();
        next.stage_complete()?;
        self.rollback_point = next.clone();
        self.live = next;

        info!(side = %self.live.choice().side, "committed, rollback point updated");
        Ok(())
    }

    /// Discard everything since the last commit.
    pub fn rollback(&mut self) {
        self.live = self.rollback_point.clone();
        info!("rolled back to last commit");
    }

    /// Replace both slots with `engine` (used when a new game starts).
    pub fn reset(&mut self, engine: E) {
        self.rollback_point = engine.clone();
        self.live = engine;
    }

    /// Copy out both slots.
    pub(crate) fn snapshot_pair(&self) -> (E, E) {
        (self.live.clone(), self.rollback_point.clone())
    }

    /// Put back a pair taken with `snapshot_pair`.
    pub(crate) fn restore_pair(&mut self, live: E, rollback_point: E) {
        self.live = live;
        self.rollback_point = rollback_point;
    }
}
