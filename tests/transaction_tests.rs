//! Commit, rollback and confirmation through the session.

use strategy_console::choice::ChoiceKind;
use strategy_console::error::{Precondition, ResolveError, SessionError};
use strategy_console::games::cold_war::{ColdWarBuilder, ColdWarGame};
use strategy_console::rules::RulesEngine;
use strategy_console::session::{Confirmation, Session};

fn new_session() -> Session<ColdWarGame> {
    Session::new(ColdWarBuilder::new().seed(17).build()).unwrap()
}

/// Pick the lowest-numbered option.
fn pick_first(session: &mut Session<ColdWarGame>) {
    let (id, _) = session.options().iter().next().unwrap();
    session.submit(&id.to_string()).unwrap();
}

// =============================================================================
// Commit
// =============================================================================

/// A commit advances the game and moves the rollback point with it.
#[test]
fn test_commit_advances_and_snapshots() {
    let mut session = new_session();
    pick_first(&mut session);
    assert!(session.awaiting_commit());

    session.commit().unwrap();

    assert_eq!(session.engine().choice().kind, ChoiceKind::ActionSelect);
    assert_eq!(session.engine(), session.rollback_point());
    assert!(!session.awaiting_commit());
}

/// Committing an incomplete choice fails and changes nothing.
#[test]
fn test_commit_while_incomplete() {
    let mut session = new_session();
    let live = session.engine().clone();
    let point = session.rollback_point().clone();

    let err = session.commit().unwrap_err();

    assert_eq!(
        err,
        SessionError::PreconditionViolation(Precondition::CommitWhileIncomplete)
    );
    assert!(err.is_contract_breach());
    assert_eq!(session.engine(), &live);
    assert_eq!(session.rollback_point(), &point);
}

// =============================================================================
// Rollback
// =============================================================================

/// Rolling back restores the last commit; doing it twice changes nothing more.
#[test]
fn test_rollback_idempotent() {
    let mut session = new_session();
    pick_first(&mut session);
    session.commit().unwrap();
    let committed = session.engine().clone();

    session.submit("inf").unwrap();
    session.commit().unwrap();
    let after_action = session.engine().clone();
    session.submit("france").unwrap();
    assert_ne!(session.engine(), &after_action);

    session.rollback().unwrap();
    assert_eq!(session.engine(), &after_action);

    session.rollback().unwrap();
    assert_eq!(session.engine(), &after_action);
    assert_ne!(session.engine(), &committed);
}

/// The option table follows a rollback.
#[test]
fn test_rollback_rebuilds_options() {
    let mut session = new_session();
    let options = session.options().clone();
    pick_first(&mut session);
    assert_ne!(session.options(), &options);

    session.rollback().unwrap();

    assert_eq!(session.options(), &options);
}

// =============================================================================
// Confirmation
// =============================================================================

#[test]
fn test_confirm_yes_commits() {
    let mut session = new_session();
    pick_first(&mut session);

    assert_eq!(session.confirm("Y").unwrap(), Confirmation::Committed);
    assert_eq!(session.engine(), session.rollback_point());
}

#[test]
fn test_confirm_no_rolls_back() {
    let mut session = new_session();
    let start = session.engine().clone();
    pick_first(&mut session);

    assert_eq!(session.confirm("no").unwrap(), Confirmation::RolledBack);
    assert_eq!(session.engine(), &start);
}

/// An unrecognised answer leaves the choice waiting for confirmation.
#[test]
fn test_confirm_invalid_answer() {
    let mut session = new_session();
    pick_first(&mut session);
    let pending = session.engine().clone();

    let err = session.confirm("maybe").unwrap_err();

    assert_eq!(
        err,
        SessionError::Resolve(ResolveError::NoMatch {
            token: "maybe".into()
        })
    );
    assert!(!err.is_contract_breach());
    assert!(session.awaiting_commit());
    assert_eq!(session.engine(), &pending);
}

#[test]
fn test_confirm_while_incomplete() {
    let mut session = new_session();

    assert_eq!(
        session.confirm("yes"),
        Err(SessionError::PreconditionViolation(
            Precondition::ConfirmWhileIncomplete
        ))
    );
}

// =============================================================================
// Restart
// =============================================================================

/// A new game replaces both slots.
#[test]
fn test_restart_resets_rollback_point() {
    let mut session = new_session();
    pick_first(&mut session);
    session.commit().unwrap();

    session.restart().unwrap();

    assert_eq!(session.engine(), session.rollback_point());
    assert_eq!(session.engine().choice().kind, ChoiceKind::HandCardSelect);
    assert_eq!(session.engine().turn(), 1);
}
