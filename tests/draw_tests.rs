use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use santa::db::*;
use santa::draw::{self, DrawStore, RevealState};
use santa::error::{DrawStage, SantaError};
use santa::model::*;
use santa::ops::*;
use santa::queries::draw_queries;
use santa::session::Session;

fn setup() -> (rusqlite::Connection, Session) {
    let conn = schema::test_connection();
    let session = Session::register(&conn, "Marta", None).unwrap();
    (conn, session)
}

fn group_of(conn: &rusqlite::Connection, session: &Session, names: &[&str]) -> Group {
    let group = group_ops::create_group(conn, session, "Christmas", None, None, None, None, None).unwrap();
    for name in names {
        member_ops::add_member(conn, session, group.id, name, None).unwrap();
    }
    group
}

fn stored(conn: &rusqlite::Connection, group_id: Id<Group>) -> Vec<Assignment> {
    assignment_repo::find_by_group(conn, group_id).unwrap()
}

fn is_drawn(conn: &rusqlite::Connection, group_id: Id<Group>) -> bool {
    group_repo::find_by_id(conn, group_id).unwrap().unwrap().is_drawn
}

// ==========================================================================
// DRAW OPS TESTS
// ==========================================================================

#[test]
fn abc_draw_is_a_three_cycle() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    let members = member_repo::find_by_group(&conn, group.id).unwrap();

    let result = draw_ops::draw_group(&conn, &session, group.id, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(stored(&conn, group.id), result);
    assert!(draw::check_assignments(&members, &result).is_ok());
    assert!(draw::is_single_cycle(&result));
    assert!(is_drawn(&conn, group.id));
}

#[test]
fn every_stored_draw_is_valid() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C", "D", "E"]);
    let members = member_repo::find_by_group(&conn, group.id).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..200 {
        draw_ops::draw_group(&conn, &session, group.id, &mut rng).unwrap();
        let set = stored(&conn, group.id);
        assert_eq!(set.len(), 5);
        assert!(set.iter().all(|a| a.giver_id != a.receiver_id));
        assert!(draw::check_assignments(&members, &set).is_ok());
        assert!(draw::is_single_cycle(&set));
    }
}

#[test]
fn redraw_replaces_previous_results() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C", "D"]);

    let first = draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();
    let second = draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();

    let set = stored(&conn, group.id);
    assert_eq!(set.len(), 4);
    assert_eq!(set, second);
    let first_ids: HashSet<_> = first.iter().map(|a| a.id).collect();
    assert!(set.iter().all(|a| !first_ids.contains(&a.id)));
    assert!(is_drawn(&conn, group.id));
}

#[test]
fn two_members_fail_without_writes() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B"]);

    let err = draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap_err();

    assert!(matches!(
        err,
        SantaError::InsufficientParticipants {
            required: 3,
            found: 2
        }
    ));
    assert!(stored(&conn, group.id).is_empty());
    assert!(!is_drawn(&conn, group.id));
}

#[test]
fn failed_redraw_keeps_previous_results() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    let before = draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER fail_insert BEFORE INSERT ON draw_results
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let err = draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap_err();

    // Rolled back, so the plain storage error comes through.
    assert!(matches!(err, SantaError::Database(_)));
    assert_eq!(stored(&conn, group.id), before);
    assert!(is_drawn(&conn, group.id));
}

#[test]
fn failed_flag_update_rolls_back_new_results() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);

    conn.execute_batch(
        "CREATE TRIGGER fail_flag BEFORE UPDATE OF is_drawn ON groups
         BEGIN SELECT RAISE(ABORT, 'read only'); END;",
    )
    .unwrap();

    assert!(draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).is_err());
    assert!(stored(&conn, group.id).is_empty());
    assert!(!is_drawn(&conn, group.id));
}

#[test]
fn other_user_cannot_draw() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    let intruder = Session::register(&conn, "Intruder", None).unwrap();

    let err = draw_ops::draw_group(&conn, &intruder, group.id, &mut rand::thread_rng()).unwrap_err();
    assert!(matches!(err, SantaError::NotOwner { .. }));
    assert!(stored(&conn, group.id).is_empty());
}

// ==========================================================================
// ENGINE OVER A NON-TRANSACTIONAL CONNECTION
// ==========================================================================

#[test]
fn engine_without_transaction_reports_partial_failure() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();
    let group = group_repo::find_by_id(&conn, group.id).unwrap().unwrap();
    let members = conn.list_members(group.id).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER fail_insert BEFORE INSERT ON draw_results
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let err = draw::perform_draw(&conn, &group, &members, &mut rand::thread_rng()).unwrap_err();

    assert!(matches!(
        err,
        SantaError::PartialFailure {
            stage: DrawStage::InsertAssignments,
            ..
        }
    ));
    assert!(err.old_assignments_removed());
    assert!(stored(&conn, group.id).is_empty());

    // The flag is written last, so it still reflects the earlier complete draw,
    // and the results query refuses the now-empty set.
    assert!(is_drawn(&conn, group.id));
    let results = draw_queries::draw_results(&conn, &session, group.id).unwrap();
    assert!(!results.complete);
}

#[test]
fn unflagged_results_are_not_complete() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    let group = group_repo::find_by_id(&conn, group.id).unwrap().unwrap();
    let members = conn.list_members(group.id).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER fail_flag BEFORE UPDATE OF is_drawn ON groups
         BEGIN SELECT RAISE(ABORT, 'read only'); END;",
    )
    .unwrap();

    let err = draw::perform_draw(&conn, &group, &members, &mut rand::thread_rng()).unwrap_err();

    assert!(matches!(
        err,
        SantaError::PartialFailure {
            stage: DrawStage::MarkDrawn,
            ..
        }
    ));
    assert!(err.new_assignments_written());

    // A full, valid set is stored but the group was never flagged.
    let set = stored(&conn, group.id);
    assert!(draw::check_assignments(&members, &set).is_ok());
    assert!(!is_drawn(&conn, group.id));
    let results = draw_queries::draw_results(&conn, &session, group.id).unwrap();
    assert_eq!(results.entries.len(), 3);
    assert!(!results.complete);
}

// ==========================================================================
// REVEAL STATE OVER STORED RESULTS
// ==========================================================================

#[test]
fn reveal_state_over_loaded_results() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C", "D"]);
    draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();
    let results = draw_queries::draw_results(&conn, &session, group.id).unwrap();

    let mut reveal = RevealState::new();
    let first = results.entries[0].assignment.id;
    reveal.toggle_reveal(first);
    assert_eq!(reveal.len(), 1);

    reveal.reveal_all(results.assignment_ids());
    assert_eq!(reveal.len(), 4);

    reveal.toggle_reveal(first);
    assert!(!reveal.is_revealed(first));
    assert_eq!(reveal.len(), 3);

    reveal.hide_all();
    assert!(reveal.is_empty());

    // Session-local only: nothing was written back.
    assert!(stored(&conn, group.id).iter().all(|a| !a.is_revealed));
}
