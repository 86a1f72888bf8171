//! End-to-end replay scrubbing: walking the update history forward and
//! backward while the store mutates underneath the cursor.

use deltaviz_core::DiffEngine;

#[test]
fn scrub_through_a_session_with_baseline() {
    let mut engine = DiffEngine::new(6).unwrap();
    engine.set_initial_array(&[1, 0, 0, 0, 0, 2]);
    engine.add_update(1, 3, 2).unwrap();
    engine.add_update(2, 5, 3).unwrap();
    engine.add_update(0, 0, -1).unwrap();

    let s1 = engine.replay_step_forward();
    assert_eq!(s1.cursor, 1);
    assert_eq!(s1.final_values, vec![1, 2, 2, 2, 0, 2]);

    let s2 = engine.replay_step_forward();
    assert_eq!(s2.final_values, vec![1, 2, 5, 5, 3, 5]);

    let s3 = engine.replay_step_forward();
    assert_eq!(s3.cursor, 3);
    assert_eq!(s3.final_values, vec![0, 2, 5, 5, 3, 5]);

    // Fully applied view agrees with the instant compute path.
    assert_eq!(s3.final_values, engine.final_array());

    let back = engine.replay_step_backward();
    assert_eq!(back.final_values, s2.final_values);
}

#[test]
fn replay_is_independent_of_the_stepped_scheduler() {
    let mut engine = DiffEngine::new(4).unwrap();
    engine.add_update(0, 3, 5).unwrap();

    engine.start_animated_compute();
    engine.tick();

    // Scrubbing the history does not touch the in-flight run.
    let snapshot = engine.replay_step_forward();
    assert_eq!(snapshot.diff, vec![5, 0, 0, 0, -5]);
    assert!(engine.is_computing());
    assert_eq!(engine.compute_cursor(), 1);
}

#[test]
fn jump_to_update_then_history_rewrites() {
    let mut engine = DiffEngine::new(8).unwrap();
    let a = engine.add_update(0, 1, 1).unwrap();
    let b = engine.add_update(2, 3, 2).unwrap();
    let c = engine.add_update(4, 5, 3).unwrap();

    let at_b = engine.replay_jump_to_update(b.id).unwrap();
    assert_eq!(at_b.cursor, 2);

    // Removing an earlier update clamps the cursor and shifts what each
    // prefix means; the snapshot is recomputed from scratch either way.
    engine.remove_update(a.id);
    assert_eq!(engine.replay_cursor(), 2);
    let snapshot = engine.replay_snapshot();
    assert_eq!(snapshot.final_values, vec![0, 0, 2, 2, 3, 3, 0, 0]);

    // The removed id can no longer be jumped to; the survivors can.
    assert!(engine.replay_jump_to_update(a.id).is_none());
    let at_c = engine.replay_jump_to_update(c.id).unwrap();
    assert_eq!(at_c.cursor, 2);
}

#[test]
fn baseline_edits_show_up_in_historic_views() {
    let mut engine = DiffEngine::new(3).unwrap();
    engine.add_update(0, 2, 1).unwrap();
    engine.replay_step_forward();

    engine.set_initial_array(&[10, 20, 30]);
    let snapshot = engine.replay_snapshot();
    assert_eq!(snapshot.cursor, 1);
    assert_eq!(snapshot.final_values, vec![11, 21, 31]);
}

#[test]
fn size_shrink_clamps_the_cursor_with_the_dropped_updates() {
    let mut engine = DiffEngine::new(10).unwrap();
    engine.add_update(0, 2, 1).unwrap();
    engine.add_update(5, 9, 2).unwrap();
    engine.add_update(1, 1, 3).unwrap();
    engine.replay_jump_to(3);

    engine.set_size(4).unwrap();
    assert_eq!(engine.update_count(), 2);
    assert_eq!(engine.replay_cursor(), 2);
    let snapshot = engine.replay_snapshot();
    assert_eq!(snapshot.diff.len(), 5);
    assert_eq!(snapshot.final_values, vec![1, 4, 1, 0]);
}
