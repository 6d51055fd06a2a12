// Integration tests for batched comment hydration

mod common;

use borrowbot_core::errors::ExErrorKind;
use borrowbot_core::logging_facility::init_test_capture;
use borrowbot_core::schema::EVENT_END;
use borrowbot_core::{Record, Relation, Submission, Validate};
use borrowbot_store::{fetch_children, hydrate_children, lookup, StoreDescriptor};
use common::TestDb;

fn comment_ids(submission: &Submission) -> Vec<&str> {
    submission
        .comments()
        .iter()
        .map(|c| c.comment_id())
        .collect()
}

fn load(db: &TestDb, keys: &[&str]) -> Vec<Submission> {
    keys.iter()
        .map(|k| lookup::<Submission>(&db.store, k).unwrap())
        .collect()
}

#[test]
fn test_hydrate_partitions_rows_by_parent() {
    // Given: Three submissions; comments on the first and third only
    let db = TestDb::new();
    for id in ["t3_p1", "t3_p2", "t3_p3"] {
        db.insert_submission(id, 0);
    }
    db.insert_comment("t1_c1", "t3_p1", "2019-03-01 13:00:00");
    db.insert_comment("t1_c2", "t3_p1", "2019-03-01 13:05:00");
    db.insert_comment("t1_c3", "t3_p3", "2019-03-01 13:10:00");
    let mut parents = load(&db, &["t3_p1", "t3_p2", "t3_p3"]);

    // When: The batch is hydrated
    hydrate_children(&mut parents, &db.store).unwrap();

    // Then: Each parent holds exactly its own comments, empty meaning fetched
    assert_eq!(comment_ids(&parents[0]), vec!["t1_c1", "t1_c2"]);
    assert_eq!(parents[1].comments(), &Relation::Fetched(vec![]));
    assert_eq!(comment_ids(&parents[2]), vec!["t1_c3"]);
}

#[test]
fn test_children_ordered_by_creation_time() {
    let db = TestDb::new();
    db.insert_submission("t3_p1", 3);
    db.insert_comment("t1_late", "t3_p1", "2019-03-01 15:00:00");
    db.insert_comment("t1_early", "t3_p1", "2019-03-01 13:00:00");
    db.insert_comment("t1_mid", "t3_p1", "2019-03-01 14:00:00");
    let mut parents = load(&db, &["t3_p1"]);

    hydrate_children(&mut parents, &db.store).unwrap();

    assert_eq!(comment_ids(&parents[0]), vec!["t1_early", "t1_mid", "t1_late"]);
}

#[test]
fn test_single_parent_path_matches_batched_path() {
    // Given: Two submissions with one comment each
    let db = TestDb::new();
    db.insert_submission("t3_p1", 1);
    db.insert_submission("t3_p2", 1);
    db.insert_comment("t1_a", "t3_p1", "2019-03-01 13:00:00");
    db.insert_comment("t1_b", "t3_p2", "2019-03-01 13:00:00");

    // When: Hydrated one at a time and together
    let mut alone_1 = load(&db, &["t3_p1"]);
    let mut alone_2 = load(&db, &["t3_p2"]);
    hydrate_children(&mut alone_1, &db.store).unwrap();
    hydrate_children(&mut alone_2, &db.store).unwrap();
    let mut batch = load(&db, &["t3_p1", "t3_p2"]);
    hydrate_children(&mut batch, &db.store).unwrap();

    // Then: Per-parent collections agree
    assert_eq!(batch[0], alone_1[0]);
    assert_eq!(batch[1], alone_2[0]);
}

#[test]
fn test_empty_batch_opens_no_connection() {
    // A path that cannot be opened proves no connection is attempted
    let dir = tempfile::tempdir().unwrap();
    let store = StoreDescriptor::new(dir.path().join("missing").join("nowhere.db"));
    let mut parents: Vec<Submission> = Vec::new();

    let result = hydrate_children(&mut parents, &store).unwrap();

    assert!(result.is_empty());
}

#[test]
fn test_rehydrate_replaces_previous_children() {
    let db = TestDb::new();
    db.insert_submission("t3_p1", 1);
    db.insert_comment("t1_a", "t3_p1", "2019-03-01 13:00:00");
    let mut parents = load(&db, &["t3_p1"]);
    parents[0].set_comments(vec![]);

    hydrate_children(&mut parents, &db.store).unwrap();

    assert_eq!(comment_ids(&parents[0]), vec!["t1_a"]);
}

#[test]
fn test_failed_batch_leaves_parents_untouched() {
    // Given: Hydrated parents and a store that has lost its comments table
    let db = TestDb::new();
    db.insert_submission("t3_p1", 1);
    db.insert_submission("t3_p2", 0);
    db.insert_comment("t1_a", "t3_p1", "2019-03-01 13:00:00");
    let mut parents = load(&db, &["t3_p1", "t3_p2"]);
    let before = parents.clone();
    db.conn.execute("DROP TABLE comments", []).unwrap();

    // When: Hydration fails
    let err = hydrate_children(&mut parents, &db.store).unwrap_err();

    // Then: The error propagates and no parent was modified
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(parents, before);
    assert!(parents.iter().all(|p| !p.comments().is_fetched()));
}

#[test]
fn test_bad_child_row_leaves_parents_untouched() {
    // Given: A comment row with a malformed timestamp
    let db = TestDb::new();
    db.insert_submission("t3_p1", 1);
    db.insert_submission("t3_p2", 1);
    db.insert_comment("t1_ok", "t3_p1", "2019-03-01 13:00:00");
    db.insert_comment("t1_bad", "t3_p2", "yesterday");
    let mut parents = load(&db, &["t3_p1", "t3_p2"]);

    let err = hydrate_children(&mut parents, &db.store).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidField);
    assert!(!parents[0].comments().is_fetched());
}

#[test]
fn test_fetch_children_without_parent_entity() {
    let db = TestDb::new();
    db.insert_comment("t1_a", "t3_p9", "2019-03-01 13:00:00");
    db.insert_comment("t1_b", "t3_p9", "2019-03-01 13:01:00");

    let children = fetch_children::<Submission>(&db.store, "t3_p9").unwrap();

    let ids: Vec<_> = children.iter().map(|c| c.key()).collect();
    assert_eq!(ids, vec!["t1_a", "t1_b"]);
}

#[test]
fn test_hydrated_count_mismatch_validates_with_warning() {
    // Given: A stored counter of 3 and two comments on record
    let db = TestDb::new();
    db.insert_submission("t3_p1", 3);
    db.insert_comment("t1_a", "t3_p1", "2019-03-01 13:00:00");
    db.insert_comment("t1_b", "t3_p1", "2019-03-01 13:01:00");
    let mut parents = load(&db, &["t3_p1"]);
    hydrate_children(&mut parents, &db.store).unwrap();

    // When/Then: Validation succeeds but reports the mismatch
    let report = parents[0].validate().unwrap();
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_hydrate_logs_counts() {
    let capture = init_test_capture();
    let db = TestDb::new();
    db.insert_submission("t3_logged_a", 1);
    db.insert_submission("t3_logged_b", 0);
    db.insert_comment("t1_logged", "t3_logged_a", "2019-03-01 13:00:00");
    let mut parents = load(&db, &["t3_logged_a", "t3_logged_b"]);

    hydrate_children(&mut parents, &db.store).unwrap();

    let matching = capture.count_events(|e| {
        e.op.as_deref() == Some("hydrate_children")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("parent_count") == Some("2")
            && e.field("row_count") == Some("1")
            && e.field("query_count") == Some("1")
    });
    assert!(matching >= 1);
}
