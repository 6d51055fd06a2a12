// Integration tests for single-key lookup

mod common;

use borrowbot_core::errors::ExErrorKind;
use borrowbot_core::{LoanRequest, Record, Source, Submission, User};
use borrowbot_store::lookup;
use chrono::{TimeZone, Utc};
use common::TestDb;
use rust_decimal::Decimal;

#[test]
fn test_lookup_builds_record_from_row() {
    // Given: A stored submission
    let db = TestDb::new();
    db.insert_submission("t3_abc", 4);

    // When: It is looked up by key
    let submission: Submission = lookup(&db.store, "t3_abc").unwrap();

    // Then: Fields come from the row, including the recorded retrieval time
    assert_eq!(submission.submission_id(), "t3_abc");
    assert_eq!(submission.comment_count(), 4);
    assert_eq!(submission.author_name(), Some("alice"));
    assert_eq!(
        submission.retrieved_at(),
        Utc.with_ymd_and_hms(2019, 3, 2, 8, 0, 0).unwrap()
    );
    assert!(!submission.comments().is_fetched());
}

#[test]
fn test_lookup_with_no_matching_row_is_not_found() {
    let db = TestDb::new();

    let err = lookup::<Submission>(&db.store, "t3_missing").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_key(), Some("t3_missing"));
    assert!(err.message().contains("found 0"));
}

#[test]
fn test_lookup_with_duplicate_rows_is_not_found() {
    // Given: Two user_lookup rows for one id
    let db = TestDb::new();
    db.insert_user("t2_dup", "first");
    db.insert_user("t2_dup", "second");

    // When/Then: The lookup refuses to pick one
    let err = lookup::<User>(&db.store, "t2_dup").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(err.message().contains("found 2"));
}

#[test]
fn test_key_source_through_descriptor() {
    let db = TestDb::new();
    db.insert_loan_request("req-1");

    let request =
        LoanRequest::materialize(Source::Key("req-1".to_string()), Some(&db.store)).unwrap();

    assert_eq!(request.repay_amount(), Decimal::new(12000, 2));
    assert_eq!(request.borrower_location(), "Springfield, IL, USA");
    assert!(request.payment_channels().zelle);
}

#[test]
fn test_lookup_on_unopenable_store_is_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = borrowbot_store::StoreDescriptor::new(dir.path().join("absent.db"));

    let err = lookup::<User>(&store, "t2_a").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
}

#[test]
fn test_read_only_store_rejects_writes() {
    let db = TestDb::new();
    let conn = borrowbot_store::db::open(&db.store).unwrap();

    let result = conn.execute("DELETE FROM submissions", []);

    assert!(result.is_err());
}
