#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use borrowbot_core::errors::{ExErrorKind, RecordError};
use borrowbot_core::logging_facility::test_capture::init_test_capture;
use borrowbot_core::{log_op_end, log_op_error, log_op_start, Record, Source, Submission, User};
use borrowbot_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use common::submission_fields;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert!(
        !capture.events_for(op_name, EVENT_START).is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RecordError::RecordNotFound {
        table: "loans".to_string(),
        key: "l1".to_string(),
        count: 0,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err.code"), Some("ERR_NOT_FOUND"));
    assert_eq!(
        error_events[0].field("err.kind"),
        Some(format!("{:?}", ExErrorKind::NotFound).as_str())
    );
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, parent_count = 3);
    log_op_end!(op_name, duration_ms = 42, row_count = 7);

    assert_eq!(capture.events_for(op_name, EVENT_START).len(), 1);
    let ends = capture.events_for(op_name, EVENT_END);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("row_count"), Some("7"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    // This should panic because no such event exists
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_materialize_logs_source_variant() {
    let capture = init_test_capture();
    let fields = submission_fields("logged1", 0);

    Submission::materialize(Source::Row(fields), None).unwrap();

    let logged = capture.count_events(|e| {
        e.field("entity_key") == Some("t3_logged1")
            && e.field("source") == Some("row")
            && e.field("entity_kind") == Some("submission")
    });
    assert_eq!(logged, 1);
}

#[test]
fn test_failed_materialize_logs_code() {
    let capture = init_test_capture();

    User::materialize(Source::Key("t2_unlogged_unique".to_string()), None).unwrap_err();

    let logged = capture.count_events(|e| {
        e.field("entity_kind") == Some("user")
            && e.field("source") == Some("key")
            && e.field("err.code") == Some("ERR_CONFIGURATION")
    });
    assert!(logged >= 1);
}
