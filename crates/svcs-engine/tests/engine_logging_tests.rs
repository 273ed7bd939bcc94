#![allow(clippy::unwrap_used, clippy::expect_used)]

// Lifecycle events emitted by the engine commands

use svcs_core::core_types::schema::{
    is_terminal_event, EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMMIT_ID,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_FINGERPRINT, FIELD_LOG_LEN, FIELD_PATH,
    FIELD_REQUEST_ID, FIELD_TRACKED_LEN,
};
use svcs_core::core_types::RequestId;
use svcs_core::logging_facility::test_capture::init_test_capture;
use svcs_core::{MemoryRepository, Repository};
use svcs_engine::{apply_engine_command, EngineCommand, EngineOptions};

#[test]
fn test_commit_emits_start_and_end() {
    let capture = init_test_capture();
    let mut repo = MemoryRepository::new();
    repo.write_config("alice").unwrap();
    repo.put_file("a.txt", b"hello".to_vec());
    repo.write_index("a.txt\n").unwrap();

    apply_engine_command(
        EngineCommand::Commit {
            message: Some("first".to_string()),
        },
        &mut repo,
        &EngineOptions::default(),
    )
    .unwrap();

    capture.assert_event_exists("commit", EVENT_START);
    capture.assert_event_exists("commit", EVENT_END);
    let end = capture
        .events_for_op("commit")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert!(end.fields.contains_key(FIELD_DURATION_MS));
    assert!(end.fields.contains_key(FIELD_FINGERPRINT));
    assert_eq!(end.field(FIELD_TRACKED_LEN), Some("1"));

    let lifecycle = capture.lifecycle("commit");
    assert_eq!(lifecycle.first().map(String::as_str), Some(EVENT_START));
    assert!(lifecycle.last().is_some_and(|e| is_terminal_event(e)));
}

#[test]
fn test_events_carry_invocation_request_id() {
    let capture = init_test_capture();
    let request_id = RequestId::new();
    let mut repo = MemoryRepository::new();

    {
        let span = tracing::info_span!("svcs", request_id = %request_id);
        let _guard = span.enter();
        apply_engine_command(EngineCommand::Log, &mut repo, &EngineOptions::default()).unwrap();
    }

    let tagged = capture.count_events(|e| {
        e.op.as_deref() == Some("log") && e.field(FIELD_REQUEST_ID) == Some(request_id.as_str())
    });
    assert_eq!(tagged, 2, "start and end of `log` carry the request id");
}

#[test]
fn test_storage_failure_emits_error_event() {
    let capture = init_test_capture();
    let mut repo = MemoryRepository::new();
    repo.set_read_only(true);

    let result = apply_engine_command(
        EngineCommand::Config {
            name: Some("alice".to_string()),
        },
        &mut repo,
        &EngineOptions::default(),
    );
    assert!(result.is_err());

    let error = capture
        .events_for_op("config_set")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event captured");
    assert_eq!(
        error.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_STORAGE_FAILURE".to_string())
    );
}

#[test]
fn test_add_log_and_checkout_use_schema_field_names() {
    let capture = init_test_capture();
    let mut repo = MemoryRepository::new();
    repo.put_file("b.txt", b"b".to_vec());
    let opts = EngineOptions::default();

    apply_engine_command(
        EngineCommand::Add {
            path: Some("b.txt".to_string()),
        },
        &mut repo,
        &opts,
    )
    .unwrap();
    apply_engine_command(
        EngineCommand::Checkout {
            id: Some("feed".to_string()),
        },
        &mut repo,
        &opts,
    )
    .unwrap();

    let add_start = capture
        .events_for_op("add")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START))
        .expect("add start captured");
    assert_eq!(add_start.field(FIELD_PATH), Some("b.txt"));

    let checkout_start = capture
        .events_for_op("checkout")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START))
        .expect("checkout start captured");
    assert_eq!(checkout_start.field(FIELD_COMMIT_ID), Some("feed"));
}

#[test]
fn test_log_end_reports_record_count() {
    let capture = init_test_capture();
    let mut repo = MemoryRepository::new();
    repo.write_log("commit aaa\nAuthor: alice\nfirst\n\n").unwrap();

    apply_engine_command(EngineCommand::Log, &mut repo, &EngineOptions::default()).unwrap();

    let end = capture
        .events_for_op("log")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END) && e.field(FIELD_LOG_LEN) == Some("1"));
    assert!(end.is_some(), "log end event carries the record count");
}
