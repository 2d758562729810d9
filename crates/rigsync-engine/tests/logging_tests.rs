// Lifecycle events emitted by SyncSession entry points.

mod common;

use common::*;
use rigsync_core::logging_facility::init_test_capture;
use rigsync_core::scene::NodeId;
use rigsync_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, OP_COPY, OP_DRY_RUN,
};
use rigsync_engine::SyncSession;

#[test]
fn test_copy_and_dry_run_emit_start_and_end() {
    let capture = init_test_capture();
    let fx = skirt_fixture();
    let settings = settings_for(&[COLLIDER]);
    let mut session = SyncSession::new();

    let copied = session.copy(&fx.scene, fx.src, &settings);
    let planned = session.dry_run(&fx.scene, fx.dst, &settings);

    let copy_events = capture.events_for_request(copied.request_id.as_str());
    let kinds: Vec<_> = copy_events.iter().map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![Some(EVENT_START), Some(EVENT_END)]);
    assert!(copy_events.iter().all(|e| e.op.as_deref() == Some(OP_COPY)));
    assert_eq!(copy_events[1].field("captured_nodes"), Some("3"));

    let dry_events = capture.events_for_request(planned.request_id.as_str());
    assert_eq!(dry_events.len(), 2);
    assert_eq!(dry_events[0].op.as_deref(), Some(OP_DRY_RUN));
    assert_eq!(dry_events[1].field("component_entries"), Some("1"));
    assert!(dry_events[1].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_missing_root_emits_end_error() {
    let capture = init_test_capture();
    let fx = skirt_fixture();
    let mut session = SyncSession::new();

    let outcome = session.copy(&fx.scene, NodeId::from_raw(4242), &settings_for(&[COLLIDER]));

    let events = capture.events_for_request(outcome.request_id.as_str());
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[1].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
}
