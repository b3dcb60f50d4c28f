use tracing_test::traced_test;

use crate::{LogPriority, LogSink, TracingSink};

#[traced_test]
#[test]
fn tracing_sink_emits_events() {
    let sink = TracingSink::new();

    sink.log(LogPriority::Info, Some("Net"), "tracing chunk")
        .unwrap();

    assert!(logs_contain("tracing chunk"));
}

#[traced_test]
#[test]
fn assert_priority_maps_to_error_event() {
    let sink = TracingSink::new();

    sink.log(LogPriority::Assert, None, "fatal chunk").unwrap();

    assert!(logs_contain("fatal chunk"));
}
