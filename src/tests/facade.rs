use log::LevelFilter;

use crate::{LogPriority, PrettyFormatter, PrettyLog};

use super::RecordingSink;

#[test]
fn facade_forwards_records_to_the_formatter() {
    let sink = RecordingSink::new();
    let formatter = PrettyFormatter::builder()
        .method_count(0)
        .sink(sink.clone())
        .build();

    // the global logger can only be installed once per test binary
    PrettyLog::init_with_max_level(formatter, LevelFilter::Info).unwrap();

    log::info!(target: "Net", "facade message");
    log::trace!(target: "Net", "filtered out");

    let chunks = sink.chunks();
    assert_eq!(chunks.len(), 1);

    let (priority, tag, chunk) = &chunks[0];
    assert_eq!(*priority, LogPriority::Info);
    assert_eq!(tag.as_deref(), Some("PRETTY_LOGGER-Net"));
    assert_eq!(chunk, "facade message");
}
