use std::sync::{Arc, Mutex};

use crate::{CallStack, LogPriority, LogSink, PrettyFormatter, Result, StackFrame};

#[cfg(feature = "log-facade")]
mod facade;
#[cfg(feature = "tracing")]
mod tracing_sink;

/// Captures every chunk a formatter emits, in emission order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    chunks: Mutex<Vec<(LogPriority, Option<String>, String)>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn chunks(&self) -> Vec<(LogPriority, Option<String>, String)> {
        self.chunks.lock().unwrap().clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.chunks()
            .into_iter()
            .map(|(_, _, chunk)| chunk)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, priority: LogPriority, tag: Option<&str>, chunk: &str) -> Result<()> {
        self.chunks
            .lock()
            .unwrap()
            .push((priority, tag.map(str::to_string), chunk.to_string()));
        Ok(())
    }
}

/// Deterministic stack: capture machinery, logger internals, then app frames.
pub(crate) fn test_stack() -> CallStack {
    CallStack::from_frames(vec![
        StackFrame::new(
            "std::backtrace::Backtrace",
            "force_capture",
            "backtrace.rs",
            331,
        ),
        StackFrame::new(
            "prettylog::logger::call_stack::CallStack",
            "capture",
            "call_stack.rs",
            90,
        ),
        StackFrame::new(
            "prettylog::logger::PrettyFormatter",
            "generate_footer",
            "mod.rs",
            188,
        ),
        StackFrame::new("myapp::network::client", "fetch_page", "client.rs", 42),
        StackFrame::new("myapp::app", "run", "app.rs", 88),
        StackFrame::new("myapp", "main", "main.rs", 10),
    ])
}

/// Footerless formatter over a recording sink.
pub(crate) fn plain_formatter(sink: Arc<RecordingSink>) -> PrettyFormatter {
    PrettyFormatter::builder().method_count(0).sink(sink).build()
}
