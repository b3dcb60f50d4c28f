use chrono::Local;

use crate::{log_priority::LogPriority, Result};

use super::LogSink;

/// Prints chunks to stdout with a local wall-clock timestamp.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink
    }
}

impl LogSink for ConsoleSink {
    fn log(&self, priority: LogPriority, tag: Option<&str>, chunk: &str) -> Result<()> {
        println!(
            "{} {}/{}: {}",
            Local::now().format("%H:%M:%S%.3f"),
            priority,
            tag.unwrap_or("default"),
            chunk
        );
        Ok(())
    }
}
