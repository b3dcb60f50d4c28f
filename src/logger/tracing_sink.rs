use tracing::{debug, error, info, trace, warn};

use crate::{log_priority::LogPriority, Result};

use super::LogSink;

/// Forwards chunks into the active `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        TracingSink
    }
}

impl LogSink for TracingSink {
    fn log(&self, priority: LogPriority, tag: Option<&str>, chunk: &str) -> Result<()> {
        let tag = tag.unwrap_or("default");
        match priority {
            LogPriority::Verbose => trace!(tag, "{chunk}"),
            LogPriority::Debug => debug!(tag, "{chunk}"),
            LogPriority::Info => info!(tag, "{chunk}"),
            LogPriority::Warn => warn!(tag, "{chunk}"),
            LogPriority::Error | LogPriority::Assert => error!(tag, "{chunk}"),
        }

        Ok(())
    }
}
