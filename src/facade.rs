//! A small `log` crate facade that forwards `log` records into a
//! [`PrettyFormatter`].
//!
//! Usage:
//! - Build a formatter (eg. `prettylog::init_disk_logger(...)`).
//! - Call `PrettyLog::init_with_max_level(formatter, log::LevelFilter::Info)`
//!   to install it as the global `log` implementation.

use log::{LevelFilter, Log, Metadata, Record};

use crate::{LogPriority, PrettyFormatter};

/// Global `log::Log` implementation backed by a [`PrettyFormatter`].
pub struct PrettyLog {
    formatter: PrettyFormatter,
}

impl PrettyLog {
    pub fn new(formatter: PrettyFormatter) -> Self {
        Self { formatter }
    }

    /// Installs this facade as the global logger with the specified maximum
    /// log level.
    pub fn init_with_max_level(
        formatter: PrettyFormatter,
        level: LevelFilter,
    ) -> std::result::Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(PrettyLog::new(formatter)))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for PrettyLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        if message.is_empty() {
            return;
        }

        // a failed forward must never crash the host
        let _ = self.formatter.log(
            LogPriority::from(record.level()),
            Some(record.target()),
            &message,
        );
    }

    fn flush(&self) {}
}
