use std::fmt::Display;

/// Log priorities, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogPriority {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Assert,
}

impl Display for LogPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogPriority::Verbose => write!(f, "VERBOSE"),
            LogPriority::Debug => write!(f, "DEBUG"),
            LogPriority::Info => write!(f, "INFO"),
            LogPriority::Warn => write!(f, "WARN"),
            LogPriority::Error => write!(f, "ERROR"),
            LogPriority::Assert => write!(f, "ASSERT"),
        }
    }
}

#[cfg(feature = "tracing")]
impl From<LogPriority> for tracing::Level {
    fn from(priority: LogPriority) -> Self {
        match priority {
            LogPriority::Verbose => tracing::Level::TRACE,
            LogPriority::Debug => tracing::Level::DEBUG,
            LogPriority::Info => tracing::Level::INFO,
            LogPriority::Warn => tracing::Level::WARN,
            LogPriority::Error | LogPriority::Assert => tracing::Level::ERROR,
        }
    }
}

#[cfg(feature = "log-facade")]
impl From<log::Level> for LogPriority {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogPriority::Error,
            log::Level::Warn => LogPriority::Warn,
            log::Level::Info => LogPriority::Info,
            log::Level::Debug => LogPriority::Debug,
            log::Level::Trace => LogPriority::Verbose,
        }
    }
}
