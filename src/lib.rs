use std::path::PathBuf;

mod log_priority;
mod logger;

#[cfg(feature = "log-facade")]
mod facade;

#[cfg(test)]
mod tests;

pub use log_priority::LogPriority;
pub use logger::call_stack::{CallStack, StackFrame};
pub use logger::console_sink::ConsoleSink;
#[cfg(feature = "disk")]
pub use logger::disk_writer::{DiskSink, DiskWriteHandler};
#[cfg(feature = "tracing")]
pub use logger::tracing_sink::TracingSink;
pub use logger::{FormatterBuilder, LogSink, PrettyFormatter, CHUNK_SIZE, LINE_SEPARATOR};

#[cfg(feature = "log-facade")]
pub use facade::PrettyLog;

pub type Result<T> = color_eyre::Result<T>;

/// Builds a formatter that persists every chunk to a size-rotated file set
/// under `folder`, using the builder defaults for everything else.
#[cfg(feature = "disk")]
pub fn init_disk_logger(
    folder: impl Into<PathBuf>,
    max_file_size: u64,
) -> Result<PrettyFormatter> {
    use color_eyre::eyre::bail;

    let folder = folder.into();
    if folder.as_os_str().is_empty() {
        bail!("log folder must not be empty");
    }

    let sink = DiskSink::new(folder, max_file_size);
    Ok(PrettyFormatter::builder().sink(sink).build())
}

/// Installs a `tracing` subscriber with an env filter, an error layer and a
/// fmt layer, for hosts that route chunks through [`TracingSink`].
#[cfg(feature = "tracing")]
pub fn install_tracing() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .init();
}
