use std::{sync::Arc, thread};

use cfg_if::cfg_if;
use color_eyre::eyre::bail;
use itertools::Itertools;

use crate::{log_priority::LogPriority, Result};

pub mod call_stack;
pub mod console_sink;

#[cfg(feature = "disk")]
pub mod disk_writer;

#[cfg(feature = "tracing")]
pub mod tracing_sink;

use call_stack::CallStack;

/// Receives finished chunks for display or persistence.
/// Invoked once per chunk, possibly from multiple threads.
pub trait LogSink: Send + Sync {
    fn log(&self, priority: LogPriority, tag: Option<&str>, chunk: &str) -> Result<()>;
}

impl<S: LogSink> LogSink for Arc<S> {
    fn log(&self, priority: LogPriority, tag: Option<&str>, chunk: &str) -> Result<()> {
        (**self).log(priority, tag, chunk)
    }
}

/// Max encoded size of a single chunk handed to a sink, in bytes.
pub const CHUNK_SIZE: usize = 2048;

cfg_if! {
    if #[cfg(windows)] {
        pub const LINE_SEPARATOR: &str = "\r\n";
    } else {
        pub const LINE_SEPARATOR: &str = "\n";
    }
}

pub(crate) const TOP_LEFT_CORNER: char = '┌';
pub(crate) const BOTTOM_LEFT_CORNER: char = '└';
pub(crate) const HORIZONTAL_LINE: char = '│';
pub(crate) const TOP_BORDER: &str =
    "──────────────────── StackTrace ────────────────────────────────────────────────────────>>>";
pub(crate) const BOTTOM_BORDER: &str =
    "──────────────────── StackTrace ────────────────────────────────────────────────────────<<<";

const DEFAULT_TAG: &str = "PRETTY_LOGGER";

type StackSource = Box<dyn Fn() -> CallStack + Send + Sync>;

/// Formats a single log call into bounded-size chunks, decorates the terminal
/// chunk with a bordered stack-trace footer and forwards every chunk to the
/// configured sink. Immutable once built; construct via [`PrettyFormatter::builder`].
pub struct PrettyFormatter {
    method_count: usize,
    method_offset: usize,
    show_thread_info: bool,
    tag: Option<String>,
    sink: Box<dyn LogSink>,
    stack_source: StackSource,
}

impl PrettyFormatter {
    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::new()
    }

    /// Splits `message` into chunks of at most [`CHUNK_SIZE`] encoded bytes and
    /// hands each one to the sink. The footer, when enabled, rides on the last
    /// chunk only. Chunking and footer generation run on the calling thread.
    pub fn log(
        &self,
        priority: LogPriority,
        once_only_tag: Option<&str>,
        message: &str,
    ) -> Result<()> {
        if message.is_empty() {
            bail!("log message must not be empty");
        }

        let tag = self.format_tag(once_only_tag);
        let tag = tag.as_deref();
        let footer = self.generate_footer();
        let footer = footer.as_deref();

        let total_len = message.len();
        if total_len <= CHUNK_SIZE {
            return self.log_content(priority, tag, footer, message);
        }

        let lines = message.split(LINE_SEPARATOR).collect_vec();
        let separator_len = LINE_SEPARATOR.len();

        let mut pending = String::new();
        let mut pending_len = 0usize;
        let mut emitted_len = 0usize;

        for (index, line) in lines.iter().enumerate() {
            let add_separator = index != lines.len() - 1;
            let mut line_len = line.len();
            if add_separator {
                line_len += separator_len;
            }

            if line_len <= CHUNK_SIZE {
                if pending_len + line_len <= CHUNK_SIZE {
                    pending.push_str(line);
                } else {
                    let terminal = emitted_len + pending_len >= total_len;
                    self.log_content(priority, tag, footer.filter(|_| terminal), &pending)?;
                    emitted_len += pending_len;
                    pending_len = 0;
                    pending.clear();
                    pending.push_str(line);
                }
                if add_separator {
                    pending.push_str(LINE_SEPARATOR);
                }
                pending_len += line_len;
            } else {
                // a single line exceeding the chunk limit: flush whatever is
                // buffered, then emit the line as byte windows
                if pending_len > 0 {
                    self.log_content(priority, tag, None, &pending)?;
                    emitted_len += pending_len;
                    pending_len = 0;
                    pending.clear();
                }
                for window in byte_windows(line, CHUNK_SIZE) {
                    let terminal = emitted_len + window.len() >= total_len;
                    self.log_content(priority, tag, footer.filter(|_| terminal), window)?;
                    emitted_len += window.len();
                }
                // the windowed line's separator opens the next buffer so the
                // reassembled chunks still match the message byte for byte
                if add_separator {
                    pending.push_str(LINE_SEPARATOR);
                    pending_len += separator_len;
                }
            }
        }

        if pending_len > 0 {
            self.log_content(priority, tag, footer, &pending)?;
        }

        Ok(())
    }

    fn log_content(
        &self,
        priority: LogPriority,
        tag: Option<&str>,
        footer: Option<&str>,
        chunk: &str,
    ) -> Result<()> {
        match footer {
            Some(footer) if !footer.is_empty() => {
                self.sink
                    .log(priority, tag, &format!("{chunk}{LINE_SEPARATOR}{footer}"))
            }
            _ => self.sink.log(priority, tag, chunk),
        }
    }

    /// A once-only tag that differs from the configured one is appended to it;
    /// the configured tag is used as-is otherwise.
    fn format_tag(&self, once_only_tag: Option<&str>) -> Option<String> {
        match once_only_tag {
            Some(once) if !once.is_empty() && self.tag.as_deref() != Some(once) => {
                match &self.tag {
                    Some(tag) => Some(format!("{tag}-{once}")),
                    None => Some(once.to_string()),
                }
            }
            _ => self.tag.clone(),
        }
    }

    /// Renders the bordered footer: optional thread name, then up to
    /// `method_count` external stack frames, clamped to the captured depth.
    fn generate_footer(&self) -> Option<String> {
        if self.method_count == 0 {
            return None;
        }

        let stack = (self.stack_source)();

        let mut footer = String::new();
        footer.push(TOP_LEFT_CORNER);
        footer.push_str(TOP_BORDER);

        if self.show_thread_info {
            footer.push_str(LINE_SEPARATOR);
            let thread = thread::current();
            footer.push(HORIZONTAL_LINE);
            footer.push_str(&format!(
                " [ Thread:{} ]",
                thread.name().unwrap_or("<unnamed>")
            ));
        }
        footer.push_str(LINE_SEPARATOR);

        if let Some(base) = stack.external_offset() {
            let start = base + self.method_offset;
            for frame in stack.frames().iter().skip(start).take(self.method_count) {
                footer.push(HORIZONTAL_LINE);
                footer.push_str(&format!(
                    " {}.{}({}:{})",
                    frame.simple_class_name(),
                    frame.method_name,
                    frame.file_name,
                    frame.line
                ));
                footer.push_str(LINE_SEPARATOR);
            }
        }

        footer.push(BOTTOM_LEFT_CORNER);
        footer.push_str(BOTTOM_BORDER);
        Some(footer)
    }
}

/// Splits `line` into windows of at most `max` bytes, never inside a UTF-8
/// character.
fn byte_windows(line: &str, max: usize) -> Vec<&str> {
    let mut windows = Vec::with_capacity(line.len().div_ceil(max));
    let mut rest = line;

    while rest.len() > max {
        let mut split = max;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        let (window, tail) = rest.split_at(split);
        windows.push(window);
        rest = tail;
    }
    windows.push(rest);

    windows
}

/// Builder for [`PrettyFormatter`]; every option has a default.
pub struct FormatterBuilder {
    method_count: usize,
    method_offset: usize,
    show_thread_info: bool,
    tag: Option<String>,
    sink: Option<Box<dyn LogSink>>,
    stack_source: Option<StackSource>,
}

impl FormatterBuilder {
    fn new() -> Self {
        Self {
            method_count: 2,
            method_offset: 0,
            show_thread_info: true,
            tag: Some(DEFAULT_TAG.to_string()),
            sink: None,
            stack_source: None,
        }
    }

    /// Number of stack frames in the footer; 0 disables the footer entirely.
    pub fn method_count(mut self, count: usize) -> Self {
        self.method_count = count;
        self
    }

    /// Skips this many external frames before rendering the footer.
    pub fn method_offset(mut self, offset: usize) -> Self {
        self.method_offset = offset;
        self
    }

    pub fn show_thread_info(mut self, show: bool) -> Self {
        self.show_thread_info = show;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn clear_tag(mut self) -> Self {
        self.tag = None;
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Overrides how the call stack is captured. Mainly useful for tests that
    /// need a deterministic stack.
    pub fn stack_source(
        mut self,
        source: impl Fn() -> CallStack + Send + Sync + 'static,
    ) -> Self {
        self.stack_source = Some(Box::new(source));
        self
    }

    pub fn build(self) -> PrettyFormatter {
        PrettyFormatter {
            method_count: self.method_count,
            method_offset: self.method_offset,
            show_thread_info: self.show_thread_info,
            tag: self.tag,
            sink: self
                .sink
                .unwrap_or_else(|| Box::new(console_sink::ConsoleSink::new())),
            stack_source: self.stack_source.unwrap_or_else(default_stack_source),
        }
    }
}

fn default_stack_source() -> StackSource {
    cfg_if! {
        if #[cfg(feature = "backtrace")] {
            Box::new(CallStack::capture)
        } else {
            Box::new(CallStack::empty)
        }
    }
}
