use std::path::Path;

/// Frames below this index always belong to the capture machinery itself.
const MIN_STACK_OFFSET: usize = 2;

/// Symbols belonging to this crate's own logging call chain; they never show
/// up in a footer.
const INTERNAL_FRAME_MARKERS: &[&str] = &[
    "std::backtrace",
    "backtrace::backtrace",
    "prettylog::logger",
    "prettylog::facade",
];

/// One resolved frame of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Fully qualified `::`-separated module path of the symbol.
    pub class_name: String,
    pub method_name: String,
    pub file_name: String,
    pub line: u32,
}

impl StackFrame {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        file_name: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            file_name: file_name.into(),
            line,
        }
    }

    /// Last segment of the module path, mirroring a short class name.
    pub fn simple_class_name(&self) -> &str {
        self.class_name.rsplit("::").next().unwrap_or("")
    }

    fn is_internal(&self) -> bool {
        INTERNAL_FRAME_MARKERS
            .iter()
            .any(|marker| self.class_name.contains(marker))
    }
}

/// Snapshot of the calling thread's stack at the time of a log call.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<StackFrame>,
}

impl CallStack {
    pub fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn from_frames(frames: Vec<StackFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// Index of the first frame that does not belong to the logger's own call
    /// chain, or `None` when the whole stack is internal.
    pub fn external_offset(&self) -> Option<usize> {
        self.frames
            .iter()
            .enumerate()
            .skip(MIN_STACK_OFFSET)
            .find(|(_, frame)| !frame.is_internal())
            .map(|(index, _)| index)
    }

    /// Captures and resolves the current thread's stack.
    #[cfg(feature = "backtrace")]
    pub fn capture() -> Self {
        use std::backtrace::Backtrace;

        Self::parse(&Backtrace::force_capture().to_string())
    }

    /// Parses the textual rendering of [`std::backtrace::Backtrace`]: numbered
    /// symbol lines, each optionally followed by an `at path:line:column` line.
    pub(crate) fn parse(rendered: &str) -> Self {
        let mut frames: Vec<StackFrame> = Vec::new();

        for line in rendered.lines() {
            let trimmed = line.trim_start();

            if let Some(location) = trimmed.strip_prefix("at ") {
                if let Some(frame) = frames.last_mut() {
                    apply_location(frame, location);
                }
                continue;
            }

            if let Some((index, symbol)) = trimmed.split_once(": ") {
                if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                    frames.push(parse_symbol(symbol));
                }
            }
        }

        Self { frames }
    }
}

fn parse_symbol(symbol: &str) -> StackFrame {
    let (class_name, method_name) = match symbol.rsplit_once("::") {
        Some((class, method)) => (class.to_string(), method.to_string()),
        None => (String::new(), symbol.to_string()),
    };

    StackFrame {
        class_name,
        method_name,
        file_name: "<unknown>".to_string(),
        line: 0,
    }
}

/// Fills in `file.rs:line` from a `path/to/file.rs:123:45` location string.
fn apply_location(frame: &mut StackFrame, location: &str) {
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next();
    let line = parts.next().and_then(|l| l.parse().ok()).unwrap_or(0);
    let path = parts.next().unwrap_or(location);

    frame.file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    frame.line = line;
}
