use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::mpsc::{self, Sender},
    thread,
    time::Duration,
};

use crate::{log_priority::LogPriority, Result};

use super::{LogSink, LINE_SEPARATOR};

const LOG_FILE_BASE_NAME: &str = "logs";

enum WriteRequest {
    Append(String),
    Flush(Sender<()>),
}

/// Appends text to a size-rotated file set (`<base>_0.log`, `<base>_1.log`, …)
/// on a dedicated worker thread.
///
/// Requests are handled strictly in enqueue order and never block the caller.
/// A failed write is dropped, not retried. Use one handler per folder; two
/// handlers racing on the same folder may disagree on the rotation target.
pub struct DiskWriteHandler {
    sender: Sender<WriteRequest>,
}

impl DiskWriteHandler {
    pub fn new(
        folder: impl Into<PathBuf>,
        file_name: impl Into<String>,
        max_file_size: u64,
    ) -> Self {
        let folder = folder.into();
        let file_name = file_name.into();
        let (sender, receiver) = mpsc::channel();

        // the worker exits once every sender is gone
        let builder = thread::Builder::new().name("disk-log-writer".to_string());
        let spawned = builder.spawn(move || {
            while let Ok(request) = receiver.recv() {
                match request {
                    WriteRequest::Append(content) => {
                        if let Err(_error) =
                            write_once(&folder, &file_name, max_file_size, &content)
                        {
                            // the append is dropped, not retried; logging must
                            // never take the host down with it
                            #[cfg(feature = "tracing")]
                            tracing::warn!("dropped log append: {_error}");
                        }
                    }
                    WriteRequest::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        if let Err(_error) = spawned {
            #[cfg(feature = "tracing")]
            tracing::warn!("failed to spawn disk log writer: {_error}");
        }

        Self { sender }
    }

    /// Fire-and-forget append. Content is written verbatim by the worker.
    pub fn append(&self, content: impl Into<String>) {
        let _ = self.sender.send(WriteRequest::Append(content.into()));
    }

    /// Blocks until every append enqueued before this call has been handled,
    /// or the timeout elapses.
    pub fn wait_for_flush_timeout(&self, timeout: Duration) {
        let (done, ready) = mpsc::channel();
        if self.sender.send(WriteRequest::Flush(done)).is_ok() {
            let _ = ready.recv_timeout(timeout);
        }
    }
}

/// One append: pick the target file, open, write, flush, close.
fn write_once(
    folder: &Path,
    file_name: &str,
    max_file_size: u64,
    content: &str,
) -> io::Result<()> {
    if let Err(_error) = fs::create_dir_all(folder) {
        // fail open, the open below reports the real problem
        #[cfg(feature = "tracing")]
        tracing::warn!("unable to create log folder {}: {_error}", folder.display());
    }

    let path = select_log_file(folder, file_name, max_file_size);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    match file.write_all(content.as_bytes()) {
        Ok(()) => file.flush(),
        Err(error) => {
            // best-effort cleanup; the original failure wins and the handle is
            // closed on drop either way
            let _ = file.flush();
            Err(error)
        }
    }
}

/// Picks the append target: the highest-indexed existing file while it is
/// still under `max_file_size`, otherwise the next free index.
pub(crate) fn select_log_file(folder: &Path, file_name: &str, max_file_size: u64) -> PathBuf {
    let mut index = 0u32;
    let mut candidate = folder.join(format!("{file_name}_{index}.log"));
    let mut existing: Option<PathBuf> = None;

    while candidate.exists() {
        existing = Some(candidate);
        index += 1;
        candidate = folder.join(format!("{file_name}_{index}.log"));
    }

    match existing {
        Some(existing) => {
            let size = fs::metadata(&existing).map(|meta| meta.len()).unwrap_or(0);
            if size >= max_file_size {
                candidate
            } else {
                existing
            }
        }
        None => candidate,
    }
}

/// Sink that frames each chunk with a trailing line separator and enqueues it
/// on a [`DiskWriteHandler`].
pub struct DiskSink {
    handler: DiskWriteHandler,
}

impl DiskSink {
    pub fn new(folder: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            handler: DiskWriteHandler::new(folder, LOG_FILE_BASE_NAME, max_file_size),
        }
    }

    pub fn handler(&self) -> &DiskWriteHandler {
        &self.handler
    }
}

impl LogSink for DiskSink {
    fn log(&self, _priority: LogPriority, _tag: Option<&str>, chunk: &str) -> Result<()> {
        self.handler.append(format!("{chunk}{LINE_SEPARATOR}"));
        Ok(())
    }
}
