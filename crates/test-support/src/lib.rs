//! Shared test doubles for the status-log workspace.
//!
//! The helpers stand in for the byte destinations a host application would
//! normally hand to the facade: an in-memory buffer that can be inspected
//! while the facade still holds a clone, writers that fail on demand, and a
//! temporary log file.

#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::NamedTempFile;

/// Cloneable in-memory writer whose contents stay observable after the
/// facade takes ownership of one of the clones.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<AtomicUsize>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the written bytes decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the written text split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.to_string_lossy().lines().map(str::to_owned).collect()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of times [`Write::flush`] was called on any clone.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Writer that fails with [`io::ErrorKind::BrokenPipe`].
///
/// By default both writes and flushes fail; [`FailingWriter::flush_only`]
/// accepts writes and only fails when flushed.
#[derive(Clone, Debug, Default)]
pub struct FailingWriter {
    accept_writes: bool,
    flush_attempts: Arc<AtomicUsize>,
}

impl FailingWriter {
    /// Creates a writer whose writes and flushes both fail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer that swallows writes and fails on flush.
    #[must_use]
    pub fn flush_only() -> Self {
        Self {
            accept_writes: true,
            flush_attempts: Arc::default(),
        }
    }

    /// Number of flushes attempted on any clone.
    #[must_use]
    pub fn flush_attempts(&self) -> usize {
        self.flush_attempts.load(Ordering::SeqCst)
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.accept_writes {
            Ok(buf.len())
        } else {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

/// Temporary file used as a log destination.
#[derive(Debug)]
pub struct TempLogFile {
    file: NamedTempFile,
}

impl TempLogFile {
    /// Creates an empty temporary file.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            file: NamedTempFile::new()?,
        })
    }

    /// Opens an independent handle positioned at the start of the file.
    pub fn writer(&self) -> io::Result<File> {
        self.file.reopen()
    }

    /// Reads the raw bytes currently stored in the file.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        let mut file = self.file.reopen()?;
        file.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads the file as UTF-8 text.
    pub fn read_to_string(&self) -> io::Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}
