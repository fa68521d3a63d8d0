//! crates/logging-sink/src/writer.rs
//! Shared, encoding-aware wrappers around caller supplied byte sinks.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::encoding::TextEncoding;

/// Shared handle to an [`EncodedWriter`].
///
/// The facade stores and hands out handles rather than writers so that a
/// single destination can back several stream names. Two handles refer to the
/// same destination when [`Arc::ptr_eq`] holds.
pub type StreamHandle = Arc<EncodedWriter>;

/// Text adapter that encodes strings before forwarding them to a byte sink.
///
/// The adapter owns the boxed writer it was built from but never opens or
/// closes the destination behind it; dropping the adapter simply drops the
/// writer. Writes are serialised through an internal mutex so each call to
/// [`write_str`](Self::write_str) reaches the destination as one contiguous
/// block even when several threads share the handle.
///
/// # Examples
///
/// ```
/// use logging_sink::{EncodedWriter, TextEncoding};
/// use test_support::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let writer = EncodedWriter::with_encoding(buffer.clone(), TextEncoding::for_label("latin1")?);
///
/// writer.write_str("déjà vu\n")?;
/// assert_eq!(buffer.contents(), b"d\xe9j\xe0 vu\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EncodedWriter {
    inner: Mutex<Box<dyn Write + Send>>,
    encoding: TextEncoding,
}

impl EncodedWriter {
    /// Wraps `writer` using the default UTF-8 encoding.
    #[must_use]
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_encoding(writer, TextEncoding::default())
    }

    /// Wraps `writer` using an explicit encoding.
    #[must_use]
    pub fn with_encoding<W>(writer: W, encoding: TextEncoding) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Mutex::new(Box::new(writer)),
            encoding,
        }
    }

    /// Wraps the process's standard output.
    #[must_use]
    pub fn stdout(encoding: TextEncoding) -> Self {
        Self::with_encoding(io::stdout(), encoding)
    }

    /// Converts the adapter into a shareable [`StreamHandle`].
    #[must_use]
    pub fn into_handle(self) -> StreamHandle {
        Arc::new(self)
    }

    /// Returns the encoding applied to written text.
    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Encodes `text` and writes all of it to the underlying sink.
    ///
    /// Nothing is flushed; callers decide when buffered output must reach
    /// the destination.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let encoded = self.encoding.encode(text);
        self.lock().write_all(&encoded)
    }

    /// Flushes the underlying sink.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.inner
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl fmt::Debug for EncodedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedWriter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use test_support::{FailingWriter, SharedBuffer};

    #[test]
    fn utf8_text_is_written_verbatim() {
        let buffer = SharedBuffer::new();
        let writer = EncodedWriter::new(buffer.clone());

        writer.write_str("grüße").expect("write succeeds");
        assert_eq!(buffer.to_string_lossy(), "grüße");
    }

    #[test]
    fn write_does_not_flush() {
        let buffer = SharedBuffer::new();
        let writer = EncodedWriter::new(buffer.clone());

        writer.write_str("pending").expect("write succeeds");
        assert_eq!(buffer.flush_count(), 0);

        writer.flush().expect("flush succeeds");
        assert_eq!(buffer.flush_count(), 1);
    }

    #[test]
    fn write_errors_surface() {
        let writer = EncodedWriter::new(FailingWriter::new());
        let err = writer.write_str("lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn flush_errors_surface() {
        let writer = EncodedWriter::new(FailingWriter::new());
        assert!(writer.flush().is_err());
    }

    #[test]
    fn concurrent_writes_stay_contiguous() {
        let buffer = SharedBuffer::new();
        let handle = EncodedWriter::new(buffer.clone()).into_handle();

        let workers: Vec<_> = (0..8)
            .map(|index| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || {
                    for _ in 0..50 {
                        handle
                            .write_str(&format!("worker-{index}-line\n"))
                            .expect("write succeeds");
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker completes");
        }

        let output = buffer.to_string_lossy();
        assert_eq!(output.lines().count(), 400);
        assert!(output
            .lines()
            .all(|line| line.starts_with("worker-") && line.ends_with("-line")));
    }

    #[test]
    fn debug_output_names_encoding() {
        let writer = EncodedWriter::new(Vec::new());
        let rendered = format!("{writer:?}");
        assert!(rendered.contains("UTF-8"));
    }
}
