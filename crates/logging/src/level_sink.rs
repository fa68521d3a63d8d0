//! crates/logging/src/level_sink.rs
//! The leveled primitive that performs gating and the physical write.

use std::error::Error;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};

use logging_sink::{LineRenderer, StreamHandle};

use crate::levels::Severity;

/// A fully composed message on its way to a destination.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// Severity the message was logged at.
    pub severity: Severity,
    /// Final text, including any thread annotation.
    pub text: &'a str,
    /// Optional error that caused the message.
    pub cause: Option<&'a (dyn Error + 'static)>,
    /// Stream name supplied by the caller, if any.
    pub stream: Option<&'a str>,
}

/// Leveled sink the facade hands composed records to.
///
/// The sink owns the verbosity threshold. [`is_enabled`](Self::is_enabled)
/// runs on every log call before any message work happens, so it must be
/// cheap and must not block.
pub trait LevelSink: Send + Sync {
    /// Reports whether records at `severity` would be written.
    fn is_enabled(&self, severity: Severity) -> bool;

    /// Current threshold.
    fn threshold(&self) -> Severity;

    /// Replaces the threshold.
    fn set_threshold(&self, threshold: Severity);

    /// Writes `record` to `destination`.
    ///
    /// `destination` is the facility's default stream; `None` means the
    /// default stream was cleared. Implementations must not flush.
    fn emit(&self, record: &Record<'_>, destination: Option<&StreamHandle>) -> io::Result<()>;
}

/// Default [`LevelSink`]: an atomic threshold in front of a [`LineRenderer`].
///
/// Records without a destination are dropped.
///
/// # Examples
///
/// ```
/// use logging::{LevelSink, Record, Severity, StreamLevelSink};
/// use logging_sink::{EncodedWriter, LineRenderer};
/// use test_support::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let stream = EncodedWriter::new(buffer.clone()).into_handle();
/// let sink = StreamLevelSink::new(LineRenderer::new().with_timestamps(false));
///
/// let record = Record { severity: Severity::Warning, text: "disk 91% full", cause: None, stream: None };
/// sink.emit(&record, Some(&stream))?;
/// assert_eq!(buffer.to_string_lossy(), "WARNING: disk 91% full\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamLevelSink {
    threshold: AtomicU8,
    renderer: LineRenderer,
}

impl StreamLevelSink {
    /// Creates a sink with an `INFO` threshold.
    #[must_use]
    pub fn new(renderer: LineRenderer) -> Self {
        Self {
            threshold: AtomicU8::new(encode(Severity::Info)),
            renderer,
        }
    }
}

impl Default for StreamLevelSink {
    fn default() -> Self {
        Self::new(LineRenderer::new())
    }
}

impl LevelSink for StreamLevelSink {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_enabled_under(self.threshold())
    }

    fn threshold(&self) -> Severity {
        decode(self.threshold.load(Ordering::Acquire))
    }

    fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(encode(threshold), Ordering::Release);
    }

    fn emit(&self, record: &Record<'_>, destination: Option<&StreamHandle>) -> io::Result<()> {
        let Some(destination) = destination else {
            return Ok(());
        };
        let line = self
            .renderer
            .render(record.severity.label(), record.text, record.cause);
        destination.write_str(&line)
    }
}

fn encode(severity: Severity) -> u8 {
    Severity::ALL
        .iter()
        .position(|candidate| *candidate == severity)
        .map_or(0, |index| index as u8)
}

fn decode(index: u8) -> Severity {
    Severity::ALL
        .get(usize::from(index))
        .copied()
        .unwrap_or(Severity::Info)
}
