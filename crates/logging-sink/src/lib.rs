#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging-sink` provides the physical output side of the status-log facade:
//! encoding-aware adapters around caller supplied byte sinks and the renderer
//! that turns a level-tagged record into text.
//!
//! # Design
//!
//! The crate exposes [`EncodedWriter`], a lightweight wrapper around a boxed
//! [`std::io::Write`] implementor that transcodes text through a
//! [`TextEncoding`] before writing it. Writers are shared through
//! [`StreamHandle`] (an [`Arc`](std::sync::Arc)) so a single destination can
//! back several named streams. [`LineRenderer`] formats records with an
//! optional timestamp, the level label and the cause chain; callers control
//! whether rendered records end with a newline by selecting a [`LineMode`].
//!
//! # Invariants
//!
//! - One rendered record is written with a single locked `write_all`, so
//!   records from different threads never interleave inside one destination.
//! - Writing never flushes. Flushing is an explicit, separate operation.
//! - `LineMode::WithNewline` is the default, printing each record on its own
//!   line.
//!
//! # Errors
//!
//! Write and flush operations surface [`std::io::Error`] values originating
//! from the underlying writer. Unknown encoding labels produce
//! [`EncodingError`].
//!
//! # Examples
//!
//! Render a record and write it to an in-memory buffer:
//!
//! ```
//! use logging_sink::{EncodedWriter, LineRenderer};
//! use test_support::SharedBuffer;
//!
//! let buffer = SharedBuffer::new();
//! let stream = EncodedWriter::new(buffer.clone()).into_handle();
//! let renderer = LineRenderer::new().with_timestamps(false);
//!
//! stream.write_str(&renderer.render("INFO", "listening on 8080", None))?;
//! assert_eq!(buffer.to_string_lossy(), "INFO: listening on 8080\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - `logging` crate for severities, the stream registry and the dispatch path.

mod encoding;
mod line_mode;
mod render;
mod writer;

pub use encoding::{EncodingError, TextEncoding};
pub use line_mode::LineMode;
pub use render::{LineRenderer, TIMESTAMP_FORMAT};
pub use writer::{EncodedWriter, StreamHandle};
