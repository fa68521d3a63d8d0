#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `status-log` is the entry crate of the workspace. It re-exports the
//! facade from `logging` and the output side from `logging-sink` so hosts
//! depend on a single crate.
//!
//! # Examples
//!
//! ```
//! use status_log::{Logger, LoggerConfig, MapResolver, Severity, TextEncoding};
//! use test_support::SharedBuffer;
//!
//! let console = SharedBuffer::new();
//! let access = SharedBuffer::new();
//!
//! let logger = Logger::new();
//! logger.initialize_with_writer(LoggerConfig::from_spec("level=warning,timestamps=off")?, console.clone());
//! logger.set_stream_writer(Some("access"), Some(access.clone()), Some(TextEncoding::utf8()));
//!
//! let resolver = MapResolver::new().with("Request.Slow", "request took [#0] ms");
//! logger.log(Severity::Warning, &resolver, "Request.Slow", &[&812], None, Some("access"))?;
//! logger.flush(Some("access"));
//!
//! assert_eq!(console.lines(), vec!["WARNING: request took 812 ms"]);
//! assert_eq!(access.flush_count(), 1);
//! # Ok::<(), status_log::LoggingError>(())
//! ```

pub use logging::*;
pub use logging_sink::{
    EncodedWriter, EncodingError, LineMode, LineRenderer, StreamHandle, TIMESTAMP_FORMAT,
    TextEncoding,
};
