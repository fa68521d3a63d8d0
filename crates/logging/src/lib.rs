#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a process-wide, leveled status logging facade. Callers log
//! either a message key resolved through a [`MessageResolver`] with positional
//! parameters, or pre-formatted text. Records are gated by a verbosity
//! threshold, optionally prefixed with the calling thread's name and written
//! to output streams registered by name.
//!
//! # Design
//!
//! - [`Severity`] is an ordered level scale from [`Severity::SuppressAll`] to
//!   [`Severity::ShowAll`], each level carrying a numeric rank so integer
//!   verbosity settings map onto it.
//! - [`Logger`] is the context object. It initializes at most once, owns the
//!   [`StreamRegistry`] and hands composed [`Record`]s to a [`LevelSink`].
//!   [`Logger::global`] provides one process-wide instance. Hosts that keep
//!   their own [`StreamRegistry`] can tell a cleared name from an unknown one
//!   with [`StreamRegistry::is_removed`].
//! - [`StreamLevelSink`] is the default sink: an atomic threshold in front of
//!   a [`LineRenderer`](logging_sink::LineRenderer).
//! - [`LoggerConfig`] gathers the knobs and parses them from a compact
//!   `key=value` spec.
//! - With the `tracing` feature, `FacadeLayer` forwards `tracing` events into
//!   a logger and the facility reports its own lifecycle under
//!   [`FACILITY_TARGET`].
//!
//! # Invariants
//!
//! - Disabled records never reach the resolver and allocate nothing.
//! - Logging never flushes; [`Logger::flush`] is separate and best-effort.
//! - A name that was registered and then cleared resolves to no stream; a
//!   name that was never registered resolves to the default stream.
//!
//! # Errors
//!
//! Dispatch returns [`LoggingError`]: resolver failures, sink write failures
//! and invalid configuration specs are reported to the caller instead of
//! being swallowed.
//!
//! # Examples
//!
//! ```
//! use logging::{Logger, LoggerConfig, MapResolver, Severity};
//! use test_support::SharedBuffer;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::new();
//! logger.initialize_with_writer(LoggerConfig::from_spec("level=finer,timestamps=off")?, buffer.clone());
//!
//! let resolver = MapResolver::new().with("Listener.Started", "[#0] listening on port [#1]");
//! logger.log(Severity::Info, &resolver, "Listener.Started", &[&"http", &8080], None, None)?;
//! logger.log_direct_message(Severity::Debug, None, "accept loop ready", None)?;
//! logger.log_direct_message(Severity::FullDebug, None, "too chatty", None)?;
//!
//! assert_eq!(
//!     buffer.lines(),
//!     vec!["INFO: http listening on port 8080", "DEBUG: accept loop ready"]
//! );
//! # Ok::<(), logging::LoggingError>(())
//! ```
//!
//! # See also
//!
//! - `logging-sink` for encoded writers and line rendering.

mod compose;
mod config;
mod error;
mod level_sink;
mod levels;
mod logger;
mod macros;
mod registry;
mod resolver;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use compose::{annotate, compose, current_thread_label};
pub use config::LoggerConfig;
pub use error::{LoggingError, Result};
pub use level_sink::{LevelSink, Record, StreamLevelSink};
pub use levels::{Severity, parse_verbosity};
pub use logger::Logger;
pub use registry::{DEFAULT_STREAM, StreamRegistry};
pub use resolver::{MapResolver, MessageResolver, ResolveError};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{FacadeLayer, init_tracing, init_tracing_with_filter};

/// `tracing` target used for lifecycle events of the facility itself.
///
/// The `tracing` bridge never forwards events with this target, so a bridged
/// logger does not log about itself.
pub const FACILITY_TARGET: &str = "status_log::facility";
