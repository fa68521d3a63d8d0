//! crates/logging/src/logger.rs
//! The facility context: initialization guard, stream registry access and
//! the dispatch path.

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use logging_sink::{EncodedWriter, StreamHandle, TextEncoding};

use crate::compose;
use crate::config::LoggerConfig;
use crate::error::{LoggingError, Result};
use crate::level_sink::{LevelSink, Record, StreamLevelSink};
use crate::levels::{Severity, parse_verbosity};
use crate::macros::facility_event;
use crate::registry::StreamRegistry;
use crate::resolver::MessageResolver;

/// Process-lifetime logging context.
///
/// A `Logger` starts uninitialized. The first call to
/// [`initialize`](Self::initialize), or to any other entry point, establishes
/// the stream registry and verbosity exactly once; later initialization
/// attempts are ignored. Hosts normally create one logger at start-up and pass
/// it by reference, or use [`Logger::global`].
///
/// Initialization and registry updates are serialised by one lock. The
/// severity gate on the dispatch path reads an atomic threshold and never
/// takes that lock; the write itself is serialised by the destination stream.
///
/// # Examples
///
/// ```
/// use logging::{Logger, LoggerConfig, MapResolver, Severity};
/// use test_support::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new();
/// let config = LoggerConfig::default().with_threshold(Severity::Warning).with_timestamps(false);
/// assert!(logger.initialize_with_writer(config, buffer.clone()));
///
/// let resolver = MapResolver::new().with("Pool.Exhausted", "pool [#0] exhausted");
/// logger.log(Severity::Warning, &resolver, "Pool.Exhausted", &[&"jdbc"], None, None)?;
/// logger.log(Severity::Info, &resolver, "Pool.Exhausted", &[&"ignored"], None, None)?;
///
/// assert_eq!(buffer.lines(), vec!["WARNING: pool jdbc exhausted"]);
/// # Ok::<(), logging::LoggingError>(())
/// ```
pub struct Logger {
    ready: AtomicBool,
    show_thread_name: AtomicBool,
    state: Mutex<Option<Facility>>,
    level_sink: OnceLock<Box<dyn LevelSink>>,
}

/// State established by initialization.
#[derive(Debug)]
struct Facility {
    registry: StreamRegistry,
    encoding: TextEncoding,
}

impl Logger {
    /// Creates an uninitialized logger using the default [`StreamLevelSink`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            show_thread_name: AtomicBool::new(false),
            state: Mutex::new(None),
            level_sink: OnceLock::new(),
        }
    }

    /// Creates an uninitialized logger that dispatches through `sink`.
    ///
    /// Initialization still applies the configured threshold to `sink`, but
    /// the rendering settings of the configuration are left to it.
    #[must_use]
    pub fn with_level_sink<S>(sink: S) -> Self
    where
        S: LevelSink + 'static,
    {
        let logger = Self::new();
        let _ = logger.level_sink.set(Box::new(sink));
        logger
    }

    /// Process-wide logger for hosts that do not thread a context through.
    pub fn global() -> &'static Self {
        static GLOBAL: Logger = Logger::new();
        &GLOBAL
    }

    // ------------------------------------------------------------------
    // Initialization guard
    // ------------------------------------------------------------------

    /// Establishes the registry and verbosity unless already initialized.
    ///
    /// Returns `true` when this call performed the initialization. Racing
    /// callers block on the facility lock; only the first one's
    /// configuration takes effect.
    pub fn initialize(&self, config: LoggerConfig, default_stream: Option<StreamHandle>) -> bool {
        if self.ready.load(Ordering::Acquire) {
            return false;
        }

        {
            let mut state = self.lock_state();
            // Re-check: another caller may have finished while we waited.
            if self.ready.load(Ordering::Acquire) {
                return false;
            }

            let sink = self
                .level_sink
                .get_or_init(|| Box::new(StreamLevelSink::new(config.renderer())));
            sink.set_threshold(config.threshold);
            self.show_thread_name
                .store(config.show_thread_name, Ordering::Release);
            *state = Some(Facility {
                registry: StreamRegistry::new(default_stream),
                encoding: config.encoding,
            });
            self.ready.store(true, Ordering::Release);
        }

        facility_event!(
            threshold = %config.threshold,
            encoding = %config.encoding,
            show_thread_name = config.show_thread_name,
            "logging facility initialized"
        );
        true
    }

    /// Initializes with `writer` as the default stream, encoded with the
    /// configuration's encoding.
    pub fn initialize_with_writer<W>(&self, config: LoggerConfig, writer: W) -> bool
    where
        W: Write + Send + 'static,
    {
        if self.is_initialized() {
            return false;
        }
        let handle = EncodedWriter::with_encoding(writer, config.encoding).into_handle();
        self.initialize(config, Some(handle))
    }

    /// Initializes with `threshold` and standard output.
    pub fn initialize_with_level(&self, threshold: Severity) -> bool {
        self.initialize_stdout(LoggerConfig::default().with_threshold(threshold))
    }

    /// Initializes with an integer threshold rank and standard output.
    pub fn initialize_with_rank(&self, rank: i32) -> bool {
        self.initialize_with_level(Severity::from_rank(rank))
    }

    /// Reports whether initialization has completed.
    pub fn is_initialized(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn initialize_stdout(&self, config: LoggerConfig) -> bool {
        if self.is_initialized() {
            return false;
        }
        let stdout = EncodedWriter::stdout(config.encoding).into_handle();
        self.initialize(config, Some(stdout))
    }

    fn ensure_initialized(&self) {
        if !self.ready.load(Ordering::Acquire) {
            self.initialize_stdout(LoggerConfig::default());
        }
    }

    // ------------------------------------------------------------------
    // Verbosity
    // ------------------------------------------------------------------

    /// Replaces the verbosity threshold.
    ///
    /// Before initialization this initializes with `threshold` and otherwise
    /// default settings.
    pub fn set_verbosity(&self, threshold: Severity) {
        if self.initialize_with_level(threshold) {
            return;
        }
        {
            let _state = self.lock_state();
            self.sink().set_threshold(threshold);
        }
        facility_event!(threshold = %threshold, "verbosity changed");
    }

    /// Replaces the verbosity threshold from an integer rank.
    pub fn set_verbosity_rank(&self, rank: i32) {
        self.set_verbosity(Severity::from_rank(rank));
    }

    /// Replaces the verbosity threshold from a name or rank spec.
    ///
    /// # Errors
    ///
    /// [`LoggingError::InvalidConfiguration`] when the spec cannot be parsed;
    /// the threshold is left unchanged.
    pub fn set_verbosity_spec(&self, spec: &str) -> Result<()> {
        let threshold = parse_verbosity(spec)?;
        self.set_verbosity(threshold);
        Ok(())
    }

    /// Current verbosity threshold.
    pub fn verbosity(&self) -> Severity {
        self.ensure_initialized();
        self.sink().threshold()
    }

    /// Reports whether a message at `severity` would be written.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.ensure_initialized();
        self.sink().is_enabled(severity)
    }

    // ------------------------------------------------------------------
    // Stream registry
    // ------------------------------------------------------------------

    /// Registers, replaces or clears the stream for `name`.
    ///
    /// `None` or [`DEFAULT_STREAM`](crate::DEFAULT_STREAM) addresses the
    /// default slot. Clearing any other name makes later lookups of that name
    /// return `None` instead of the default stream.
    pub fn set_stream(&self, name: Option<&str>, handle: Option<StreamHandle>) {
        self.ensure_initialized();
        facility_event!(
            stream = name.unwrap_or(crate::DEFAULT_STREAM),
            removed = handle.is_none(),
            "updating stream"
        );
        if let Some(facility) = self.lock_state().as_mut() {
            facility.registry.set(name, handle);
        }
    }

    /// Registers a raw byte writer for `name`, wrapping it in a text adapter.
    ///
    /// `encoding` defaults to the encoding the facility was initialized with
    /// (UTF-8 unless configured otherwise). Passing `None` as the writer
    /// clears the stream exactly like [`set_stream`](Self::set_stream).
    pub fn set_stream_writer<W>(
        &self,
        name: Option<&str>,
        writer: Option<W>,
        encoding: Option<TextEncoding>,
    ) where
        W: Write + Send + 'static,
    {
        let handle = writer.map(|writer| {
            let encoding = encoding.unwrap_or_else(|| self.default_encoding());
            EncodedWriter::with_encoding(writer, encoding).into_handle()
        });
        self.set_stream(name, handle);
    }

    /// Resolves the stream for `name`.
    ///
    /// Registered names return their stream, cleared names return `None`,
    /// and everything else (including the default name) returns the default
    /// stream.
    pub fn lookup(&self, name: Option<&str>) -> Option<StreamHandle> {
        self.ensure_initialized();
        self.lock_state()
            .as_ref()
            .and_then(|facility| facility.registry.lookup(name))
    }

    /// Flushes the stream `name` resolves to.
    ///
    /// Flushing is best-effort: a missing stream is ignored and flush
    /// failures are discarded without being reported anywhere.
    pub fn flush(&self, name: Option<&str>) {
        if let Some(stream) = self.lookup(name) {
            let _ = stream.flush();
        }
    }

    /// Names with a live stream registration, sorted.
    pub fn stream_names(&self) -> Vec<String> {
        self.ensure_initialized();
        self.lock_state()
            .as_ref()
            .map(|facility| facility.registry.names())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Logs the message `key` resolved with `params`.
    ///
    /// Nothing is resolved or allocated when `severity` is disabled. The
    /// `stream` name travels with the record to the [`LevelSink`]; the
    /// default sink writes every record to the default stream.
    ///
    /// # Errors
    ///
    /// - [`LoggingError::ResourceResolution`] when the resolver fails;
    /// - [`LoggingError::SinkIo`] when writing the record fails.
    pub fn log<R>(
        &self,
        severity: Severity,
        resolver: &R,
        key: &str,
        params: &[&dyn fmt::Display],
        cause: Option<&(dyn Error + 'static)>,
        stream: Option<&str>,
    ) -> Result<()>
    where
        R: MessageResolver + ?Sized,
    {
        if !self.is_enabled(severity) {
            return Ok(());
        }
        let text = compose::compose(resolver, key, params, self.annotates_threads())?;
        self.dispatch(severity, &text, cause, stream)
    }

    /// Logs a message key that takes no parameters.
    pub fn log_key<R>(&self, severity: Severity, resolver: &R, key: &str) -> Result<()>
    where
        R: MessageResolver + ?Sized,
    {
        self.log(severity, resolver, key, &[], None, None)
    }

    /// Logs a message key together with the error that caused it.
    pub fn log_with_cause<R>(
        &self,
        severity: Severity,
        resolver: &R,
        key: &str,
        params: &[&dyn fmt::Display],
        cause: &(dyn Error + 'static),
    ) -> Result<()>
    where
        R: MessageResolver + ?Sized,
    {
        self.log(severity, resolver, key, params, Some(cause), None)
    }

    /// Logs pre-formatted text without consulting a resolver.
    ///
    /// # Errors
    ///
    /// [`LoggingError::SinkIo`] when writing the record fails.
    pub fn log_direct_message(
        &self,
        severity: Severity,
        stream: Option<&str>,
        text: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) -> Result<()> {
        if !self.is_enabled(severity) {
            return Ok(());
        }
        let text = compose::annotate(text.to_owned(), self.annotates_threads());
        self.dispatch(severity, &text, cause, stream)
    }

    fn dispatch(
        &self,
        severity: Severity,
        text: &str,
        cause: Option<&(dyn Error + 'static)>,
        stream: Option<&str>,
    ) -> Result<()> {
        let destination = self
            .lock_state()
            .as_ref()
            .and_then(|facility| facility.registry.default_stream());
        let record = Record {
            severity,
            text,
            cause,
            stream,
        };
        self.sink()
            .emit(&record, destination.as_ref())
            .map_err(LoggingError::SinkIo)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn annotates_threads(&self) -> bool {
        self.show_thread_name.load(Ordering::Acquire)
    }

    fn default_encoding(&self) -> TextEncoding {
        self.ensure_initialized();
        self.lock_state()
            .as_ref()
            .map(|facility| facility.encoding)
            .unwrap_or_default()
    }

    fn sink(&self) -> &dyn LevelSink {
        self.level_sink
            .get_or_init(|| Box::new(StreamLevelSink::default()))
            .as_ref()
    }

    fn lock_state(&self) -> MutexGuard<'_, Option<Facility>> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("initialized", &self.is_initialized())
            .field("show_thread_name", &self.annotates_threads())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DEFAULT_STREAM;
    use crate::resolver::{MapResolver, ResolveError};
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use test_support::{FailingWriter, SharedBuffer};

    #[derive(Default)]
    struct CountingResolver {
        calls: AtomicUsize,
    }

    impl CountingResolver {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MessageResolver for CountingResolver {
        fn resolve(
            &self,
            key: &str,
            params: &[&dyn fmt::Display],
        ) -> std::result::Result<String, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
            Ok(format!("{key}({})", rendered.join(",")))
        }
    }

    fn quiet_config() -> LoggerConfig {
        LoggerConfig::default().with_timestamps(false)
    }

    fn logger_with_buffer(config: LoggerConfig) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Logger::new();
        assert!(logger.initialize_with_writer(config, buffer.clone()));
        (logger, buffer)
    }

    #[test]
    fn starts_uninitialized() {
        let logger = Logger::new();
        assert!(!logger.is_initialized());
        assert!(format!("{logger:?}").contains("initialized: false"));
    }

    #[test]
    fn second_initialize_is_ignored() {
        let (logger, _buffer) = logger_with_buffer(quiet_config().with_threshold(Severity::Debug));
        let other = SharedBuffer::new();
        let second = logger.initialize_with_writer(
            quiet_config().with_threshold(Severity::Error),
            other.clone(),
        );

        assert!(!second);
        assert_eq!(logger.verbosity(), Severity::Debug);
        logger
            .log_direct_message(Severity::Info, None, "still first", None)
            .unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn first_use_initializes_with_defaults() {
        let logger = Logger::new();
        assert_eq!(logger.verbosity(), Severity::Info);
        assert!(logger.is_initialized());
        assert!(logger.lookup(Some(DEFAULT_STREAM)).is_some());
    }

    #[test]
    fn set_verbosity_before_init_initializes() {
        let logger = Logger::new();
        logger.set_verbosity(Severity::FullDebug);
        assert!(logger.is_initialized());
        assert_eq!(logger.verbosity(), Severity::FullDebug);
    }

    #[test]
    fn set_verbosity_after_init_replaces_threshold() {
        let (logger, _buffer) = logger_with_buffer(quiet_config());
        logger.set_verbosity_rank(400);
        assert_eq!(logger.verbosity(), Severity::Debug);
        logger.set_verbosity_spec("warning").unwrap();
        assert_eq!(logger.verbosity(), Severity::Warning);
    }

    #[test]
    fn bad_verbosity_spec_leaves_threshold() {
        let (logger, _buffer) = logger_with_buffer(quiet_config());
        assert!(logger.set_verbosity_spec("shouty").is_err());
        assert_eq!(logger.verbosity(), Severity::Info);
    }

    #[test]
    fn disabled_levels_skip_resolution() {
        let (logger, buffer) = logger_with_buffer(quiet_config().with_threshold(Severity::Warning));
        let resolver = CountingResolver::default();

        for severity in [Severity::Info, Severity::Speed, Severity::Debug, Severity::FullDebug] {
            logger
                .log(severity, &resolver, "Skipped", &[&1], None, None)
                .unwrap();
        }

        assert_eq!(resolver.calls(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn enabled_levels_resolve_once() {
        let (logger, buffer) = logger_with_buffer(quiet_config());
        let resolver = CountingResolver::default();
        logger
            .log(Severity::Info, &resolver, "Started", &[&"a", &2], None, None)
            .unwrap();

        assert_eq!(resolver.calls(), 1);
        assert_eq!(buffer.lines(), vec!["INFO: Started(a,2)"]);
    }

    #[test]
    fn resolver_failures_propagate() {
        let (logger, buffer) = logger_with_buffer(quiet_config());
        let err = logger
            .log_key(Severity::Error, &MapResolver::new(), "Unknown.Key")
            .unwrap_err();

        assert!(matches!(err, LoggingError::ResourceResolution(ResolveError::MissingKey { .. })));
        assert!(buffer.is_empty());
    }

    #[test]
    fn write_failures_propagate() {
        let logger = Logger::new();
        logger.initialize_with_writer(quiet_config(), FailingWriter::new());
        let err = logger
            .log_direct_message(Severity::Error, None, "lost", None)
            .unwrap_err();
        assert!(matches!(err, LoggingError::SinkIo(_)));
    }

    #[test]
    fn dispatch_does_not_flush() {
        let (logger, buffer) = logger_with_buffer(quiet_config());
        logger
            .log_direct_message(Severity::Warning, None, "no flush", None)
            .unwrap();
        assert_eq!(buffer.flush_count(), 0);

        logger.flush(None);
        assert_eq!(buffer.flush_count(), 1);
    }

    #[test]
    fn cause_is_rendered_after_text() {
        let (logger, buffer) = logger_with_buffer(quiet_config());
        let resolver = MapResolver::new().with("Deploy.Failed", "could not deploy [#0]");
        let cause = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        logger
            .log_with_cause(Severity::Error, &resolver, "Deploy.Failed", &[&"app.war"], &cause)
            .unwrap();

        assert_eq!(
            buffer.lines(),
            vec!["ERROR: could not deploy app.war", "Caused by: permission denied"]
        );
    }

    #[test]
    fn thread_annotation_prefixes_messages() {
        let (logger, buffer) = logger_with_buffer(quiet_config().with_thread_names(true));
        let logger = Arc::new(logger);
        let worker = {
            let logger = Arc::clone(&logger);
            std::thread::Builder::new()
                .name("request-7".to_owned())
                .spawn(move || logger.log_direct_message(Severity::Info, None, "served", None))
                .unwrap()
        };
        worker.join().unwrap().unwrap();

        assert_eq!(buffer.lines(), vec!["INFO: [request-7] - served"]);
    }

    #[test]
    fn set_stream_writer_uses_configured_encoding() {
        let (logger, _buffer) = logger_with_buffer(
            quiet_config().with_encoding(TextEncoding::for_label("latin1").unwrap()),
        );
        logger.set_stream_writer(Some("access"), Some(Vec::new()), None);
        let stream = logger.lookup(Some("access")).unwrap();
        assert_eq!(stream.encoding().name(), "windows-1252");

        logger.set_stream_writer(Some("utf"), Some(Vec::new()), Some(TextEncoding::utf8()));
        assert!(logger.lookup(Some("utf")).unwrap().encoding().is_utf8());
    }

    #[test]
    fn set_stream_writer_none_clears() {
        let (logger, _buffer) = logger_with_buffer(quiet_config());
        logger.set_stream_writer(Some("audit"), Some(Vec::new()), None);
        logger.set_stream_writer::<Vec<u8>>(Some("audit"), None, None);
        assert!(logger.lookup(Some("audit")).is_none());
        assert!(logger.stream_names().is_empty());
    }

    #[test]
    fn flush_swallows_failures() {
        let logger = Logger::new();
        let failing = FailingWriter::flush_only();
        logger.initialize_with_writer(quiet_config(), failing.clone());

        logger.flush(Some(DEFAULT_STREAM));
        logger.flush(Some("unregistered"));
        assert_eq!(failing.flush_attempts(), 2);
    }

    #[test]
    fn flush_of_removed_stream_is_a_no_op() {
        let (logger, buffer) = logger_with_buffer(quiet_config());
        logger.set_stream(Some("gone"), None);
        logger.flush(Some("gone"));
        assert_eq!(buffer.flush_count(), 0);
    }

    #[test]
    fn cleared_default_drops_records() {
        let (logger, buffer) = logger_with_buffer(quiet_config());
        logger.set_stream(None, None);
        logger
            .log_direct_message(Severity::Error, None, "dropped", None)
            .unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn custom_level_sink_receives_stream_name() {
        #[derive(Default)]
        struct Capture {
            seen: Mutex<Vec<(Severity, String, Option<String>)>>,
        }

        impl LevelSink for Arc<Capture> {
            fn is_enabled(&self, severity: Severity) -> bool {
                severity.is_enabled_under(Severity::ShowAll)
            }
            fn threshold(&self) -> Severity {
                Severity::ShowAll
            }
            fn set_threshold(&self, _threshold: Severity) {}
            fn emit(&self, record: &Record<'_>, _destination: Option<&StreamHandle>) -> io::Result<()> {
                self.seen.lock().unwrap().push((
                    record.severity,
                    record.text.to_owned(),
                    record.stream.map(str::to_owned),
                ));
                Ok(())
            }
        }

        let capture = Arc::new(Capture::default());
        let logger = Logger::with_level_sink(Arc::clone(&capture));
        logger.initialize(quiet_config(), None);
        logger
            .log_direct_message(Severity::FullDebug, Some("access"), "hit", None)
            .unwrap();

        let seen = capture.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(Severity::FullDebug, "hit".to_owned(), Some("access".to_owned()))]
        );
    }
}
