//! crates/logging/src/macros.rs
//! Convenience macros around the dispatch entry points.

/// Logs a resolved message with positional parameters.
///
/// Expands to [`Logger::log`](crate::Logger::log) with the parameters
/// collected into a slice, no cause and no target stream. Use the method
/// directly when a cause or stream name is needed.
///
/// # Example
///
/// ```
/// use logging::{Logger, LoggerConfig, MapResolver, Severity, status_log};
/// use test_support::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new();
/// logger.initialize_with_writer(LoggerConfig::default().with_timestamps(false), buffer.clone());
///
/// let resolver = MapResolver::new().with("Session.Expired", "session [#0] expired after [#1]s");
/// status_log!(logger, Severity::Info, &resolver, "Session.Expired", "a1b2", 1800)?;
///
/// assert_eq!(buffer.to_string_lossy(), "INFO: session a1b2 expired after 1800s\n");
/// # Ok::<(), logging::LoggingError>(())
/// ```
#[macro_export]
macro_rules! status_log {
    ($logger:expr, $severity:expr, $resolver:expr, $key:expr $(, $param:expr)* $(,)?) => {
        $logger.log(
            $severity,
            $resolver,
            $key,
            &[$(&$param as &dyn ::std::fmt::Display),*],
            ::std::option::Option::None,
            ::std::option::Option::None,
        )
    };
}

/// Reports a lifecycle event of the facility itself through `tracing`.
#[cfg(feature = "tracing")]
macro_rules! facility_event {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: $crate::FACILITY_TARGET, $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! facility_event {
    ($($arg:tt)*) => {};
}

pub(crate) use facility_event;
