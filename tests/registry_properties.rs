//! Property tests for stream resolution through the umbrella crate.
//!
//! For arbitrary stream names: a name never registered resolves to the
//! default stream, and a cleared name resolves to nothing.

use std::sync::Arc;

use proptest::prelude::*;
use status_log::{DEFAULT_STREAM, EncodedWriter, Logger, LoggerConfig, StreamHandle};

fn handle() -> StreamHandle {
    EncodedWriter::new(Vec::new()).into_handle()
}

fn logger_with_default() -> (Logger, StreamHandle) {
    let default = handle();
    let logger = Logger::new();
    logger.initialize(
        LoggerConfig::default().with_timestamps(false),
        Some(Arc::clone(&default)),
    );
    (logger, default)
}

proptest! {
    /// Unregistered names fall back to the default stream.
    #[test]
    fn unregistered_names_fall_back(name in "[a-zA-Z0-9._-]{1,24}") {
        let (logger, default) = logger_with_default();
        let resolved = logger.lookup(Some(name.as_str()));
        prop_assert!(resolved.is_some_and(|stream| Arc::ptr_eq(&stream, &default)));
    }

    /// Cleared names stop resolving, unless they address the default slot.
    #[test]
    fn cleared_names_do_not_fall_back(
        names in proptest::collection::hash_set("[a-z]{1,12}", 1..8),
    ) {
        let (logger, default) = logger_with_default();
        for name in &names {
            logger.set_stream(Some(name.as_str()), Some(handle()));
            logger.set_stream(Some(name.as_str()), None);
        }

        for name in &names {
            prop_assert!(logger.lookup(Some(name.as_str())).is_none());
        }
        prop_assert!(logger.stream_names().is_empty());
        let fallback = logger.lookup(Some(DEFAULT_STREAM));
        prop_assert!(fallback.is_some_and(|stream| Arc::ptr_eq(&stream, &default)));
    }
}
