//! Process-wide logger behaviour.
//!
//! [`Logger::global`] is shared by every test in a binary, so this file holds
//! a single test that walks through the whole lifecycle in order.

use status_log::{DEFAULT_STREAM, Logger, LoggerConfig, MapResolver, Severity, status_log};
use test_support::SharedBuffer;

/// Verifies the global logger initializes once and serves every thread.
#[test]
fn global_logger_lifecycle() {
    let logger = Logger::global();
    assert!(std::ptr::eq(logger, Logger::global()));

    let buffer = SharedBuffer::new();
    assert!(logger.initialize_with_writer(
        LoggerConfig::from_spec("level=info,thread=on,timestamps=off").unwrap(),
        buffer.clone(),
    ));
    assert!(!logger.initialize_with_level(Severity::ShowAll));
    assert_eq!(logger.verbosity(), Severity::Info);

    let resolver = MapResolver::new().with("Boot.Done", "booted in [#0] ms");
    std::thread::Builder::new()
        .name("boot".to_owned())
        .spawn(move || {
            status_log!(Logger::global(), Severity::Info, &resolver, "Boot.Done", 42)
        })
        .unwrap()
        .join()
        .unwrap()
        .unwrap();

    Logger::global().set_verbosity_spec("SEVERE").unwrap();
    Logger::global()
        .log_direct_message(Severity::Warning, Some(DEFAULT_STREAM), "hidden", None)
        .unwrap();

    assert_eq!(buffer.lines(), vec!["INFO: [boot] - booted in 42 ms"]);
}
