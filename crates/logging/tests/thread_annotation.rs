//! Integration tests for thread-name annotation under concurrent logging.

use std::sync::Arc;
use std::thread;

use logging::{Logger, LoggerConfig, MapResolver, Severity};
use test_support::SharedBuffer;

const WORKERS: usize = 16;
const ROUNDS: usize = 25;

fn annotated_logger() -> (Arc<Logger>, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::new();
    logger.initialize_with_writer(
        LoggerConfig::default()
            .with_thread_names(true)
            .with_timestamps(false),
        buffer.clone(),
    );
    (Arc::new(logger), buffer)
}

/// Verifies each of N threads produces one line naming itself exactly once.
#[test]
fn concurrent_threads_each_name_themselves_once() {
    let (logger, buffer) = annotated_logger();
    let resolver = Arc::new(MapResolver::new().with("Worker.Done", "finished job [#0]"));

    let handles: Vec<_> = (0..WORKERS)
        .map(|index| {
            let logger = Arc::clone(&logger);
            let resolver = Arc::clone(&resolver);
            thread::Builder::new()
                .name(format!("worker-{index:02}"))
                .spawn(move || {
                    logger.log(
                        Severity::Info,
                        resolver.as_ref(),
                        "Worker.Done",
                        &[&index],
                        None,
                        None,
                    )
                })
                .unwrap()
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), WORKERS);
    for index in 0..WORKERS {
        let name = format!("[worker-{index:02}]");
        let matching: Vec<_> = lines.iter().filter(|line| line.contains(&name)).collect();
        assert_eq!(matching.len(), 1, "{name} in {lines:?}");
        assert_eq!(matching[0].matches(&name).count(), 1);
        assert_eq!(
            *matching[0],
            format!("INFO: [worker-{index:02}] - finished job {index}")
        );
    }
}

/// Verifies records from many threads never interleave inside a line.
#[test]
fn concurrent_records_stay_whole() {
    let (logger, buffer) = annotated_logger();

    thread::scope(|scope| {
        for index in 0..WORKERS {
            let logger = &logger;
            thread::Builder::new()
                .name(format!("writer-{index}"))
                .spawn_scoped(scope, move || {
                    for round in 0..ROUNDS {
                        logger
                            .log_direct_message(Severity::Warning, None, &format!("round {round}"), None)
                            .unwrap();
                    }
                })
                .unwrap();
        }
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), WORKERS * ROUNDS);
    for line in &lines {
        assert!(line.starts_with("WARNING: [writer-"), "{line}");
        assert_eq!(line.matches(" - round ").count(), 1, "{line}");
    }
}

/// Verifies annotation is off unless configured.
#[test]
fn annotation_disabled_by_default() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new();
    logger.initialize_with_writer(LoggerConfig::default().with_timestamps(false), buffer.clone());

    thread::Builder::new()
        .name("quiet".to_owned())
        .spawn(move || logger.log_direct_message(Severity::Info, None, "plain", None))
        .unwrap()
        .join()
        .unwrap()
        .unwrap();

    assert_eq!(buffer.lines(), vec!["INFO: plain"]);
}
