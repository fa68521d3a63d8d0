//! crates/logging/src/compose.rs
//! Message composition: key resolution and thread annotation.

use std::fmt;
use std::thread;

use crate::resolver::{MessageResolver, ResolveError};

/// Name used to annotate messages from the current thread.
///
/// Unnamed threads are identified by their [`ThreadId`](std::thread::ThreadId).
#[must_use]
pub fn current_thread_label() -> String {
    let current = thread::current();
    match current.name() {
        Some(name) => name.to_owned(),
        None => format!("{:?}", current.id()),
    }
}

/// Prefixes `text` with `"[<thread>] - "` when `annotate` is set.
#[must_use]
pub fn annotate(text: String, annotate: bool) -> String {
    if annotate {
        format!("[{}] - {text}", current_thread_label())
    } else {
        text
    }
}

/// Resolves `key` through `resolver` and applies thread annotation.
pub fn compose<R>(
    resolver: &R,
    key: &str,
    params: &[&dyn fmt::Display],
    annotate_thread: bool,
) -> Result<String, ResolveError>
where
    R: MessageResolver + ?Sized,
{
    let text = resolver.resolve(key, params)?;
    Ok(annotate(text, annotate_thread))
}
