//! crates/logging/src/registry.rs
//! Named output streams with a distinguished default.

use std::collections::HashMap;

use logging_sink::StreamHandle;

/// Reserved name of the default stream.
///
/// The default stream lives in its own slot; this name is never stored as a
/// key of the named map.
pub const DEFAULT_STREAM: &str = "Winstone";

/// Mapping from stream names to output handles.
///
/// Three states are distinguished for a name:
///
/// - registered: lookups return its handle;
/// - removed (registered, then cleared): lookups return `None`;
/// - never registered: lookups fall back to the default handle.
///
/// The registry itself is not synchronised; [`Logger`](crate::Logger) keeps it
/// behind the facility lock.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{DEFAULT_STREAM, StreamRegistry};
/// use logging_sink::EncodedWriter;
///
/// let default = EncodedWriter::new(Vec::new()).into_handle();
/// let access = EncodedWriter::new(Vec::new()).into_handle();
///
/// let mut registry = StreamRegistry::new(Some(Arc::clone(&default)));
/// registry.set(Some("access"), Some(Arc::clone(&access)));
///
/// assert!(Arc::ptr_eq(&registry.lookup(Some("access")).unwrap(), &access));
/// assert!(Arc::ptr_eq(&registry.lookup(Some("other")).unwrap(), &default));
/// assert!(Arc::ptr_eq(&registry.lookup(Some(DEFAULT_STREAM)).unwrap(), &default));
///
/// registry.set(Some("access"), None);
/// assert!(registry.lookup(Some("access")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StreamRegistry {
    default: Option<StreamHandle>,
    // `None` marks a name whose stream was explicitly cleared.
    named: HashMap<String, Option<StreamHandle>>,
}

impl StreamRegistry {
    /// Creates a registry whose default slot holds `default`.
    #[must_use]
    pub fn new(default: Option<StreamHandle>) -> Self {
        Self {
            default,
            named: HashMap::new(),
        }
    }

    /// Reports whether `name` addresses the default slot.
    ///
    /// A missing name is treated as the default, matching callers that pass
    /// no stream name at all.
    #[must_use]
    pub fn is_default_name(name: Option<&str>) -> bool {
        name.is_none_or(|name| name == DEFAULT_STREAM)
    }

    /// Registers, replaces or clears the stream for `name`.
    ///
    /// The default slot is replaced in place, including with `None`. For any
    /// other name, `None` marks the stream as removed so later lookups do not
    /// fall back to the default.
    ///
    /// Removal markers are never pruned: clearing a name, even one that was
    /// never registered, keeps an entry for it for the registry's lifetime.
    pub fn set(&mut self, name: Option<&str>, handle: Option<StreamHandle>) {
        match name {
            None | Some(DEFAULT_STREAM) => self.default = handle,
            Some(name) => {
                self.named.insert(name.to_owned(), handle);
            }
        }
    }

    /// Resolves the handle for `name`.
    #[must_use]
    pub fn lookup(&self, name: Option<&str>) -> Option<StreamHandle> {
        if Self::is_default_name(name) {
            return self.default.clone();
        }

        match name.and_then(|name| self.named.get(name)) {
            Some(entry) => entry.clone(),
            None => self.default.clone(),
        }
    }

    /// Returns the default handle.
    #[must_use]
    pub fn default_stream(&self) -> Option<StreamHandle> {
        self.default.clone()
    }

    /// Reports whether `name` was registered and later cleared.
    #[must_use]
    pub fn is_removed(&self, name: &str) -> bool {
        matches!(self.named.get(name), Some(None))
    }

    /// Names with a live registration, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .named
            .iter()
            .filter(|(_, handle)| handle.is_some())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }
}
