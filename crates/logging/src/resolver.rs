//! crates/logging/src/resolver.rs
//! Resolution of message keys into display text.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

/// Failure to turn a message key into text.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The resolver has no template for the key.
    #[error("no message registered for key {key:?}")]
    MissingKey {
        /// The unknown key.
        key: String,
    },
    /// The template exists but could not be formatted.
    #[error("cannot format message {key:?}: {reason}")]
    Format {
        /// The key being formatted.
        key: String,
        /// Why formatting failed.
        reason: String,
    },
}

/// Maps a message key plus positional parameters to formatted text.
///
/// Implementations typically front a localized resource bundle. The facade
/// only calls [`resolve`](Self::resolve) after the severity gate has passed,
/// so expensive lookups are never paid for disabled messages.
pub trait MessageResolver {
    /// Produces the text for `key`, substituting `params` in order.
    ///
    /// A single parameter is passed as a one-element slice.
    fn resolve(&self, key: &str, params: &[&dyn fmt::Display]) -> Result<String, ResolveError>;
}

/// In-memory resolver backed by a key to template map.
///
/// Templates reference parameters as `[#0]`, `[#1]`, ... Placeholders whose
/// index has no matching parameter are kept verbatim.
///
/// # Examples
///
/// ```
/// use logging::{MapResolver, MessageResolver};
///
/// let resolver = MapResolver::new()
///     .with("Listener.Started", "[#0] listener started on port [#1]");
///
/// let text = resolver.resolve("Listener.Started", &[&"HTTP", &8080])?;
/// assert_eq!(text, "HTTP listener started on port 8080");
/// assert!(resolver.resolve("Listener.Stopped", &[]).is_err());
/// # Ok::<(), logging::ResolveError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    templates: HashMap<String, String>,
}

impl MapResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, consuming and returning the resolver.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Reports whether no templates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(key, template)| (key.into(), template.into()))
                .collect(),
        }
    }
}

impl MessageResolver for MapResolver {
    fn resolve(&self, key: &str, params: &[&dyn fmt::Display]) -> Result<String, ResolveError> {
        let template = self
            .templates
            .get(key)
            .ok_or_else(|| ResolveError::MissingKey {
                key: key.to_owned(),
            })?;

        substitute(template, params).map_err(|_| ResolveError::Format {
            key: key.to_owned(),
            reason: "a parameter failed to display".to_owned(),
        })
    }
}

/// Replaces `[#N]` placeholders in `template` with `params[N]`.
fn substitute(template: &str, params: &[&dyn fmt::Display]) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("[#") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let closed = digits > 0 && after.as_bytes().get(digits) == Some(&b']');
        let param = if closed {
            after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
        } else {
            None
        };

        match param {
            Some(param) => {
                write!(out, "{param}")?;
                rest = &after[digits + 1..];
            }
            None => {
                out.push_str("[#");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}
