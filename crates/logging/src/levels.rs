//! crates/logging/src/levels.rs
//! Severity vocabulary shared by verbosity thresholds and individual messages.

use std::fmt;
use std::str::FromStr;

use crate::error::LoggingError;

/// Ordered message severity.
///
/// Variants are declared from "suppress everything" to "show everything", so
/// the derived [`Ord`] ranks more verbose severities greater. The same type
/// tags individual messages and configures the verbosity threshold.
///
/// Each severity also carries a numeric urgency [`rank`](Self::rank). Higher
/// ranks are more urgent; a message is shown when its rank is not lower than
/// the threshold's rank, unless the threshold is [`Severity::SuppressAll`].
///
/// # Examples
///
/// ```
/// use logging::Severity;
///
/// assert!(Severity::Error.is_enabled_under(Severity::Info));
/// assert!(!Severity::Debug.is_enabled_under(Severity::Info));
/// assert!(!Severity::Error.is_enabled_under(Severity::SuppressAll));
/// assert!(Severity::FullDebug > Severity::Warning);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Severity {
    /// Threshold that disables every message.
    SuppressAll,
    /// Failures that need attention.
    Error,
    /// Unexpected but recoverable conditions.
    Warning,
    /// Normal status messages.
    #[default]
    Info,
    /// Timing and throughput details.
    Speed,
    /// Developer diagnostics.
    Debug,
    /// Exhaustive developer diagnostics.
    FullDebug,
    /// Threshold that enables every message.
    ShowAll,
}

impl Severity {
    /// Every severity, from least to most verbose.
    pub const ALL: [Self; 8] = [
        Self::SuppressAll,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Speed,
        Self::Debug,
        Self::FullDebug,
        Self::ShowAll,
    ];

    /// Numeric urgency rank; larger is more urgent.
    #[must_use]
    pub const fn rank(self) -> i32 {
        match self {
            Self::SuppressAll => i32::MAX,
            Self::Error => 1000,
            Self::Warning => 900,
            Self::Info => 800,
            Self::Speed => 500,
            Self::Debug => 400,
            Self::FullDebug => 300,
            Self::ShowAll => i32::MIN,
        }
    }

    /// Maps an arbitrary integer threshold onto the vocabulary.
    ///
    /// Returns the most verbose severity whose rank is at least `rank`. Since
    /// messages only carry the eight ranks of the vocabulary, the result
    /// enables exactly the messages the raw integer would have enabled.
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::from_rank(800), Severity::Info);
    /// assert_eq!(Severity::from_rank(700), Severity::Info);
    /// assert_eq!(Severity::from_rank(1001), Severity::SuppressAll);
    /// assert_eq!(Severity::from_rank(i32::MIN), Severity::ShowAll);
    /// ```
    #[must_use]
    pub fn from_rank(rank: i32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|severity| severity.rank() >= rank)
            .unwrap_or(Self::SuppressAll)
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuppressAll => "SUPPRESS_ALL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Speed => "SPEED",
            Self::Debug => "DEBUG",
            Self::FullDebug => "FULL_DEBUG",
            Self::ShowAll => "SHOW_ALL",
        }
    }

    /// Reports whether a message at this severity passes `threshold`.
    #[must_use]
    pub const fn is_enabled_under(self, threshold: Self) -> bool {
        !matches!(threshold, Self::SuppressAll) && self.rank() >= threshold.rank()
    }

    fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_uppercase().replace('-', "_");
        let severity = match normalized.as_str() {
            "SUPPRESS_ALL" | "OFF" | "MIN" => Self::SuppressAll,
            "ERROR" | "SEVERE" => Self::Error,
            "WARNING" | "WARN" => Self::Warning,
            "INFO" => Self::Info,
            "SPEED" | "FINE" => Self::Speed,
            "DEBUG" | "FINER" => Self::Debug,
            "FULL_DEBUG" | "FINEST" => Self::FullDebug,
            "SHOW_ALL" | "ALL" | "MAX" => Self::ShowAll,
            _ => return None,
        };
        Some(severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = LoggingError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_verbosity(spec)
    }
}

/// Parses a verbosity spec given either as a severity name or as a decimal rank.
///
/// Names are case-insensitive and `-` may stand in for `_`. Integer specs
/// go through [`Severity::from_rank`].
///
/// # Errors
///
/// Returns [`LoggingError::InvalidConfiguration`] when the spec is empty,
/// names no known severity and is not a decimal integer.
///
/// # Examples
///
/// ```
/// use logging::{Severity, parse_verbosity};
///
/// assert_eq!(parse_verbosity("full-debug")?, Severity::FullDebug);
/// assert_eq!(parse_verbosity("SEVERE")?, Severity::Error);
/// assert_eq!(parse_verbosity("500")?, Severity::Speed);
/// assert!(parse_verbosity("chatty").is_err());
/// # Ok::<(), logging::LoggingError>(())
/// ```
pub fn parse_verbosity(spec: &str) -> Result<Severity, LoggingError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::invalid_configuration(spec, "empty verbosity spec"));
    }

    if let Ok(rank) = trimmed.parse::<i32>() {
        return Ok(Severity::from_rank(rank));
    }

    Severity::from_name(trimmed)
        .ok_or_else(|| LoggingError::invalid_configuration(spec, "unknown severity name"))
}
