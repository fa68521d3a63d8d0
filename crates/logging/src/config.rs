//! crates/logging/src/config.rs
//! Facility configuration applied by the one-time initialization.

use logging_sink::{LineMode, LineRenderer, TextEncoding};

use crate::error::LoggingError;
use crate::levels::{Severity, parse_verbosity};

/// Settings established when a [`Logger`](crate::Logger) initializes.
///
/// The default configuration matches implicit initialization: `INFO`
/// verbosity, UTF-8 text, no thread annotation, timestamped lines that end
/// with a newline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Verbosity threshold.
    pub threshold: Severity,
    /// Encoding for raw writers wrapped without an explicit encoding.
    pub encoding: TextEncoding,
    /// Prefix each message with the emitting thread's name.
    pub show_thread_name: bool,
    /// Prefix each line with a UTC timestamp.
    pub timestamps: bool,
    /// Terminator policy for rendered lines.
    pub line_mode: LineMode,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Info,
            encoding: TextEncoding::default(),
            show_thread_name: false,
            timestamps: true,
            line_mode: LineMode::WithNewline,
        }
    }
}

impl LoggerConfig {
    /// Sets the verbosity threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the default text encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enables or disables thread-name annotation.
    #[must_use]
    pub const fn with_thread_names(mut self, show_thread_name: bool) -> Self {
        self.show_thread_name = show_thread_name;
        self
    }

    /// Enables or disables timestamps.
    #[must_use]
    pub const fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Sets the line terminator policy.
    #[must_use]
    pub const fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Builds the line renderer described by this configuration.
    #[must_use]
    pub const fn renderer(&self) -> LineRenderer {
        LineRenderer::new()
            .with_timestamps(self.timestamps)
            .with_line_mode(self.line_mode)
    }

    /// Parses a comma separated `key=value` spec on top of the defaults.
    ///
    /// Recognised keys are `level`, `thread`, `encoding`, `timestamps` and
    /// `newline`. A token without `=` is read as a level.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{LoggerConfig, Severity};
    ///
    /// let config = LoggerConfig::from_spec("level=debug, thread=on, timestamps=off")?;
    /// assert_eq!(config.threshold, Severity::Debug);
    /// assert!(config.show_thread_name);
    /// assert!(!config.timestamps);
    ///
    /// assert_eq!(LoggerConfig::from_spec("WARNING")?.threshold, Severity::Warning);
    /// # Ok::<(), logging::LoggingError>(())
    /// ```
    pub fn from_spec(spec: &str) -> Result<Self, LoggingError> {
        let mut config = Self::default();
        for token in spec.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            config.apply_token(token)?;
        }
        Ok(config)
    }

    /// Applies a single `key=value` token.
    pub fn apply_token(&mut self, token: &str) -> Result<(), LoggingError> {
        let Some((key, value)) = token.split_once('=') else {
            self.threshold = parse_verbosity(token)?;
            return Ok(());
        };

        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "level" | "verbosity" => self.threshold = parse_verbosity(value)?,
            "encoding" | "charset" => self.encoding = TextEncoding::for_label(value)?,
            "thread" | "threads" => self.show_thread_name = parse_switch(token, value)?,
            "timestamps" | "time" => self.timestamps = parse_switch(token, value)?,
            "newline" => self.line_mode = LineMode::from(parse_switch(token, value)?),
            other => {
                return Err(LoggingError::invalid_configuration(
                    token,
                    format!("unknown setting: {other}"),
                ));
            }
        }
        Ok(())
    }
}

fn parse_switch(token: &str, value: &str) -> Result<bool, LoggingError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(LoggingError::invalid_configuration(
            token,
            format!("expected on/off, got {value:?}"),
        )),
    }
}
