//! crates/logging-sink/src/render.rs
//! Rendering of level-tagged records into output lines.

use std::error::Error;
use std::fmt::Write as _;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::line_mode::LineMode;

/// Timestamp prefix written in front of every record when timestamps are enabled.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Renders records as `"<timestamp> <LABEL>: <text>"`.
///
/// Each error in a cause's `source()` chain is appended on its own
/// `Caused by:` line. The [`LineMode`] only controls the terminator of the
/// final line.
///
/// # Examples
///
/// ```
/// use logging_sink::{LineMode, LineRenderer};
///
/// let renderer = LineRenderer::new().with_timestamps(false);
/// assert_eq!(renderer.render("ERROR", "boom", None), "ERROR: boom\n");
///
/// let renderer = renderer.with_line_mode(LineMode::WithoutNewline);
/// assert_eq!(renderer.render("INFO", "ready", None), "INFO: ready");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineRenderer {
    timestamps: bool,
    line_mode: LineMode,
}

impl LineRenderer {
    /// Creates a renderer with timestamps and newline terminators.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timestamps: true,
            line_mode: LineMode::WithNewline,
        }
    }

    /// Enables or disables the timestamp prefix.
    #[must_use]
    pub const fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Selects the terminator policy.
    #[must_use]
    pub const fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Reports whether timestamps are rendered.
    #[must_use]
    pub const fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// Returns the terminator policy.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Renders a record stamped with the current UTC time.
    #[must_use]
    pub fn render(&self, label: &str, text: &str, cause: Option<&(dyn Error + 'static)>) -> String {
        self.render_at(OffsetDateTime::now_utc(), label, text, cause)
    }

    /// Renders a record stamped with `now`.
    #[must_use]
    pub fn render_at(
        &self,
        now: OffsetDateTime,
        label: &str,
        text: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) -> String {
        let mut line = String::with_capacity(label.len() + text.len() + 24);

        if self.timestamps {
            if let Ok(stamp) = now.format(TIMESTAMP_FORMAT) {
                line.push_str(&stamp);
                line.push(' ');
            }
        }
        line.push_str(label);
        line.push_str(": ");
        line.push_str(text);

        let mut next = cause;
        while let Some(error) = next {
            let _ = write!(line, "\nCaused by: {error}");
            next = error.source();
        }

        if self.line_mode.append_newline() {
            line.push('\n');
        }
        line
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}
