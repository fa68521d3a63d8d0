//! crates/logging/src/tracing_bridge.rs
//! Bridge from the tracing crate into the logging facade.
//!
//! This module provides a tracing-subscriber layer that forwards tracing
//! events to a [`Logger`] as direct messages. Libraries instrumented with the
//! standard macros (`trace!`, `debug!`, `info!`, `warn!`, `error!`) then end up
//! in the same destinations, and under the same verbosity, as messages logged
//! through the facade.
//!
//! # Mapping
//!
//! | tracing | facade |
//! |---|---|
//! | `ERROR` | [`Severity::Error`] |
//! | `WARN` | [`Severity::Warning`] |
//! | `INFO` | [`Severity::Info`] |
//! | `DEBUG` | [`Severity::Debug`] |
//! | `TRACE` | [`Severity::FullDebug`] |
//!
//! The event target becomes the record's stream name. Events reported by the
//! facility itself (target [`FACILITY_TARGET`]) are never forwarded.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{Logger, init_tracing};
//!
//! init_tracing(Logger::global())?;
//! tracing::warn!(target: "deploy", "context reloaded");
//! ```

use std::fmt::{self, Write as _};
use std::ops::Deref;

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::levels::Severity;
use crate::logger::Logger;
use crate::FACILITY_TARGET;

/// A tracing layer that forwards events into a [`Logger`].
///
/// `L` is any shared reference to a logger: `&'static Logger` (for
/// [`Logger::global`]) or `Arc<Logger>`.
pub struct FacadeLayer<L> {
    logger: L,
}

impl<L> FacadeLayer<L>
where
    L: Deref<Target = Logger>,
{
    /// Creates a layer forwarding into `logger`.
    #[must_use]
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Map a tracing level to a facade severity.
    const fn severity_for(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warning,
            Level::INFO => Severity::Info,
            Level::DEBUG => Severity::Debug,
            // TRACE
            _ => Severity::FullDebug,
        }
    }
}

impl<S, L> Layer<S> for FacadeLayer<L>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    L: Deref<Target = Logger> + Send + Sync + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if target == FACILITY_TARGET {
            return;
        }

        let severity = Self::severity_for(metadata.level());
        if !self.logger.is_enabled(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let text = visitor.finish();

        // Nowhere left to report a failed write from inside a subscriber.
        let _ = self
            .logger
            .log_direct_message(severity, Some(target), &text, None);
    }
}

/// Visitor that renders the `message` field followed by `key=value` pairs.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Installs a global tracing subscriber that forwards into `logger`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing<L>(logger: L) -> Result<(), TryInitError>
where
    L: Deref<Target = Logger> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(FacadeLayer::new(logger))
        .try_init()
}

/// Installs a global tracing subscriber with an additional filter layer.
///
/// ```rust,ignore
/// use logging::{Logger, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(Logger::global(), EnvFilter::from_default_env())?;
/// ```
pub fn init_tracing_with_filter<L, F>(logger: L, filter: F) -> Result<(), TryInitError>
where
    L: Deref<Target = Logger> + Send + Sync + 'static,
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(FacadeLayer::new(logger))
        .try_init()
}
