//! Command metrics.
//!
//! Enable the `metrics` feature to export these through the `metrics` facade.
//! Without it every recording function is an inlined no-op.
//!
//! ## Naming Pattern
//!
//! - `redline_commands_total` - finished commands per connection
//! - `redline_command_duration_seconds` - command wall time per connection
//! - `redline_command_errors_total` - failed commands per connection
//!
//! Every metric carries a `connection` label.

use std::time::Duration;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Metric name for finished commands counter.
    pub static ref COMMANDS_TOTAL: &'static str = {
        metrics::describe_counter!(
            "redline_commands_total",
            "Total number of finished commands per connection."
        );
        "redline_commands_total"
    };

    /// Metric name for command duration histogram.
    pub static ref COMMAND_DURATION: &'static str = {
        metrics::describe_histogram!(
            "redline_command_duration_seconds",
            metrics::Unit::Seconds,
            "Wall time of intercepted commands in seconds."
        );
        "redline_command_duration_seconds"
    };

    /// Metric name for failed commands counter.
    pub static ref COMMAND_ERRORS: &'static str = {
        metrics::describe_counter!(
            "redline_command_errors_total",
            "Total number of failed commands per connection."
        );
        "redline_command_errors_total"
    };
}

/// Record a finished command with its duration.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_command(connection: &str, duration: Duration) {
    metrics::counter!(*COMMANDS_TOTAL, "connection" => connection.to_string()).increment(1);
    metrics::histogram!(*COMMAND_DURATION, "connection" => connection.to_string())
        .record(duration.as_secs_f64());
}

/// Record a finished command (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_command(_connection: &str, _duration: Duration) {}

/// Record a failed command.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_command_error(connection: &str) {
    metrics::counter!(*COMMAND_ERRORS, "connection" => connection.to_string()).increment(1);
}

/// Record a failed command (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_command_error(_connection: &str) {}
