//! Log sinks receiving one line per finished command.

/// Destination for command log lines.
///
/// The interceptor writes at most one line per finished command: successful
/// commands go to [`info`](CommandSink::info), failed ones to
/// [`error`](CommandSink::error). Messages are already formatted.
pub trait CommandSink: Send + Sync {
    /// Writes a line for a successful command.
    fn info(&self, message: &str);

    /// Writes a line for a failed command.
    fn error(&self, message: &str);
}

/// Sink forwarding command lines to `tracing` under the `redline::command` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl CommandSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "redline::command", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "redline::command", "{message}");
    }
}
