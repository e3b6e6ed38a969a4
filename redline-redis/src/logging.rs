//! Command logging around redis-rs async connections.

use redis::aio::ConnectionLike;
use redis::{Cmd, Pipeline, RedisError, RedisFuture, Value};
use redline_core::{Command, CommandInterceptor, NodeLabel};
use tracing::warn;

use crate::command::{logged_command, logged_pipeline};

/// Async connection that reports every command to a [`CommandInterceptor`].
///
/// Commands are delegated unchanged and their results returned as-is; the
/// interceptor only observes. Pipelines are logged as one `PIPELINE <count>`
/// command. A command whose future is dropped before completing, e.g. under
/// `tokio::time::timeout`, is recorded as failed with the error `cancelled`.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use redline_core::{CommandInterceptor, TracingSink};
/// use redline_redis::LoggingConnection;
///
/// # async fn run() -> redis::RedisResult<()> {
/// let client = redis::Client::open("redis://127.0.0.1/")?;
/// let connection = client.get_multiplexed_async_connection().await?;
/// let interceptor = CommandInterceptor::with_sink(Arc::new(TracingSink));
/// let mut connection = LoggingConnection::new(connection, interceptor, "primary");
///
/// let _: Option<String> = redis::cmd("GET").arg("user:1").query_async(&mut connection).await?;
/// assert_eq!(connection.interceptor().command_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LoggingConnection<C> {
    inner: C,
    interceptor: CommandInterceptor,
    label: NodeLabel,
}

impl<C> LoggingConnection<C> {
    /// Wraps `inner`, reporting its commands to `interceptor` under `label`.
    pub fn new(inner: C, interceptor: CommandInterceptor, label: impl Into<NodeLabel>) -> Self {
        Self {
            inner,
            interceptor,
            label: label.into(),
        }
    }

    /// The interceptor observing this connection.
    pub fn interceptor(&self) -> &CommandInterceptor {
        &self.interceptor
    }

    /// Label reported with every command.
    pub fn label(&self) -> &NodeLabel {
        &self.label
    }

    /// Reference to the wrapped connection.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwraps the connection, returning it with its interceptor.
    pub fn into_parts(self) -> (C, CommandInterceptor) {
        (self.inner, self.interceptor)
    }
}

/// Error recorded for a command whose future was dropped before completing.
const CANCELLED: &str = "cancelled";

/// Pairs a started command with its stop event.
///
/// Dropping the guard before [`finish`](InFlight::finish), as happens when the
/// command future is cancelled, stops the command with a `cancelled` error.
struct InFlight<'a> {
    interceptor: &'a mut CommandInterceptor,
    label: &'a NodeLabel,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn start(
        interceptor: &'a mut CommandInterceptor,
        label: &'a NodeLabel,
        command: Command,
    ) -> Self {
        interceptor.on_command_start(command, None, Some(label.as_str()));
        Self {
            interceptor,
            label,
            armed: true,
        }
    }

    fn finish(mut self, error: Option<&RedisError>) {
        self.armed = false;
        self.stop(error.map(ToString::to_string));
    }

    fn stop(&mut self, error: Option<String>) {
        if let Err(error) = self.interceptor.on_command_stop(error) {
            warn!(connection = %self.label, %error, "command record not finalized");
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(connection = %self.label, "command cancelled before completion");
            self.stop(Some(CANCELLED.to_owned()));
        }
    }
}

impl<C> ConnectionLike for LoggingConnection<C>
where
    C: ConnectionLike + Send,
{
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        Box::pin(async move {
            let Self {
                inner,
                interceptor,
                label,
            } = self;
            let in_flight = InFlight::start(interceptor, label, logged_command(cmd));
            let result = inner.req_packed_command(cmd).await;
            in_flight.finish(result.as_ref().err());
            result
        })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        cmd: &'a Pipeline,
        offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let Self {
                inner,
                interceptor,
                label,
            } = self;
            let in_flight = InFlight::start(interceptor, label, logged_pipeline(count));
            let result = inner.req_packed_commands(cmd, offset, count).await;
            in_flight.finish(result.as_ref().err());
            result
        })
    }

    fn get_db(&self) -> i64 {
        self.inner.get_db()
    }
}
