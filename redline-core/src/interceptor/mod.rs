//! Command interception for logging and profiling.
//!
//! [`CommandInterceptor`] observes a connection's command stream. Every command
//! is counted; when a [`CommandSink`] is configured each command also produces a
//! [`CommandRecord`] with its timing and error, plus one log line on the sink.
//!
//! The interceptor serves one connection whose commands are issued strictly one
//! after another:
//!
//! ```text
//! IDLE --on_command_start--> STARTED --on_command_stop--> IDLE
//! ```
//!
//! Starting a command while another one is in flight leaves the previous record
//! unfinished. Stopping while idle is a lifecycle bug and returns
//! [`InterceptorError::UnpairedStop`].

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::metrics;

pub mod command;
pub mod record;
pub mod sink;

pub use command::{Argument, Command, render_command};
pub use record::CommandRecord;
pub use sink::{CommandSink, TracingSink};

/// Errors in the start/stop lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptorError {
    /// `on_command_stop` was called with no command in flight.
    #[error("command stop without a matching start")]
    UnpairedStop,
}

/// Times, records and logs the commands of one connection.
///
/// Without a sink only the command counter is maintained and stop events are
/// no-ops.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use redline_core::{Command, CommandInterceptor, TracingSink};
///
/// let mut interceptor = CommandInterceptor::with_sink(Arc::new(TracingSink));
/// interceptor.on_command_start(Command::new("GET").arg("user:1"), None, Some("primary"));
/// interceptor.on_command_stop(None).unwrap();
///
/// assert_eq!(interceptor.command_count(), 1);
/// assert_eq!(interceptor.commands()[0].command, "GET");
/// ```
#[derive(Clone, Default)]
pub struct CommandInterceptor {
    sink: Option<Arc<dyn CommandSink>>,
    commands: Vec<CommandRecord>,
    command_count: u64,
    started_at: Option<Instant>,
}

impl CommandInterceptor {
    /// Creates an interceptor that only counts commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interceptor recording and logging to `sink`.
    pub fn with_sink(sink: Arc<dyn CommandSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    /// Returns `true` if a sink is configured.
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Returns `true` between a recorded start and its stop.
    pub fn is_in_flight(&self) -> bool {
        self.started_at.is_some()
    }

    /// Marks the start of a command.
    ///
    /// `start` defaults to now. The counter is incremented even without a sink.
    pub fn on_command_start(
        &mut self,
        command: Command,
        start: Option<Instant>,
        connection: Option<&str>,
    ) {
        self.command_count += 1;
        if self.sink.is_none() {
            return;
        }

        if self.started_at.is_some()
            && let Some(orphan) = self.commands.last()
        {
            tracing::warn!(
                command = %orphan.command,
                "command started before the previous one stopped, previous record left unfinished"
            );
        }

        self.commands.push(CommandRecord::started(command, connection));
        self.started_at = Some(start.unwrap_or_else(Instant::now));
    }

    /// Marks the end of the most recently started command.
    ///
    /// Finalizes its record with the elapsed time and `error`, then writes one
    /// line to the sink. The error is recorded, never returned.
    pub fn on_command_stop(&mut self, error: Option<String>) -> Result<(), InterceptorError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        let started_at = self
            .started_at
            .take()
            .ok_or(InterceptorError::UnpairedStop)?;
        let record = self
            .commands
            .last_mut()
            .ok_or(InterceptorError::UnpairedStop)?;

        let elapsed = started_at.elapsed();
        record.execution_ms = elapsed.as_secs_f64() * 1000.0;
        record.error = error;

        match &record.error {
            Some(error) => sink.error(&format!(
                "Command \"{}\" failed ({})",
                record.command, error
            )),
            None => sink.info(&format!("Executing command \"{}\"", record.command)),
        }

        let connection = record.connection.as_deref().unwrap_or_default();
        metrics::record_command(connection, elapsed);
        if record.error.is_some() {
            metrics::record_command_error(connection);
        }
        Ok(())
    }

    /// Runs `execute` between a start and a stop event.
    ///
    /// The result of `execute` is returned untouched; its error, if any, is
    /// recorded through its `Display` form.
    pub fn observe<T, E, F>(
        &mut self,
        command: Command,
        connection: Option<&str>,
        execute: F,
    ) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        self.on_command_start(command, None, connection);
        let result = execute();
        let error = result.as_ref().err().map(ToString::to_string);
        if let Err(error) = self.on_command_stop(error) {
            tracing::warn!(%error, "failed to finalize command record");
        }
        result
    }

    /// Number of commands started since construction.
    pub fn command_count(&self) -> u64 {
        self.command_count
    }

    /// Records in the order the commands were started.
    ///
    /// Always empty when no sink is configured.
    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }
}

impl std::fmt::Debug for CommandInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInterceptor")
            .field("has_sink", &self.has_sink())
            .field("command_count", &self.command_count)
            .field("commands", &self.commands.len())
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}
