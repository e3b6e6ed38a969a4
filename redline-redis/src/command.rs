//! Conversion of redis-rs commands into interceptor commands.

use redis::{Arg, Cmd};
use redline_core::{Argument, Command, render_command};

/// Name used for a pipeline logged as a single command.
pub const PIPELINE: &str = "PIPELINE";

/// Converts a packed redis-rs command into its logged form.
///
/// The first argument is the command name, the remaining ones become string
/// arguments (binary payloads are decoded lossily). Cursor placeholders are
/// logged as `NULL`. The logged name is the rendered command line, so log
/// messages read `Executing command "GET user:1"`.
pub fn logged_command(cmd: &Cmd) -> Command {
    let mut arguments = cmd.args_iter().map(|arg| match arg {
        Arg::Simple(bytes) => Argument::Str(String::from_utf8_lossy(bytes).into_owned()),
        _ => Argument::Null,
    });
    let name = match arguments.next() {
        Some(Argument::Str(name)) => name,
        _ => String::new(),
    };
    let arguments: Vec<Argument> = arguments.collect();
    Command::new(render_command(&name, &arguments)).with_arguments(arguments)
}

/// Logged form of a pipeline of `count` commands.
pub fn logged_pipeline(count: usize) -> Command {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    Command::new(render_command(PIPELINE, &[Argument::Int(count)])).arg(count)
}

/// Routing key of a command: its first key argument, or empty.
pub fn routing_key(cmd: &Cmd) -> &[u8] {
    match cmd.args_iter().nth(1) {
        Some(Arg::Simple(key)) => key,
        _ => &[],
    }
}
