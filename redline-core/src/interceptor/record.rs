//! Per-command records kept by the interceptor.

use serde::{Serialize, Serializer};

use super::command::{Argument, Command};

/// Metadata of one intercepted command.
///
/// A record is appended when the command starts and finalized once when it
/// stops. Records serialize in the shape profiler panels expect: a command
/// that did not fail reports `error: false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRecord {
    /// Command as passed to the interceptor.
    pub command: String,
    /// Arguments as passed to the interceptor, never reordered.
    pub arguments: Vec<Argument>,
    /// Wall time between start and stop in milliseconds, `0.0` until stopped.
    pub execution_ms: f64,
    /// Label of the connection that executed the command.
    pub connection: Option<String>,
    /// Error reported by the connection, if the command failed.
    #[serde(serialize_with = "error_or_false")]
    pub error: Option<String>,
}

impl CommandRecord {
    pub(crate) fn started(command: Command, connection: Option<&str>) -> Self {
        let (command, arguments) = command.into_parts();
        Self {
            command,
            arguments,
            execution_ms: 0.0,
            connection: connection.map(str::to_owned),
            error: None,
        }
    }

    /// Returns `true` if the command failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn error_or_false<S>(error: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(message) => serializer.serialize_str(message),
        None => serializer.serialize_bool(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_success_as_false() {
        let record = CommandRecord::started(Command::new("GET").arg("key"), Some("primary"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "command": "GET",
                "arguments": ["key"],
                "execution_ms": 0.0,
                "connection": "primary",
                "error": false,
            })
        );
    }

    #[test]
    fn test_serialize_error_message() {
        let mut record = CommandRecord::started(Command::new("GET"), None);
        record.error = Some("WRONGTYPE".to_owned());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["error"], json!("WRONGTYPE"));
        assert_eq!(value["connection"], json!(null));
    }
}
