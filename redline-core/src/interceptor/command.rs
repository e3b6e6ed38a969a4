//! Command representation and human-readable rendering.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// One argument of an intercepted command.
///
/// Arguments are arbitrary scalars, `Null`, or nested lists and maps as
/// produced by client libraries that accept structured arguments (for example
/// `MSET` with a map of pairs).
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Absent argument.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String or binary payload rendered as text.
    Str(String),
    /// Ordered list of nested arguments.
    List(Vec<Argument>),
    /// Ordered key/value pairs.
    Map(Vec<(String, Argument)>),
}

impl Argument {
    fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            Argument::Null => out.push("NULL".to_owned()),
            Argument::Bool(value) => out.push(value.to_string()),
            Argument::Int(value) => out.push(value.to_string()),
            Argument::Float(value) => out.push(value.to_string()),
            Argument::Str(value) => out.push(value.clone()),
            Argument::List(items) => items.iter().for_each(|item| item.flatten_into(out)),
            Argument::Map(pairs) => {
                for (key, value) in pairs {
                    out.push(key.clone());
                    value.flatten_into(out);
                }
            }
        }
    }
}

impl Serialize for Argument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Argument::Null => serializer.serialize_none(),
            Argument::Bool(value) => serializer.serialize_bool(*value),
            Argument::Int(value) => serializer.serialize_i64(*value),
            Argument::Float(value) => serializer.serialize_f64(*value),
            Argument::Str(value) => serializer.serialize_str(value),
            Argument::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Argument::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Str(value.to_owned())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Str(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Int(value)
    }
}

impl From<i32> for Argument {
    fn from(value: i32) -> Self {
        Argument::Int(value.into())
    }
}

impl From<u32> for Argument {
    fn from(value: u32) -> Self {
        Argument::Int(value.into())
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Float(value)
    }
}

impl<T> From<Option<T>> for Argument
where
    T: Into<Argument>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Argument::Null, Into::into)
    }
}

impl<T> From<Vec<T>> for Argument
where
    T: Into<Argument>,
{
    fn from(items: Vec<T>) -> Self {
        Argument::List(items.into_iter().map(Into::into).collect())
    }
}

/// A command as seen by the interceptor: a name and its ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    arguments: Vec<Argument>,
}

impl Command {
    /// Creates a command without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Replaces the argument list.
    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Command arguments in call order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Renders the command as a single log line, see [`render_command`].
    pub fn render(&self) -> String {
        render_command(&self.name, &self.arguments)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Argument>) {
        (self.name, self.arguments)
    }
}

/// Renders a command as a human-readable line.
///
/// The name is upper-cased. Nested lists and maps are flattened depth-first,
/// map keys come before their values and `Null` renders as `NULL`. The
/// arguments are only read.
///
/// ```
/// use redline_core::{Argument, render_command};
///
/// let args = vec![Argument::from(vec!["chuck", "norris"])];
/// assert_eq!(render_command("foo", &args), "FOO chuck norris");
/// ```
pub fn render_command(name: &str, arguments: &[Argument]) -> String {
    let mut parts = vec![name.to_uppercase()];
    arguments
        .iter()
        .for_each(|argument| argument.flatten_into(&mut parts));
    parts.join(" ").trim().to_owned()
}
