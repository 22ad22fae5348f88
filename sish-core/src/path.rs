//! Addressing scope entries.

use crate::function::Function;
use crate::value::Value;
use std::fmt;

/// A dotted path into a scope: `"fs.read"` walks the `fs` namespace and
/// selects its `read` entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// Split a dotted name into segments.
    pub fn parse(name: &str) -> Self {
        Self(name.split('.').map(str::to_string).collect())
    }

    /// A path made of a single segment, taken verbatim (dots included).
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// The individual segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The first `n` segments joined with dots; used to name the segment a
    /// walk failed at.
    pub fn prefix(&self, n: usize) -> String {
        self.0[..n.min(self.0.len())].join(".")
    }

    /// Append a segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Path::parse(name)
    }
}

impl From<String> for Path {
    fn from(name: String) -> Self {
        Path::parse(&name)
    }
}

impl From<&String> for Path {
    fn from(name: &String) -> Self {
        Path::parse(name)
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Path(segments.iter().map(|s| s.to_string()).collect())
    }
}

/// What a dispatcher is asked to call: a scope entry by path, a function
/// passed directly, or an arbitrary value (which only resolves to itself).
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A scope entry.
    Path(Path),
    /// A function passed directly.
    Function(Function),
    /// Any other value; never callable.
    Value(Value),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(path) => write!(f, "{}", path),
            Target::Function(func) => f.write_str(func.name()),
            Target::Value(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Path(Path::parse(name))
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Path(Path::parse(&name))
    }
}

impl From<Path> for Target {
    fn from(path: Path) -> Self {
        Target::Path(path)
    }
}

impl<const N: usize> From<[&str; N]> for Target {
    fn from(segments: [&str; N]) -> Self {
        Target::Path(segments.into())
    }
}

impl From<Function> for Target {
    fn from(func: Function) -> Self {
        Target::Function(func)
    }
}

impl From<&Function> for Target {
    fn from(func: &Function) -> Self {
        Target::Function(func.clone())
    }
}

impl From<Value> for Target {
    fn from(value: Value) -> Self {
        match value {
            Value::Function(func) => Target::Function(func),
            other => Target::Value(other),
        }
    }
}
