//! Hierarchical key/value storage addressed by dotted paths
//! (`module.funcs.f0.name`). The codec only talks to the [`Container`]
//! trait; [`KeyTree`] is the in-memory implementation with a text format.

use strum::Display;
use thiserror::Error;

pub mod key_tree;

#[cfg(test)]
mod tests;

pub use key_tree::KeyTree;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Float,
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("missing key `{path}`")]
    MissingKey { path: String },
    #[error("key `{path}` holds a {found} value, expected a {expected}")]
    WrongType {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A store of typed values keyed by dotted paths. Child keys must come back
/// in the order they were first inserted.
pub trait Container {
    /// The value stored directly at `path`, if any
    fn value(&self, path: &str) -> Option<&Value>;

    /// The immediate child segments under `path`, in insertion order. Empty
    /// when the path does not exist.
    fn child_keys(&self, path: &str) -> Vec<&str>;

    /// Stores a value at `path`, creating intermediate entries as needed
    fn set_value(&mut self, path: &str, value: Value);

    /// Drops whatever lives at `path`, value and children alike
    fn remove(&mut self, path: &str);

    /// Whether anything (a value or children) lives at `path`
    fn contains(&self, path: &str) -> bool {
        self.value(path).is_some() || !self.child_keys(path).is_empty()
    }

    fn get(&self, path: &str) -> Result<&Value, ContainerError> {
        self.value(path).ok_or_else(|| ContainerError::MissingKey {
            path: path.to_owned(),
        })
    }

    fn get_string(&self, path: &str) -> Result<&str, ContainerError> {
        match self.get(path)? {
            Value::String(value) => Ok(value),
            other => Err(wrong_type(path, ValueKind::String, other)),
        }
    }

    fn get_int(&self, path: &str) -> Result<i64, ContainerError> {
        match self.get(path)? {
            Value::Integer(value) => Ok(*value),
            other => Err(wrong_type(path, ValueKind::Integer, other)),
        }
    }

    fn get_float(&self, path: &str) -> Result<f64, ContainerError> {
        match self.get(path)? {
            Value::Float(value) => Ok(*value),
            other => Err(wrong_type(path, ValueKind::Float, other)),
        }
    }

    fn set_string(&mut self, path: &str, value: &str) {
        self.set_value(path, Value::String(value.to_owned()))
    }

    fn set_int(&mut self, path: &str, value: i64) {
        self.set_value(path, Value::Integer(value))
    }

    fn set_float(&mut self, path: &str, value: f64) {
        self.set_value(path, Value::Float(value))
    }
}

fn wrong_type(path: &str, expected: ValueKind, found: &Value) -> ContainerError {
    ContainerError::WrongType {
        path: path.to_owned(),
        expected,
        found: found.kind(),
    }
}
