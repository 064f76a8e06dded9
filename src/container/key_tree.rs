//! In-memory [`Container`] that keeps child keys in insertion order, plus
//! its indented text format:
//!
//! ```text
//! OILCan:
//!   version: "0.2.0"
//! module:
//!   name: "m"
//!   funcs:
//!     f0:
//!       name: "main"
//! ```
//!
//! Strings are always quoted, integers are bare digits and floats are
//! printed with Rust's round-trippable formatting.

use std::{fs, path::Path, str::FromStr};

use tracing::debug;

use super::{Container, ContainerError, Value};

const INDENT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyTree {
    root: Entry,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Entry {
    value: Option<Value>,
    children: Vec<(String, Entry)>,
}

impl Entry {
    fn child(&self, key: &str) -> Option<&Entry> {
        self.children
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, entry)| entry)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.children
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, entry)| entry)
    }

    fn child_or_insert(&mut self, key: &str) -> &mut Entry {
        let position = match self.children.iter().position(|(name, _)| name == key) {
            Some(position) => position,
            None => {
                self.children.push((key.to_owned(), Entry::default()));
                self.children.len() - 1
            }
        };

        &mut self.children[position].1
    }

    fn write(&self, f: &mut std::fmt::Formatter<'_>, key: &str, depth: usize) -> std::fmt::Result {
        write!(f, "{:width$}{key}:", "", width = depth * INDENT)?;

        match &self.value {
            Some(value) => {
                f.write_str(" ")?;
                write_value(f, value)?;
                f.write_str("\n")?;
            }
            None => f.write_str("\n")?,
        }

        for (child_key, child) in &self.children {
            child.write(f, child_key, depth + 1)?;
        }

        Ok(())
    }
}

impl KeyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    fn entry(&self, path: &str) -> Option<&Entry> {
        if path.is_empty() {
            return Some(&self.root);
        }

        path.split('.')
            .try_fold(&self.root, |entry, segment| entry.child(segment))
    }

    fn entry_mut(&mut self, path: &str) -> Option<&mut Entry> {
        path.split('.')
            .try_fold(&mut self.root, |entry, segment| entry.child_mut(segment))
    }

    fn entry_or_insert<'a>(&mut self, segments: impl IntoIterator<Item = &'a str>) -> &mut Entry {
        segments
            .into_iter()
            .fold(&mut self.root, |entry, segment| entry.child_or_insert(segment))
    }

    /// Parses the indented text format
    pub fn parse(text: &str) -> Result<Self, ContainerError> {
        let mut tree = KeyTree::new();
        // Keys of the entries enclosing the current line
        let mut stack: Vec<String> = vec![];

        for (index, raw_line) in text.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = raw_line.trim_start_matches(' ');

            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let syntax_error = |message: &str| ContainerError::Syntax {
                line: line_number,
                message: message.to_owned(),
            };

            let indentation = raw_line.len() - trimmed.len();
            if trimmed.starts_with('\t') || indentation % INDENT != 0 {
                return Err(syntax_error("indentation must be a multiple of two spaces"));
            }

            let depth = indentation / INDENT;
            if depth > stack.len() {
                return Err(syntax_error("entry is indented deeper than its parent"));
            }
            stack.truncate(depth);

            let Some((key, rest)) = trimmed.split_once(':') else {
                return Err(syntax_error("expected `key:` or `key: value`"));
            };

            if !is_valid_key(key) {
                return Err(syntax_error(&format!("invalid key `{key}`")));
            }

            let rest = rest.trim();
            let entry = tree.entry_or_insert(stack.iter().map(String::as_str).chain([key]));

            if !rest.is_empty() {
                entry.value = Some(parse_value(rest).map_err(|message| syntax_error(&message))?);
            }

            stack.push(key.to_owned());
        }

        Ok(tree)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        debug!("Loading key tree from {}", path.display());

        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ContainerError> {
        let path = path.as_ref();
        debug!("Saving key tree to {}", path.display());

        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl Container for KeyTree {
    fn value(&self, path: &str) -> Option<&Value> {
        self.entry(path)?.value.as_ref()
    }

    fn child_keys(&self, path: &str) -> Vec<&str> {
        self.entry(path)
            .map(|entry| {
                entry
                    .children
                    .iter()
                    .map(|(key, _)| key.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_value(&mut self, path: &str, value: Value) {
        self.entry_or_insert(path.split('.')).value = Some(value);
    }

    fn remove(&mut self, path: &str) {
        let (parent, key) = match path.rsplit_once('.') {
            Some((parent, key)) => (self.entry_mut(parent), key),
            None => (Some(&mut self.root), path),
        };

        if let Some(parent) = parent {
            parent.children.retain(|(name, _)| name != key);
        }
    }
}

impl FromStr for KeyTree {
    type Err = ContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for KeyTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, entry) in &self.root.children {
            entry.write(f, key, 0)?;
        }

        Ok(())
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| c == '.' || c == '"' || c == '#' || c.is_whitespace())
}

fn write_value(f: &mut std::fmt::Formatter<'_>, value: &Value) -> std::fmt::Result {
    match value {
        Value::String(string) => {
            f.write_str("\"")?;
            for c in string.chars() {
                match c {
                    '"' => f.write_str("\\\"")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    '\t' => f.write_str("\\t")?,
                    c => write!(f, "{c}")?,
                }
            }
            f.write_str("\"")
        }
        Value::Integer(integer) => write!(f, "{integer}"),
        Value::Float(float) => write!(f, "{float:?}"),
    }
}

fn parse_value(text: &str) -> Result<Value, String> {
    if let Some(quoted) = text.strip_prefix('"') {
        return parse_string(quoted).map(Value::String);
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return text
            .parse()
            .map(Value::Integer)
            .map_err(|_| format!("integer `{text}` is out of range"));
    }

    text.parse()
        .map(Value::Float)
        .map_err(|_| format!("invalid value `{text}`"))
}

/// Parses the remainder of a string literal after its opening quote
fn parse_string(quoted: &str) -> Result<String, String> {
    let mut string = String::new();
    let mut chars = quoted.chars();

    loop {
        match chars.next() {
            Some('"') => break,
            Some('\\') => match chars.next() {
                Some('"') => string.push('"'),
                Some('\\') => string.push('\\'),
                Some('n') => string.push('\n'),
                Some('t') => string.push('\t'),
                Some(other) => return Err(format!("unknown escape `\\{other}`")),
                None => return Err("unterminated string".to_owned()),
            },
            Some(c) => string.push(c),
            None => return Err("unterminated string".to_owned()),
        }
    }

    if !chars.as_str().trim().is_empty() {
        return Err("unexpected text after string".to_owned());
    }

    Ok(string)
}
