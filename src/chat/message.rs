//! Chat message types
//!
//! A message carries either free text or the list of records a query
//! returned. The shape is decided once, when the reply is parsed.

use std::fmt;

use serde_json::{Map, Number, Value};

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// A single value inside a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// Arrays and objects nested inside a record
    Nested(Value),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            nested => FieldValue::Nested(nested),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Default string conversion. Null prints as `null`; callers that need a
/// placeholder handle it before getting here.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Nested(v) => write!(f, "{}", v),
        }
    }
}

/// One reply object, fields kept in the order the server sent them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field (builder style)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Iterate fields in their original order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// Message payload
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Records(Vec<Record>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(t) => Some(t),
            Content::Records(_) => None,
        }
    }

    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Content::Records(r) => Some(r),
            Content::Text(_) => None,
        }
    }
}

/// A committed chat message. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    content: Content,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
        }
    }

    pub fn bot(content: Content) -> Self {
        Self {
            role: Role::Bot,
            content,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &Content {
        &self.content
    }
}
