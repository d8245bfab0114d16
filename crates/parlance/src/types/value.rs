use std::collections::HashMap;

use super::NumberValue;

/// Arguments passed to [`format`](crate::Bundle::format): variable name to
/// value.
pub type Args = HashMap<String, Value>;

/// A runtime value flowing through resolution.
///
/// Values are what callers bind to variables, what functions receive and
/// return, and what select expressions match on. Numbers defer their textual
/// rendering until a locale is known and keep their raw value available as a
/// match key.
///
/// # Example
///
/// ```
/// use parlance::Value;
///
/// let count: Value = 42.into();
/// assert_eq!(count.format("en"), "42");
///
/// let name: Value = "Alice".into();
/// assert_eq!(name.as_str(), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// A number with formatting options.
    Number(NumberValue),
    /// A resolution failure carrying its diagnostic text. Produced by
    /// functions whose options fail coercion; the resolver reports it and
    /// substitutes a placeholder.
    Error(String),
}

impl Value {
    /// This value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// This value as a number, if it is one.
    pub fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Renders the value for display in the given locale.
    pub fn format(&self, locale: &str) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.format(locale),
            Value::Error(_) => "???".to_string(),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(NumberValue::new(f64::from(n)))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(NumberValue::new(n as f64))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(NumberValue::new(f64::from(n)))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(NumberValue::new(n as f64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(NumberValue::new(n as f64))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(NumberValue::new(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(NumberValue::new(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<NumberValue> for Value {
    fn from(n: NumberValue) -> Self {
        Value::Number(n)
    }
}
