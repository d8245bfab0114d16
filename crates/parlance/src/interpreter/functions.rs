//! Function registry and builtin functions.
//!
//! Functions receive the resolved positional arguments, the named literal
//! options, and the active locale. They return either a plain string value
//! or a deferred number value whose raw value stays usable as a select
//! match key. A returned [`Value::Error`] becomes a resolution error plus a
//! placeholder in the output.

use std::collections::HashMap;

use crate::types::{Args, NumberValue, Value};

/// Signature of a registered function.
pub type BundleFunction = Box<dyn Fn(&[Value], &Args, &str) -> Value + Send + Sync>;

/// Registry of callable functions, looked up case-sensitively by their
/// upper-case names.
pub struct FunctionRegistry {
    functions: HashMap<String, BundleFunction>,
}

impl FunctionRegistry {
    /// Creates a registry pre-populated with the `NUMBER` builtin.
    pub fn new() -> Self {
        let mut registry = FunctionRegistry {
            functions: HashMap::new(),
        };
        registry.register("NUMBER", number);
        registry
    }

    /// Registers `function` under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&[Value], &Args, &str) -> Value + Send + Sync + 'static,
    ) {
        self.functions.insert(name.into(), Box::new(function));
    }

    pub fn get(&self, name: &str) -> Option<&BundleFunction> {
        self.functions.get(name)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The `NUMBER` builtin: reformats a numeric value with explicit options,
/// e.g. `NUMBER($pos, minimumFractionDigits: 2)`.
///
/// The result stays numeric, so it can drive plural selection with the
/// merged options applied.
fn number(positional: &[Value], named: &Args, _locale: &str) -> Value {
    let Some(first) = positional.first() else {
        return Value::Error("NUMBER: missing positional argument".to_string());
    };
    let mut number = match first {
        Value::Number(number) => number.clone(),
        Value::String(text) => match text.parse::<f64>() {
            Ok(value) => NumberValue::new(value),
            Err(_) => {
                return Value::Error(format!("NUMBER: not a number: \"{text}\""));
            }
        },
        Value::Error(message) => return Value::Error(message.clone()),
    };
    if let Err(message) = number.options.merge(named) {
        return Value::Error(format!("NUMBER: {message}"));
    }
    Value::Number(number)
}
