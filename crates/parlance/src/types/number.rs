use crate::parser::ast::NumberLiteral;

use super::{Args, Value};

/// A numeric runtime value with deferred, option-driven rendering.
///
/// The raw `value` stays available for exact matching in select expressions;
/// [`format`](NumberValue::format) produces the display text. A number built
/// from a source literal keeps the literal's declared fraction digits, so
/// `1.0` renders (and classifies) with one visible fraction digit.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub options: NumberOptions,
}

impl NumberValue {
    pub fn new(value: f64) -> Self {
        NumberValue {
            value,
            options: NumberOptions::default(),
        }
    }

    /// Builds the runtime value for a parsed number literal, carrying its
    /// declared precision over as the minimum fraction digits.
    pub fn from_literal(literal: &NumberLiteral) -> Self {
        NumberValue {
            value: literal.value,
            options: NumberOptions {
                minimum_fraction_digits: Some(literal.precision),
                ..NumberOptions::default()
            },
        }
    }

    /// Renders the number for display.
    ///
    /// Honors the fraction-digit and integer-digit options. Locale-specific
    /// digit shaping and grouping separators are the concern of the external
    /// formatter backend and are not applied here.
    pub fn format(&self, _locale: &str) -> String {
        let mut rendered = format!("{}", self.value);

        if let Some(max) = self.options.maximum_fraction_digits {
            if fraction_digits(&rendered) > max {
                rendered = format!("{:.max$}", self.value);
                // Rounding pads to `max`; surplus zeros are not significant.
                if rendered.contains('.') {
                    rendered = rendered.trim_end_matches('0').trim_end_matches('.').to_string();
                }
            }
        }

        let minimum = self.options.minimum_fraction_digits.unwrap_or(0);
        let missing = minimum.saturating_sub(fraction_digits(&rendered));
        if missing > 0 {
            if !rendered.contains('.') {
                rendered.push('.');
            }
            rendered.extend(std::iter::repeat_n('0', missing));
        }

        if let Some(minimum_integer) = self.options.minimum_integer_digits {
            let negative = rendered.starts_with('-');
            let digits = &rendered[usize::from(negative)..];
            let integer_len = digits.find('.').unwrap_or(digits.len());
            if integer_len < minimum_integer {
                let pad = "0".repeat(minimum_integer - integer_len);
                rendered = if negative {
                    format!("-{pad}{digits}")
                } else {
                    format!("{pad}{digits}")
                };
            }
        }

        rendered
    }
}

fn fraction_digits(rendered: &str) -> usize {
    rendered.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/// The closed set of options understood by number formatting.
///
/// Option names follow the source-format convention (`minimumFractionDigits:
/// 2`). Unknown options are ignored; values that fail type coercion are
/// resolution errors.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberOptions {
    pub use_grouping: bool,
    pub minimum_integer_digits: Option<usize>,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
}

impl Default for NumberOptions {
    fn default() -> Self {
        NumberOptions {
            use_grouping: true,
            minimum_integer_digits: None,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
        }
    }
}

impl NumberOptions {
    /// Merges named call options into these options.
    ///
    /// Returns the rendered diagnostic for the first option whose value
    /// fails coercion.
    pub fn merge(&mut self, named: &Args) -> Result<(), String> {
        if let Some(value) = named.get("useGrouping") {
            self.use_grouping = coerce_bool("useGrouping", value)?;
        }
        if let Some(value) = named.get("minimumIntegerDigits") {
            self.minimum_integer_digits = Some(coerce_digits("minimumIntegerDigits", value)?);
        }
        if let Some(value) = named.get("minimumFractionDigits") {
            self.minimum_fraction_digits = Some(coerce_digits("minimumFractionDigits", value)?);
        }
        if let Some(value) = named.get("maximumFractionDigits") {
            self.maximum_fraction_digits = Some(coerce_digits("maximumFractionDigits", value)?);
        }
        Ok(())
    }
}

fn coerce_bool(option: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::Number(n) if n.value == 0.0 => Ok(false),
        Value::Number(n) if n.value == 1.0 => Ok(true),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        other => Err(format!(
            "Invalid value for option {option}: {}",
            other.format("en")
        )),
    }
}

fn coerce_digits(option: &str, value: &Value) -> Result<usize, String> {
    let number = match value {
        Value::Number(n) => Some(n.value),
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Error(_) => None,
    };
    match number {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as usize),
        _ => Err(format!(
            "Invalid value for option {option}: {}",
            value.format("en")
        )),
    }
}
