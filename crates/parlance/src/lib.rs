//! A localization message language: declarative text with runtime-substituted
//! variables, cross-message references, and plural/selector branching.
//!
//! Source text parses into a syntax tree ([`parser`]), bundles compile the
//! tree's entries into an addressable table ([`interpreter`]), and `format`
//! evaluates a message against caller-supplied arguments. Parsing never
//! fails (malformed entries degrade to junk with diagnostics) and formatting
//! never fails (bad references degrade to visible placeholders).

pub mod interpreter;
pub mod parser;
pub mod serializer;
pub mod types;

pub use interpreter::{
    Bundle, BundleFunction, FunctionRegistry, IntlMemoizer, ResolverError, Sequence,
    compute_suggestions, plural_category,
};
pub use parser::{parse, parse_with_spans};
pub use serializer::serialize;
pub use types::{Args, NumberOptions, NumberValue, Value};

/// Creates an [`Args`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use parlance::{Value, args};
///
/// let a = args! { "count" => 3, "name" => "Alice" };
/// assert_eq!(a.len(), 2);
/// assert_eq!(a["name"], Value::from("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        $crate::Args::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Args::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
