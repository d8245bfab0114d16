//! CLDR plural category classification.
//!
//! Adapts the external classifier contract: given a locale and a numeric
//! value, produce one category from the fixed set "zero", "one", "two",
//! "few", "many", "other" under cardinal rules. Classification works on the
//! number's formatted representation, so declared fraction digits count as
//! visible digits: in English, `1.0` classifies as "other" while `1` is
//! "one".

use icu_plurals::{PluralCategory, PluralOperands, RawPluralOperands};

use crate::types::NumberValue;

use super::memoizer::IntlMemoizer;

/// Classifies `number` into a plural category for `locale`.
///
/// Rule instances are constructed through `intl`, at most once per locale.
///
/// # Example
///
/// ```
/// use parlance::{IntlMemoizer, NumberValue, plural_category};
///
/// let intl = IntlMemoizer::new();
///
/// // English: 1 = "one", everything else = "other"
/// assert_eq!(plural_category(&intl, "en", &NumberValue::new(1.0)), "one");
/// assert_eq!(plural_category(&intl, "en", &NumberValue::new(2.0)), "other");
///
/// // Russian: "one", "few", "many", and "other"
/// assert_eq!(plural_category(&intl, "ru", &NumberValue::new(2.0)), "few");
/// assert_eq!(plural_category(&intl, "ru", &NumberValue::new(5.0)), "many");
/// ```
pub fn plural_category(intl: &IntlMemoizer, locale: &str, number: &NumberValue) -> &'static str {
    let rules = intl.cardinal_rules(locale);
    category_str(rules.category_for(operands(number, locale)))
}

/// Derives CLDR plural operands from the number's visible representation.
fn operands(number: &NumberValue, locale: &str) -> PluralOperands {
    let rendered = number.format(locale);
    let rendered = rendered.strip_prefix('-').unwrap_or(&rendered);
    let (integer, fraction) = rendered
        .split_once('.')
        .unwrap_or((rendered, ""));
    let stripped = fraction.trim_end_matches('0');
    PluralOperands::from(RawPluralOperands {
        i: integer.parse().unwrap_or_default(),
        v: fraction.len(),
        w: stripped.len(),
        f: fraction.parse().unwrap_or_default(),
        t: stripped.parse().unwrap_or_default(),
        c: 0,
    })
}

fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}
