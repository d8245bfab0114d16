//! Shared cache of locale-bound intl instances.
//!
//! The cache is an explicitly constructed object injected into bundles, not
//! process-global state. It guarantees at most one constructed instance per
//! (kind, locale) key and supports concurrent lookup; share one across
//! bundles with `Arc` to reuse instances in a fallback chain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralRuleType, PluralRules};

/// Memoizer for locale-aware formatter and classifier instances.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use parlance::IntlMemoizer;
///
/// let intl = Arc::new(IntlMemoizer::new());
/// let first = intl.cardinal_rules("ru");
/// let second = intl.cardinal_rules("ru");
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Default)]
pub struct IntlMemoizer {
    cardinal_rules: Mutex<HashMap<String, Arc<PluralRules>>>,
}

impl IntlMemoizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cardinal plural rules for `locale`, constructed at most once per
    /// locale. Unparseable locale codes fall back to English rules.
    pub fn cardinal_rules(&self, locale: &str) -> Arc<PluralRules> {
        let mut cache = self.cardinal_rules.lock().expect("intl cache poisoned");
        if let Some(rules) = cache.get(locale) {
            return Arc::clone(rules);
        }
        let rules = Arc::new(build_cardinal_rules(locale));
        cache.insert(locale.to_string(), Arc::clone(&rules));
        rules
    }
}

fn build_cardinal_rules(locale: &str) -> PluralRules {
    let parsed: Locale = locale.parse().unwrap_or_else(|_| locale!("en"));
    PluralRules::try_new(parsed.into(), PluralRuleType::Cardinal.into())
        .expect("locale should be supported")
}
