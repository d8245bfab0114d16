//! Bundle: a locale, a compiled entry table, and a function registry.

use std::collections::HashMap;
use std::sync::Arc;

use bon::Builder;

use crate::parser::ast::{Entry, Message, Resource, Term};
use crate::types::{Args, Value};

use super::errors::{ResolverError, compute_suggestions};
use super::functions::FunctionRegistry;
use super::memoizer::IntlMemoizer;
use super::resolver::write_pattern;
use super::scope::Scope;

/// A set of compiled messages and terms for one locale.
///
/// Entries are registered from parsed resources with [`add_resource`]; later
/// registrations for the same id overwrite earlier ones. The entry table is
/// read-only during [`format`], so once registration is complete any number
/// of `format` calls may run concurrently.
///
/// [`add_resource`]: Bundle::add_resource
/// [`format`]: Bundle::format
///
/// # Example
///
/// ```
/// use parlance::{Bundle, args, parse};
///
/// let mut bundle = Bundle::builder()
///     .locale("en")
///     .use_isolating(false)
///     .build();
/// bundle.add_resource(parse("hello = Hello, { $name }!"));
///
/// let output = bundle.format("hello", Some(&args! { "name" => "Alice" }), None);
/// assert_eq!(output, "Hello, Alice!");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Bundle {
    /// Locale code driving plural classification and value formatting.
    #[builder(default = "en".to_string())]
    locale: String,

    /// Wrap each placeable's output in Unicode bidi isolation marks
    /// (U+2068/U+2069) when a pattern mixes text and placeables. On by
    /// default.
    #[builder(default = true)]
    use_isolating: bool,

    /// Cache of locale-bound intl instances. Pass a shared `Arc` to reuse
    /// instances across the bundles of a fallback chain.
    #[builder(default)]
    intl: Arc<IntlMemoizer>,

    /// Messages by id.
    #[builder(skip)]
    messages: HashMap<String, Message>,

    /// Terms by id, stored without the `-` marker.
    #[builder(skip)]
    terms: HashMap<String, Term>,

    /// Registered functions; `NUMBER` is available out of the box.
    #[builder(skip)]
    functions: FunctionRegistry,
}

impl Bundle {
    /// Creates a bundle for `locale` with default settings.
    pub fn new(locale: impl Into<String>) -> Self {
        Bundle::builder().locale(locale.into()).build()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub(crate) fn isolating(&self) -> bool {
        self.use_isolating
    }

    pub(crate) fn intl(&self) -> &IntlMemoizer {
        &self.intl
    }

    pub(crate) fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Registers a function, replacing any previous one with the same name.
    ///
    /// Functions are looked up case-sensitively; by convention names are
    /// upper-case, matching what the grammar accepts for callees.
    pub fn add_function(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&[Value], &Args, &str) -> Value + Send + Sync + 'static,
    ) {
        self.functions.register(name, function);
    }

    /// Registers every message and term of `resource` into the entry table,
    /// overwriting entries that share an id. Comments and junk are not
    /// addressable and are skipped. Returns the number of entries
    /// registered.
    pub fn add_resource(&mut self, resource: Resource) -> usize {
        let mut count = 0;
        for entry in resource.body {
            match entry {
                Entry::Message(message) => {
                    self.messages.insert(message.id.name.clone(), message);
                    count += 1;
                }
                Entry::Term(term) => {
                    self.terms.insert(term.id.name.clone(), term);
                    count += 1;
                }
                _ => {}
            }
        }
        count
    }

    /// True if the entry table contains `id`: messages by bare id, terms by
    /// `-`-prefixed id.
    pub fn has_entry(&self, id: &str) -> bool {
        match id.strip_prefix('-') {
            Some(term_id) => self.terms.contains_key(term_id),
            None => self.messages.contains_key(id),
        }
    }

    /// The registered message for `id`, if any.
    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    /// The registered term for `id` (without its `-` marker), if any.
    pub fn get_term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    /// Resolves the entry `id` against `args` and returns the display
    /// string.
    ///
    /// Never fails: an unknown id comes back as the literal `id` (terms
    /// retain their marker), and every resolution failure substitutes a
    /// placeholder in the output. When `errors` is given, failures are also
    /// appended to it.
    ///
    /// # Example
    ///
    /// ```
    /// use parlance::{Bundle, parse};
    ///
    /// let mut bundle = Bundle::new("en");
    /// bundle.add_resource(parse("hi = Hi!"));
    ///
    /// assert_eq!(bundle.format("hi", None, None), "Hi!");
    ///
    /// let mut errors = Vec::new();
    /// assert_eq!(bundle.format("missing", None, Some(&mut errors)), "missing");
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn format(
        &self,
        id: &str,
        args: Option<&Args>,
        errors: Option<&mut Vec<ResolverError>>,
    ) -> String {
        let mut scope = Scope::new(self, args);
        let output = self.format_in(id, &mut scope);
        if let Some(sink) = errors {
            sink.append(&mut scope.errors);
        }
        output
    }

    fn format_in(&self, id: &str, scope: &mut Scope<'_, '_>) -> String {
        let pattern = match id.strip_prefix('-') {
            Some(term_id) => self.terms.get(term_id).map(|term| &term.value),
            None => match self.messages.get(id) {
                Some(message) => match &message.value {
                    Some(pattern) => Some(pattern),
                    None => {
                        scope.error(ResolverError::NoValue { id: id.to_string() });
                        return id.to_string();
                    }
                },
                None => None,
            },
        };
        let Some(pattern) = pattern else {
            let suggestions = compute_suggestions(id, &self.entry_ids());
            scope.error(ResolverError::UnknownEntry {
                id: id.to_string(),
                suggestions,
            });
            return id.to_string();
        };

        let mut output = String::new();
        // The requested entry itself counts as being on the resolution path,
        // so a reference chain leading back to it is cut at the first lap.
        if scope.track(id) {
            write_pattern(pattern, scope, &mut output);
            scope.release(id);
        }
        output
    }

    /// All addressable ids, sorted; terms carry their marker.
    fn entry_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .messages
            .keys()
            .cloned()
            .chain(self.terms.keys().map(|id| format!("-{id}")))
            .collect();
        ids.sort();
        ids
    }
}
