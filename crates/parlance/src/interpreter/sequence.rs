//! Locale fallback across an ordered chain of bundles.

use crate::types::Args;

use super::Bundle;
use super::errors::ResolverError;

/// An immutable, ordered list of bundles, highest priority first.
///
/// Lookup walks the chain and the first bundle owning the requested id wins
/// in full; there is no partial merging across bundles.
///
/// # Example
///
/// ```
/// use parlance::{Bundle, Sequence, parse};
///
/// let mut de = Bundle::new("de");
/// de.add_resource(parse("greeting = Hallo"));
/// let mut en = Bundle::new("en");
/// en.add_resource(parse("greeting = Hello\nfarewell = Bye"));
///
/// let chain = Sequence::new(vec![de, en]);
/// assert_eq!(chain.format("greeting", None, None), "Hallo");
/// assert_eq!(chain.format("farewell", None, None), "Bye");
/// assert_eq!(chain.format("missing", None, None), "missing");
/// ```
pub struct Sequence {
    bundles: Vec<Bundle>,
}

impl Sequence {
    pub fn new(bundles: Vec<Bundle>) -> Self {
        Sequence { bundles }
    }

    /// The first bundle whose entry table contains `id`, if any.
    pub fn find(&self, id: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|bundle| bundle.has_entry(id))
    }

    /// Formats `id` in the first bundle that owns it. With no owner, returns
    /// the bare id, mirroring a single bundle's unknown-identifier fallback.
    pub fn format(
        &self,
        id: &str,
        args: Option<&Args>,
        errors: Option<&mut Vec<ResolverError>>,
    ) -> String {
        match self.find(id) {
            Some(bundle) => bundle.format(id, args, errors),
            None => {
                if let Some(sink) = errors {
                    sink.push(ResolverError::UnknownEntry {
                        id: id.to_string(),
                        suggestions: Vec::new(),
                    });
                }
                id.to_string()
            }
        }
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }
}
