//! Resolution errors.
//!
//! Every resolution failure is non-fatal: the resolver substitutes a visible
//! placeholder in the output and appends one of these to the caller's
//! optional error sink. `format` itself never fails.

use thiserror::Error;

/// An error collected while resolving a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolverError {
    /// The id requested from [`format`](crate::Bundle::format) is not in the
    /// entry table.
    #[error("unknown identifier: {id}{}", if suggestions.is_empty() { String::new() } else { format!(" (did you mean {}?)", suggestions.join(", ")) })]
    UnknownEntry {
        id: String,
        suggestions: Vec<String>,
    },

    /// A variable reference has no binding in the current scope.
    #[error("Unknown variable: ${name}")]
    UnknownVariable { name: String },

    /// A message reference points at an unregistered id.
    #[error("Unknown message: {id}")]
    UnknownMessage { id: String },

    /// A term reference points at an unregistered id.
    #[error("Unknown term: -{id}")]
    UnknownTerm { id: String },

    /// A reference names an attribute the entry does not have.
    #[error("Unknown attribute: {reference}")]
    UnknownAttribute { reference: String },

    /// A function call names an unregistered function.
    #[error("Unknown function: {name}()")]
    UnknownFunction { name: String },

    /// A message without a value was used where a value is required.
    #[error("No value: {id}")]
    NoValue { id: String },

    /// Resolving a reference would re-enter a pattern already on the active
    /// resolution path.
    #[error("Circular reference detected: {id}")]
    CircularReference { id: String },

    /// A select expression has no default variant to fall back to. Parsed
    /// trees always carry one; this guards hand-built trees.
    #[error("No default variant")]
    MissingDefault,

    /// A function rejected its arguments or options.
    #[error("{message}")]
    Function { message: String },
}

/// Ranks registered ids by similarity to `input` for "did you mean" hints.
///
/// Returns up to three candidates above a fixed similarity threshold, best
/// first.
pub fn compute_suggestions(input: &str, candidates: &[String]) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(input, candidate), candidate))
        .filter(|(score, _)| *score > 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
