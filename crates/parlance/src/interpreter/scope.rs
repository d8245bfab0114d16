//! Per-format transient resolution state.

use crate::types::{Args, Value};

use super::Bundle;
use super::errors::ResolverError;

/// State threaded through one `format` call and discarded at its end.
///
/// The scope carries the caller's arguments, local bindings introduced by
/// term calls, the ancestor set used for cycle detection, and the error
/// sink. Term calls get an independent set of locals but share the ancestor
/// set and the sink, so cycles crossing a call boundary are still caught.
pub(crate) struct Scope<'bundle, 'args> {
    pub(crate) bundle: &'bundle Bundle,
    /// Arguments bound by the caller of `format`.
    args: Option<&'args Args>,
    /// Locals bound by the nearest enclosing term call. While present, they
    /// shadow the caller's arguments entirely: a term's pattern sees only
    /// what was passed to it.
    local_args: Option<Args>,
    /// Ids of the patterns currently being resolved on this path.
    ancestors: Vec<String>,
    /// Errors collected during resolution, forwarded to the caller's sink.
    pub(crate) errors: Vec<ResolverError>,
}

impl<'bundle, 'args> Scope<'bundle, 'args> {
    pub(crate) fn new(bundle: &'bundle Bundle, args: Option<&'args Args>) -> Self {
        Scope {
            bundle,
            args,
            local_args: None,
            ancestors: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Looks up a variable: locals when inside a term call, the caller's
    /// arguments otherwise.
    pub(crate) fn variable(&self, name: &str) -> Option<&Value> {
        match &self.local_args {
            Some(locals) => locals.get(name),
            None => self.args.and_then(|args| args.get(name)),
        }
    }

    /// Marks `id` as being resolved. Returns false when `id` is already on
    /// the active path, i.e. the reference is circular; the caller must not
    /// recurse and must not release the existing entry.
    pub(crate) fn track(&mut self, id: &str) -> bool {
        if self.ancestors.iter().any(|ancestor| ancestor == id) {
            return false;
        }
        self.ancestors.push(id.to_string());
        true
    }

    /// Releases `id` after its pattern finished resolving, so later,
    /// unrelated references to the same id resolve normally.
    pub(crate) fn release(&mut self, id: &str) {
        if let Some(position) = self.ancestors.iter().rposition(|ancestor| ancestor == id) {
            self.ancestors.remove(position);
        }
    }

    /// Runs `resolve` with `locals` replacing the visible bindings, restoring
    /// the previous bindings afterwards. The ancestor set and error sink stay
    /// shared.
    pub(crate) fn with_locals<R>(
        &mut self,
        locals: Args,
        resolve: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let previous = self.local_args.replace(locals);
        let result = resolve(self);
        self.local_args = previous;
        result
    }

    pub(crate) fn error(&mut self, error: ResolverError) {
        self.errors.push(error);
    }
}
