//! Database binding resolution.
//!
//! Consumers ask for a database by binding name. [`Bindings`] is the base
//! table; [`Substitution`] wraps any resolver and answers one binding with a
//! replacement while passing every other lookup through.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Database;

/// Binding name the product API resolves its persistence layer from.
pub const DATABASE_BINDING: &str = "config/database";

pub trait Resolve: Send + Sync {
    fn resolve(&self, binding: &str) -> Option<Arc<dyn Database>>;
}

/// Base resolver backed by a name → database map.
#[derive(Clone, Default)]
pub struct Bindings {
    entries: HashMap<String, Arc<dyn Database>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, binding: impl Into<String>, database: Arc<dyn Database>) -> Self {
        self.entries.insert(binding.into(), database);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("Bindings").field("entries", &names).finish()
    }
}

impl Resolve for Bindings {
    fn resolve(&self, binding: &str) -> Option<Arc<dyn Database>> {
        self.entries.get(binding).cloned()
    }
}

/// Resolver that answers `target` with `replacement` and defers everything
/// else to `inner`. There is no way back to the unwrapped resolver.
pub struct Substitution<R> {
    inner: R,
    target: String,
    replacement: Arc<dyn Database>,
}

impl<R> Substitution<R> {
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl<R: Resolve> Resolve for Substitution<R> {
    fn resolve(&self, binding: &str) -> Option<Arc<dyn Database>> {
        if binding == self.target {
            Some(Arc::clone(&self.replacement))
        } else {
            self.inner.resolve(binding)
        }
    }
}

pub trait ResolveExt: Resolve + Sized {
    /// Consume this resolver and return one where `binding` yields `replacement`.
    fn substitute(
        self,
        binding: impl Into<String>,
        replacement: Arc<dyn Database>,
    ) -> Substitution<Self> {
        Substitution {
            inner: self,
            target: binding.into(),
            replacement,
        }
    }
}

impl<R: Resolve> ResolveExt for R {}
