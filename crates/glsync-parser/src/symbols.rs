//! Symbol set construction

use glsync_core::Symbol;
use std::collections::BTreeSet;

/// Sorted, duplicate-free set of symbols
///
/// The sort order is the iteration order for every generated artifact, so
/// output does not depend on directory enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    symbols: Vec<Symbol>,
}

impl SymbolSet {
    /// Union scanned symbols with explicitly requested names
    pub fn build<I, S>(scanned: I, explicit: &[S]) -> Self
    where
        I: IntoIterator<Item = Symbol>,
        S: AsRef<str>,
    {
        let set: BTreeSet<Symbol> = scanned
            .into_iter()
            .chain(explicit.iter().map(|name| Symbol::new(name.as_ref())))
            .collect();

        Self {
            symbols: set.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols
            .binary_search_by(|s| s.as_str().cmp(name))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolSet {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
