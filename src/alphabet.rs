//! Bidirectional symbol↔index mapping, mutable and canonical flavors.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::errors::AlphabetError;
use crate::sentinel::{SymbolId, INVALID_SYMBOL};

/// Read-only behavior shared by every alphabet flavor.
///
/// Factored out as a small trait rather than a base class, in the spirit of
/// the sum-type-plus-capability-trait re-architecture called for by the
/// "polymorphism over representations" design note.
pub trait AlphabetView {
    /// Number of symbols currently interned.
    fn size(&self) -> usize;

    /// The symbol stored at `index`, or an error if `index` is out of range.
    fn symbol_at(&self, index: SymbolId) -> Result<&str, AlphabetError>;

    /// The index of `symbol`, or [`INVALID_SYMBOL`] if it is not interned.
    fn index_of(&self, symbol: &str) -> SymbolId;

    /// Whether `symbol` is interned.
    fn contains(&self, symbol: &str) -> bool {
        self.index_of(symbol) != INVALID_SYMBOL
    }

    /// All interned symbols, in index order.
    fn symbols(&self) -> Vec<&str>;
}

/// An append-only alphabet. Indices are assigned in insertion order and are
/// never reused or invalidated once assigned.
#[derive(Debug, Clone, Default)]
pub struct MutableAlphabet {
    symbols: Vec<String>,
    indices: IndexMap<String, SymbolId>,
}

impl MutableAlphabet {
    /// Creates an empty mutable alphabet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `symbol`, inserting it at `size()` if absent.
    pub fn get_or_add(&mut self, symbol: &str) -> SymbolId {
        if let Some(&idx) = self.indices.get(symbol) {
            return idx;
        }
        let idx = self.symbols.len() as SymbolId;
        self.symbols.push(symbol.to_string());
        self.indices.insert(symbol.to_string(), idx);
        idx
    }

    /// Interns every symbol yielded by `iter`, in order.
    pub fn add_all<'a, I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for symbol in iter {
            self.get_or_add(symbol);
        }
    }

    /// Merges `other`'s symbols into `self`, returning a mapping from each
    /// index in `other` to the corresponding (possibly newly assigned) index
    /// in `self`.
    pub fn union_with(&mut self, other: &dyn AlphabetView) -> Vec<SymbolId> {
        (0..other.size() as SymbolId)
            .map(|i| {
                let symbol = other
                    .symbol_at(i)
                    .expect("index within [0, size) by construction");
                self.get_or_add(symbol)
            })
            .collect()
    }
}

impl AlphabetView for MutableAlphabet {
    fn size(&self) -> usize {
        self.symbols.len()
    }

    fn symbol_at(&self, index: SymbolId) -> Result<&str, AlphabetError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .map(String::as_str)
            .ok_or(AlphabetError::OutOfRange {
                index,
                size: self.symbols.len(),
            })
    }

    fn index_of(&self, symbol: &str) -> SymbolId {
        self.indices.get(symbol).copied().unwrap_or(INVALID_SYMBOL)
    }

    fn symbols(&self) -> Vec<&str> {
        self.symbols.iter().map(String::as_str).collect()
    }
}

/// A frozen alphabet whose symbols are sorted by byte-lexicographic order at
/// construction time. Canonical alphabets back [`crate::mfa::Mfa`] values and
/// never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAlphabet {
    symbols: Box<[String]>,
    indices: HashMap<String, SymbolId>,
}

impl CanonicalAlphabet {
    /// Builds a canonical alphabet from an arbitrary set of symbols, sorting
    /// them byte-lexicographically and assigning indices accordingly.
    #[must_use]
    pub fn from_symbols<I: IntoIterator<Item = String>>(symbols: I) -> Self {
        let mut symbols: Vec<String> = symbols.into_iter().collect();
        symbols.sort_unstable();
        symbols.dedup();
        let indices = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i as SymbolId))
            .collect();
        Self {
            symbols: symbols.into_boxed_slice(),
            indices,
        }
    }

    /// Builds a canonical alphabet from any [`AlphabetView`], preserving the
    /// set of symbols but not their original ordering.
    #[must_use]
    pub fn from_view(view: &dyn AlphabetView) -> Self {
        Self::from_symbols(view.symbols().into_iter().map(str::to_string))
    }
}

impl AlphabetView for CanonicalAlphabet {
    fn size(&self) -> usize {
        self.symbols.len()
    }

    fn symbol_at(&self, index: SymbolId) -> Result<&str, AlphabetError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .map(String::as_str)
            .ok_or(AlphabetError::OutOfRange {
                index,
                size: self.symbols.len(),
            })
    }

    fn index_of(&self, symbol: &str) -> SymbolId {
        self.indices.get(symbol).copied().unwrap_or(INVALID_SYMBOL)
    }

    fn symbols(&self) -> Vec<&str> {
        self.symbols.iter().map(String::as_str).collect()
    }
}
