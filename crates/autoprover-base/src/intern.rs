//! Symbol interning for O(1) equality comparison.
//!
//! Function symbols, predicate symbols, and Skolem names are compared
//! constantly during ordering, rewriting, and indexing. Storing each
//! unique string once and comparing integer handles instead of strings
//! turns those comparisons into O(1) integer equality.
//!
//! ## Example
//!
//! ```
//! use autoprover_base::{Interner, Symbol};
//!
//! let mut interner = Interner::new();
//!
//! let s1 = interner.intern("f");
//! let s2 = interner.intern("f");
//! let s3 = interner.intern("g");
//!
//! assert_eq!(s1, s2);
//! assert_ne!(s1, s3);
//! assert_eq!(interner.resolve(s1), "f");
//! ```

use rustc_hash::FxHashMap;

/// A lightweight handle to an interned string.
///
/// `Symbol` is `Copy` and compares in O(1) time regardless of the
/// length of the string it denotes. Use [`Interner::resolve`] to get
/// the original string back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Symbol(u32);

impl Symbol {
    /// Reserved symbol for the predicate-symbol slot of a variable in
    /// the literal index (spec §4.7: "variables use a reserved sentinel
    /// `_VAR_`").
    pub const VAR_SENTINEL: Symbol = Symbol(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A string interner providing O(1) equality via [`Symbol`] handles.
pub struct Interner {
    map: FxHashMap<String, Symbol>,
    strings: Vec<String>,
}

impl Interner {
    /// Creates an interner with only the `_VAR_` sentinel pre-interned
    /// at [`Symbol::VAR_SENTINEL`].
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::new(),
        };
        let sentinel = interner.intern_fresh("_VAR_");
        debug_assert_eq!(sentinel, Symbol::VAR_SENTINEL);
        interner
    }

    fn intern_fresh(&mut self, s: &str) -> Symbol {
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.to_string());
        self.map.insert(s.to_string(), sym);
        sym
    }

    /// Interns a string, returning its symbol. Interning the same
    /// string twice returns the same symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        self.intern_fresh(s)
    }

    /// Resolves a symbol back to its string.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not produced by this interner.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
