//! Literal indexing for fast resolution-candidate lookup.
//!
//! Grounded on `LiteralIndex` in
//! `examples/original_source/src/resolution/indexing.hpp`: clauses are
//! bucketed by polarity, then predicate symbol, then arity, via nested
//! key-maps rather than a flat scan of the clause set.

use crate::clause::Clause;
use autoprover_base::Symbol;
use rustc_hash::FxHashMap;

type Bucket = Vec<Clause>;

#[derive(Default)]
struct PolarityIndex {
    by_symbol_arity: FxHashMap<(Symbol, usize), Bucket>,
}

impl PolarityIndex {
    fn insert(&mut self, key: (Symbol, usize), clause: Clause) {
        self.by_symbol_arity.entry(key).or_default().push(clause);
    }

    fn remove(&mut self, key: (Symbol, usize), clause: &Clause) {
        if let Some(bucket) = self.by_symbol_arity.get_mut(&key) {
            if let Some(pos) = bucket.iter().position(|c| c.equals(clause)) {
                bucket.remove(pos);
            }
            if bucket.is_empty() {
                self.by_symbol_arity.remove(&key);
            }
        }
    }

    fn get(&self, key: (Symbol, usize)) -> &[Clause] {
        self.by_symbol_arity.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn clear(&mut self) {
        self.by_symbol_arity.clear();
    }

    fn len(&self) -> usize {
        self.by_symbol_arity.values().map(Vec::len).sum()
    }
}

/// Indexes clauses by the predicate symbol and arity of each literal's
/// atom, split by polarity, so that a literal's resolution candidates
/// (same predicate, same arity, opposite polarity) can be fetched
/// without scanning the whole clause set.
#[derive(Default)]
pub struct LiteralIndex {
    positive: PolarityIndex,
    negative: PolarityIndex,
}

/// The bucket key for `atom`: its predicate symbol and arity, or the
/// reserved `_VAR_` sentinel (arity 0) when `atom` is a bare variable.
fn predicate_key(atom: &autoprover_term::Term) -> (Symbol, usize) {
    match atom.symbol() {
        Some(sym) => (sym, atom.args().len()),
        None => (Symbol::VAR_SENTINEL, 0),
    }
}

impl LiteralIndex {
    pub fn new() -> Self {
        LiteralIndex::default()
    }

    /// Inserts every literal of `clause` into the appropriate bucket.
    pub fn insert_clause(&mut self, clause: &Clause) {
        for lit in clause.literals() {
            let key = predicate_key(lit.atom());
            let index = if lit.is_positive() { &mut self.positive } else { &mut self.negative };
            index.insert(key, clause.clone());
        }
    }

    /// Removes every occurrence of `clause` keyed by its own literals.
    pub fn remove_clause(&mut self, clause: &Clause) {
        for lit in clause.literals() {
            let key = predicate_key(lit.atom());
            let index = if lit.is_positive() { &mut self.positive } else { &mut self.negative };
            index.remove(key, clause);
        }
    }

    pub fn clear(&mut self) {
        self.positive.clear();
        self.negative.clear();
    }

    /// Candidate clauses that could resolve against `literal`: those
    /// indexed under the same predicate symbol and arity with the
    /// opposite polarity.
    pub fn get_resolution_candidates(&self, literal: &crate::literal::Literal) -> &[Clause] {
        let key = predicate_key(literal.atom());
        if literal.is_positive() {
            self.negative.get(key)
        } else {
            self.positive.get(key)
        }
    }

    pub fn size(&self) -> usize {
        self.positive.len() + self.negative.len()
    }
}
