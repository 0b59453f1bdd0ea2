//! Lexicographic Path Ordering.
//!
//! Grounded directly on `examples/original_source/src/term/ordering.hpp`
//! and `ordering.cpp`: `Precedence`'s BFS transitive closure and cache,
//! and `LexicographicPathOrdering::lpo_greater`'s three-case structure,
//! translated symbol-for-symbol from `std::string` keys to interned
//! [`Symbol`]s.

use crate::term::{Shape, Term};
use autoprover_base::{Interner, Symbol};
use std::cell::RefCell;
use std::collections::VecDeque;
use rustc_hash::{FxHashMap, FxHashSet};

/// How a function symbol's arguments are compared when precedence is
/// tied.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArgumentStatus {
    Lexicographic,
    /// Accepted but not yet given its own comparison: the C++ original
    /// leaves `multiset_greater` as "simplified... falls back to
    /// lexicographic comparison" and this port reproduces that
    /// behavior rather than completing it.
    Multiset,
}

/// A strict partial order on function/predicate symbols, extendable
/// to a total order via [`Precedence::total_greater`].
#[derive(Clone)]
pub struct Precedence {
    graph: FxHashMap<Symbol, FxHashSet<Symbol>>,
    cache: RefCell<FxHashMap<(Symbol, Symbol), bool>>,
}

impl Precedence {
    pub fn new() -> Self {
        Precedence {
            graph: FxHashMap::default(),
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Declares `f` to have strictly higher precedence than `g`.
    pub fn set_greater(&mut self, f: Symbol, g: Symbol) {
        self.graph.entry(f).or_default().insert(g);
        self.cache.borrow_mut().clear();
    }

    pub fn greater(&self, f: Symbol, g: Symbol) -> bool {
        if f == g {
            return false;
        }
        if let Some(&cached) = self.cache.borrow().get(&(f, g)) {
            return cached;
        }
        let result = self.compute_transitive_greater(f, g);
        self.cache.borrow_mut().insert((f, g), result);
        result
    }

    pub fn equal(&self, f: Symbol, g: Symbol) -> bool {
        f == g
    }

    pub fn symbols(&self) -> FxHashSet<Symbol> {
        let mut out = FxHashSet::default();
        for (&source, targets) in &self.graph {
            out.insert(source);
            out.extend(targets.iter().copied());
        }
        out
    }

    /// Extends the partial order to a total order: falls back to
    /// comparing symbol indices when neither direction is explicitly
    /// set, matching the C++'s lexicographic-string fallback (our
    /// interned symbols have no independently meaningful string order
    /// here, so index order stands in for it).
    pub fn total_greater(&self, f: Symbol, g: Symbol) -> bool {
        if f == g {
            return false;
        }
        if self.greater(f, g) {
            return true;
        }
        if self.greater(g, f) {
            return false;
        }
        f.index() > g.index()
    }

    fn compute_transitive_greater(&self, f: Symbol, g: Symbol) -> bool {
        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();
        queue.push_back(f);
        visited.insert(f);
        while let Some(current) = queue.pop_front() {
            let Some(neighbors) = self.graph.get(&current) else {
                continue;
            };
            for &n in neighbors {
                if n == g {
                    return true;
                }
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        false
    }
}

impl Default for Precedence {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthetic symbols standing in for logical connectives in LPO's
/// symbol-and-arguments decomposition (`decompose_term`'s `"∧"`, `"∨"`,
/// `"¬"`, `"→"`, `"∀"`, `"∃"` literals in the C++), interned once so
/// they compare like any other symbol in a [`Precedence`].
#[derive(Clone)]
pub struct ConnectiveSymbols {
    pub and: Symbol,
    pub or: Symbol,
    pub not: Symbol,
    pub implies: Symbol,
    pub forall: Symbol,
    pub exists: Symbol,
}

impl ConnectiveSymbols {
    pub fn intern(interner: &mut Interner) -> Self {
        ConnectiveSymbols {
            and: interner.intern("_AND_"),
            or: interner.intern("_OR_"),
            not: interner.intern("_NOT_"),
            implies: interner.intern("_IMPLIES_"),
            forall: interner.intern("_FORALL_"),
            exists: interner.intern("_EXISTS_"),
        }
    }
}

/// A Lexicographic Path Ordering over terms, well-founded, stable
/// under substitution, and total on ground terms (§4.2).
#[derive(Clone)]
pub struct LexicographicPathOrdering {
    precedence: Precedence,
    argument_status: FxHashMap<Symbol, ArgumentStatus>,
    connectives: ConnectiveSymbols,
    var_prefix: Symbol,
}

impl LexicographicPathOrdering {
    pub fn new(precedence: Precedence, interner: &mut Interner) -> Self {
        LexicographicPathOrdering {
            precedence,
            argument_status: FxHashMap::default(),
            connectives: ConnectiveSymbols::intern(interner),
            var_prefix: interner.intern("_VAR_"),
        }
    }

    pub fn precedence(&self) -> &Precedence {
        &self.precedence
    }

    pub fn precedence_mut(&mut self) -> &mut Precedence {
        &mut self.precedence
    }

    pub fn set_argument_status(&mut self, symbol: Symbol, status: ArgumentStatus) {
        self.argument_status.insert(symbol, status);
    }

    /// `s >_lpo t`.
    pub fn greater(&self, s: &Term, t: &Term) -> bool {
        self.lpo_greater(s, t)
    }

    pub fn greater_equal(&self, s: &Term, t: &Term) -> bool {
        s == t || self.lpo_greater(s, t)
    }

    pub fn equivalent(&self, s: &Term, t: &Term) -> bool {
        !self.lpo_greater(s, t) && !self.lpo_greater(t, s)
    }

    pub fn less(&self, s: &Term, t: &Term) -> bool {
        self.lpo_greater(t, s)
    }

    fn lpo_greater(&self, s: &Term, t: &Term) -> bool {
        let s_is_var = s.shape() == Shape::Var;
        let t_is_var = t.shape() == Shape::Var;
        if s_is_var {
            return false;
        }
        if t_is_var {
            return true;
        }

        let (f, s_args) = self.decompose(s);
        let (g, t_args) = self.decompose(t);

        for s_arg in &s_args {
            if s_arg == t {
                return true;
            }
            if self.lpo_greater_equal(s_arg, t) {
                return true;
            }
        }

        if self.precedence.total_greater(f, g) {
            return self.all_greater(s, &t_args);
        }

        if self.precedence.equal(f, g) {
            if !self.all_greater(s, &t_args) {
                return false;
            }
            let status = self
                .argument_status
                .get(&f)
                .copied()
                .unwrap_or(ArgumentStatus::Lexicographic);
            return match status {
                ArgumentStatus::Lexicographic => self.lexicographic_greater(&s_args, &t_args),
                ArgumentStatus::Multiset => self.multiset_greater(&s_args, &t_args),
            };
        }

        false
    }

    fn lpo_greater_equal(&self, s: &Term, t: &Term) -> bool {
        s == t || self.lpo_greater(s, t)
    }

    fn all_greater(&self, s: &Term, terms: &[Term]) -> bool {
        terms.iter().all(|t| self.lpo_greater(s, t))
    }

    fn lexicographic_greater(&self, args1: &[Term], args2: &[Term]) -> bool {
        let min_len = args1.len().min(args2.len());
        for i in 0..min_len {
            if self.lpo_greater(&args1[i], &args2[i]) {
                return true;
            }
            if self.lpo_greater(&args2[i], &args1[i]) {
                return false;
            }
        }
        args1.len() > args2.len()
    }

    /// Documented stub, reproducing the C++'s current behavior: falls
    /// back to the lexicographic comparison rather than a real
    /// multiset extension of LPO.
    fn multiset_greater(&self, args1: &[Term], args2: &[Term]) -> bool {
        self.lexicographic_greater(args1, args2)
    }

    /// Returns the head symbol and argument list used for ordering
    /// purposes, synthesizing a symbol for variables and connectives
    /// the way the C++ `decompose_term` does.
    fn decompose(&self, term: &Term) -> (Symbol, Vec<Term>) {
        match term.shape() {
            Shape::Const => (term.symbol().unwrap(), Vec::new()),
            Shape::App => (term.symbol().unwrap(), term.args().to_vec()),
            Shape::Var => (self.var_prefix, Vec::new()),
            Shape::And => {
                let (l, r) = term.binary_parts().unwrap();
                (self.connectives.and, vec![l.clone(), r.clone()])
            }
            Shape::Or => {
                let (l, r) = term.binary_parts().unwrap();
                (self.connectives.or, vec![l.clone(), r.clone()])
            }
            Shape::Implies => {
                let (l, r) = term.binary_parts().unwrap();
                (self.connectives.implies, vec![l.clone(), r.clone()])
            }
            Shape::Not => (self.connectives.not, vec![term.unary_body().unwrap().clone()]),
            Shape::Forall => (
                self.connectives.forall,
                vec![term.unary_body().unwrap().clone()],
            ),
            Shape::Exists => (
                self.connectives.exists,
                vec![term.unary_body().unwrap().clone()],
            ),
        }
    }
}
