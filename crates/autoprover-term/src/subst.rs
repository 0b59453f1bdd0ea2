//! Substitutions mapping variable indices to terms.
//!
//! Grounded on spec §4.1's substitution contract; the C++ prior
//! implementation had no standalone `substitution.hpp` in the retained
//! source set, so the representation here follows the prose
//! description directly: a finite partial map applied capture-free by
//! construction, since variables are De Bruijn indices rather than
//! named binders.

use crate::term::Term;
use rustc_hash::FxHashMap;

/// A finite mapping from variable index to replacement term.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    bindings: FxHashMap<usize, Term>,
}

impl Substitution {
    pub fn empty() -> Self {
        Substitution {
            bindings: FxHashMap::default(),
        }
    }

    pub fn singleton(var: usize, term: Term) -> Self {
        let mut s = Substitution::empty();
        s.bind(var, term);
        s
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn get(&self, var: usize) -> Option<&Term> {
        self.bindings.get(&var)
    }

    pub fn bind(&mut self, var: usize, term: Term) {
        self.bindings.insert(var, term);
    }

    pub fn domain(&self) -> impl Iterator<Item = usize> + '_ {
        self.bindings.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Term)> {
        self.bindings.iter().map(|(&k, v)| (k, v))
    }

    /// Applies the substitution to `term`, replacing every free
    /// variable bound in `self` with its image. Variables not in the
    /// domain are left untouched.
    pub fn apply(&self, term: &Term) -> Term {
        if self.bindings.is_empty() {
            return term.clone();
        }
        if let Some(i) = term.as_var() {
            return self.bindings.get(&i).cloned().unwrap_or_else(|| term.clone());
        }
        let children: Vec<Term> = term.children().iter().map(|c| self.apply(c)).collect();
        if children.is_empty() {
            term.clone()
        } else {
            term.rebuild(children)
        }
    }

    /// Composes `self` after `other`: applying the result to a term is
    /// equivalent to applying `other` then `self`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::empty();
        for (var, term) in other.iter() {
            result.bind(var, self.apply(term));
        }
        for (var, term) in self.iter() {
            result.bindings.entry(var).or_insert_with(|| term.clone());
        }
        result
    }

    /// Shifts every variable index bound or mentioned by `offset`,
    /// used to make two rules' or clauses' variables disjoint before
    /// combining them (spec §4.4's "rename-apart" step, §4.8's
    /// variable-space disjointness for refutation setup).
    pub fn shift_domain(&self, offset: usize) -> Substitution {
        let mut result = Substitution::empty();
        for (var, term) in self.iter() {
            result.bind(var + offset, shift_term(term, offset));
        }
        result
    }
}

/// Shifts every variable occurring in `term` by `offset`.
pub fn shift_term(term: &Term, offset: usize) -> Term {
    if offset == 0 {
        return term.clone();
    }
    if let Some(i) = term.as_var() {
        return Term::make_var(i + offset);
    }
    let children = term.children();
    if children.is_empty() {
        return term.clone();
    }
    let shifted: Vec<Term> = children.iter().map(|c| shift_term(c, offset)).collect();
    term.rebuild(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_base::Interner;

    #[test]
    fn apply_replaces_bound_variables_only() {
        let mut i = Interner::new();
        let f = i.intern("f");
        let mut s = Substitution::empty();
        s.bind(0, Term::make_const(i.intern("a")));
        let t = Term::make_app(f, vec![Term::make_var(0), Term::make_var(1)]);
        let result = s.apply(&t);
        assert_eq!(
            result,
            Term::make_app(f, vec![Term::make_const(i.intern("a")), Term::make_var(1)])
        );
    }

    #[test]
    fn apply_on_empty_substitution_is_identity() {
        let t = Term::make_var(0);
        assert_eq!(Substitution::empty().apply(&t), t);
    }

    #[test]
    fn shift_domain_shifts_both_keys_and_bodies() {
        let mut s = Substitution::empty();
        s.bind(0, Term::make_var(1));
        let shifted = s.shift_domain(10);
        assert_eq!(shifted.get(10), Some(&Term::make_var(11)));
        assert_eq!(shifted.get(0), None);
    }

    #[test]
    fn compose_applies_other_then_self() {
        let mut i = Interner::new();
        let a = i.intern("a");
        let mut outer = Substitution::empty();
        outer.bind(1, Term::make_const(a));
        let mut inner = Substitution::empty();
        inner.bind(0, Term::make_var(1));
        let composed = outer.compose(&inner);
        assert_eq!(composed.get(0), Some(&Term::make_const(a)));
    }
}
