//! Clauses: disjunctions of literals with multiset semantics.
//!
//! Grounded on `Clause` in `clause.hpp`: `simplify` (dedup +
//! tautology detection), `substitute`/`rename_variables`, order
//! -independent lazy hash caching (`hash_cache_`/`hash_computed_`),
//! and `subsumes` (backtracking search for a consistent literal
//! mapping) all carry over from the C++ method surface.

use crate::literal::Literal;
use autoprover_term::{match_term, shift_term, Substitution, Term};
use std::cell::Cell;

#[derive(Clone)]
pub struct Clause {
    literals: Vec<Literal>,
    hash_cache: Cell<Option<u64>>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals,
            hash_cache: Cell::new(None),
        }
    }

    pub fn empty() -> Self {
        Clause::new(Vec::new())
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .enumerate()
            .any(|(i, a)| self.literals[i + 1..].iter().any(|b| a.is_complementary(b)))
    }

    /// Removes duplicate literals; a tautological clause simplifies to
    /// itself unchanged (callers filter tautologies separately, per
    /// `is_tautology`, matching the C++ leaving that decision to the
    /// prover's clause-set admission step).
    pub fn simplify(&self) -> Clause {
        let mut out: Vec<Literal> = Vec::new();
        for lit in &self.literals {
            if !out.contains(lit) {
                out.push(lit.clone());
            }
        }
        Clause::new(out)
    }

    pub fn substitute(&self, subst: &Substitution) -> Clause {
        Clause::new(self.literals.iter().map(|l| l.substitute(subst)).collect())
    }

    pub fn rename_variables(&self, offset: usize) -> Clause {
        Clause::new(
            self.literals
                .iter()
                .map(|l| Literal::new(shift_term(l.atom(), offset), l.is_positive()))
                .collect(),
        )
    }

    /// Every distinct variable index occurring in the clause.
    pub fn variables(&self) -> Vec<usize> {
        let mut vars: Vec<usize> = self.literals.iter().flat_map(|l| l.atom().variables()).collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    fn compute_hash(&self) -> u64 {
        // Order-independent: XOR each literal's hash so clause
        // equality by `simplify`-normalized content does not depend
        // on literal order.
        let mut h = 0u64;
        for lit in &self.literals {
            let mut component = lit.atom().structural_hash();
            if lit.is_negative() {
                component ^= 0x9e3779b97f4a7c15;
            }
            h ^= component;
        }
        h
    }

    pub fn hash_value(&self) -> u64 {
        if let Some(h) = self.hash_cache.get() {
            return h;
        }
        let h = self.compute_hash();
        self.hash_cache.set(Some(h));
        h
    }

    pub fn equals(&self, other: &Clause) -> bool {
        if self.hash_value() != other.hash_value() {
            return false;
        }
        if self.literals.len() != other.literals.len() {
            return false;
        }
        self.literals.iter().all(|l| other.literals.contains(l))
            && other.literals.iter().all(|l| self.literals.contains(l))
    }

    /// True if `self` subsumes `other`: there is a substitution that,
    /// applied to `self`'s literals, maps each of them onto a distinct
    /// literal in `other` (the standard clause subsumption check).
    pub fn subsumes(&self, other: &Clause) -> bool {
        if self.literals.len() > other.literals.len() {
            return false;
        }
        let mut used = vec![false; other.literals.len()];
        let mut subst = Substitution::empty();
        find_consistent_mapping(&self.literals, &other.literals, 0, &mut used, &mut subst)
    }
}

fn find_consistent_mapping(
    source: &[Literal],
    target: &[Literal],
    index: usize,
    used: &mut [bool],
    subst: &mut Substitution,
) -> bool {
    if index == source.len() {
        return true;
    }
    let lit = &source[index];
    for (j, candidate) in target.iter().enumerate() {
        if used[j] || lit.is_positive() != candidate.is_positive() {
            continue;
        }
        let mut trial = subst.clone();
        if match_term(lit.atom(), candidate.atom(), &mut trial) {
            used[j] = true;
            if find_consistent_mapping(source, target, index + 1, used, &mut trial) {
                *subst = trial;
                return true;
            }
            used[j] = false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_base::Interner;

    fn lit(i: &mut Interner, name: &str, positive: bool) -> Literal {
        let s = i.intern(name);
        Literal::new(Term::make_const(s), positive)
    }

    #[test]
    fn detects_tautology() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let c = Clause::new(vec![
            Literal::positive(Term::make_const(p)),
            Literal::negative(Term::make_const(p)),
        ]);
        assert!(c.is_tautology());
    }

    #[test]
    fn simplify_dedups_literals() {
        let mut i = Interner::new();
        let a = lit(&mut i, "P", true);
        let c = Clause::new(vec![a.clone(), a.clone()]);
        assert_eq!(c.simplify().size(), 1);
    }

    #[test]
    fn hash_is_order_independent() {
        let mut i = Interner::new();
        let a = lit(&mut i, "P", true);
        let b = lit(&mut i, "Q", false);
        let c1 = Clause::new(vec![a.clone(), b.clone()]);
        let c2 = Clause::new(vec![b, a]);
        assert_eq!(c1.hash_value(), c2.hash_value());
        assert!(c1.equals(&c2));
    }

    #[test]
    fn unit_clause_subsumes_matching_superset() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        let unit = Clause::new(vec![Literal::positive(Term::make_var(0))]);
        let target = Clause::new(vec![
            Literal::positive(Term::make_const(p)),
            Literal::positive(Term::make_const(q)),
        ]);
        assert!(unit.subsumes(&target));
    }

    #[test]
    fn clause_does_not_subsume_with_wrong_polarity() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let unit = Clause::new(vec![Literal::negative(Term::make_var(0))]);
        let target = Clause::new(vec![Literal::positive(Term::make_const(p))]);
        assert!(!unit.subsumes(&target));
    }

    #[test]
    fn empty_clause_is_empty_and_not_unit() {
        let c = Clause::empty();
        assert!(c.is_empty());
        assert!(!c.is_unit());
    }
}
