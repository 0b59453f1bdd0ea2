//! Binary resolution and factoring.
//!
//! Grounded on spec §4.8.4 (the C++'s `ResolutionInference` in
//! `clause.hpp` is declared but its definitions were not retained in
//! the distillation pack, so this follows the spec's literal
//! description of the algorithm directly).

use autoprover_clausal::{Clause, Literal};
use autoprover_term::unify;

fn max_variable_index(clause: &Clause) -> Option<usize> {
    clause.variables().into_iter().max()
}

/// Renames `c2`'s variables apart from `c1`'s by shifting them past
/// the combined maximum variable index of both.
fn standardize_apart(c1: &Clause, c2: &Clause) -> Clause {
    let max1 = max_variable_index(c1).unwrap_or(0);
    let max2 = max_variable_index(c2).unwrap_or(0);
    c2.rename_variables(max1.max(max2) + 1)
}

/// Attempts binary resolution between `c1` and `c2`: the first
/// complementary-polarity literal pair (in literal order) whose atoms
/// unify produces the resolvent, built from the unifier applied to the
/// union of the two clauses' remaining literals.
pub fn resolve(c1: &Clause, c2: &Clause) -> Option<Clause> {
    let c2 = standardize_apart(c1, c2);
    for i in 0..c1.literals().len() {
        for j in 0..c2.literals().len() {
            if let Some(resolvent) = resolve_on_literals(c1, &c2, i, j) {
                return Some(resolvent);
            }
        }
    }
    None
}

/// Attempts resolution on a specific literal pair, assuming the two
/// clauses' variable spaces are already disjoint.
pub fn resolve_on_literals(c1: &Clause, c2: &Clause, i: usize, j: usize) -> Option<Clause> {
    let lit1 = &c1.literals()[i];
    let lit2 = &c2.literals()[j];
    if lit1.is_positive() == lit2.is_positive() {
        return None;
    }
    let unifier = unify(lit1.atom(), lit2.atom())?;
    let mut literals: Vec<Literal> = Vec::new();
    for (k, lit) in c1.literals().iter().enumerate() {
        if k != i {
            literals.push(lit.substitute(&unifier));
        }
    }
    for (k, lit) in c2.literals().iter().enumerate() {
        if k != j {
            literals.push(lit.substitute(&unifier));
        }
    }
    Some(Clause::new(literals))
}

/// Attempts to unify any two same-polarity literals of `clause` and,
/// on success, applies the unifier and deduplicates. Returns a clone
/// of the original clause if no pair factors.
pub fn factor(clause: &Clause) -> Clause {
    let literals = clause.literals();
    for i in 0..literals.len() {
        for j in (i + 1)..literals.len() {
            if literals[i].is_positive() != literals[j].is_positive() {
                continue;
            }
            if let Some(unifier) = unify(literals[i].atom(), literals[j].atom()) {
                return clause.substitute(&unifier).simplify();
            }
        }
    }
    clause.clone()
}
