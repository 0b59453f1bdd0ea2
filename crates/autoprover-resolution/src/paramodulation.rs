//! Paramodulation: rewriting under unification using positive
//! equality literals drawn from one clause to rewrite a subterm of
//! another.
//!
//! Grounded on spec §4.8.5's prose description together with
//! `examples/original_source/tests/test_paramodulation.cpp`'s observed
//! behavior — the `clause.cpp` file declaring `ParamodulationInference`
//! and `ResolutionWithParamodulation` in `clause.hpp` was not retained
//! in the distillation pack, so there is no C++ body to transliterate
//! here. In particular the "multiple positions" test case confirms
//! that a clause with an equality literal applicable at more than one
//! position in the target yields one resolvent per position, not a
//! single resolvent combining every position at once.

use crate::resolve::resolve;
use autoprover_base::Symbol;
use autoprover_clausal::{Clause, Literal};
use autoprover_term::{unify, Position, Term};

fn max_variable_index(clause: &Clause) -> Option<usize> {
    clause.variables().into_iter().max()
}

fn standardize_apart(c1: &Clause, c2: &Clause) -> Clause {
    let max1 = max_variable_index(c1).unwrap_or(0);
    let max2 = max_variable_index(c2).unwrap_or(0);
    c2.rename_variables(max1.max(max2) + 1)
}

/// True if `atom` is an equality atom `=(s, t)` under `equality_symbol`.
fn is_equality_atom(atom: &Term, equality_symbol: Symbol) -> bool {
    atom.symbol() == Some(equality_symbol) && atom.args().len() == 2
}

/// Indices of `clause`'s positive equality literals.
pub fn get_equality_literal_indices(clause: &Clause, equality_symbol: Symbol) -> Vec<usize> {
    clause
        .literals()
        .iter()
        .enumerate()
        .filter(|(_, lit)| lit.is_positive() && is_equality_atom(lit.atom(), equality_symbol))
        .map(|(i, _)| i)
        .collect()
}

pub fn has_equality_literals(clause: &Clause, equality_symbol: Symbol) -> bool {
    !get_equality_literal_indices(clause, equality_symbol).is_empty()
}

/// Rewrites the subterm of `target_atom` at `position` from `from` to
/// `to` under `from`'s unifier with that subterm, returning the
/// resulting atom. `None` if `position` does not exist in
/// `target_atom` or the subterm does not unify with `from`.
fn apply_equality_at_position(
    target_atom: &Term,
    position: &Position,
    from: &Term,
    to: &Term,
) -> Option<(Term, autoprover_term::Substitution)> {
    let subterm = position.resolve(target_atom)?;
    let unifier = unify(from, &subterm)?;
    let rewritten = position.replace(target_atom, to.clone())?;
    Some((unifier.apply(&rewritten), unifier))
}

/// All positions in `clause`'s literal atoms, as `(literal_index,
/// position)` pairs, that paramodulation could target.
pub fn find_paramod_positions(clause: &Clause) -> Vec<(usize, Position)> {
    clause
        .literals()
        .iter()
        .enumerate()
        .flat_map(|(i, lit)| Position::all_positions(lit.atom()).into_iter().map(move |p| (i, p)))
        .collect()
}

/// Paramodulates `equality_clause`'s equality literal at `eq_lit_idx`
/// into `target_clause`'s literal at `target_lit_idx`, rewriting the
/// subterm at `position`. Tries both directions of the equality.
/// Assumes the two clauses' variable spaces are already disjoint.
pub fn paramodulate(
    equality_clause: &Clause,
    target_clause: &Clause,
    eq_lit_idx: usize,
    target_lit_idx: usize,
    position: &Position,
    equality_symbol: Symbol,
) -> Vec<Clause> {
    let eq_atom = equality_clause.literals()[eq_lit_idx].atom();
    if !is_equality_atom(eq_atom, equality_symbol) {
        return Vec::new();
    }
    let sides = eq_atom.args();
    let (s, t) = (sides[0].clone(), sides[1].clone());
    let target_atom = target_clause.literals()[target_lit_idx].atom();

    let mut out = Vec::new();
    for (from, to) in [(&s, &t), (&t, &s)] {
        let Some((new_atom, unifier)) = apply_equality_at_position(target_atom, position, from, to)
        else {
            continue;
        };

        let mut literals: Vec<Literal> = Vec::new();
        for (k, lit) in equality_clause.literals().iter().enumerate() {
            if k != eq_lit_idx {
                literals.push(lit.substitute(&unifier));
            }
        }
        for (k, lit) in target_clause.literals().iter().enumerate() {
            if k == target_lit_idx {
                literals.push(Literal::new(new_atom.clone(), lit.is_positive()));
            } else {
                literals.push(lit.substitute(&unifier));
            }
        }
        out.push(Clause::new(literals));
    }
    out
}

/// Tries ordinary binary resolution between `c1` and `c2`, returning
/// every resolvent found (at most one, since [`resolve`] stops at the
/// first success).
pub fn try_resolution(c1: &Clause, c2: &Clause) -> Vec<Clause> {
    resolve(c1, c2).into_iter().collect()
}

/// Tries paramodulation in both directions: `c1`'s equality literals
/// rewriting into `c2`, and `c2`'s rewriting into `c1`. Every
/// successful position/direction combination produces its own
/// resolvent.
pub fn try_paramodulation(c1: &Clause, c2: &Clause, equality_symbol: Symbol) -> Vec<Clause> {
    let mut out = Vec::new();
    out.extend(paramodulate_into(c1, c2, equality_symbol));
    out.extend(paramodulate_into(c2, c1, equality_symbol));
    out
}

fn paramodulate_into(equality_side: &Clause, target_side: &Clause, equality_symbol: Symbol) -> Vec<Clause> {
    let target_side = standardize_apart(equality_side, target_side);
    let mut out = Vec::new();
    for eq_idx in get_equality_literal_indices(equality_side, equality_symbol) {
        for (target_idx, position) in find_paramod_positions(&target_side) {
            out.extend(paramodulate(
                equality_side,
                &target_side,
                eq_idx,
                target_idx,
                &position,
                equality_symbol,
            ));
        }
    }
    out
}

/// Combines ordinary resolution with paramodulation between `c1` and
/// `c2`, returning every resolvent either inference produces.
pub fn resolve_with_paramodulation(c1: &Clause, c2: &Clause, equality_symbol: Symbol) -> Vec<Clause> {
    let mut out = try_resolution(c1, c2);
    out.extend(try_paramodulation(c1, c2, equality_symbol));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_base::Interner;

    fn eq_symbol(i: &mut Interner) -> Symbol {
        i.intern("=")
    }

    #[test]
    fn rewrites_ground_equality_into_target() {
        // f(a) = b, P(f(a)) |- P(b)
        let mut i = Interner::new();
        let eq = eq_symbol(&mut i);
        let f = i.intern("f");
        let a = i.intern("a");
        let b = i.intern("b");
        let p = i.intern("P");

        let fa = Term::make_app(f, vec![Term::make_const(a)]);
        let equality = Clause::new(vec![Literal::positive(Term::make_app(eq, vec![fa.clone(), Term::make_const(b)]))]);
        let target = Clause::new(vec![Literal::positive(Term::make_app(p, vec![fa]))]);

        let resolvents = try_paramodulation(&equality, &target, eq);
        assert!(resolvents
            .iter()
            .any(|c| c.size() == 1 && c.literals()[0].atom() == &Term::make_app(p, vec![Term::make_const(b)])));
    }

    #[test]
    fn rewrites_with_variable_equality() {
        // f(X) = g(X), P(f(a)) |- P(g(a))
        let mut i = Interner::new();
        let eq = eq_symbol(&mut i);
        let f = i.intern("f");
        let g = i.intern("g");
        let a = i.intern("a");
        let p = i.intern("P");

        let x = Term::make_var(0);
        let fx = Term::make_app(f, vec![x.clone()]);
        let gx = Term::make_app(g, vec![x]);
        let equality = Clause::new(vec![Literal::positive(Term::make_app(eq, vec![fx, gx]))]);
        let target = Clause::new(vec![Literal::positive(Term::make_app(
            p,
            vec![Term::make_app(f, vec![Term::make_const(a)])],
        ))]);

        let resolvents = try_paramodulation(&equality, &target, eq);
        let expected = Term::make_app(p, vec![Term::make_app(g, vec![Term::make_const(a)])]);
        assert!(resolvents.iter().any(|c| c.literals()[0].atom() == &expected));
    }

    #[test]
    fn multiple_rewrite_positions_yield_separate_resolvents() {
        // f(a) = b, Q(f(a), f(a)) |- two resolvents: Q(b,f(a)) and Q(f(a),b)
        let mut i = Interner::new();
        let eq = eq_symbol(&mut i);
        let f = i.intern("f");
        let a = i.intern("a");
        let b = i.intern("b");
        let q = i.intern("Q");

        let fa = Term::make_app(f, vec![Term::make_const(a)]);
        let equality = Clause::new(vec![Literal::positive(Term::make_app(eq, vec![fa.clone(), Term::make_const(b)]))]);
        let target = Clause::new(vec![Literal::positive(Term::make_app(q, vec![fa.clone(), fa]))]);

        let resolvents = try_paramodulation(&equality, &target, eq);
        let first = Term::make_app(q, vec![Term::make_const(b), Term::make_app(f, vec![Term::make_const(a)])]);
        let second = Term::make_app(q, vec![Term::make_app(f, vec![Term::make_const(a)]), Term::make_const(b)]);
        assert!(resolvents.iter().any(|c| c.literals()[0].atom() == &first));
        assert!(resolvents.iter().any(|c| c.literals()[0].atom() == &second));
    }

    #[test]
    fn non_equality_clauses_paramodulate_to_nothing() {
        let mut i = Interner::new();
        let eq = eq_symbol(&mut i);
        let p = i.intern("P");
        let q = i.intern("Q");
        let c1 = Clause::new(vec![Literal::positive(Term::make_const(p))]);
        let c2 = Clause::new(vec![Literal::positive(Term::make_const(q))]);
        assert!(try_paramodulation(&c1, &c2, eq).is_empty());
    }

    #[test]
    fn resolve_with_paramodulation_includes_ordinary_resolution() {
        let mut i = Interner::new();
        let eq = eq_symbol(&mut i);
        let p = i.intern("P");
        let c1 = Clause::new(vec![Literal::negative(Term::make_const(p))]);
        let c2 = Clause::new(vec![Literal::positive(Term::make_const(p))]);
        let resolvents = resolve_with_paramodulation(&c1, &c2, eq);
        assert!(resolvents.iter().any(Clause::is_empty));
    }
}
