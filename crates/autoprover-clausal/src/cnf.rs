//! Conversion of first-order formulas to Conjunctive Normal Form.
//!
//! Grounded on the seven-step pipeline documented on `CNFConverter` in
//! `examples/original_source/src/resolution/cnf_converter.hpp`:
//! eliminate implications, move negations inward, standardize
//! variables, prenex, skolemize, distribute, extract. Variables here
//! are De Bruijn indices rather than named binders, so "standardize
//! variables apart" has no work to do (distinct binders never collide
//! by construction) and is folded into skolemization, which already
//! renumbers every bound universal variable into a flat,
//! globally-scoped index as it walks the formula — consistent with
//! how `autoprover-term` already treats rule and clause variables as
//! globally scoped, not depth-relative. The prenex step itself
//! (`to_prenex_form`) is kept as an identity placeholder rather than a
//! real quantifier-hoisting pass: `skolemize` descends through
//! `And`/`Or`/`Not` directly, tracking in-scope universal variables as
//! it goes, so quantifiers never need to be pulled to the front first.

use crate::clause::Clause;
use crate::literal::Literal;
use autoprover_base::Interner;
use autoprover_term::{shift_term, Shape, Term};

/// Step 1: rewrites every `Implies(a, b)` as `Or(Not(a), b)`.
pub fn eliminate_implications(term: &Term) -> Term {
    match term.shape() {
        Shape::Implies => {
            let (a, b) = term.binary_parts().unwrap();
            Term::make_or(Term::make_not(eliminate_implications(a)), eliminate_implications(b))
        }
        Shape::And => {
            let (a, b) = term.binary_parts().unwrap();
            Term::make_and(eliminate_implications(a), eliminate_implications(b))
        }
        Shape::Or => {
            let (a, b) = term.binary_parts().unwrap();
            Term::make_or(eliminate_implications(a), eliminate_implications(b))
        }
        Shape::Not => Term::make_not(eliminate_implications(term.unary_body().unwrap())),
        Shape::Forall => Term::make_forall(
            term.quantifier_hint(),
            eliminate_implications(term.unary_body().unwrap()),
        ),
        Shape::Exists => Term::make_exists(
            term.quantifier_hint(),
            eliminate_implications(term.unary_body().unwrap()),
        ),
        Shape::Var | Shape::Const | Shape::App => term.clone(),
    }
}

/// Step 2: pushes negation down to atoms via De Morgan's laws and
/// quantifier duality, collapsing double negation.
pub fn move_negations_inward(term: &Term) -> Term {
    match term.shape() {
        Shape::Not => {
            let inner = term.unary_body().unwrap();
            match inner.shape() {
                Shape::Not => move_negations_inward(inner.unary_body().unwrap()),
                Shape::And => {
                    let (l, r) = inner.binary_parts().unwrap();
                    Term::make_or(
                        move_negations_inward(&Term::make_not(l.clone())),
                        move_negations_inward(&Term::make_not(r.clone())),
                    )
                }
                Shape::Or => {
                    let (l, r) = inner.binary_parts().unwrap();
                    Term::make_and(
                        move_negations_inward(&Term::make_not(l.clone())),
                        move_negations_inward(&Term::make_not(r.clone())),
                    )
                }
                Shape::Forall => Term::make_exists(
                    inner.quantifier_hint(),
                    move_negations_inward(&Term::make_not(inner.unary_body().unwrap().clone())),
                ),
                Shape::Exists => Term::make_forall(
                    inner.quantifier_hint(),
                    move_negations_inward(&Term::make_not(inner.unary_body().unwrap().clone())),
                ),
                _ => Term::make_not(inner.clone()),
            }
        }
        Shape::And => {
            let (l, r) = term.binary_parts().unwrap();
            Term::make_and(move_negations_inward(l), move_negations_inward(r))
        }
        Shape::Or => {
            let (l, r) = term.binary_parts().unwrap();
            Term::make_or(move_negations_inward(l), move_negations_inward(r))
        }
        Shape::Forall => Term::make_forall(
            term.quantifier_hint(),
            move_negations_inward(term.unary_body().unwrap()),
        ),
        Shape::Exists => Term::make_exists(
            term.quantifier_hint(),
            move_negations_inward(term.unary_body().unwrap()),
        ),
        Shape::Var | Shape::Const | Shape::App | Shape::Implies => term.clone(),
    }
}

/// Step 4: a placeholder pass. Quantifiers are left wherever they sit
/// in the NNF formula instead of being pulled to the front; `skolemize`
/// (step 5) descends through `And`/`Or`/`Not` directly, so hoisting a
/// prefix first would be wasted work. Kept as its own pipeline step so
/// the stage numbering matches the original algorithm.
pub fn to_prenex_form(term: &Term) -> Term {
    term.clone()
}

/// Substitutes `replacement` for the variable bound at De Bruijn depth
/// `depth` within `term`, then decrements every deeper-but-free index
/// by one to account for the removed binder ("instantiate and pop").
fn instantiate_and_pop_at(term: &Term, replacement: &Term, depth: usize) -> Term {
    if let Some(i) = term.as_var() {
        if i == depth {
            return shift_term(replacement, depth);
        } else if i > depth {
            return Term::make_var(i - 1);
        } else {
            return term.clone();
        }
    }
    match term.shape() {
        Shape::Forall | Shape::Exists => {
            let body = instantiate_and_pop_at(term.unary_body().unwrap(), replacement, depth + 1);
            if term.shape() == Shape::Forall {
                Term::make_forall(term.quantifier_hint(), body)
            } else {
                Term::make_exists(term.quantifier_hint(), body)
            }
        }
        _ => {
            let children: Vec<Term> = term
                .children()
                .iter()
                .map(|c| instantiate_and_pop_at(c, replacement, depth))
                .collect();
            if children.is_empty() {
                term.clone()
            } else {
                term.rebuild(children)
            }
        }
    }
}

fn instantiate_and_pop(term: &Term, replacement: &Term) -> Term {
    instantiate_and_pop_at(term, replacement, 0)
}

/// Generates fresh Skolem function symbols during quantifier
/// elimination, tracking a per-instance counter (spec §9's "global
/// counters" design note, scoped per engine instance rather than
/// process-wide).
pub struct SkolemManager {
    counter: u64,
}

impl SkolemManager {
    pub fn new() -> Self {
        SkolemManager { counter: 0 }
    }

    pub fn next_skolem_name(&mut self) -> String {
        let name = format!("sk{}", self.counter);
        self.counter += 1;
        name
    }
}

impl Default for SkolemManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Step 5: walks an NNF formula (quantifiers may sit anywhere in it,
/// since `to_prenex_form` no longer hoists them), renumbering each
/// bound universal variable into a flat, globally-scoped index and
/// replacing each existential variable with a Skolem term built from
/// the universal variables currently in scope at that point in the
/// formula — not just those preceding it in a flat prefix.
pub fn skolemize(formula: &Term, skolems: &mut SkolemManager, interner: &mut Interner) -> Term {
    let mut universal_flat_vars = Vec::new();
    let mut next_flat_var = 0usize;
    skolemize_rec(formula, &mut universal_flat_vars, &mut next_flat_var, skolems, interner)
}

fn skolemize_rec(
    term: &Term,
    universal_flat_vars: &mut Vec<usize>,
    next_flat_var: &mut usize,
    skolems: &mut SkolemManager,
    interner: &mut Interner,
) -> Term {
    match term.shape() {
        Shape::Forall => {
            let flat = *next_flat_var;
            *next_flat_var += 1;
            let body = instantiate_and_pop(term.unary_body().unwrap(), &Term::make_var(flat));
            universal_flat_vars.push(flat);
            let result = skolemize_rec(&body, universal_flat_vars, next_flat_var, skolems, interner);
            universal_flat_vars.pop();
            result
        }
        Shape::Exists => {
            let skolem_symbol = interner.intern(&skolems.next_skolem_name());
            let skolem_term = if universal_flat_vars.is_empty() {
                Term::make_const(skolem_symbol)
            } else {
                Term::make_app(
                    skolem_symbol,
                    universal_flat_vars.iter().map(|&v| Term::make_var(v)).collect(),
                )
            };
            let body = instantiate_and_pop(term.unary_body().unwrap(), &skolem_term);
            skolemize_rec(&body, universal_flat_vars, next_flat_var, skolems, interner)
        }
        Shape::And => {
            let (l, r) = term.binary_parts().unwrap();
            Term::make_and(
                skolemize_rec(l, universal_flat_vars, next_flat_var, skolems, interner),
                skolemize_rec(r, universal_flat_vars, next_flat_var, skolems, interner),
            )
        }
        Shape::Or => {
            let (l, r) = term.binary_parts().unwrap();
            Term::make_or(
                skolemize_rec(l, universal_flat_vars, next_flat_var, skolems, interner),
                skolemize_rec(r, universal_flat_vars, next_flat_var, skolems, interner),
            )
        }
        Shape::Not => {
            Term::make_not(skolemize_rec(term.unary_body().unwrap(), universal_flat_vars, next_flat_var, skolems, interner))
        }
        Shape::Var | Shape::Const | Shape::App | Shape::Implies => term.clone(),
    }
}

fn and_parts(term: &Term) -> Option<(Term, Term)> {
    if term.shape() == Shape::And {
        let (l, r) = term.binary_parts().unwrap();
        Some((l.clone(), r.clone()))
    } else {
        None
    }
}

fn distribute_or_pair(left: &Term, right: &Term) -> Term {
    if let Some((a, b)) = and_parts(left) {
        Term::make_and(distribute_or_pair(&a, right), distribute_or_pair(&b, right))
    } else if let Some((a, b)) = and_parts(right) {
        Term::make_and(distribute_or_pair(left, &a), distribute_or_pair(left, &b))
    } else {
        Term::make_or(left.clone(), right.clone())
    }
}

/// Step 6: distributes `Or` over `And`, turning a quantifier-free NNF
/// matrix into CNF.
pub fn distribute_or_over_and(term: &Term) -> Term {
    match term.shape() {
        Shape::And => {
            let (l, r) = term.binary_parts().unwrap();
            Term::make_and(distribute_or_over_and(l), distribute_or_over_and(r))
        }
        Shape::Or => {
            let (l, r) = term.binary_parts().unwrap();
            distribute_or_pair(&distribute_or_over_and(l), &distribute_or_over_and(r))
        }
        _ => term.clone(),
    }
}

fn collect_literals(term: &Term, literals: &mut Vec<Literal>) {
    match term.shape() {
        Shape::Or => {
            let (l, r) = term.binary_parts().unwrap();
            collect_literals(l, literals);
            collect_literals(r, literals);
        }
        Shape::Not => literals.push(Literal::negative(term.unary_body().unwrap().clone())),
        _ => literals.push(Literal::positive(term.clone())),
    }
}

fn collect_conjuncts(term: &Term, clauses: &mut Vec<Clause>) {
    if term.shape() == Shape::And {
        let (l, r) = term.binary_parts().unwrap();
        collect_conjuncts(l, clauses);
        collect_conjuncts(r, clauses);
    } else {
        let mut literals = Vec::new();
        collect_literals(term, &mut literals);
        clauses.push(Clause::new(literals));
    }
}

/// Step 7: splits a CNF formula's top-level conjunction into clauses,
/// each built from the literals of one top-level disjunction.
pub fn extract_clauses(cnf_formula: &Term) -> Vec<Clause> {
    let mut clauses = Vec::new();
    collect_conjuncts(cnf_formula, &mut clauses);
    clauses
}

/// Runs the full seven-step pipeline, converting `formula` into an
/// equisatisfiable set of clauses.
pub fn to_cnf(formula: &Term, interner: &mut Interner) -> Vec<Clause> {
    let mut skolems = SkolemManager::new();
    let step1 = eliminate_implications(formula);
    let step2 = move_negations_inward(&step1);
    let step3 = to_prenex_form(&step2);
    let step4 = skolemize(&step3, &mut skolems, interner);
    let step5 = distribute_or_over_and(&step4);
    extract_clauses(&step5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eliminate_implications_rewrites_to_or_not() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        let f = Term::make_implies(Term::make_const(p), Term::make_const(q));
        let result = eliminate_implications(&f);
        assert_eq!(result.shape(), Shape::Or);
    }

    #[test]
    fn nnf_pushes_negation_to_atoms() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        let f = Term::make_not(Term::make_and(Term::make_const(p), Term::make_const(q)));
        let result = move_negations_inward(&f);
        assert_eq!(result.shape(), Shape::Or);
        let (l, r) = result.binary_parts().unwrap();
        assert_eq!(l.shape(), Shape::Not);
        assert_eq!(r.shape(), Shape::Not);
    }

    #[test]
    fn double_negation_collapses() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let f = Term::make_not(Term::make_not(Term::make_const(p)));
        assert_eq!(move_negations_inward(&f), Term::make_const(p));
    }

    #[test]
    fn to_prenex_form_is_the_identity() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        // Forall x. P(x) AND Q — left untouched, not hoisted.
        let f = Term::make_and(
            Term::make_forall(None, Term::make_app(p, vec![Term::make_var(0)])),
            Term::make_const(q),
        );
        assert_eq!(to_prenex_form(&f), f);
    }

    #[test]
    fn skolemize_replaces_existential_with_function_of_universals() {
        let mut i = Interner::new();
        let p = i.intern("P");
        // forall x. exists y. P(x, y)
        let f = Term::make_forall(
            None,
            Term::make_exists(None, Term::make_app(p, vec![Term::make_var(1), Term::make_var(0)])),
        );
        let mut skolems = SkolemManager::new();
        let result = skolemize(&f, &mut skolems, &mut i);
        // matrix should be P(0, sk0(0))
        assert_eq!(result.shape(), Shape::App);
        assert_eq!(result.args()[0], Term::make_var(0));
        assert_eq!(result.args()[1].shape(), Shape::App);
    }

    #[test]
    fn skolemize_handles_existential_nested_inside_conjunction() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        // forall x. (P(x) and (exists y. Q(x, y))) — the existential is
        // not in a hoisted prefix; it sits under an And inside the
        // Forall's body.
        let f = Term::make_forall(
            None,
            Term::make_and(
                Term::make_app(p, vec![Term::make_var(0)]),
                Term::make_exists(None, Term::make_app(q, vec![Term::make_var(1), Term::make_var(0)])),
            ),
        );
        let mut skolems = SkolemManager::new();
        let result = skolemize(&f, &mut skolems, &mut i);
        assert_eq!(result.shape(), Shape::And);
        let (left, right) = result.binary_parts().unwrap();
        // P(0)
        assert_eq!(left.args()[0], Term::make_var(0));
        // Q(0, sk0(0)) — the Skolem term is a function of the
        // enclosing universal, even though the existential never sat
        // in a linear quantifier prefix.
        assert_eq!(right.args()[0], Term::make_var(0));
        assert_eq!(right.args()[1].shape(), Shape::App);
    }

    #[test]
    fn skolemize_gives_independent_universals_distinct_indices() {
        let mut i = Interner::new();
        let p = i.intern("P");
        // (forall x. P(x)) and (forall y. P(y)) — two Foralls in
        // separate And branches, neither nested in the other, must
        // still get distinct flat variable indices.
        let f = Term::make_and(
            Term::make_forall(None, Term::make_app(p, vec![Term::make_var(0)])),
            Term::make_forall(None, Term::make_app(p, vec![Term::make_var(0)])),
        );
        let mut skolems = SkolemManager::new();
        let result = skolemize(&f, &mut skolems, &mut i);
        let (left, right) = result.binary_parts().unwrap();
        assert_eq!(left.args()[0], Term::make_var(0));
        assert_eq!(right.args()[0], Term::make_var(1));
    }

    #[test]
    fn to_cnf_produces_expected_clause_count() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        // (P -> Q) becomes (not P or Q): a single clause.
        let f = Term::make_implies(Term::make_const(p), Term::make_const(q));
        let clauses = to_cnf(&f, &mut i);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].size(), 2);
    }

    #[test]
    fn distribute_or_over_and_produces_two_clauses() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        let r = i.intern("R");
        // (P and Q) or R  ==  (P or R) and (Q or R)
        let f = Term::make_or(
            Term::make_and(Term::make_const(p), Term::make_const(q)),
            Term::make_const(r),
        );
        let distributed = distribute_or_over_and(&f);
        let clauses = extract_clauses(&distributed);
        assert_eq!(clauses.len(), 2);
    }
}
