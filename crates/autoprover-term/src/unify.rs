//! Robinson unification with occurs check.
//!
//! Grounded on spec §4.1's unification contract ("success flag plus
//! substitution" in the original, returned here as `Option<Substitution>`
//! per Rust idiom) — no standalone C++ header for unification survived
//! into `examples/original_source/`, so the algorithm follows the
//! textbook formulation the spec prose describes.

use crate::subst::Substitution;
use crate::term::Term;

/// Attempts to unify `s` and `t`, returning the most general unifier
/// if one exists.
pub fn unify(s: &Term, t: &Term) -> Option<Substitution> {
    let mut subst = Substitution::empty();
    if unify_into(s, t, &mut subst) {
        Some(subst)
    } else {
        None
    }
}

fn unify_into(s: &Term, t: &Term, subst: &mut Substitution) -> bool {
    let s = resolve(s, subst);
    let t = resolve(t, subst);

    if let Some(i) = s.as_var() {
        return bind_var(i, &t, subst);
    }
    if let Some(j) = t.as_var() {
        return bind_var(j, &s, subst);
    }
    if s.shape() != t.shape() {
        return false;
    }
    if s.symbol() != t.symbol() {
        return false;
    }

    let s_children = s.children();
    let t_children = t.children();
    if s_children.len() != t_children.len() {
        return false;
    }
    for (sc, tc) in s_children.iter().zip(t_children.iter()) {
        if !unify_into(sc, tc, subst) {
            return false;
        }
    }
    true
}

fn bind_var(var: usize, term: &Term, subst: &mut Substitution) -> bool {
    if let Some(j) = term.as_var() {
        if j == var {
            return true;
        }
    }
    if occurs(var, term, subst) {
        return false;
    }
    subst.bind(var, term.clone());
    true
}

/// Follows variable bindings already present in `subst` until
/// reaching a non-variable term or an unbound variable.
fn resolve(term: &Term, subst: &Substitution) -> Term {
    let mut current = term.clone();
    while let Some(i) = current.as_var() {
        match subst.get(i) {
            Some(bound) => current = bound.clone(),
            None => break,
        }
    }
    current
}

fn occurs(var: usize, term: &Term, subst: &Substitution) -> bool {
    let term = resolve(term, subst);
    if let Some(i) = term.as_var() {
        return i == var;
    }
    term.children().iter().any(|c| occurs(var, c, subst))
}
