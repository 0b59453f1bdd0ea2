//! Critical pair computation for Knuth-Bendix completion.
//!
//! Grounded on `examples/original_source/src/completion/critical_pairs.hpp`:
//! a critical pair arises when one rule's left-hand side unifies with a
//! non-variable subterm of another rule's left-hand side. Overlap
//! enumeration here covers `App` argument positions the way
//! `find_non_variable_positions` walks `FUNCTION_APPLICATION` children
//! in the C++; it does not additionally descend into `NOT`/`IMPLIES`/
//! quantifier bodies, reproducing the original's coverage rather than
//! extending it.

use crate::position::Position;
use crate::rewrite::{Equation, RewriteRule};
use crate::subst::{shift_term, Substitution};
use crate::term::{Shape, Term};
use crate::unify::unify;

/// A pair `(s, t)` produced by overlapping two rewrite rules, to be
/// fed back into completion as a candidate equation.
pub struct CriticalPair {
    pub left: Term,
    pub right: Term,
    pub rule1_name: String,
    pub rule2_name: String,
    pub position: Position,
    pub unifier: Substitution,
}

impl CriticalPair {
    pub fn to_equation(&self, name: impl Into<String>) -> Equation {
        Equation::new(self.left.clone(), self.right.clone(), name)
    }
}

/// All positions reachable by descending only through `App` nodes'
/// argument structure — the overlap set the C++ original enumerates.
/// Does not descend into `Not`/`Implies`/quantifier bodies, matching
/// this module's documented coverage.
fn all_app_positions(term: &Term) -> Vec<Position> {
    let mut out = vec![Position::root()];
    if term.shape() == Shape::App {
        for (i, child) in term.children().into_iter().enumerate() {
            for p in all_app_positions(&child) {
                let indices: Vec<usize> = std::iter::once(i).chain(p.indices().iter().copied()).collect();
                out.push(Position::from_indices(indices));
            }
        }
    }
    out
}

/// Non-variable positions in `term`, restricted to `App` nodes'
/// argument structure — the overlap set the C++ original enumerates.
fn find_non_variable_positions(term: &Term) -> Vec<Position> {
    all_app_positions(term)
        .into_iter()
        .filter(|p| {
            p.resolve(term)
                .map(|t| t.shape() != Shape::Var)
                .unwrap_or(false)
        })
        .collect()
}

fn rename_rule_variables(rule: &RewriteRule, offset: usize) -> RewriteRule {
    RewriteRule::new(
        shift_term(rule.lhs(), offset),
        shift_term(rule.rhs(), offset),
        rule.name().to_string(),
    )
}

/// Offset applied to `rule2`'s variables before overlap search, large
/// enough in practice to avoid collision with `rule1`'s variables
/// since both rule sets stay well below this bound.
const VARIABLE_RENAME_OFFSET: usize = 1_000_000;

pub struct CriticalPairComputer;

impl CriticalPairComputer {
    /// All critical pairs between `rule1` and `rule2` (`rule1`'s lhs
    /// unified into a non-variable subterm of `rule2`'s lhs).
    pub fn compute_critical_pairs(rule1: &RewriteRule, rule2: &RewriteRule) -> Vec<CriticalPair> {
        let renamed_rule2 = rename_rule_variables(rule2, VARIABLE_RENAME_OFFSET);
        let mut pairs = Vec::new();
        for position in find_non_variable_positions(renamed_rule2.lhs()) {
            let Some(subterm) = position.resolve(renamed_rule2.lhs()) else {
                continue;
            };
            let Some(unifier) = unify(rule1.lhs(), &subterm) else {
                continue;
            };
            let overlapped = position
                .replace(renamed_rule2.lhs(), rule1.rhs().clone())
                .expect("position resolved above, so replace must succeed");
            let left = unifier.apply(&overlapped);
            let right = unifier.apply(renamed_rule2.rhs());
            if left == right {
                continue;
            }
            pairs.push(CriticalPair {
                left,
                right,
                rule1_name: rule1.name().to_string(),
                rule2_name: rule2.name().to_string(),
                position,
                unifier,
            });
        }
        pairs
    }

    /// Self-overlaps of a rule with a renamed copy of itself, skipping
    /// the trivial root-position overlap (a rule unifying with itself
    /// at `ε` produces a pair equal to the rule's own equation).
    pub fn compute_self_critical_pairs(rule: &RewriteRule) -> Vec<CriticalPair> {
        Self::compute_critical_pairs(rule, rule)
            .into_iter()
            .filter(|cp| !cp.position.is_root())
            .collect()
    }

    /// All critical pairs among every ordered pair of rules in
    /// `rules`, including each rule's self-overlaps.
    pub fn compute_all_critical_pairs(rules: &[RewriteRule]) -> Vec<CriticalPair> {
        let mut pairs = Vec::new();
        for rule in rules {
            pairs.extend(Self::compute_self_critical_pairs(rule));
        }
        for (i, rule1) in rules.iter().enumerate() {
            for rule2 in &rules[i + 1..] {
                pairs.extend(Self::compute_critical_pairs(rule1, rule2));
                pairs.extend(Self::compute_critical_pairs(rule2, rule1));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_base::Interner;

    #[test]
    fn overlapping_rules_produce_a_critical_pair() {
        let mut i = Interner::new();
        let f = i.intern("f");
        let g = i.intern("g");
        let a = i.intern("a");

        // rule1: f(x) -> a
        let rule1 = RewriteRule::new(Term::make_app(f, vec![Term::make_var(0)]), Term::make_const(a), "r1");
        // rule2: g(f(y)) -> y
        let rule2 = RewriteRule::new(
            Term::make_app(g, vec![Term::make_app(f, vec![Term::make_var(0)])]),
            Term::make_var(0),
            "r2",
        );

        let pairs = CriticalPairComputer::compute_critical_pairs(&rule1, &rule2);
        assert!(!pairs.is_empty());
    }

    #[test]
    fn disjoint_rules_produce_no_critical_pairs() {
        let mut i = Interner::new();
        let f = i.intern("f");
        let g = i.intern("g");
        let a = i.intern("a");
        let b = i.intern("b");
        let rule1 = RewriteRule::new(Term::make_app(f, vec![Term::make_const(a)]), Term::make_const(a), "r1");
        let rule2 = RewriteRule::new(Term::make_app(g, vec![Term::make_const(b)]), Term::make_const(b), "r2");
        assert!(CriticalPairComputer::compute_critical_pairs(&rule1, &rule2).is_empty());
    }

    #[test]
    fn self_critical_pairs_exclude_root_overlap() {
        let mut i = Interner::new();
        let f = i.intern("f");
        let a = i.intern("a");
        let rule = RewriteRule::new(Term::make_app(f, vec![Term::make_var(0)]), Term::make_const(a), "r");
        for cp in CriticalPairComputer::compute_self_critical_pairs(&rule) {
            assert!(!cp.position.is_root());
        }
    }

    #[test]
    fn pairs_with_syntactically_equal_sides_are_discarded() {
        let mut i = Interner::new();
        let f = i.intern("f");
        let x = Term::make_var(0);
        // f(f(x)) -> x overlapping with itself at the inner f(x)
        // produces a pair whose two sides are both syntactically
        // f(x), so it must not be emitted.
        let rule = RewriteRule::new(Term::make_app(f, vec![Term::make_app(f, vec![x.clone()])]), x, "r");
        for cp in CriticalPairComputer::compute_critical_pairs(&rule, &rule) {
            assert_ne!(cp.left, cp.right);
        }
    }

    #[test]
    fn overlap_search_does_not_descend_into_not() {
        let mut i = Interner::new();
        let f = i.intern("f");
        let a = i.intern("a");
        // rule1: f(x) -> a
        let rule1 = RewriteRule::new(Term::make_app(f, vec![Term::make_var(0)]), Term::make_const(a), "r1");
        // rule2: not(f(y)) -> y — the f(y) subterm sits under a Not,
        // so it must not be found as an overlap position.
        let rule2 = RewriteRule::new(
            Term::make_not(Term::make_app(f, vec![Term::make_var(0)])),
            Term::make_var(0),
            "r2",
        );
        assert!(CriticalPairComputer::compute_critical_pairs(&rule1, &rule2).is_empty());
    }
}
