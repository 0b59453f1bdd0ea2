//! Rewrite rules and the rewriting system.
//!
//! Grounded on `examples/original_source/src/term/rewriting.hpp`:
//! `TermRewriteRule`, `RewriteResult`, `RewriteSystem`, and `Equation`
//! carry over their public method surface, generalized from the C++'s
//! `std::string` rule names to owned `String`s and from raw
//! `TermDBPtr` to the `Rc`-backed [`Term`].

use crate::ordering::LexicographicPathOrdering;
use crate::position::Position;
use crate::subst::Substitution;
use crate::term::Term;

/// An oriented equation `lhs -> rhs`, with `lhs >_ord rhs`.
#[derive(Clone)]
pub struct RewriteRule {
    lhs: Term,
    rhs: Term,
    name: String,
}

impl RewriteRule {
    pub fn new(lhs: Term, rhs: Term, name: impl Into<String>) -> Self {
        RewriteRule {
            lhs,
            rhs,
            name: name.into(),
        }
    }

    pub fn lhs(&self) -> &Term {
        &self.lhs
    }

    pub fn rhs(&self) -> &Term {
        &self.rhs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if `lhs > rhs` under `ordering`, i.e. this rule is
    /// properly oriented and safe to use for rewriting.
    pub fn is_oriented(&self, ordering: &LexicographicPathOrdering) -> bool {
        ordering.greater(&self.lhs, &self.rhs)
    }

    pub fn equals(&self, other: &RewriteRule) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }
}

/// An unoriented equation, used as input to completion and as a
/// standalone orientability query.
#[derive(Clone)]
pub struct Equation {
    lhs: Term,
    rhs: Term,
    name: String,
}

impl Equation {
    pub fn new(lhs: Term, rhs: Term, name: impl Into<String>) -> Self {
        Equation {
            lhs,
            rhs,
            name: name.into(),
        }
    }

    pub fn lhs(&self) -> &Term {
        &self.lhs
    }

    pub fn rhs(&self) -> &Term {
        &self.rhs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if `lhs` and `rhs` are not ordering-equivalent, i.e. one
    /// side can be oriented as strictly greater than the other.
    pub fn is_orientable(&self, ordering: &LexicographicPathOrdering) -> bool {
        !ordering.equivalent(&self.lhs, &self.rhs)
    }

    /// Orients the equation into a rewrite rule with the
    /// ordering-greater side on the left, or `None` if the two sides
    /// are ordering-equivalent.
    pub fn orient(&self, ordering: &LexicographicPathOrdering) -> Option<RewriteRule> {
        if ordering.greater(&self.lhs, &self.rhs) {
            Some(RewriteRule::new(self.lhs.clone(), self.rhs.clone(), self.name.clone()))
        } else if ordering.greater(&self.rhs, &self.lhs) {
            Some(RewriteRule::new(self.rhs.clone(), self.lhs.clone(), self.name.clone()))
        } else {
            None
        }
    }
}

/// The outcome of a rewrite attempt.
pub struct RewriteResult {
    pub result: Term,
    pub position: Position,
    pub rule_name: String,
}

/// One-way matching: finds a substitution `theta` such that
/// `theta(pattern) == subject`, binding only variables of `pattern`.
/// Unlike [`crate::unify::unify`], the subject side is never bound.
pub fn match_term(pattern: &Term, subject: &Term, subst: &mut Substitution) -> bool {
    if let Some(i) = pattern.as_var() {
        match subst.get(i) {
            Some(bound) => return bound == subject,
            None => {
                subst.bind(i, subject.clone());
                return true;
            }
        }
    }
    if pattern.shape() != subject.shape() || pattern.symbol() != subject.symbol() {
        return false;
    }
    let p_children = pattern.children();
    let s_children = subject.children();
    if p_children.len() != s_children.len() {
        return false;
    }
    p_children
        .iter()
        .zip(s_children.iter())
        .all(|(p, s)| match_term(p, s, subst))
}

/// A managed set of rewrite rules, supporting single-step rewriting,
/// normalization, and rule-set mutation (`remove_rule`/`clear`,
/// present in the C++ original but dropped by the distilled spec —
/// see the workspace-level expanded specification).
pub struct RewriteSystem {
    ordering: LexicographicPathOrdering,
    rules: Vec<RewriteRule>,
    next_rule_id: u64,
}

impl RewriteSystem {
    pub fn new(ordering: LexicographicPathOrdering) -> Self {
        RewriteSystem {
            ordering,
            rules: Vec::new(),
            next_rule_id: 0,
        }
    }

    pub fn ordering(&self) -> &LexicographicPathOrdering {
        &self.ordering
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    fn generate_rule_name(&mut self) -> String {
        let name = format!("r{}", self.next_rule_id);
        self.next_rule_id += 1;
        name
    }

    /// Orients `lhs`/`rhs` and adds the resulting rule. Returns
    /// `false` if the two sides are ordering-equivalent or an
    /// equal rule is already present (duplicates are silently
    /// skipped, not an error).
    pub fn add_equation(&mut self, lhs: Term, rhs: Term, name: Option<String>) -> bool {
        let name = name.unwrap_or_else(|| self.generate_rule_name());
        let equation = Equation::new(lhs, rhs, name);
        match equation.orient(&self.ordering) {
            Some(rule) => self.add_rule(rule),
            None => false,
        }
    }

    /// Adds a pre-oriented rule as-is, trusting the caller that it is
    /// properly oriented (debug-asserted). Returns `false` without
    /// adding it if an equal rule (same `lhs`/`rhs`) is already
    /// present.
    pub fn add_rule(&mut self, rule: RewriteRule) -> bool {
        debug_assert!(rule.is_oriented(&self.ordering));
        if self.rules.iter().any(|r| r.equals(&rule)) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    pub fn remove_rule(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name() != name);
        self.rules.len() != before
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    fn try_apply_rule(&self, term: &Term, rule: &RewriteRule) -> Option<Term> {
        let mut subst = Substitution::empty();
        if match_term(rule.lhs(), term, &mut subst) {
            Some(subst.apply(rule.rhs()))
        } else {
            None
        }
    }

    /// Attempts one rewrite step anywhere in `term`, trying positions
    /// outermost-first, left to right.
    pub fn rewrite_step(&self, term: &Term) -> Option<RewriteResult> {
        for position in Position::all_positions(term) {
            if let Some(result) = self.rewrite_at(term, &position) {
                return Some(result);
            }
        }
        None
    }

    /// Attempts one rewrite step at exactly `position`.
    pub fn rewrite_at(&self, term: &Term, position: &Position) -> Option<RewriteResult> {
        let subterm = position.resolve(term)?;
        for rule in &self.rules {
            if let Some(replacement) = self.try_apply_rule(&subterm, rule) {
                let result = position.replace(term, replacement)?;
                return Some(RewriteResult {
                    result,
                    position: position.clone(),
                    rule_name: rule.name().to_string(),
                });
            }
        }
        None
    }

    /// Rewrites `term` to normal form, stopping after `max_steps`
    /// steps even if further rewrites are possible (guards against a
    /// non-terminating rule set).
    pub fn normalize(&self, term: &Term, max_steps: usize) -> Term {
        let mut current = term.clone();
        for _ in 0..max_steps {
            match self.rewrite_step(&current) {
                Some(step) => current = step.result,
                None => break,
            }
        }
        current
    }

    pub fn is_normal_form(&self, term: &Term) -> bool {
        self.rewrite_step(term).is_none()
    }

    pub fn subterm_at(term: &Term, position: &Position) -> Option<Term> {
        position.resolve(term)
    }

    pub fn replace_at(term: &Term, position: &Position, replacement: Term) -> Option<Term> {
        position.replace(term, replacement)
    }

    /// All positions in `term` where `rule`'s left-hand side matches.
    pub fn find_redex_positions(&self, term: &Term, rule: &RewriteRule) -> Vec<Position> {
        Position::all_positions(term)
            .into_iter()
            .filter(|p| {
                p.resolve(term)
                    .map(|sub| self.try_apply_rule(&sub, rule).is_some())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// True if `term1` and `term2` normalize to the same term.
    pub fn joinable(&self, term1: &Term, term2: &Term, max_steps: usize) -> bool {
        self.normalize(term1, max_steps) == self.normalize(term2, max_steps)
    }
}
