//! Optional Knuth-Bendix preprocessing of unit equality clauses before
//! resolution search.
//!
//! Grounded on `ResolutionProver::try_kb_preprocessing`,
//! `extract_equality_equations`, `integrate_kb_rules`,
//! `is_unit_equality_clause`, `clause_to_equation`, and
//! `rule_to_clause` in
//! `examples/original_source/src/resolution/resolution_prover.cpp`.

use autoprover_base::Symbol;
use autoprover_clausal::{Clause, Literal};
use autoprover_completion::{KBConfig, KBResult, KnuthBendixCompletion};
use autoprover_term::{Equation, LexicographicPathOrdering, RewriteRule, Term};

fn is_equality_atom(atom: &Term, equality_symbol: Symbol) -> bool {
    atom.symbol() == Some(equality_symbol) && atom.args().len() == 2
}

/// True if `clause` is a single positive equality literal.
pub fn is_unit_equality_clause(clause: &Clause, equality_symbol: Symbol) -> bool {
    clause.is_unit()
        && clause.literals()[0].is_positive()
        && is_equality_atom(clause.literals()[0].atom(), equality_symbol)
}

/// Converts a unit positive equality clause into an [`Equation`].
/// `None` if `clause` is not a unit equality clause.
pub fn clause_to_equation(clause: &Clause, equality_symbol: Symbol, name: impl Into<String>) -> Option<Equation> {
    if !is_unit_equality_clause(clause, equality_symbol) {
        return None;
    }
    let sides = clause.literals()[0].atom().args();
    Some(Equation::new(sides[0].clone(), sides[1].clone(), name.into()))
}

/// Converts an oriented rewrite rule back into a unit positive
/// equality clause.
pub fn rule_to_clause(rule: &RewriteRule, equality_symbol: Symbol) -> Clause {
    let atom = Term::make_app(equality_symbol, vec![rule.lhs().clone(), rule.rhs().clone()]);
    Clause::new(vec![Literal::positive(atom)])
}

/// Pulls every unit positive equality clause out of `clauses` and
/// turns it into an equation candidate for completion.
pub fn extract_equality_equations(clauses: &[Clause], equality_symbol: Symbol) -> Vec<Equation> {
    clauses
        .iter()
        .enumerate()
        .filter_map(|(i, c)| clause_to_equation(c, equality_symbol, format!("kb{i}")))
        .collect()
}

/// Runs a bounded Knuth-Bendix completion over the unit equalities
/// found in `clauses`. Returns the completion result; the caller
/// decides (via [`integrate_kb_rules`]) whether to fold the resulting
/// rules back into the clause set.
pub fn try_kb_preprocessing(
    clauses: &[Clause],
    ordering: LexicographicPathOrdering,
    kb_config: KBConfig,
    equality_symbol: Symbol,
) -> Result<KBResult, autoprover_base::EngineError> {
    let equations = extract_equality_equations(clauses, equality_symbol);
    let mut engine = KnuthBendixCompletion::new(ordering, kb_config)?;
    engine.complete(equations)
}

/// Replaces every unit positive equality clause in `original_clauses`
/// with the oriented rules `kb_rules` produced, leaving every other
/// clause untouched. Only called after a successful
/// [`try_kb_preprocessing`] run.
pub fn integrate_kb_rules(original_clauses: &[Clause], kb_rules: &[RewriteRule], equality_symbol: Symbol) -> Vec<Clause> {
    let mut out: Vec<Clause> = original_clauses
        .iter()
        .filter(|c| !is_unit_equality_clause(c, equality_symbol))
        .cloned()
        .collect();
    out.extend(kb_rules.iter().map(|r| rule_to_clause(r, equality_symbol)));
    out
}
