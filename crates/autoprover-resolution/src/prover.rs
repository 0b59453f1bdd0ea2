//! Refutation-based proof search: `ResolutionProver`.
//!
//! Grounded on `ResolutionProver::prove`, `check_satisfiability`,
//! `prove_from_clauses`, `resolution_loop`, `should_terminate`, and
//! `setup_refutation_problem` in
//! `examples/original_source/src/resolution/resolution_prover.cpp`.

use crate::clause_set::ClauseSet;
use crate::config::{ResolutionConfig, ResolutionProofResult, Status};
use crate::kb_integration::{integrate_kb_rules, is_unit_equality_clause, try_kb_preprocessing};
use crate::paramodulation::{resolve_with_paramodulation, try_resolution};
use crate::resolve::factor;
use autoprover_base::{Interner, Symbol};
use autoprover_clausal::{to_cnf, Clause};
use autoprover_term::{LexicographicPathOrdering, Term};
use std::time::Instant;

pub struct ResolutionProver {
    config: ResolutionConfig,
    ordering: LexicographicPathOrdering,
    equality_symbol: Symbol,
}

impl ResolutionProver {
    pub fn new(config: ResolutionConfig, ordering: LexicographicPathOrdering, interner: &mut Interner) -> Self {
        let equality_symbol = interner.intern("=");
        ResolutionProver {
            config,
            ordering,
            equality_symbol,
        }
    }

    /// Attempts to prove `goal` from `hypotheses` by refutation: negate
    /// the goal, CNF-convert hypotheses and negated goal together, and
    /// saturate looking for the empty clause.
    pub fn prove(&mut self, goal: &Term, hypotheses: &[Term], interner: &mut Interner) -> ResolutionProofResult {
        let problem = self.setup_refutation_problem(goal, hypotheses);
        let clauses = self.cnf_all(&problem, interner);
        self.prove_from_clauses(clauses)
    }

    /// Checks whether `formulas` are jointly satisfiable by searching
    /// for a refutation of their conjunction: a derived empty clause
    /// means the set is unsatisfiable (`Disproved`), saturation without
    /// one means it is satisfiable (`Proved`), per spec §6's mapping.
    pub fn check_satisfiability(&mut self, formulas: &[Term], interner: &mut Interner) -> ResolutionProofResult {
        let clauses = self.cnf_all(formulas, interner);
        let mut result = self.prove_from_clauses(clauses);
        result.status = match result.status {
            Status::Proved => Status::Disproved,
            Status::Saturated => Status::Proved,
            other => other,
        };
        result
    }

    fn setup_refutation_problem(&self, goal: &Term, hypotheses: &[Term]) -> Vec<Term> {
        let mut problem: Vec<Term> = hypotheses.to_vec();
        problem.push(Term::make_not(goal.clone()));
        problem
    }

    fn cnf_all(&self, formulas: &[Term], interner: &mut Interner) -> Vec<Clause> {
        let mut clauses = Vec::new();
        for formula in formulas {
            clauses.extend(to_cnf(formula, interner));
        }
        clauses
    }

    /// Runs refutation search directly over an already-CNF clause set.
    /// Each formula's variable space is disjointed from the others by
    /// an incremental rename offset based on the running maximum
    /// variable index before the clauses reach the clause set.
    pub fn prove_from_clauses(&mut self, clauses: Vec<Clause>) -> ResolutionProofResult {
        let start = Instant::now();
        let mut offset = 0usize;
        let mut disjointed = Vec::with_capacity(clauses.len());
        for clause in clauses {
            let renamed = clause.rename_variables(offset);
            offset = renamed.variables().into_iter().max().map_or(offset, |m| m + 1);
            disjointed.push(renamed);
        }

        if disjointed.iter().any(Clause::is_empty) {
            let mut result = ResolutionProofResult::new(Status::Proved, "an input clause was already empty");
            result.time_elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            return result;
        }

        let clauses = if self.config.use_kb_preprocessing {
            self.try_integrate_kb(disjointed)
        } else {
            disjointed
        };

        let mut clause_set = ClauseSet::new(self.config.clone());
        for clause in clauses {
            clause_set.add_clause(clause);
        }

        let mut result = self.resolution_loop(clause_set, start);
        result.time_elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        result
    }

    fn try_integrate_kb(&mut self, clauses: Vec<Clause>) -> Vec<Clause> {
        if !clauses.iter().any(|c| is_unit_equality_clause(c, self.equality_symbol)) {
            return clauses;
        }
        let mut kb_config = self.config.kb_config.clone();
        kb_config.max_rules = kb_config.max_rules.min(self.config.kb_max_rules);
        kb_config.max_equations = kb_config.max_equations.min(self.config.kb_max_equations);
        kb_config.max_time_seconds = kb_config.max_time_seconds.min(self.config.kb_preprocessing_timeout);

        match try_kb_preprocessing(&clauses, self.ordering.clone(), kb_config, self.equality_symbol) {
            Ok(result) if result.status == autoprover_completion::Status::Success => {
                integrate_kb_rules(&clauses, &result.final_rules, self.equality_symbol)
            }
            _ => clauses,
        }
    }

    fn resolution_loop(&self, mut clause_set: ClauseSet, start: Instant) -> ResolutionProofResult {
        let mut iterations = 0usize;
        if clause_set.contains_empty_clause() {
            let mut result = ResolutionProofResult::new(Status::Proved, "empty clause present in initial set");
            result.final_clauses = clause_set.clauses().to_vec();
            result.iterations = iterations;
            return result;
        }

        while let Some(given) = clause_set.select_clause() {
            iterations += 1;
            if iterations > self.config.max_iterations {
                let mut result = ResolutionProofResult::new(Status::Timeout, "iteration limit reached");
                result.iterations = iterations;
                return result;
            }
            if start.elapsed().as_secs_f64() * 1000.0 > self.config.max_time_ms {
                let mut result = ResolutionProofResult::new(Status::Timeout, "time limit reached");
                result.iterations = iterations;
                return result;
            }
            if clause_set.size() > self.config.max_clauses {
                let mut result = ResolutionProofResult::new(Status::Timeout, "clause count limit reached");
                result.iterations = iterations;
                return result;
            }

            let mut new_clauses = Vec::new();
            if self.config.use_paramodulation {
                for existing in clause_set.clauses().to_vec() {
                    for resolvent in resolve_with_paramodulation(&given, &existing, self.equality_symbol) {
                        if resolvent.is_empty() {
                            let mut result = ResolutionProofResult::new(Status::Proved, format!("empty clause derived after {iterations} iterations"));
                            result.iterations = iterations;
                            result.final_clauses = vec![resolvent];
                            return result;
                        }
                        new_clauses.push(resolvent);
                    }
                }
            } else {
                for literal in given.literals() {
                    for existing in clause_set.get_resolution_candidates(literal) {
                        for resolvent in try_resolution(&given, &existing) {
                            if resolvent.is_empty() {
                                let mut result = ResolutionProofResult::new(Status::Proved, format!("empty clause derived after {iterations} iterations"));
                                result.iterations = iterations;
                                result.final_clauses = vec![resolvent];
                                return result;
                            }
                            new_clauses.push(resolvent);
                        }
                    }
                }
            }
            if self.config.use_factoring {
                let factored = factor(&given);
                if !factored.equals(&given) {
                    if factored.is_empty() {
                        let mut result = ResolutionProofResult::new(Status::Proved, format!("empty clause derived after {iterations} iterations"));
                        result.iterations = iterations;
                        result.final_clauses = vec![factored];
                        return result;
                    }
                    new_clauses.push(factored);
                }
            }
            // `given` was only removed from the processing queue by
            // `select_clause`, not from the clause set itself, so it
            // stays available as a resolution candidate for later
            // iterations without being re-admitted here.
            for clause in new_clauses {
                clause_set.add_clause(clause);
            }
        }

        let mut result = ResolutionProofResult::new(Status::Saturated, "no further resolvents; clause set saturated");
        result.iterations = iterations;
        result.final_clauses = clause_set.clauses().to_vec();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_term::Precedence;

    fn prover() -> (ResolutionProver, Interner) {
        let mut i = Interner::new();
        let ordering = LexicographicPathOrdering::new(Precedence::new(), &mut i);
        let prover = ResolutionProver::new(ResolutionConfig::default(), ordering, &mut i);
        (prover, i)
    }

    #[test]
    fn proves_modus_ponens() {
        let (mut prover, mut i) = prover();
        let p = i.intern("P");
        let q = i.intern("Q");
        let p_term = Term::make_const(p);
        let q_term = Term::make_const(q);
        // hypotheses: P, P -> Q  |- Q
        let hyps = vec![p_term.clone(), Term::make_implies(p_term, q_term.clone())];
        let result = prover.prove(&q_term, &hyps, &mut i);
        assert!(result.is_proved());
    }

    #[test]
    fn disjunctive_syllogism() {
        let (mut prover, mut i) = prover();
        let p = i.intern("P");
        let q = i.intern("Q");
        let p_term = Term::make_const(p);
        let q_term = Term::make_const(q);
        // P or Q, not P |- Q
        let hyps = vec![
            Term::make_or(p_term.clone(), q_term.clone()),
            Term::make_not(p_term),
        ];
        let result = prover.prove(&q_term, &hyps, &mut i);
        assert!(result.is_proved());
    }

    #[test]
    fn unprovable_goal_saturates() {
        let (mut prover, mut i) = prover();
        let p = i.intern("P");
        let q = i.intern("Q");
        let hyps = vec![Term::make_const(p)];
        let result = prover.prove(&Term::make_const(q), &hyps, &mut i);
        assert!(!result.is_proved());
    }

    #[test]
    fn check_satisfiability_flips_proved_and_saturated() {
        let (mut prover, mut i) = prover();
        let p = i.intern("P");
        let formulas = vec![Term::make_const(p), Term::make_not(Term::make_const(p))];
        let result = prover.check_satisfiability(&formulas, &mut i);
        assert_eq!(result.status, Status::Disproved);
    }

    #[test]
    fn proves_without_factoring_using_indexed_candidates() {
        let (mut prover, mut i) = prover();
        prover.config.use_factoring = false;
        let p = i.intern("P");
        let q = i.intern("Q");
        let p_term = Term::make_const(p);
        let q_term = Term::make_const(q);
        let hyps = vec![p_term.clone(), Term::make_implies(p_term, q_term.clone())];
        let result = prover.prove(&q_term, &hyps, &mut i);
        assert!(result.is_proved());
    }

    #[test]
    fn equality_substitution_via_paramodulation() {
        let (mut prover, mut i) = prover();
        prover.config.use_paramodulation = true;
        let eq = i.intern("=");
        let f = i.intern("f");
        let a = i.intern("a");
        let b = i.intern("b");
        let p = i.intern("P");

        let fa = Term::make_app(f, vec![Term::make_const(a)]);
        let equality = Term::make_app(eq, vec![fa.clone(), Term::make_const(b)]);
        let hyps = vec![equality, Term::make_app(p, vec![fa])];
        let goal = Term::make_app(p, vec![Term::make_const(b)]);
        let result = prover.prove(&goal, &hyps, &mut i);
        assert!(result.is_proved());
    }
}
