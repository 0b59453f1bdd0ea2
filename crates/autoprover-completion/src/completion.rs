//! The Knuth-Bendix completion procedure.
//!
//! Grounded on `KnuthBendixCompletion` in
//! `examples/original_source/src/completion/knuth_bendix.hpp`: the
//! eight-step loop (orient, add, back-simplify, compute critical
//! pairs, repeat) and the per-instance `rule_counter_`/
//! `equation_counter_` fields are carried over unchanged in spirit;
//! `tracing::debug!` replaces the `verbose`-gated `print_progress`.

use crate::config::{KBConfig, KBResult, Status};
use crate::queue::EquationQueue;
use crate::stats::KBStats;
use autoprover_base::EngineError;
use autoprover_term::{
    CriticalPairComputer, Equation, LexicographicPathOrdering, RewriteRule, RewriteSystem,
};
use std::time::Instant;

const NORMALIZE_MAX_STEPS: usize = 1_000;

pub struct KnuthBendixCompletion {
    config: KBConfig,
    system: RewriteSystem,
    queue: EquationQueue,
    stats: KBStats,
    running: bool,
    termination_requested: bool,
    rule_counter: u64,
    equation_counter: u64,
}

impl KnuthBendixCompletion {
    pub fn new(ordering: LexicographicPathOrdering, config: KBConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let fair = config.fair_processing;
        Ok(KnuthBendixCompletion {
            config,
            system: RewriteSystem::new(ordering),
            queue: EquationQueue::new(fair),
            stats: KBStats::default(),
            running: false,
            termination_requested: false,
            rule_counter: 0,
            equation_counter: 0,
        })
    }

    pub fn current_rules(&self) -> &[RewriteRule] {
        self.system.rules()
    }

    pub fn statistics(&self) -> &KBStats {
        &self.stats
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_termination(&mut self) {
        self.termination_requested = true;
    }

    fn generate_rule_name(&mut self) -> String {
        let name = format!("rule{}", self.rule_counter);
        self.rule_counter += 1;
        name
    }

    fn generate_equation_name(&mut self) -> String {
        let name = format!("eq{}", self.equation_counter);
        self.equation_counter += 1;
        name
    }

    pub fn complete(&mut self, equations: Vec<Equation>) -> Result<KBResult, EngineError> {
        self.complete_from_rules(Vec::new(), equations)
    }

    pub fn complete_from_rules(
        &mut self,
        rules: Vec<RewriteRule>,
        equations: Vec<Equation>,
    ) -> Result<KBResult, EngineError> {
        if self.running {
            return Err(EngineError::AlreadyRunning);
        }
        self.running = true;
        self.termination_requested = false;
        self.stats.reset();
        self.system.clear();
        self.queue.clear();

        for rule in rules {
            if !rule.is_oriented(self.system.ordering()) {
                self.running = false;
                return Ok(KBResult::make_failure(format!(
                    "initial rule `{}` cannot be oriented under the configured ordering",
                    rule.name()
                )));
            }
            self.add_rule(rule);
        }
        for eq in equations {
            self.queue.push(eq, 0);
        }

        let result = self.completion_loop();
        self.running = false;
        Ok(result)
    }

    fn completion_loop(&mut self) -> KBResult {
        let start = Instant::now();
        let mut iterations = 0usize;

        while !self.queue.is_empty() {
            if self.termination_requested {
                tracing::info!(iterations, "completion terminated by request");
                return self.finish(Status::Unknown, "terminated by request", start, iterations);
            }
            if let Some(limit_status) = self.check_resource_limits(start, iterations) {
                tracing::warn!(?limit_status, iterations, "completion halted by resource limit");
                return self.finish(
                    limit_status,
                    "resource or time limit exceeded",
                    start,
                    iterations,
                );
            }

            let equation = self.queue.pop().expect("checked non-empty above");
            tracing::debug!(name = equation.name(), "processing equation");
            self.process_equation(equation);
            iterations += 1;
        }

        self.finish(Status::Success, "confluent system reached", start, iterations)
    }

    fn finish(
        &self,
        status: Status,
        message: impl Into<String>,
        start: Instant,
        iterations: usize,
    ) -> KBResult {
        let mut result = match status {
            Status::Success => KBResult::make_success(self.system.rules().to_vec(), message),
            Status::Failure => KBResult::make_failure(message),
            Status::Timeout => KBResult::make_timeout(message),
            Status::ResourceLimit => KBResult::make_resource_limit(message),
            Status::Unknown => {
                let mut r = KBResult::make_failure(message);
                r.status = Status::Unknown;
                r.final_rules = self.system.rules().to_vec();
                r
            }
        };
        result.iterations = iterations;
        result.total_equations_processed = self.stats.equations_processed;
        result.total_critical_pairs_computed = self.stats.critical_pairs_computed;
        result.elapsed_time_seconds = start.elapsed().as_secs_f64();
        result
    }

    /// Returns `true` if a rule was added, `false` if the equation was
    /// simplified away, subsumed, or could not be oriented — an
    /// orientation failure is counted and the equation dropped, per
    /// spec §4.5 step 5, rather than aborting completion.
    fn process_equation(&mut self, equation: Equation) -> bool {
        self.stats.equations_processed += 1;

        let lhs = self.system.normalize(equation.lhs(), NORMALIZE_MAX_STEPS);
        let rhs = self.system.normalize(equation.rhs(), NORMALIZE_MAX_STEPS);
        if lhs == rhs {
            self.stats.equations_simplified += 1;
            return false;
        }

        if self.config.enable_subsumption && self.is_subsumed(&lhs, &rhs) {
            self.stats.equations_subsumed += 1;
            return false;
        }

        let name = if equation.name().is_empty() {
            self.generate_equation_name()
        } else {
            equation.name().to_string()
        };
        let simplified = Equation::new(lhs, rhs, name);

        let Some(rule) = simplified.orient(self.system.ordering()) else {
            self.stats.orientation_failures += 1;
            tracing::debug!(name = simplified.name(), "equation ordering-equivalent, dropped");
            return false;
        };
        let rule_name = self.generate_rule_name();
        let rule = RewriteRule::new(rule.lhs().clone(), rule.rhs().clone(), rule_name);

        self.add_rule(rule.clone());

        if self.config.enable_simplification {
            self.simplify_rules_with(&rule);
        }

        for pair_equation in self.compute_new_critical_pairs(&rule) {
            self.queue.push(pair_equation, 0);
        }

        true
    }

    /// Adds `rule` to the system, skipping it (and leaving
    /// `rules_added` unchanged) if an equal rule is already present.
    fn add_rule(&mut self, rule: RewriteRule) -> bool {
        if self.system.add_rule(rule) {
            self.stats.rules_added += 1;
            true
        } else {
            false
        }
    }

    /// Re-normalizes every existing rule's right-hand side against the
    /// newly added rule (back-simplification, spec §4.5 step 6): if a
    /// rule's own left-hand side becomes reducible by `new_rule` it is
    /// removed and re-queued as an equation instead of kept stale.
    fn simplify_rules_with(&mut self, new_rule: &RewriteRule) {
        let existing: Vec<RewriteRule> = self
            .system
            .rules()
            .iter()
            .filter(|r| r.name() != new_rule.name())
            .cloned()
            .collect();

        for rule in existing {
            let simplified_lhs = self.system.normalize(rule.lhs(), NORMALIZE_MAX_STEPS);
            if simplified_lhs != *rule.lhs() {
                self.system.remove_rule(rule.name());
                self.stats.rules_removed += 1;
                self.queue.push(
                    Equation::new(simplified_lhs, rule.rhs().clone(), rule.name().to_string()),
                    0,
                );
                continue;
            }
            let simplified_rhs = self.system.normalize(rule.rhs(), NORMALIZE_MAX_STEPS);
            if simplified_rhs != *rule.rhs() {
                self.system.remove_rule(rule.name());
                self.stats.rules_removed += 1;
                self.add_rule(RewriteRule::new(
                    rule.lhs().clone(),
                    simplified_rhs,
                    rule.name().to_string(),
                ));
            }
        }
    }

    fn compute_new_critical_pairs(&mut self, new_rule: &RewriteRule) -> Vec<Equation> {
        let mut equations = Vec::new();
        let rules: Vec<RewriteRule> = self.system.rules().to_vec();
        let mut all_pairs = CriticalPairComputer::compute_self_critical_pairs(new_rule);
        for rule in &rules {
            if rule.name() == new_rule.name() {
                continue;
            }
            all_pairs.extend(CriticalPairComputer::compute_critical_pairs(new_rule, rule));
            all_pairs.extend(CriticalPairComputer::compute_critical_pairs(rule, new_rule));
        }
        self.stats.critical_pairs_computed += all_pairs.len();
        for pair in all_pairs {
            let name = self.generate_equation_name();
            equations.push(pair.to_equation(name));
        }
        equations
    }

    fn is_subsumed(&self, lhs: &autoprover_term::Term, rhs: &autoprover_term::Term) -> bool {
        self.system
            .rules()
            .iter()
            .any(|r| (r.lhs() == lhs && r.rhs() == rhs) || (r.lhs() == rhs && r.rhs() == lhs))
    }

    fn check_resource_limits(&self, start: Instant, iterations: usize) -> Option<Status> {
        if start.elapsed().as_secs_f64() > self.config.max_time_seconds {
            return Some(Status::Timeout);
        }
        if iterations >= self.config.max_iterations {
            return Some(Status::ResourceLimit);
        }
        if self.system.rules().len() >= self.config.max_rules {
            return Some(Status::ResourceLimit);
        }
        if self.queue.len() >= self.config.max_equations {
            return Some(Status::ResourceLimit);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_base::Interner;
    use autoprover_term::{Precedence, Term};

    fn engine() -> (KnuthBendixCompletion, Interner) {
        let mut i = Interner::new();
        let lpo = LexicographicPathOrdering::new(Precedence::new(), &mut i);
        let engine = KnuthBendixCompletion::new(lpo, KBConfig::default()).unwrap();
        (engine, i)
    }

    #[test]
    fn completes_a_single_orientable_equation() {
        let (mut engine, mut i) = engine();
        let f = i.intern("f");
        let a = i.intern("a");
        let lhs = Term::make_app(f, vec![Term::make_const(a)]);
        let rhs = Term::make_const(a);
        let result = engine
            .complete(vec![Equation::new(lhs, rhs, "eq0")])
            .unwrap();
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.final_rules.len(), 1);
    }

    #[test]
    fn trivial_equation_is_simplified_away() {
        let (mut engine, _i) = engine();
        let x = Term::make_var(0);
        let result = engine
            .complete(vec![Equation::new(x.clone(), x, "refl")])
            .unwrap();
        assert_eq!(result.status, Status::Success);
        assert!(result.final_rules.is_empty());
        assert_eq!(engine.statistics().equations_simplified, 1);
    }

    #[test]
    fn iteration_cap_produces_resource_limit() {
        let mut i = Interner::new();
        let lpo = LexicographicPathOrdering::new(Precedence::new(), &mut i);
        let mut config = KBConfig::default();
        config.max_iterations = 0;
        let mut engine = KnuthBendixCompletion::new(lpo, config).unwrap();
        let f = i.intern("f");
        let a = i.intern("a");
        let result = engine
            .complete(vec![Equation::new(
                Term::make_app(f, vec![Term::make_const(a)]),
                Term::make_const(a),
                "eq0",
            )])
            .unwrap();
        assert_eq!(result.status, Status::ResourceLimit);
    }

    #[test]
    fn unorientable_equation_is_dropped_not_fatal() {
        let (mut engine, mut i) = engine();
        let f = i.intern("f");
        let a = i.intern("a");
        // Two distinct variables are ordering-equivalent (LPO never
        // orders variables against each other) but not structurally
        // equal, so this exercises the orientation-failure path rather
        // than the trivial-equality path.
        let unorientable = Equation::new(Term::make_var(0), Term::make_var(1), "unrelated");
        let orientable = Equation::new(
            Term::make_app(f, vec![Term::make_const(a)]),
            Term::make_const(a),
            "eq0",
        );
        let result = engine.complete(vec![unorientable, orientable]).unwrap();
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.final_rules.len(), 1);
        assert_eq!(engine.statistics().orientation_failures, 1);
    }

    #[test]
    fn initial_rule_that_cannot_be_oriented_is_reported_as_failure() {
        let (mut engine, _i) = engine();
        let x = Term::make_var(0);
        let bad_rule = RewriteRule::new(x.clone(), x, "bad");
        let result = engine.complete_from_rules(vec![bad_rule], Vec::new()).unwrap();
        assert_eq!(result.status, Status::Failure);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut i = Interner::new();
        let lpo = LexicographicPathOrdering::new(Precedence::new(), &mut i);
        let mut config = KBConfig::default();
        config.max_rules = 0;
        assert!(KnuthBendixCompletion::new(lpo, config).is_err());
    }
}
