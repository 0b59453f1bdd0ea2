//! The working clause set for resolution proof search.
//!
//! Grounded on `ClauseSet` in
//! `examples/original_source/src/resolution/resolution_prover.cpp`:
//! admission (tautology filter, simplify, dedup by hash, subsumption),
//! strategy-driven selection, and index-backed candidate lookup all
//! carry over.

use crate::config::{ResolutionConfig, SelectionStrategy};
use autoprover_clausal::{Clause, Literal, LiteralIndex};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

pub struct ClauseSet {
    clauses: Vec<Clause>,
    processing_queue: VecDeque<Clause>,
    clause_hashes: FxHashSet<u64>,
    config: ResolutionConfig,
    index: LiteralIndex,
}

impl ClauseSet {
    pub fn new(config: ResolutionConfig) -> Self {
        ClauseSet {
            clauses: Vec::new(),
            processing_queue: VecDeque::new(),
            clause_hashes: FxHashSet::default(),
            config,
            index: LiteralIndex::new(),
        }
    }

    /// Admits `clause` into the set, applying the tautology filter,
    /// simplification, duplicate-hash dedup, and (if configured)
    /// subsumption before adding it to the processing queue and index.
    pub fn add_clause(&mut self, clause: Clause) {
        if self.config.use_tautology_deletion && clause.is_tautology() {
            return;
        }
        let simplified = clause.simplify();
        if self.config.use_tautology_deletion && simplified.is_tautology() {
            return;
        }

        let hash = simplified.hash_value();
        if self.clause_hashes.contains(&hash) {
            return;
        }

        if self.config.use_subsumption && self.is_subsumed(&simplified) {
            return;
        }
        if self.config.use_subsumption {
            self.remove_subsumed_clauses(&simplified);
        }

        self.index.insert_clause(&simplified);
        self.clause_hashes.insert(hash);
        self.clauses.push(simplified.clone());
        self.processing_queue.push_back(simplified);
    }

    pub fn contains_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.processing_queue.is_empty()
    }

    pub fn size(&self) -> usize {
        self.clauses.len()
    }

    pub fn clear(&mut self) {
        self.clauses.clear();
        self.processing_queue.clear();
        self.clause_hashes.clear();
        self.index.clear();
    }

    pub fn get_resolution_candidates(&self, literal: &Literal) -> Vec<Clause> {
        self.index.get_resolution_candidates(literal).to_vec()
    }

    /// Selects and removes the next clause from the processing queue
    /// according to the configured strategy. `None` once the queue is
    /// exhausted.
    pub fn select_clause(&mut self) -> Option<Clause> {
        if self.processing_queue.is_empty() {
            return None;
        }
        match self.config.selection_strategy {
            SelectionStrategy::Fifo | SelectionStrategy::NegativeSelection => {
                self.processing_queue.pop_front()
            }
            SelectionStrategy::SmallestFirst => {
                let min_index = self
                    .processing_queue
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, c)| c.size())
                    .map(|(i, _)| i)?;
                self.processing_queue.remove(min_index)
            }
            SelectionStrategy::UnitPreference => {
                let unit_index = self.processing_queue.iter().position(Clause::is_unit);
                match unit_index {
                    Some(i) => self.processing_queue.remove(i),
                    None => self.processing_queue.pop_front(),
                }
            }
        }
    }

    fn is_subsumed(&self, clause: &Clause) -> bool {
        self.clauses.iter().any(|existing| existing.subsumes(clause))
    }

    fn remove_subsumed_clauses(&mut self, new_clause: &Clause) {
        let mut i = 0;
        while i < self.clauses.len() {
            if new_clause.subsumes(&self.clauses[i]) {
                let removed = self.clauses.remove(i);
                self.clause_hashes.remove(&removed.hash_value());
                self.index.remove_clause(&removed);
                self.processing_queue.retain(|c| !c.equals(&removed));
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprover_base::Interner;
    use autoprover_term::Term;

    fn unit(sym_name: &str, i: &mut Interner) -> Clause {
        let s = i.intern(sym_name);
        Clause::new(vec![Literal::positive(Term::make_const(s))])
    }

    #[test]
    fn tautologies_are_rejected() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let mut cs = ClauseSet::new(ResolutionConfig::default());
        let taut = Clause::new(vec![
            Literal::positive(Term::make_const(p)),
            Literal::negative(Term::make_const(p)),
        ]);
        cs.add_clause(taut);
        assert_eq!(cs.size(), 0);
    }

    #[test]
    fn duplicate_clauses_are_deduped() {
        let mut i = Interner::new();
        let c = unit("P", &mut i);
        let mut cs = ClauseSet::new(ResolutionConfig::default());
        cs.add_clause(c.clone());
        cs.add_clause(c);
        assert_eq!(cs.size(), 1);
    }

    #[test]
    fn subsumption_removes_weaker_existing_clause() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        let mut cs = ClauseSet::new(ResolutionConfig::default());
        let wide = Clause::new(vec![
            Literal::positive(Term::make_const(p)),
            Literal::positive(Term::make_const(q)),
        ]);
        cs.add_clause(wide);
        assert_eq!(cs.size(), 1);
        let unit_p = Clause::new(vec![Literal::positive(Term::make_var(0))]);
        cs.add_clause(unit_p);
        assert_eq!(cs.size(), 1);
        assert!(cs.clauses()[0].is_unit());
    }

    #[test]
    fn unit_preference_selects_unit_clause_first() {
        let mut i = Interner::new();
        let p = i.intern("P");
        let q = i.intern("Q");
        let r = i.intern("R");
        let mut cs = ClauseSet::new(ResolutionConfig::default());
        cs.add_clause(Clause::new(vec![
            Literal::positive(Term::make_const(p)),
            Literal::positive(Term::make_const(q)),
        ]));
        cs.add_clause(Clause::new(vec![Literal::positive(Term::make_const(r))]));
        let selected = cs.select_clause().unwrap();
        assert!(selected.is_unit());
    }
}
