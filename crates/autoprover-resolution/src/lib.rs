//! Resolution and paramodulation refutation proving, with optional
//! Knuth-Bendix preprocessing of equality clauses.

mod clause_set;
mod config;
mod kb_integration;
mod paramodulation;
mod prover;
mod resolve;

pub use clause_set::ClauseSet;
pub use config::{ResolutionConfig, ResolutionProofResult, SelectionStrategy, Status};
pub use kb_integration::{clause_to_equation, extract_equality_equations, integrate_kb_rules, is_unit_equality_clause, rule_to_clause, try_kb_preprocessing};
pub use paramodulation::{
    find_paramod_positions, get_equality_literal_indices, has_equality_literals, paramodulate,
    resolve_with_paramodulation, try_paramodulation, try_resolution,
};
pub use prover::ResolutionProver;
pub use resolve::{factor, resolve, resolve_on_literals};

pub mod resolution_utils {
    //! Diagnostic helpers over clause sets, grounded on the C++
    //! original's `resolution_utils` namespace.

    use autoprover_clausal::Clause;

    pub fn is_obviously_satisfiable(clauses: &[Clause]) -> bool {
        clauses.is_empty()
    }

    pub fn is_obviously_unsatisfiable(clauses: &[Clause]) -> bool {
        clauses.iter().any(Clause::is_empty)
    }

    pub struct ClauseSetStats {
        pub total_clauses: usize,
        pub unit_clauses: usize,
        pub horn_clauses: usize,
        pub max_clause_size: usize,
        pub avg_clause_size: f64,
    }

    fn is_horn(clause: &Clause) -> bool {
        clause.literals().iter().filter(|l| l.is_positive()).count() <= 1
    }

    pub fn analyze_clause_set(clauses: &[Clause]) -> ClauseSetStats {
        let total_clauses = clauses.len();
        let unit_clauses = clauses.iter().filter(|c| c.is_unit()).count();
        let horn_clauses = clauses.iter().filter(|c| is_horn(c)).count();
        let max_clause_size = clauses.iter().map(Clause::size).max().unwrap_or(0);
        let avg_clause_size = if total_clauses == 0 {
            0.0
        } else {
            clauses.iter().map(Clause::size).sum::<usize>() as f64 / total_clauses as f64
        };
        ClauseSetStats {
            total_clauses,
            unit_clauses,
            horn_clauses,
            max_clause_size,
            avg_clause_size,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use autoprover_base::Interner;
        use autoprover_clausal::Literal;
        use autoprover_term::Term;

        #[test]
        fn empty_set_is_obviously_satisfiable() {
            assert!(is_obviously_satisfiable(&[]));
        }

        #[test]
        fn set_with_empty_clause_is_obviously_unsatisfiable() {
            assert!(is_obviously_unsatisfiable(&[Clause::empty()]));
        }

        #[test]
        fn analyze_counts_units_and_horn_clauses() {
            let mut i = Interner::new();
            let p = i.intern("P");
            let q = i.intern("Q");
            let unit = Clause::new(vec![Literal::positive(Term::make_const(p))]);
            let horn = Clause::new(vec![
                Literal::negative(Term::make_const(p)),
                Literal::positive(Term::make_const(q)),
            ]);
            let non_horn = Clause::new(vec![
                Literal::positive(Term::make_const(p)),
                Literal::positive(Term::make_const(q)),
            ]);
            let stats = analyze_clause_set(&[unit, horn, non_horn]);
            assert_eq!(stats.total_clauses, 3);
            assert_eq!(stats.unit_clauses, 1);
            assert_eq!(stats.horn_clauses, 2);
            assert_eq!(stats.max_clause_size, 2);
        }
    }
}
