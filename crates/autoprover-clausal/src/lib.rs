//! Clause representation, CNF conversion, and literal indexing.

mod clause;
mod cnf;
mod index;
mod literal;

pub use clause::Clause;
pub use cnf::{
    distribute_or_over_and, eliminate_implications, move_negations_inward, skolemize, to_cnf,
    to_prenex_form, SkolemManager,
};
pub use index::LiteralIndex;
pub use literal::Literal;
