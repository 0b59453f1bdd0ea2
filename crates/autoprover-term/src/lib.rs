//! Term representation, unification, ordering, rewriting and critical
//! pairs: the shared core underneath both the completion and
//! resolution engines.

mod critical_pairs;
mod ordering;
mod position;
mod rewrite;
mod subst;
mod term;
mod unify;

pub use critical_pairs::{CriticalPair, CriticalPairComputer};
pub use ordering::{ArgumentStatus, ConnectiveSymbols, LexicographicPathOrdering, Precedence};
pub use position::Position;
pub use rewrite::{match_term, Equation, RewriteResult, RewriteRule, RewriteSystem};
pub use subst::{shift_term, Substitution};
pub use term::{Shape, Term};
pub use unify::unify;
