//! Literals: a polarity-tagged atomic formula.
//!
//! Grounded on `Literal` in `examples/original_source/src/resolution/clause.hpp`.

use autoprover_term::{Substitution, Term};

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    atom: Term,
    positive: bool,
}

impl Literal {
    pub fn new(atom: Term, positive: bool) -> Self {
        Literal { atom, positive }
    }

    pub fn positive(atom: Term) -> Self {
        Literal::new(atom, true)
    }

    pub fn negative(atom: Term) -> Self {
        Literal::new(atom, false)
    }

    pub fn atom(&self) -> &Term {
        &self.atom
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    pub fn is_negative(&self) -> bool {
        !self.positive
    }

    pub fn negate(&self) -> Literal {
        Literal::new(self.atom.clone(), !self.positive)
    }

    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.atom == other.atom && self.positive != other.positive
    }

    pub fn substitute(&self, subst: &Substitution) -> Literal {
        Literal::new(subst.apply(&self.atom), self.positive)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.positive {
            write!(f, "{:?}", self.atom)
        } else {
            write!(f, "¬{:?}", self.atom)
        }
    }
}
