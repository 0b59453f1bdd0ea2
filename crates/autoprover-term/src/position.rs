//! Positions: paths of child indices locating a subterm.
//!
//! Grounded on the C++ `Position` type used throughout
//! `rewriting.hpp`/`critical_pairs.hpp`, generalized here to operate
//! over [`Term::children`] uniformly rather than per-shape accessors.

use crate::term::Term;
use std::fmt;

/// A path from the root of a term to one of its subterms. The empty
/// position refers to the whole term.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position(Vec<usize>);

impl Position {
    pub fn root() -> Self {
        Position(Vec::new())
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Position(indices)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Returns a new position with `index` appended.
    pub fn child(&self, index: usize) -> Position {
        let mut v = self.0.clone();
        v.push(index);
        Position(v)
    }

    /// True if `self` is a prefix of `other` (including `self == other`).
    pub fn is_prefix_of(&self, other: &Position) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// Looks up the subterm at this position, or `None` if the
    /// position does not exist in `term`.
    pub fn resolve<'a>(&self, term: &'a Term) -> Option<Term> {
        let mut current = term.clone();
        for &i in &self.0 {
            let children = current.children();
            current = children.into_iter().nth(i)?;
        }
        Some(current)
    }

    /// Replaces the subterm at this position with `replacement`,
    /// rebuilding every ancestor on the path. Returns `None` if the
    /// position does not exist.
    pub fn replace(&self, term: &Term, replacement: Term) -> Option<Term> {
        if self.0.is_empty() {
            return Some(replacement);
        }
        let idx = self.0[0];
        let mut children = term.children();
        if idx >= children.len() {
            return None;
        }
        let rest = Position(self.0[1..].to_vec());
        let new_child = rest.replace(&children[idx], replacement)?;
        children[idx] = new_child;
        Some(term.rebuild(children))
    }

    /// Enumerates every position in `term`, root first, in
    /// left-to-right depth-first order.
    pub fn all_positions(term: &Term) -> Vec<Position> {
        let mut out = vec![Position::root()];
        for (i, child) in term.children().into_iter().enumerate() {
            for p in Position::all_positions(&child) {
                out.push(Position(
                    std::iter::once(i).chain(p.0).collect(),
                ));
            }
        }
        out
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "ε");
        }
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}
