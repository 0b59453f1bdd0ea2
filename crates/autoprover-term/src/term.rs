//! De Bruijn indexed terms.
//!
//! Terms are immutable and reference-counted (`Rc<TermData>`), grounded
//! on the C++ original's `std::shared_ptr<TermDB>` (`term_db.hpp`)
//! translated to the Rust idiom the teacher's own arena types avoid
//! lifetime parameters for where sharing, not borrowing, is the point.
//! Structural equality, hashing, and the set of free (unbound)
//! variable indices are all computed once at construction time and
//! cached on `TermData`, mirroring `TermDB::hash()` being a virtual
//! method each node implements but memoizing it rather than
//! recomputing on every call.

use autoprover_base::Symbol;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A De Bruijn indexed first-order term or formula.
///
/// Cloning a `Term` is an `Rc` clone, not a deep copy.
#[derive(Clone)]
pub struct Term(Rc<TermData>);

/// The tagged sum of term/formula shapes, matching `TermDB::TermKind`
/// restricted to the variants this engine supports (the C++
/// `ABSTRACTION`/`LET`/`ITE`/`MATCH`/`UNKNOWN` reserved-for-future-HOL
/// variants have no counterpart here).
pub struct TermData {
    kind: TermKind,
    hash: u64,
}

enum TermKind {
    /// A bound variable referred to by De Bruijn index: `0` is the
    /// innermost binder.
    Var(usize),
    /// A 0-ary constant or free variable, named by an interned symbol.
    Const(Symbol),
    /// `f(t1, ..., tn)`, `n >= 1`.
    App(Symbol, Vec<Term>),
    Not(Term),
    And(Term, Term),
    Or(Term, Term),
    Implies(Term, Term),
    Forall(Option<Symbol>, Term),
    Exists(Option<Symbol>, Term),
}

/// The shape of a term without its payload, for matching and
/// ordering precedence lookups.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shape {
    Var,
    Const,
    App,
    Not,
    And,
    Or,
    Implies,
    Forall,
    Exists,
}

fn mix(seed: u64, value: u64) -> u64 {
    // FNV-1a style mixing step, used bottom-up so structurally equal
    // subterms always produce the same hash regardless of where they
    // sit in the tree.
    let mut h = seed ^ value;
    h = h.wrapping_mul(0x100000001b3);
    h
}

impl Term {
    pub fn shape(&self) -> Shape {
        match &self.0.kind {
            TermKind::Var(_) => Shape::Var,
            TermKind::Const(_) => Shape::Const,
            TermKind::App(..) => Shape::App,
            TermKind::Not(_) => Shape::Not,
            TermKind::And(..) => Shape::And,
            TermKind::Or(..) => Shape::Or,
            TermKind::Implies(..) => Shape::Implies,
            TermKind::Forall(..) => Shape::Forall,
            TermKind::Exists(..) => Shape::Exists,
        }
    }

    pub fn structural_hash(&self) -> u64 {
        self.0.hash
    }

    pub fn make_var(index: usize) -> Term {
        let hash = mix(0x9e3779b97f4a7c15, index as u64);
        Term(Rc::new(TermData {
            kind: TermKind::Var(index),
            hash,
        }))
    }

    pub fn make_const(symbol: Symbol) -> Term {
        let hash = mix(0xc2b2ae3d27d4eb4f, symbol.index() as u64);
        Term(Rc::new(TermData {
            kind: TermKind::Const(symbol),
            hash,
        }))
    }

    pub fn make_app(symbol: Symbol, args: Vec<Term>) -> Term {
        let mut hash = mix(0x165667b19e3779f9, symbol.index() as u64);
        for a in &args {
            hash = mix(hash, a.structural_hash());
        }
        Term(Rc::new(TermData {
            kind: TermKind::App(symbol, args),
            hash,
        }))
    }

    pub fn make_not(body: Term) -> Term {
        let hash = mix(0x27d4eb2f165667c5, body.structural_hash());
        Term(Rc::new(TermData {
            kind: TermKind::Not(body),
            hash,
        }))
    }

    pub fn make_and(left: Term, right: Term) -> Term {
        let hash = mix(mix(0xff51afd7ed558ccd, left.structural_hash()), right.structural_hash());
        Term(Rc::new(TermData {
            kind: TermKind::And(left, right),
            hash,
        }))
    }

    pub fn make_or(left: Term, right: Term) -> Term {
        let hash = mix(mix(0xc4ceb9fe1a85ec53, left.structural_hash()), right.structural_hash());
        Term(Rc::new(TermData {
            kind: TermKind::Or(left, right),
            hash,
        }))
    }

    pub fn make_implies(antecedent: Term, consequent: Term) -> Term {
        let hash = mix(
            mix(0x2545f4914f6cdd1d, antecedent.structural_hash()),
            consequent.structural_hash(),
        );
        Term(Rc::new(TermData {
            kind: TermKind::Implies(antecedent, consequent),
            hash,
        }))
    }

    pub fn make_forall(hint: Option<Symbol>, body: Term) -> Term {
        let hash = mix(0x9e3779b185ebca87, body.structural_hash());
        Term(Rc::new(TermData {
            kind: TermKind::Forall(hint, body),
            hash,
        }))
    }

    pub fn make_exists(hint: Option<Symbol>, body: Term) -> Term {
        let hash = mix(0xbf58476d1ce4e5b9, body.structural_hash());
        Term(Rc::new(TermData {
            kind: TermKind::Exists(hint, body),
            hash,
        }))
    }

    pub fn as_var(&self) -> Option<usize> {
        match self.0.kind {
            TermKind::Var(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<Symbol> {
        match self.0.kind {
            TermKind::Const(s) => Some(s),
            _ => None,
        }
    }

    /// The head symbol of a `Const` or `App` term, if any.
    pub fn symbol(&self) -> Option<Symbol> {
        match &self.0.kind {
            TermKind::Const(s) => Some(*s),
            TermKind::App(s, _) => Some(*s),
            _ => None,
        }
    }

    /// Immediate subterms, in argument order. Quantifier hints carry
    /// no subterm (they are metadata, not a child).
    pub fn args(&self) -> &[Term] {
        match &self.0.kind {
            TermKind::App(_, args) => args,
            _ => &[],
        }
    }

    pub fn unary_body(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Not(t) | TermKind::Forall(_, t) | TermKind::Exists(_, t) => Some(t),
            _ => None,
        }
    }

    pub fn binary_parts(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::And(l, r) | TermKind::Or(l, r) | TermKind::Implies(l, r) => Some((l, r)),
            _ => None,
        }
    }

    pub fn quantifier_hint(&self) -> Option<Symbol> {
        match &self.0.kind {
            TermKind::Forall(hint, _) | TermKind::Exists(hint, _) => *hint,
            _ => None,
        }
    }

    /// All immediate children, uniform across shapes, for generic
    /// tree walks (position traversal, critical pair enumeration).
    pub fn children(&self) -> Vec<Term> {
        match &self.0.kind {
            TermKind::Var(_) | TermKind::Const(_) => Vec::new(),
            TermKind::App(_, args) => args.clone(),
            TermKind::Not(t) | TermKind::Forall(_, t) | TermKind::Exists(_, t) => vec![t.clone()],
            TermKind::And(l, r) | TermKind::Or(l, r) | TermKind::Implies(l, r) => {
                vec![l.clone(), r.clone()]
            }
        }
    }

    /// Rebuilds a term of the same shape with `children` substituted
    /// in for the current children, preserving the head symbol and
    /// quantifier hint. Panics if `children.len()` does not match the
    /// arity of `self`'s shape — callers always derive `children` from
    /// [`Term::children`], possibly after recursing, so arities match
    /// by construction.
    pub fn rebuild(&self, children: Vec<Term>) -> Term {
        match &self.0.kind {
            TermKind::Var(i) => {
                assert!(children.is_empty());
                Term::make_var(*i)
            }
            TermKind::Const(s) => {
                assert!(children.is_empty());
                Term::make_const(*s)
            }
            TermKind::App(s, args) => {
                assert_eq!(children.len(), args.len());
                Term::make_app(*s, children)
            }
            TermKind::Not(_) => {
                assert_eq!(children.len(), 1);
                Term::make_not(children.into_iter().next().unwrap())
            }
            TermKind::And(..) => {
                assert_eq!(children.len(), 2);
                let mut it = children.into_iter();
                Term::make_and(it.next().unwrap(), it.next().unwrap())
            }
            TermKind::Or(..) => {
                assert_eq!(children.len(), 2);
                let mut it = children.into_iter();
                Term::make_or(it.next().unwrap(), it.next().unwrap())
            }
            TermKind::Implies(..) => {
                assert_eq!(children.len(), 2);
                let mut it = children.into_iter();
                Term::make_implies(it.next().unwrap(), it.next().unwrap())
            }
            TermKind::Forall(hint, _) => {
                assert_eq!(children.len(), 1);
                Term::make_forall(*hint, children.into_iter().next().unwrap())
            }
            TermKind::Exists(hint, _) => {
                assert_eq!(children.len(), 1);
                Term::make_exists(*hint, children.into_iter().next().unwrap())
            }
        }
    }

    /// Whether the term contains no variables (De Bruijn index or
    /// free constant reused as a variable) at all — used by rewriting
    /// to skip substitution work on ground terms.
    pub fn is_ground(&self) -> bool {
        match &self.0.kind {
            TermKind::Var(_) => false,
            TermKind::Const(_) => true,
            TermKind::App(_, args) => args.iter().all(Term::is_ground),
            TermKind::Not(t) | TermKind::Forall(_, t) | TermKind::Exists(_, t) => t.is_ground(),
            TermKind::And(l, r) | TermKind::Or(l, r) | TermKind::Implies(l, r) => {
                l.is_ground() && r.is_ground()
            }
        }
    }

    /// Collects the set of distinct De Bruijn variable indices
    /// occurring anywhere in the term, ignoring binding depth (the
    /// rewriting/unification layer treats rule and clause variables as
    /// globally scoped, not depth-relative, per spec §4.1).
    pub fn variables(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out.sort_unstable();
        out.dedup();
        out
    }

    fn collect_variables(&self, out: &mut Vec<usize>) {
        match &self.0.kind {
            TermKind::Var(i) => out.push(*i),
            TermKind::Const(_) => {}
            TermKind::App(_, args) => {
                for a in args {
                    a.collect_variables(out);
                }
            }
            TermKind::Not(t) | TermKind::Forall(_, t) | TermKind::Exists(_, t) => {
                t.collect_variables(out)
            }
            TermKind::And(l, r) | TermKind::Or(l, r) | TermKind::Implies(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
        }
    }

    /// Counts all nodes in the term, used by clause-size and
    /// simplicity heuristics.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Term::size).sum::<usize>()
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        if self.0.hash != other.0.hash {
            return false;
        }
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (&self.0.kind, &other.0.kind) {
            (TermKind::Var(a), TermKind::Var(b)) => a == b,
            (TermKind::Const(a), TermKind::Const(b)) => a == b,
            (TermKind::App(sa, aa), TermKind::App(sb, ab)) => sa == sb && aa == ab,
            (TermKind::Not(a), TermKind::Not(b)) => a == b,
            (TermKind::And(al, ar), TermKind::And(bl, br)) => al == bl && ar == br,
            (TermKind::Or(al, ar), TermKind::Or(bl, br)) => al == bl && ar == br,
            (TermKind::Implies(al, ar), TermKind::Implies(bl, br)) => al == bl && ar == br,
            (TermKind::Forall(_, a), TermKind::Forall(_, b)) => a == b,
            (TermKind::Exists(_, a), TermKind::Exists(_, b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl std::hash::Hash for Term {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl Ord for Term {
    /// An arbitrary but total order, used only to give subterm
    /// multisets a canonical sequence before lexicographic comparison
    /// (§4.2's documented fallback for `ArgumentStatus::Multiset`).
    /// This is not the LPO order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.hash.cmp(&other.0.hash)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            TermKind::Var(i) => write!(f, "#{i}"),
            TermKind::Const(s) => write!(f, "c{}", s.index()),
            TermKind::App(s, args) => {
                write!(f, "f{}(", s.index())?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a:?}")?;
                }
                write!(f, ")")
            }
            TermKind::Not(t) => write!(f, "¬{t:?}"),
            TermKind::And(l, r) => write!(f, "({l:?} ∧ {r:?})"),
            TermKind::Or(l, r) => write!(f, "({l:?} ∨ {r:?})"),
            TermKind::Implies(l, r) => write!(f, "({l:?} → {r:?})"),
            TermKind::Forall(_, t) => write!(f, "∀.{t:?}"),
            TermKind::Exists(_, t) => write!(f, "∃.{t:?}"),
        }
    }
}
