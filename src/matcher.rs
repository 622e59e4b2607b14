//! Atom and bond compatibility predicates.
//!
//! A matcher decides whether one query atom (or bond) may be placed on one
//! target atom (or bond). Matchers are pure and shared between threads; the
//! search states call them for every candidate pair.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Atom;
use crate::bond::Bond;
use crate::error::{MatchError, Side};
use crate::mol::Mol;
use crate::query::{AtomExpr, BondExpr};
use crate::traits::{HasAromaticity, HasAtomMap, HasAtomicNum, HasBondOrder};

pub trait AtomMatcher<QA>: Send + Sync {
    fn matches(&self, query: &QA, target: &Mol<Atom, Bond>, idx: NodeIndex) -> bool;

    /// Rejects query atoms this matcher cannot evaluate. Called once per
    /// query atom when a pattern is built.
    fn check_query(&self, _atom: &QA, _index: usize) -> Result<(), MatchError> {
        Ok(())
    }

    /// Rejects target atoms this matcher cannot evaluate. Called once per
    /// target atom before a search starts.
    fn check_target(&self, _atom: &Atom, _index: usize) -> Result<(), MatchError> {
        Ok(())
    }
}

pub trait BondMatcher<QB>: Send + Sync {
    fn matches(&self, query: &QB, target: &Mol<Atom, Bond>, idx: EdgeIndex) -> bool;
}

/// Accepts every pair. Used for topology-only searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyMatcher;

impl<QA> AtomMatcher<QA> for AnyMatcher {
    fn matches(&self, _query: &QA, _target: &Mol<Atom, Bond>, _idx: NodeIndex) -> bool {
        true
    }
}

impl<QB> BondMatcher<QB> for AnyMatcher {
    fn matches(&self, _query: &QB, _target: &Mol<Atom, Bond>, _idx: EdgeIndex) -> bool {
        true
    }
}

/// Atomic-number equality. Pseudo atoms compare as element 0; an atom with
/// no atomic number at all is an error rather than a silent mismatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementMatcher;

fn element_of<A: HasAtomicNum>(atom: &A) -> Option<u8> {
    if atom.is_pseudo() {
        Some(0)
    } else {
        atom.atomic_num()
    }
}

impl<QA: HasAtomicNum> AtomMatcher<QA> for ElementMatcher {
    fn matches(&self, query: &QA, target: &Mol<Atom, Bond>, idx: NodeIndex) -> bool {
        match (element_of(query), element_of(target.atom(idx))) {
            (Some(q), Some(t)) => q == t,
            _ => false,
        }
    }

    fn check_query(&self, atom: &QA, index: usize) -> Result<(), MatchError> {
        match element_of(atom) {
            Some(_) => Ok(()),
            None => Err(MatchError::UnsetAtomicNumber {
                side: Side::Query,
                index,
            }),
        }
    }

    fn check_target(&self, atom: &Atom, index: usize) -> Result<(), MatchError> {
        match element_of(atom) {
            Some(_) => Ok(()),
            None => Err(MatchError::UnsetAtomicNumber {
                side: Side::Target,
                index,
            }),
        }
    }
}

/// Bond-order equality. Two aromatic bonds match regardless of the stored
/// Kekulé order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderMatcher;

impl<QB: HasBondOrder + HasAromaticity> BondMatcher<QB> for OrderMatcher {
    fn matches(&self, query: &QB, target: &Mol<Atom, Bond>, idx: EdgeIndex) -> bool {
        let target = target.bond(idx);
        match (query.is_aromatic(), target.is_aromatic()) {
            (true, true) => true,
            (q, t) => q == t && query.bond_order() == target.bond_order(),
        }
    }
}

/// Evaluates query expression trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryMatcher;

impl AtomMatcher<AtomExpr> for QueryMatcher {
    fn matches(&self, query: &AtomExpr, target: &Mol<Atom, Bond>, idx: NodeIndex) -> bool {
        query.matches(target, idx)
    }
}

impl BondMatcher<BondExpr> for QueryMatcher {
    fn matches(&self, query: &BondExpr, target: &Mol<Atom, Bond>, idx: EdgeIndex) -> bool {
        query.matches(target.bond(idx))
    }
}

/// A type usable as a query atom, with the matcher a pattern picks for it
/// when none is given.
pub trait QueryAtom: HasAtomMap + Sized + 'static {
    type Matcher: AtomMatcher<Self> + Default + 'static;
}

/// A type usable as a query bond, with its default matcher.
pub trait QueryBond: Sized + 'static {
    type Matcher: BondMatcher<Self> + Default + 'static;
}

impl QueryAtom for Atom {
    type Matcher = ElementMatcher;
}

impl QueryAtom for AtomExpr {
    type Matcher = QueryMatcher;
}

impl QueryBond for Bond {
    type Matcher = OrderMatcher;
}

impl QueryBond for BondExpr {
    type Matcher = QueryMatcher;
}
