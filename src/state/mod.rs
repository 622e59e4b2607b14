//! Backtracking search states.
//!
//! A state holds a partial mapping from query atoms to target atoms and
//! knows how to propose the next candidate pair, extend the mapping, and
//! undo the most recent extension. The [`StateStream`](crate::StateStream)
//! drives any state through chronological backtracking.
//!
//! All states keep `m1` (query to target) and `m2` (target to query) as exact
//! inverses. Unmapped entries hold [`UNMAPPED`].

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::config::MatchMode;
use crate::graph::GraphView;
use crate::matcher::{AtomMatcher, BondMatcher};
use crate::mol::Mol;

mod df;
mod matrix;
mod ullmann;
mod vf;

pub use df::{DfPlan, DfState};
pub use matrix::CompatibilityMatrix;
pub use ullmann::UllmannState;
pub use vf::VfState;

/// Sentinel for an unmapped slot in `m1` / `m2`.
pub const UNMAPPED: usize = usize::MAX;

pub trait State: Clone {
    /// Number of query atoms.
    fn n_max(&self) -> usize;

    /// Number of target atoms.
    fn m_max(&self) -> usize;

    /// Number of mapped pairs.
    fn size(&self) -> usize;

    /// Next query atom to extend the mapping with, after `prev`. `None`
    /// when no query atom is left to try.
    fn next_n(&self, prev: Option<usize>) -> Option<usize>;

    /// Next target candidate for query atom `n`, after `prev`.
    fn next_m(&self, n: usize, prev: Option<usize>) -> Option<usize>;

    /// Attempts to map `n` to `m`. Returns `false` and leaves the state
    /// unchanged when the pair is infeasible.
    fn add(&mut self, n: usize, m: usize) -> bool;

    /// Undoes the `add(n, m)` that was most recently accepted.
    fn remove(&mut self, n: usize, m: usize);

    /// The current query-to-target mapping.
    fn mapping(&self) -> Vec<usize>;

    fn is_complete(&self) -> bool {
        self.size() == self.n_max()
    }
}

/// Everything a state reads but never writes: both molecules, their views,
/// the matchers, and the match mode.
pub struct Problem<'a, QA, QB> {
    pub query: &'a Mol<QA, QB>,
    pub target: &'a Mol<Atom, Bond>,
    pub g1: &'a GraphView,
    pub g2: &'a GraphView,
    pub atoms: &'a dyn AtomMatcher<QA>,
    pub bonds: &'a dyn BondMatcher<QB>,
    pub mode: MatchMode,
}

impl<QA, QB> Clone for Problem<'_, QA, QB> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<QA, QB> Copy for Problem<'_, QA, QB> {}

impl<'a, QA, QB> Problem<'a, QA, QB> {
    pub fn new(
        query: &'a Mol<QA, QB>,
        target: &'a Mol<Atom, Bond>,
        g1: &'a GraphView,
        g2: &'a GraphView,
        atoms: &'a dyn AtomMatcher<QA>,
        bonds: &'a dyn BondMatcher<QB>,
        mode: MatchMode,
    ) -> Self {
        debug_assert_eq!(g1.atom_count(), query.atom_count());
        debug_assert_eq!(g2.atom_count(), target.atom_count());
        Self {
            query,
            target,
            g1,
            g2,
            atoms,
            bonds,
            mode,
        }
    }

    pub fn is_identical(&self) -> bool {
        self.mode == MatchMode::Identical
    }

    pub fn atoms_match(&self, n: usize, m: usize) -> bool {
        self.atoms
            .matches(self.query.atom(NodeIndex::new(n)), self.target, NodeIndex::new(m))
    }

    /// Whether query bond `n`-`n2` has a compatible target bond `m`-`m2`.
    /// A missing bond on either side is a mismatch.
    pub fn bonds_match(&self, n: usize, n2: usize, m: usize, m2: usize) -> bool {
        match (self.g1.bond(n, n2), self.g2.bond(m, m2)) {
            (Some(qe), Some(te)) => self.bonds.matches(self.query.bond(qe), self.target, te),
            _ => false,
        }
    }
}

#[cfg(debug_assertions)]
pub(crate) fn assert_inverse(m1: &[usize], m2: &[usize]) {
    for (n, &m) in m1.iter().enumerate() {
        if m != UNMAPPED {
            debug_assert_eq!(m2[m], n, "m2 is not the inverse of m1 at {n}");
        }
    }
    for (m, &n) in m2.iter().enumerate() {
        if n != UNMAPPED {
            debug_assert_eq!(m1[n], m, "m1 is not the inverse of m2 at {m}");
        }
    }
}

#[cfg(not(debug_assertions))]
pub(crate) fn assert_inverse(_m1: &[usize], _m2: &[usize]) {}
