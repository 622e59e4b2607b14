//! Lazy, restartable sequences of mappings.
//!
//! [`Mappings`] describes a search plus a pipeline of post-processing stages.
//! Nothing runs until [`Mappings::iter`] or a terminal operation is called,
//! and every call starts a fresh search with fresh stage state, so the same
//! `Mappings` can be enumerated any number of times.

use std::collections::HashSet;
use std::sync::Arc;

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::debug;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::config::Algorithm;
use crate::error::MatchError;
use crate::filter::{MappingFilter, StereoFilter};
use crate::graph::GraphView;
use crate::matcher::{QueryAtom, QueryBond};
use crate::mol::Mol;
use crate::pattern::Pattern;
use crate::state::{DfState, UllmannState, VfState};
use crate::stream::{Deadline, StateStream};

/// Query atom paired with its target atom.
pub type AtomMapping = Vec<(NodeIndex, NodeIndex)>;

/// Query bond paired with its target bond.
pub type BondMapping = Vec<(EdgeIndex, EdgeIndex)>;

/// The part of a target covered by one mapping, copied out as its own
/// molecule.
///
/// Atom `i` of `mol` is the image of query atom `i` and came from target
/// atom `atoms[i]`. Bond `j` of `mol` is the image of query bond `j` and
/// came from target bond `bonds[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Substructure {
    pub mol: Mol<Atom, Bond>,
    pub atoms: Vec<NodeIndex>,
    pub bonds: Vec<EdgeIndex>,
}

enum Stage<'a> {
    Filter(Box<dyn MappingFilter + 'a>),
    UniqueAtoms,
    UniqueBonds,
    Limit(usize),
}

pub struct Mappings<'a, QA, QB> {
    pattern: &'a Pattern<'a, QA, QB>,
    target: &'a Mol<Atom, Bond>,
    view: Arc<GraphView>,
    stages: Vec<Stage<'a>>,
    feasible: bool,
}

impl<'a, QA: QueryAtom, QB: QueryBond> Mappings<'a, QA, QB> {
    pub(crate) fn new(
        pattern: &'a Pattern<'a, QA, QB>,
        target: &'a Mol<Atom, Bond>,
        view: Arc<GraphView>,
        feasible: bool,
    ) -> Self {
        Self {
            pattern,
            target,
            view,
            stages: Vec::new(),
            feasible,
        }
    }

    pub fn target(&self) -> &'a Mol<Atom, Bond> {
        self.target
    }

    pub fn target_view(&self) -> &GraphView {
        &self.view
    }

    /// Keeps only mappings the filter accepts.
    pub fn filter(mut self, filter: impl MappingFilter + 'a) -> Self {
        self.stages.push(Stage::Filter(Box::new(filter)));
        self
    }

    /// Stops after `k` mappings have passed this point of the pipeline.
    pub fn limit(mut self, k: usize) -> Self {
        self.stages.push(Stage::Limit(k));
        self
    }

    /// Drops mappings that cover the same set of target atoms as an
    /// earlier one.
    pub fn unique_atoms(mut self) -> Self {
        self.stages.push(Stage::UniqueAtoms);
        self
    }

    /// Drops mappings that cover the same set of target bonds as an earlier
    /// one.
    pub fn unique_bonds(mut self) -> Self {
        self.stages.push(Stage::UniqueBonds);
        self
    }

    /// Enforces the query's stereo descriptors. Patterns built with stereo
    /// enabled already do this.
    pub fn stereochemistry(self) -> Self {
        let stereo = StereoFilter::new(self.pattern.query(), self.target);
        self.filter(stereo)
    }

    pub fn iter(&self) -> MappingIter<'_> {
        let config = self.pattern.config();
        debug!(
            query_atoms = self.pattern.query().atom_count(),
            target_atoms = self.target.atom_count(),
            algorithm = ?config.algorithm,
            stages = self.stages.len(),
            "starting enumeration"
        );
        let source: Box<dyn Iterator<Item = Result<Vec<usize>, MatchError>> + '_> =
            if self.feasible {
                let problem = self.pattern.problem(self.target, &self.view);
                let deadline = config.timeout.map(Deadline::new);
                match config.algorithm {
                    Algorithm::Vf => {
                        Box::new(StateStream::new(VfState::new(problem)).with_deadline(deadline))
                    }
                    Algorithm::Ullmann => Box::new(
                        StateStream::new(UllmannState::new(problem)).with_deadline(deadline),
                    ),
                    Algorithm::DepthFirst => Box::new(
                        StateStream::new(DfState::new(problem, self.pattern.plan()))
                            .with_deadline(deadline),
                    ),
                }
            } else {
                Box::new(std::iter::empty())
            };
        let stages = self
            .stages
            .iter()
            .map(|stage| match stage {
                Stage::Filter(f) => ActiveStage::Filter(f.as_ref()),
                Stage::UniqueAtoms => ActiveStage::UniqueAtoms(HashSet::new()),
                Stage::UniqueBonds => ActiveStage::UniqueBonds(HashSet::new()),
                Stage::Limit(k) => ActiveStage::Limit(*k),
            })
            .collect();
        MappingIter {
            source,
            stages,
            query_view: self.pattern.view(),
            target_view: &self.view,
        }
    }

    pub fn first(&self) -> Result<Option<Vec<usize>>, MatchError> {
        self.iter().next().transpose()
    }

    pub fn count(&self) -> Result<usize, MatchError> {
        let mut n = 0;
        for item in self.iter() {
            item?;
            n += 1;
        }
        Ok(n)
    }

    /// Whether at least `k` mappings exist. Stops searching at the `k`th.
    pub fn at_least(&self, k: usize) -> Result<bool, MatchError> {
        if k == 0 {
            return Ok(true);
        }
        let mut n = 0;
        for item in self.iter() {
            item?;
            n += 1;
            if n >= k {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn to_vec(&self) -> Result<Vec<Vec<usize>>, MatchError> {
        self.iter().collect()
    }

    pub fn to_atom_maps(&self) -> Result<Vec<AtomMapping>, MatchError> {
        self.iter()
            .map(|item| item.map(|m| atom_mapping(&m)))
            .collect()
    }

    pub fn to_bond_maps(&self) -> Result<Vec<BondMapping>, MatchError> {
        self.iter()
            .map(|item| item.map(|m| bond_mapping(self.pattern.query(), &self.view, &m)))
            .collect()
    }

    pub fn to_substructures(&self) -> Result<Vec<Substructure>, MatchError> {
        self.iter()
            .map(|item| {
                item.map(|m| substructure(self.pattern.query(), self.target, &self.view, &m))
            })
            .collect()
    }
}

impl<'m, 'a, QA: QueryAtom, QB: QueryBond> IntoIterator for &'m Mappings<'a, QA, QB> {
    type Item = Result<Vec<usize>, MatchError>;
    type IntoIter = MappingIter<'m>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

enum ActiveStage<'b> {
    Filter(&'b dyn MappingFilter),
    UniqueAtoms(HashSet<Vec<usize>>),
    UniqueBonds(HashSet<Vec<usize>>),
    Limit(usize),
}

/// One pass over a [`Mappings`] pipeline.
///
/// Search errors are passed through untouched, so a timeout is never
/// mistaken for the end of the results.
pub struct MappingIter<'b> {
    source: Box<dyn Iterator<Item = Result<Vec<usize>, MatchError>> + 'b>,
    stages: Vec<ActiveStage<'b>>,
    query_view: &'b GraphView,
    target_view: &'b GraphView,
}

impl Iterator for MappingIter<'_> {
    type Item = Result<Vec<usize>, MatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        'pull: loop {
            // a spent limit lets nothing else through
            if self
                .stages
                .iter()
                .any(|s| matches!(s, ActiveStage::Limit(0)))
            {
                return None;
            }
            let mapping = match self.source.next()? {
                Ok(mapping) => mapping,
                Err(e) => return Some(Err(e)),
            };
            for stage in self.stages.iter_mut() {
                match stage {
                    ActiveStage::Filter(f) => {
                        if !f.accept(&mapping) {
                            continue 'pull;
                        }
                    }
                    ActiveStage::UniqueAtoms(seen) => {
                        let mut key = mapping.clone();
                        key.sort_unstable();
                        if !seen.insert(key) {
                            continue 'pull;
                        }
                    }
                    ActiveStage::UniqueBonds(seen) => {
                        let key = bond_signature(self.query_view, self.target_view, &mapping);
                        if !seen.insert(key) {
                            continue 'pull;
                        }
                    }
                    ActiveStage::Limit(remaining) => *remaining -= 1,
                }
            }
            return Some(Ok(mapping));
        }
    }
}

/// Sorted target bond indices covered by the images of the query bonds.
fn bond_signature(query: &GraphView, target: &GraphView, mapping: &[usize]) -> Vec<usize> {
    let mut key = Vec::with_capacity(query.bond_count());
    for u in 0..query.atom_count() {
        for &v in query.neighbors(u) {
            if u < v {
                if let Some(e) = target.bond(mapping[u], mapping[v]) {
                    key.push(e.index());
                }
            }
        }
    }
    key.sort_unstable();
    key
}

fn atom_mapping(mapping: &[usize]) -> AtomMapping {
    mapping
        .iter()
        .enumerate()
        .map(|(q, &t)| (NodeIndex::new(q), NodeIndex::new(t)))
        .collect()
}

fn bond_mapping<QA, QB>(query: &Mol<QA, QB>, target: &GraphView, mapping: &[usize]) -> BondMapping {
    query
        .bonds()
        .filter_map(|qe| {
            let (a, b) = query.bond_endpoints(qe)?;
            let te = target.bond(mapping[a.index()], mapping[b.index()])?;
            Some((qe, te))
        })
        .collect()
}

fn substructure<QA, QB>(
    query: &Mol<QA, QB>,
    target: &Mol<Atom, Bond>,
    view: &GraphView,
    mapping: &[usize],
) -> Substructure {
    let mut mol = Mol::new();
    let atoms: Vec<NodeIndex> = mapping.iter().copied().map(NodeIndex::new).collect();
    for &t in &atoms {
        mol.add_atom(target.atom(t).clone());
    }
    let mut bonds = Vec::with_capacity(query.bond_count());
    for (qe, te) in bond_mapping(query, view, mapping) {
        if let Some((a, b)) = query.bond_endpoints(qe) {
            mol.add_bond(a, b, target.bond(te).clone());
            bonds.push(te);
        }
    }
    Substructure { mol, atoms, bonds }
}
