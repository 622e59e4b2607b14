use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

/// Handedness of a tetrahedral center, looking from the first carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winding {
    Clockwise,
    Anticlockwise,
}

impl Winding {
    pub fn invert(self) -> Self {
        match self {
            Winding::Clockwise => Winding::Anticlockwise,
            Winding::Anticlockwise => Winding::Clockwise,
        }
    }
}

/// Tetrahedral stereo element.
///
/// A carrier equal to `center` stands for the implicit hydrogen (or lone
/// pair) of the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TetrahedralStereo {
    pub center: NodeIndex,
    pub carriers: [NodeIndex; 4],
    pub winding: Winding,
}

/// Relative placement of the two reference atoms of a double bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleBondConfig {
    /// Same side (cis, Z for simple cases).
    Together,
    /// Opposite sides (trans, E for simple cases).
    Opposite,
}

impl DoubleBondConfig {
    pub fn invert(self) -> Self {
        match self {
            DoubleBondConfig::Together => DoubleBondConfig::Opposite,
            DoubleBondConfig::Opposite => DoubleBondConfig::Together,
        }
    }
}

/// Double-bond stereo element. `refs[0]` is attached to `bond.0` and
/// `refs[1]` to `bond.1`; `bond` is stored with the lower index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubleBondStereo {
    pub bond: (NodeIndex, NodeIndex),
    pub refs: [NodeIndex; 2],
    pub config: DoubleBondConfig,
}

impl DoubleBondStereo {
    /// Builds the element with the bond endpoints in canonical order.
    pub fn new(
        a: NodeIndex,
        b: NodeIndex,
        ref_a: NodeIndex,
        ref_b: NodeIndex,
        config: DoubleBondConfig,
    ) -> Self {
        if a.index() <= b.index() {
            Self {
                bond: (a, b),
                refs: [ref_a, ref_b],
                config,
            }
        } else {
            Self {
                bond: (b, a),
                refs: [ref_b, ref_a],
                config,
            }
        }
    }
}

pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    tetrahedral_stereo: Vec<TetrahedralStereo>,
    double_bond_stereo: Vec<DoubleBondStereo>,
    component_grouping: Option<Vec<u32>>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            tetrahedral_stereo: Vec::new(),
            double_bond_stereo: Vec::new(),
            component_grouping: None,
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    /// Adds a bond between two existing atoms.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of range. Use
    /// [`try_add_bond`](Self::try_add_bond) for untrusted input.
    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    /// Adds a bond, rejecting out-of-range endpoints, self loops and a second
    /// bond between the same pair of atoms.
    pub fn try_add_bond(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        bond: B,
    ) -> Result<EdgeIndex, GraphError> {
        let atom_count = self.atom_count();
        let next = self.bond_count();
        for end in [a, b] {
            if end.index() >= atom_count {
                return Err(GraphError::BondOutOfRange {
                    bond: next,
                    atom: end.index(),
                    atom_count,
                });
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop {
                bond: next,
                atom: a.index(),
            });
        }
        if self.bond_between(a, b).is_some() {
            return Err(GraphError::DuplicateBond {
                bond: next,
                a: a.index(),
                b: b.index(),
            });
        }
        Ok(self.graph.add_edge(a, b, bond))
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn tetrahedral_stereo(&self) -> &[TetrahedralStereo] {
        &self.tetrahedral_stereo
    }

    pub fn tetrahedral_stereo_for(&self, center: NodeIndex) -> Option<&TetrahedralStereo> {
        self.tetrahedral_stereo.iter().find(|s| s.center == center)
    }

    pub fn add_tetrahedral_stereo(&mut self, stereo: TetrahedralStereo) {
        self.tetrahedral_stereo.retain(|s| s.center != stereo.center);
        self.tetrahedral_stereo.push(stereo);
    }

    pub fn remove_tetrahedral_stereo(&mut self, center: NodeIndex) {
        self.tetrahedral_stereo.retain(|s| s.center != center);
    }

    pub fn double_bond_stereo(&self) -> &[DoubleBondStereo] {
        &self.double_bond_stereo
    }

    pub fn double_bond_stereo_for(&self, a: NodeIndex, b: NodeIndex) -> Option<&DoubleBondStereo> {
        let key = ordered(a, b);
        self.double_bond_stereo.iter().find(|s| s.bond == key)
    }

    pub fn add_double_bond_stereo(&mut self, stereo: DoubleBondStereo) {
        self.double_bond_stereo.retain(|s| s.bond != stereo.bond);
        self.double_bond_stereo.push(stereo);
    }

    pub fn remove_double_bond_stereo(&mut self, a: NodeIndex, b: NodeIndex) {
        let key = ordered(a, b);
        self.double_bond_stereo.retain(|s| s.bond != key);
    }

    pub fn has_stereo(&self) -> bool {
        !self.tetrahedral_stereo.is_empty() || !self.double_bond_stereo.is_empty()
    }

    /// Required partition of query atoms into components: atoms sharing a
    /// non-zero id must land in one target component, atoms with different
    /// ids in different target components. `0` leaves an atom unconstrained.
    pub fn component_grouping(&self) -> Option<&[u32]> {
        self.component_grouping.as_deref()
    }

    pub fn set_component_grouping(&mut self, grouping: Vec<u32>) {
        self.component_grouping = Some(grouping);
    }

    pub fn clear_component_grouping(&mut self) {
        self.component_grouping = None;
    }
}

fn ordered(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    if a.index() <= b.index() {
        (a, b)
    } else {
        (b, a)
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            tetrahedral_stereo: self.tetrahedral_stereo.clone(),
            double_bond_stereo: self.double_bond_stereo.clone(),
            component_grouping: self.component_grouping.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        if self.atoms().any(|idx| self.atom(idx) != other.atom(idx)) {
            return false;
        }
        for idx in self.bonds() {
            if self.bond(idx) != other.bond(idx)
                || self.bond_endpoints(idx) != other.bond_endpoints(idx)
            {
                return false;
            }
        }
        self.tetrahedral_stereo == other.tetrahedral_stereo
            && self.double_bond_stereo == other.double_bond_stereo
            && self.component_grouping == other.component_grouping
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("tetrahedral_stereo", &self.tetrahedral_stereo)
            .field("double_bond_stereo", &self.double_bond_stereo)
            .field("component_grouping", &self.component_grouping)
            .finish()
    }
}
