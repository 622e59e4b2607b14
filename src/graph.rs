//! Adjacency-list view of a molecule graph.
//!
//! The matching states never touch the petgraph container directly: they walk
//! a [`GraphView`], whose neighbor order is the insertion order of the bonds
//! and therefore stable across runs.

use std::collections::HashMap;

use petgraph::graph::EdgeIndex;

use crate::error::GraphError;
use crate::mol::Mol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphView {
    adjacency: Vec<Vec<usize>>,
    bonds: HashMap<(usize, usize), EdgeIndex>,
}

impl GraphView {
    pub fn from_mol<A, B>(mol: &Mol<A, B>) -> Result<Self, GraphError> {
        let mut edges = Vec::with_capacity(mol.bond_count());
        for idx in mol.bonds() {
            if let Some((a, b)) = mol.bond_endpoints(idx) {
                edges.push((a.index(), b.index()));
            }
        }
        Self::from_edges(mol.atom_count(), &edges)
    }

    /// Builds a view from raw endpoint pairs. Bond `i` of the view is
    /// `EdgeIndex::new(i)`.
    pub fn from_edges(atom_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut adjacency = vec![Vec::new(); atom_count];
        let mut bonds = HashMap::with_capacity(edges.len());
        for (i, &(a, b)) in edges.iter().enumerate() {
            for end in [a, b] {
                if end >= atom_count {
                    return Err(GraphError::BondOutOfRange {
                        bond: i,
                        atom: end,
                        atom_count,
                    });
                }
            }
            if a == b {
                return Err(GraphError::SelfLoop { bond: i, atom: a });
            }
            if bonds.insert(key(a, b), EdgeIndex::new(i)).is_some() {
                return Err(GraphError::DuplicateBond { bond: i, a, b });
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        Ok(Self { adjacency, bonds })
    }

    pub fn atom_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Symmetric bond lookup.
    pub fn bond(&self, u: usize, v: usize) -> Option<EdgeIndex> {
        self.bonds.get(&key(u, v)).copied()
    }
}

fn key(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Labels connected components `1..=k`, numbered in order of their lowest
/// atom index.
pub fn component_labels(view: &GraphView) -> Vec<u32> {
    let n = view.atom_count();
    let mut labels = vec![0u32; n];
    let mut next = 0u32;
    for start in 0..n {
        if labels[start] != 0 {
            continue;
        }
        next += 1;
        let mut stack = vec![start];
        labels[start] = next;
        while let Some(current) = stack.pop() {
            for &nb in view.neighbors(current) {
                if labels[nb] == 0 {
                    labels[nb] = next;
                    stack.push(nb);
                }
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{chain, ring};
    use petgraph::graph::NodeIndex;

    #[test]
    fn neighbors_follow_bond_insertion_order() {
        let view = GraphView::from_edges(4, &[(0, 3), (0, 1), (2, 0)]).unwrap();
        assert_eq!(view.neighbors(0), &[3, 1, 2]);
        assert_eq!(view.neighbors(3), &[0]);
        assert_eq!(view.degree(0), 3);
    }

    #[test]
    fn bond_lookup_is_symmetric() {
        let view = GraphView::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(view.bond(1, 2), Some(EdgeIndex::new(1)));
        assert_eq!(view.bond(2, 1), Some(EdgeIndex::new(1)));
        assert_eq!(view.bond(0, 2), None);
    }

    #[test]
    fn out_of_range_bond_is_an_error() {
        let err = GraphView::from_edges(2, &[(0, 1), (1, 5)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::BondOutOfRange {
                bond: 1,
                atom: 5,
                atom_count: 2
            }
        );
    }

    #[test]
    fn duplicate_bond_is_not_dropped_silently() {
        let err = GraphView::from_edges(2, &[(0, 1), (1, 0)]).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateBond { bond: 1, .. }));
    }

    #[test]
    fn view_counts_match_molecule() {
        let mol = ring(6, 6);
        let view = GraphView::from_mol(&mol).unwrap();
        assert_eq!(view.atom_count(), 6);
        assert_eq!(view.bond_count(), 6);
        for idx in mol.bonds() {
            let (a, b) = mol.bond_endpoints(idx).unwrap();
            assert_eq!(view.bond(a.index(), b.index()), Some(idx));
        }
        let mut nbs: Vec<usize> = mol.neighbors(NodeIndex::new(0)).map(|n| n.index()).collect();
        nbs.sort_unstable();
        let mut view_nbs = view.neighbors(0).to_vec();
        view_nbs.sort_unstable();
        assert_eq!(nbs, view_nbs);
    }

    #[test]
    fn components_are_numbered_from_one() {
        let view = GraphView::from_edges(5, &[(0, 2), (3, 4)]).unwrap();
        assert_eq!(component_labels(&view), vec![1, 2, 1, 3, 3]);
        let single = GraphView::from_mol(&chain(4, 6)).unwrap();
        assert_eq!(component_labels(&single), vec![1, 1, 1, 1]);
    }
}
