//! Small molecule builders shared by the unit tests.

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::{Mol, TetrahedralStereo, Winding};

pub(crate) fn mol_from(atoms: &[u8], bonds: &[(usize, usize, BondOrder)]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for &anum in atoms {
        mol.add_atom(Atom::element(anum));
    }
    for &(a, b, order) in bonds {
        mol.add_bond(NodeIndex::new(a), NodeIndex::new(b), Bond::new(order));
    }
    mol
}

pub(crate) fn chain(n: usize, atomic_num: u8) -> Mol<Atom, Bond> {
    let bonds: Vec<_> = (1..n).map(|i| (i - 1, i, BondOrder::Single)).collect();
    mol_from(&vec![atomic_num; n], &bonds)
}

pub(crate) fn ring(n: usize, atomic_num: u8) -> Mol<Atom, Bond> {
    let mut mol = chain(n, atomic_num);
    mol.add_bond(NodeIndex::new(n - 1), NodeIndex::new(0), Bond::default());
    mol
}

pub(crate) fn complete(n: usize) -> Mol<Atom, Bond> {
    let mut bonds = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            bonds.push((a, b, BondOrder::Single));
        }
    }
    mol_from(&vec![6; n], &bonds)
}

pub(crate) fn benzene() -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for _ in 0..6 {
        mol.add_atom(Atom::aromatic(6));
    }
    for i in 0..6 {
        mol.add_bond(NodeIndex::new(i), NodeIndex::new((i + 1) % 6), Bond::aromatic());
    }
    mol
}

pub(crate) fn naphthalene() -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for _ in 0..10 {
        mol.add_atom(Atom::aromatic(6));
    }
    let bonds = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 9),
        (9, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 8),
        (8, 9),
    ];
    for (a, b) in bonds {
        mol.add_bond(NodeIndex::new(a), NodeIndex::new(b), Bond::aromatic());
    }
    mol
}

/// C(F)(Cl)(Br)I with the center at index 0 and the carriers listed in the
/// order F, Cl, Br, I.
pub(crate) fn halomethane(winding: Winding) -> Mol<Atom, Bond> {
    let mut mol = mol_from(
        &[6, 9, 17, 35, 53],
        &[
            (0, 1, BondOrder::Single),
            (0, 2, BondOrder::Single),
            (0, 3, BondOrder::Single),
            (0, 4, BondOrder::Single),
        ],
    );
    mol.add_tetrahedral_stereo(TetrahedralStereo {
        center: NodeIndex::new(0),
        carriers: [1, 2, 3, 4].map(NodeIndex::new),
        winding,
    });
    mol
}

pub(crate) fn nodes(indices: &[usize]) -> Vec<NodeIndex> {
    indices.iter().copied().map(NodeIndex::new).collect()
}
