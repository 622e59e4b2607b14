#![allow(dead_code)]

use std::sync::OnceLock;

use isocrab::{Atom, Bond, Mol};
use petgraph::graph::NodeIndex;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn mol(atoms: &[u8], bonds: &[(usize, usize)]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for &anum in atoms {
        mol.add_atom(Atom::element(anum));
    }
    for &(a, b) in bonds {
        mol.add_bond(NodeIndex::new(a), NodeIndex::new(b), Bond::default());
    }
    mol
}

pub fn path(n: usize) -> Mol<Atom, Bond> {
    let bonds: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
    mol(&vec![6; n], &bonds)
}

pub fn cycle(n: usize) -> Mol<Atom, Bond> {
    let mut bonds: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
    bonds.push((n - 1, 0));
    mol(&vec![6; n], &bonds)
}

pub fn complete(n: usize) -> Mol<Atom, Bond> {
    let mut bonds = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            bonds.push((a, b));
        }
    }
    mol(&vec![6; n], &bonds)
}

/// Same graph with atoms renumbered by `perm` (old index `i` becomes
/// `perm[i]`) and bonds added in reverse order.
pub fn relabel(source: &Mol<Atom, Bond>, perm: &[usize]) -> Mol<Atom, Bond> {
    let mut inverse = vec![0; perm.len()];
    for (old, &new) in perm.iter().enumerate() {
        inverse[new] = old;
    }
    let mut out = Mol::new();
    for &old in &inverse {
        out.add_atom(source.atom(NodeIndex::new(old)).clone());
    }
    let bonds: Vec<_> = source.bonds().collect();
    for &e in bonds.iter().rev() {
        if let Some((a, b)) = source.bond_endpoints(e) {
            out.add_bond(
                NodeIndex::new(perm[a.index()]),
                NodeIndex::new(perm[b.index()]),
                source.bond(e).clone(),
            );
        }
    }
    out
}
