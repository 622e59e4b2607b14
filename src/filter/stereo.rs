use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::{DoubleBondStereo, Mol, TetrahedralStereo};

use super::MappingFilter;

/// Checks that every stereo element of the query is reproduced by the
/// target under the mapping.
///
/// A query stereo element whose image carries no stereo element in the
/// target is rejected, as is a tetrahedral center whose carriers cannot be
/// lined up unambiguously.
pub struct StereoFilter<'a, QA, QB> {
    query: &'a Mol<QA, QB>,
    target: &'a Mol<Atom, Bond>,
}

impl<'a, QA, QB> StereoFilter<'a, QA, QB> {
    pub fn new(query: &'a Mol<QA, QB>, target: &'a Mol<Atom, Bond>) -> Self {
        Self { query, target }
    }

    fn tetrahedral_ok(&self, q: &TetrahedralStereo, mapping: &[usize]) -> bool {
        let t_center = NodeIndex::new(mapping[q.center.index()]);
        let Some(t) = self.target.tetrahedral_stereo_for(t_center) else {
            return false;
        };
        let mapped = q.carriers.map(|c| {
            if c == q.center {
                t_center
            } else {
                NodeIndex::new(mapping[c.index()])
            }
        });
        let Some(perm) = align(&mapped, &t.carriers) else {
            return false;
        };
        let odd = count_inversions(&perm) % 2 == 1;
        (q.winding == t.winding) != odd
    }

    fn double_bond_ok(&self, q: &DoubleBondStereo, mapping: &[usize]) -> bool {
        let image = |v: NodeIndex| NodeIndex::new(mapping[v.index()]);
        let (ta, tb) = (image(q.bond.0), image(q.bond.1));
        let Some(t) = self.target.double_bond_stereo_for(ta, tb) else {
            return false;
        };
        // target refs as seen from the query's bond orientation
        let t_refs = if t.bond.0 == ta {
            t.refs
        } else {
            [t.refs[1], t.refs[0]]
        };
        let flips = (0..2).filter(|&i| image(q.refs[i]) != t_refs[i]).count();
        let config = if flips % 2 == 1 {
            q.config.invert()
        } else {
            q.config
        };
        config == t.config
    }
}

/// Position of each mapped carrier among the target carriers. One carrier
/// missing on each side is paired up; anything else is ambiguous.
fn align(mapped: &[NodeIndex; 4], stored: &[NodeIndex; 4]) -> Option<[usize; 4]> {
    let mut perm = [usize::MAX; 4];
    let mut used = [false; 4];
    let mut unmatched = Vec::new();
    for (i, node) in mapped.iter().enumerate() {
        match stored.iter().position(|s| s == node) {
            Some(j) if !used[j] => {
                perm[i] = j;
                used[j] = true;
            }
            _ => unmatched.push(i),
        }
    }
    match unmatched.as_slice() {
        [] => Some(perm),
        [i] => {
            let j = used.iter().position(|u| !u)?;
            perm[*i] = j;
            Some(perm)
        }
        _ => None,
    }
}

fn count_inversions(positions: &[usize]) -> usize {
    let mut inversions = 0;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i] > positions[j] {
                inversions += 1;
            }
        }
    }
    inversions
}

impl<QA, QB> MappingFilter for StereoFilter<'_, QA, QB> {
    fn accept(&self, mapping: &[usize]) -> bool {
        self.query
            .tetrahedral_stereo()
            .iter()
            .all(|q| self.tetrahedral_ok(q, mapping))
            && self
                .query
                .double_bond_stereo()
                .iter()
                .all(|q| self.double_bond_ok(q, mapping))
    }
}
