use super::{assert_inverse, CompatibilityMatrix, Problem, State, UNMAPPED};

/// Ullmann search state.
///
/// Query atoms are fixed in index order. Fixing row `n` to column `m` marks
/// the rest of row `n` and then refines every later row until no cell
/// changes: a cell `(n', m')` survives only if each neighbor of `n'` still
/// has a feasible image among the neighbors of `m'`. A row left without a
/// feasible cell fails the assignment at once.
pub struct UllmannState<'a, QA, QB> {
    p: Problem<'a, QA, QB>,
    matrix: CompatibilityMatrix,
    m1: Vec<usize>,
    m2: Vec<usize>,
    size: usize,
}

impl<QA, QB> Clone for UllmannState<'_, QA, QB> {
    fn clone(&self) -> Self {
        Self {
            p: self.p,
            matrix: self.matrix.clone(),
            m1: self.m1.clone(),
            m2: self.m2.clone(),
            size: self.size,
        }
    }
}

impl<'a, QA, QB> UllmannState<'a, QA, QB> {
    /// Seeds the matrix with atom compatibility and degree pruning: a query
    /// atom cannot go to a target atom of smaller degree (or, when matching
    /// identical graphs, of different degree).
    pub fn new(p: Problem<'a, QA, QB>) -> Self {
        let n1 = p.g1.atom_count();
        let n2 = p.g2.atom_count();
        let identical = p.is_identical();
        let mut matrix = CompatibilityMatrix::new(n1, n2);
        for n in 0..n1 {
            let d1 = p.g1.degree(n);
            for m in 0..n2 {
                let d2 = p.g2.degree(m);
                let degree_ok = if identical { d1 == d2 } else { d1 <= d2 };
                if degree_ok && p.atoms_match(n, m) {
                    matrix.set1(n, m);
                }
            }
        }
        Self {
            p,
            matrix,
            m1: vec![UNMAPPED; n1],
            m2: vec![UNMAPPED; n2],
            size: 0,
        }
    }

    pub fn matrix(&self) -> &CompatibilityMatrix {
        &self.matrix
    }

    fn refine(&mut self, row: usize) -> bool {
        let marking = -(row as i32 + 1);
        loop {
            let mut changed = false;
            for n in row + 1..self.matrix.rows() {
                for m in 0..self.matrix.cols() {
                    if self.matrix.get(n, m) && !self.verify(n, m) {
                        self.matrix.mark(n, m, marking);
                        changed = true;
                        if !self.matrix.has_candidate(n) {
                            return false;
                        }
                    }
                }
            }
            if !changed {
                return true;
            }
        }
    }

    fn verify(&self, n: usize, m: usize) -> bool {
        self.p.g1.neighbors(n).iter().all(|&n_prime| {
            self.p.g2.neighbors(m).iter().any(|&m_prime| {
                self.matrix.get(n_prime, m_prime) && self.p.bonds_match(n, n_prime, m, m_prime)
            })
        })
    }
}

impl<QA, QB> State for UllmannState<'_, QA, QB> {
    fn n_max(&self) -> usize {
        self.m1.len()
    }

    fn m_max(&self) -> usize {
        self.m2.len()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn next_n(&self, prev: Option<usize>) -> Option<usize> {
        match prev {
            None if self.size < self.n_max() => Some(self.size),
            _ => None,
        }
    }

    fn next_m(&self, _n: usize, prev: Option<usize>) -> Option<usize> {
        let start = prev.map_or(0, |p| p + 1);
        (start..self.m_max()).find(|&m| self.m2[m] == UNMAPPED)
    }

    fn add(&mut self, n: usize, m: usize) -> bool {
        debug_assert_eq!(n, self.size);
        if !self.matrix.get(n, m) {
            return false;
        }
        let marking = -(n as i32 + 1);
        self.matrix.mark_row(n, marking);
        self.matrix.set1(n, m);
        if !self.refine(n) {
            self.matrix.reset_rows(n, marking);
            return false;
        }
        self.m1[n] = m;
        self.m2[m] = n;
        self.size += 1;
        assert_inverse(&self.m1, &self.m2);
        true
    }

    fn remove(&mut self, n: usize, m: usize) {
        debug_assert_eq!(self.m1[n], m);
        self.size -= 1;
        self.m1[n] = UNMAPPED;
        self.m2[m] = UNMAPPED;
        self.matrix.reset_rows(n, -(n as i32 + 1));
    }

    fn mapping(&self) -> Vec<usize> {
        self.m1.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;
    use crate::config::MatchMode;
    use crate::fixtures::{chain, complete, mol_from, ring};
    use crate::state::testing::{check_inverse, walk, Harness};

    #[test]
    fn degree_pruning_seeds_the_matrix() {
        // 0-1-2 into a 3-star centered on 0
        let star = mol_from(
            &[6, 6, 6, 6],
            &[
                (0, 1, BondOrder::Single),
                (0, 2, BondOrder::Single),
                (0, 3, BondOrder::Single),
            ],
        );
        let h = Harness::new(chain(3, 6), star);
        let state = UllmannState::new(h.problem(MatchMode::Substructure));
        // the middle query atom has degree 2, so only the center qualifies
        assert!(state.matrix().get(1, 0));
        assert!(!state.matrix().get(1, 1));
        assert!(state.matrix().get(0, 3));
    }

    #[test]
    fn refinement_prunes_through_neighbors() {
        let h = Harness::new(chain(3, 6), chain(3, 6));
        let mut state = UllmannState::new(h.problem(MatchMode::Substructure));
        assert!(state.add(0, 0));
        // query 1 must now sit next to target 0, and query 2 next to that
        assert!(state.matrix().get(1, 1));
        assert!(!state.matrix().get(1, 2));
        assert!(!state.matrix().get(2, 1));
        assert!(state.matrix().get(2, 2));
        // 0 -> 1 would leave query 1 without a candidate of degree >= 2
        let mut fresh = UllmannState::new(h.problem(MatchMode::Substructure));
        assert!(!fresh.add(0, 1));
    }

    #[test]
    fn add_then_remove_restores_matrix_exactly() {
        let h = Harness::new(ring(4, 6), complete(5));
        let mut state = UllmannState::new(h.problem(MatchMode::Substructure));
        let mut trail = Vec::new();
        for m in [3, 1, 4] {
            let n = state.size();
            let before = (state.matrix.clone(), state.m1.clone(), state.m2.clone());
            assert!(state.add(n, m));
            trail.push((before, n, m));
        }
        while let Some((before, n, m)) = trail.pop() {
            state.remove(n, m);
            assert_eq!((state.matrix.clone(), state.m1.clone(), state.m2.clone()), before);
        }
    }

    #[test]
    fn failed_add_restores_matrix() {
        let h = Harness::new(chain(3, 6), chain(3, 6));
        let mut state = UllmannState::new(h.problem(MatchMode::Substructure));
        let before = state.matrix.clone();
        assert!(!state.add(0, 1));
        assert_eq!(state.matrix, before);
        assert_eq!(state.size(), 0);
    }

    #[test]
    fn inverse_holds_throughout_a_search() {
        let h = Harness::new(ring(5, 6), complete(6));
        let mut state = UllmannState::new(h.problem(MatchMode::Substructure));
        let initial = state.matrix.clone();
        let mut budget = 500;
        walk(&mut state, &mut budget, &mut |s| check_inverse(&s.m1, &s.m2, s.size));
        assert_eq!(state.matrix, initial);
    }
}
