use super::{assert_inverse, Problem, State, UNMAPPED};

/// Vento-Foggia search state.
///
/// `t1[v]` / `t2[v]` record the depth at which an unmapped vertex first
/// became adjacent to the mapping (`0` means not yet). Candidates are drawn
/// from these terminal sets first, and the counts of terminal and remaining
/// neighbors prune pairs that cannot lead to a complete mapping.
pub struct VfState<'a, QA, QB> {
    p: Problem<'a, QA, QB>,
    m1: Vec<usize>,
    m2: Vec<usize>,
    t1: Vec<usize>,
    t2: Vec<usize>,
    size: usize,
}

impl<QA, QB> Clone for VfState<'_, QA, QB> {
    fn clone(&self) -> Self {
        Self {
            p: self.p,
            m1: self.m1.clone(),
            m2: self.m2.clone(),
            t1: self.t1.clone(),
            t2: self.t2.clone(),
            size: self.size,
        }
    }
}

impl<'a, QA, QB> VfState<'a, QA, QB> {
    pub fn new(p: Problem<'a, QA, QB>) -> Self {
        let n1 = p.g1.atom_count();
        let n2 = p.g2.atom_count();
        Self {
            p,
            m1: vec![UNMAPPED; n1],
            m2: vec![UNMAPPED; n2],
            t1: vec![0; n1],
            t2: vec![0; n2],
            size: 0,
        }
    }

    fn feasible(&self, n: usize, m: usize) -> bool {
        if !self.p.atoms_match(n, m) {
            return false;
        }

        let (mut term1, mut rem1) = (0usize, 0usize);
        for &n_prime in self.p.g1.neighbors(n) {
            let m_prime = self.m1[n_prime];
            if m_prime != UNMAPPED {
                if !self.p.bonds_match(n, n_prime, m, m_prime) {
                    return false;
                }
            } else if self.t1[n_prime] > 0 {
                term1 += 1;
            } else {
                rem1 += 1;
            }
        }

        let identical = self.p.is_identical();
        let (mut term2, mut rem2) = (0usize, 0usize);
        for &m_prime in self.p.g2.neighbors(m) {
            let n_prime = self.m2[m_prime];
            if n_prime != UNMAPPED {
                // target bonds between mapped atoms must exist in the query too
                if identical && self.p.g1.bond(n, n_prime).is_none() {
                    return false;
                }
            } else if self.t2[m_prime] > 0 {
                term2 += 1;
            } else {
                rem2 += 1;
            }
        }

        if identical {
            term1 == term2 && rem1 == rem2
        } else {
            term1 <= term2 && term1 + rem1 <= term2 + rem2
        }
    }
}

impl<QA, QB> State for VfState<'_, QA, QB> {
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
        let start = prev.map_or(0, |p| p + 1);
        if self.size == 0 {
            return (start < self.n_max()).then_some(start);
        }
        (start..self.n_max())
            .find(|&n| self.m1[n] == UNMAPPED && self.t1[n] > 0)
            .or_else(|| (start..self.n_max()).find(|&n| self.m1[n] == UNMAPPED))
    }

    fn next_m(&self, n: usize, prev: Option<usize>) -> Option<usize> {
        let start = prev.map_or(0, |p| p + 1);
        if self.size == 0 {
            return (start < self.m_max()).then_some(start);
        }
        let terminal = self.t1[n] > 0;
        (start..self.m_max()).find(|&m| self.m2[m] == UNMAPPED && (!terminal || self.t2[m] > 0))
    }

    fn add(&mut self, n: usize, m: usize) -> bool {
        debug_assert_eq!(self.m1[n], UNMAPPED);
        debug_assert_eq!(self.m2[m], UNMAPPED);
        if !self.feasible(n, m) {
            return false;
        }
        self.m1[n] = m;
        self.m2[m] = n;
        self.size += 1;
        for &w in self.p.g1.neighbors(n) {
            if self.t1[w] == 0 {
                self.t1[w] = self.size;
            }
        }
        for &w in self.p.g2.neighbors(m) {
            if self.t2[w] == 0 {
                self.t2[w] = self.size;
            }
        }
        assert_inverse(&self.m1, &self.m2);
        true
    }

    fn remove(&mut self, n: usize, m: usize) {
        debug_assert_eq!(self.m1[n], m);
        self.m1[n] = UNMAPPED;
        self.m2[m] = UNMAPPED;
        self.size -= 1;
        for &w in self.p.g1.neighbors(n) {
            if self.t1[w] > self.size {
                self.t1[w] = 0;
            }
        }
        for &w in self.p.g2.neighbors(m) {
            if self.t2[w] > self.size {
                self.t2[w] = 0;
            }
        }
    }

    fn mapping(&self) -> Vec<usize> {
        self.m1.clone()
    }
}
