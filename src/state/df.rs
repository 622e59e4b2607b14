use crate::graph::GraphView;

use super::{assert_inverse, Problem, State, UNMAPPED};

/// Depth-first visiting order of a query graph.
///
/// Atoms are listed in the order a depth-first walk over the query bonds
/// reaches them, one walk per connected component. Every atom except a
/// component root records the already-visited atom it was reached from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfPlan {
    order: Vec<usize>,
    parent: Vec<Option<usize>>,
}

impl DfPlan {
    pub fn new(query: &GraphView) -> Self {
        let n = query.atom_count();
        let mut order = Vec::with_capacity(n);
        let mut parent = vec![None; n];
        let mut visited = vec![false; n];
        let mut stack = Vec::new();
        for root in 0..n {
            if visited[root] {
                continue;
            }
            stack.push((root, None));
            while let Some((v, from)) = stack.pop() {
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                parent[v] = from;
                order.push(v);
                for &nb in query.neighbors(v).iter().rev() {
                    if !visited[nb] {
                        stack.push((nb, Some(v)));
                    }
                }
            }
        }
        Self { order, parent }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn parent(&self, n: usize) -> Option<usize> {
        self.parent[n]
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Bond-driven depth-first search state.
///
/// The query atom at depth `d` is `plan.order()[d]`. Its candidates are the
/// unmapped target neighbors of its parent's image, so acyclic queries are
/// matched by walking the target along bonds instead of scanning it.
pub struct DfState<'a, QA, QB> {
    p: Problem<'a, QA, QB>,
    plan: &'a DfPlan,
    m1: Vec<usize>,
    m2: Vec<usize>,
    size: usize,
}

impl<QA, QB> Clone for DfState<'_, QA, QB> {
    fn clone(&self) -> Self {
        Self {
            p: self.p,
            plan: self.plan,
            m1: self.m1.clone(),
            m2: self.m2.clone(),
            size: self.size,
        }
    }
}

impl<'a, QA, QB> DfState<'a, QA, QB> {
    pub fn new(p: Problem<'a, QA, QB>, plan: &'a DfPlan) -> Self {
        debug_assert_eq!(plan.len(), p.g1.atom_count());
        Self {
            p,
            plan,
            m1: vec![UNMAPPED; p.g1.atom_count()],
            m2: vec![UNMAPPED; p.g2.atom_count()],
            size: 0,
        }
    }

    fn feasible(&self, n: usize, m: usize) -> bool {
        if self.p.is_identical() && self.p.g1.degree(n) != self.p.g2.degree(m) {
            return false;
        }
        if !self.p.atoms_match(n, m) {
            return false;
        }
        self.p.g1.neighbors(n).iter().all(|&n_prime| {
            let m_prime = self.m1[n_prime];
            m_prime == UNMAPPED || self.p.bonds_match(n, n_prime, m, m_prime)
        })
    }
}

impl<QA, QB> State for DfState<'_, QA, QB> {
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
            None => self.plan.order.get(self.size).copied(),
            Some(_) => None,
        }
    }

    fn next_m(&self, n: usize, prev: Option<usize>) -> Option<usize> {
        match self.plan.parent(n) {
            Some(parent) => {
                let anchor = self.m1[parent];
                debug_assert_ne!(anchor, UNMAPPED);
                let candidates = self.p.g2.neighbors(anchor);
                let start = prev
                    .and_then(|m| candidates.iter().position(|&c| c == m))
                    .map_or(0, |i| i + 1);
                candidates[start..]
                    .iter()
                    .copied()
                    .find(|&m| self.m2[m] == UNMAPPED)
            }
            None => {
                let start = prev.map_or(0, |p| p + 1);
                (start..self.m_max()).find(|&m| self.m2[m] == UNMAPPED)
            }
        }
    }

    fn add(&mut self, n: usize, m: usize) -> bool {
        debug_assert_eq!(self.m2[m], UNMAPPED);
        if !self.feasible(n, m) {
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
        self.m1[n] = UNMAPPED;
        self.m2[m] = UNMAPPED;
        self.size -= 1;
    }

    fn mapping(&self) -> Vec<usize> {
        self.m1.clone()
    }
}
