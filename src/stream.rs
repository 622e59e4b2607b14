//! Lazy enumeration of complete mappings.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::MatchError;
use crate::state::State;

/// Wall-clock budget for one enumeration.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn new(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.budget
    }
}

/// Chronological backtracking over a [`State`], yielding one complete
/// mapping per `next`.
///
/// The stream keeps its own stack of accepted `(n, m)` pairs and resumes
/// exactly where the previous call stopped. A deadline, when set, is checked
/// before every step; once it has passed the stream yields a single
/// [`MatchError::Timeout`] and then ends.
pub struct StateStream<S> {
    state: S,
    stack: Vec<(usize, usize)>,
    n: Option<usize>,
    m: Option<usize>,
    deadline: Option<Deadline>,
    started: bool,
    done: bool,
}

impl<S: State> StateStream<S> {
    pub fn new(state: S) -> Self {
        let n = state.next_n(None);
        Self {
            state,
            stack: Vec::new(),
            n,
            m: None,
            deadline: None,
            started: false,
            done: false,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn check_deadline(&mut self) -> Result<(), MatchError> {
        match self.deadline {
            Some(deadline) if deadline.expired() => {
                self.done = true;
                warn!(
                    budget = ?deadline.budget(),
                    depth = self.stack.len(),
                    "match deadline expired"
                );
                Err(MatchError::Timeout {
                    budget: deadline.budget(),
                })
            }
            _ => Ok(()),
        }
    }

    fn advance(&mut self) -> Result<Option<Vec<usize>>, MatchError> {
        let Some(mut n) = self.n else {
            // empty query: the empty mapping is the only solution
            self.done = true;
            return Ok(Some(self.state.mapping()));
        };
        loop {
            self.check_deadline()?;
            match self.state.next_m(n, self.m) {
                Some(m) => {
                    self.m = Some(m);
                    if !self.state.add(n, m) {
                        continue;
                    }
                    match self.state.next_n(None) {
                        Some(next) => {
                            self.stack.push((n, m));
                            n = next;
                            self.n = Some(n);
                            self.m = None;
                        }
                        None => {
                            debug_assert!(self.state.is_complete());
                            let mapping = self.state.mapping();
                            self.state.remove(n, m);
                            return Ok(Some(mapping));
                        }
                    }
                }
                None => match self.stack.pop() {
                    Some((prev_n, prev_m)) => {
                        self.state.remove(prev_n, prev_m);
                        n = prev_n;
                        self.n = Some(n);
                        self.m = Some(prev_m);
                    }
                    None => {
                        self.done = true;
                        return Ok(None);
                    }
                },
            }
        }
    }
}

impl<S: State> Iterator for StateStream<S> {
    type Item = Result<Vec<usize>, MatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if let Err(e) = self.check_deadline() {
                return Some(Err(e));
            }
        }
        self.advance().transpose()
    }
}

impl<S: State> std::iter::FusedIterator for StateStream<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchMode;
    use crate::fixtures::{chain, complete, ring};
    use crate::state::testing::Harness;
    use crate::state::{DfPlan, DfState, UllmannState, VfState};
    use std::collections::BTreeSet;

    fn all<S: State>(state: S) -> Vec<Vec<usize>> {
        StateStream::new(state).map(|r| r.unwrap()).collect()
    }

    #[test]
    fn path_into_square_has_eight_mappings() {
        let h = Harness::new(chain(3, 6), ring(4, 6));
        let p = h.problem(MatchMode::Substructure);
        let plan = DfPlan::new(&h.g1);
        assert_eq!(all(VfState::new(p)).len(), 8);
        assert_eq!(all(UllmannState::new(p)).len(), 8);
        assert_eq!(all(DfState::new(p, &plan)).len(), 8);
    }

    #[test]
    fn algorithms_agree_on_the_mapping_set() {
        let h = Harness::new(chain(4, 6), complete(5));
        let p = h.problem(MatchMode::Substructure);
        let plan = DfPlan::new(&h.g1);
        let vf: BTreeSet<_> = all(VfState::new(p)).into_iter().collect();
        let ull: BTreeSet<_> = all(UllmannState::new(p)).into_iter().collect();
        let df: BTreeSet<_> = all(DfState::new(p, &plan)).into_iter().collect();
        // 5 * 4 * 3 * 2 ordered paths
        assert_eq!(vf.len(), 120);
        assert_eq!(vf, ull);
        assert_eq!(vf, df);
    }

    #[test]
    fn mappings_are_distinct_and_injective() {
        let h = Harness::new(ring(6, 6), ring(6, 6));
        let maps = all(VfState::new(h.problem(MatchMode::Identical)));
        assert_eq!(maps.len(), 12);
        let unique: BTreeSet<_> = maps.iter().cloned().collect();
        assert_eq!(unique.len(), 12);
        for m in &maps {
            let targets: BTreeSet<_> = m.iter().copied().collect();
            assert_eq!(targets.len(), 6);
        }
    }

    #[test]
    fn empty_query_yields_one_empty_mapping() {
        let h = Harness::new(crate::mol::Mol::new(), chain(3, 6));
        let maps = all(VfState::new(h.problem(MatchMode::Substructure)));
        assert_eq!(maps, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn query_larger_than_target_has_no_mapping() {
        let h = Harness::new(chain(4, 6), chain(3, 6));
        assert!(all(VfState::new(h.problem(MatchMode::Substructure))).is_empty());
    }

    #[test]
    fn expired_deadline_yields_timeout_once() {
        let h = Harness::new(chain(3, 6), complete(6));
        let mut stream = StateStream::new(VfState::new(h.problem(MatchMode::Substructure)))
            .with_deadline(Some(Deadline::new(Duration::ZERO)));
        assert!(matches!(stream.next(), Some(Err(MatchError::Timeout { .. }))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn state_is_clean_after_exhaustion() {
        let h = Harness::new(chain(3, 6), ring(5, 6));
        let mut stream = StateStream::new(VfState::new(h.problem(MatchMode::Substructure)));
        assert_eq!(stream.by_ref().count(), 10);
        assert_eq!(stream.state().size(), 0);
    }
}
