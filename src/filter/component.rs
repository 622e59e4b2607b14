use std::collections::HashMap;

use crate::graph::{component_labels, GraphView};

use super::MappingFilter;

/// Enforces a query component grouping.
///
/// Query atoms sharing a non-zero group id must land in one connected
/// component of the target, and different group ids must land in different
/// target components. Group `0` is unconstrained. Group ids are arbitrary
/// labels; they are renumbered to `1..=k` up front.
pub struct ComponentFilter {
    groups: Vec<u32>,
    labels: Vec<u32>,
    query_groups: usize,
    target_components: usize,
}

impl ComponentFilter {
    pub fn new(grouping: &[u32], target: &GraphView) -> Self {
        let mut dense: HashMap<u32, u32> = HashMap::new();
        let groups: Vec<u32> = grouping
            .iter()
            .map(|&g| {
                if g == 0 {
                    return 0;
                }
                let next = dense.len() as u32 + 1;
                *dense.entry(g).or_insert(next)
            })
            .collect();
        let labels = component_labels(target);
        let target_components = labels.iter().copied().max().unwrap_or(0) as usize;
        Self {
            groups,
            labels,
            query_groups: dense.len(),
            target_components,
        }
    }
}

impl MappingFilter for ComponentFilter {
    fn accept(&self, mapping: &[usize]) -> bool {
        // used_by[target component] = query group placed there
        let mut used_by = vec![0u32; self.target_components + 1];
        // used_in[query group] = target component it went to
        let mut used_in = vec![0u32; self.query_groups + 1];
        for (v, &w) in mapping.iter().enumerate() {
            let group = self.groups.get(v).copied().unwrap_or(0);
            if group == 0 {
                continue;
            }
            let component = self.labels[w];
            let by = &mut used_by[component as usize];
            if *by == 0 {
                *by = group;
            } else if *by != group {
                return false;
            }
            let within = &mut used_in[group as usize];
            if *within == 0 {
                *within = component;
            } else if *within != component {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_ethanes() -> GraphView {
        GraphView::from_edges(4, &[(0, 1), (2, 3)]).unwrap()
    }

    #[test]
    fn same_group_must_share_a_component() {
        let view = two_ethanes();
        let grouping = [1, 1];
        let f = ComponentFilter::new(&grouping, &view);
        assert!(f.accept(&[0, 1]));
        assert!(!f.accept(&[0, 2]));
    }

    #[test]
    fn different_groups_must_not_collide() {
        let view = two_ethanes();
        let grouping = [1, 2];
        let f = ComponentFilter::new(&grouping, &view);
        assert!(f.accept(&[0, 3]));
        assert!(!f.accept(&[0, 1]));
    }

    #[test]
    fn group_zero_is_unconstrained() {
        let view = two_ethanes();
        let grouping = [1, 0, 1];
        let f = ComponentFilter::new(&grouping, &view);
        assert!(f.accept(&[0, 2, 1]));
        assert!(!f.accept(&[0, 1, 2]));
    }

    #[test]
    fn large_sparse_group_ids_are_renumbered() {
        let view = two_ethanes();
        let grouping = [2_000_000_000, 2_000_000_000, 7];
        let f = ComponentFilter::new(&grouping, &view);
        assert_eq!(f.query_groups, 2);
        assert_eq!(f.groups, vec![1, 1, 2]);
        assert!(f.accept(&[0, 1, 2]));
        assert!(!f.accept(&[0, 2, 3]));
        assert!(f.accept(&[2, 3, 0]));
    }
}
