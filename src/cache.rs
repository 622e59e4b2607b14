//! Reusable target-side graph views.
//!
//! Matching many patterns against one target rebuilds the same adjacency
//! lists over and over. A [`GraphCache`] is attached by the caller to one
//! target and hands back the cached view until it is asked about a
//! different molecule, the target's atom or bond count changes, or the
//! entry is older than the configured TTL. Edits that keep both counts
//! unchanged are not detected; call [`GraphCache::invalidate`] after them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::GraphError;
use crate::graph::GraphView;
use crate::mol::Mol;

pub const DEFAULT_TTL: Duration = Duration::from_millis(250);

#[derive(Debug)]
struct Entry {
    view: Arc<GraphView>,
    target: usize,
    atom_count: usize,
    bond_count: usize,
    built: Instant,
}

#[derive(Debug)]
pub struct GraphCache {
    ttl: Duration,
    entry: Option<Entry>,
    rebuilds: usize,
}

impl GraphCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: None,
            rebuilds: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of times a view had to be (re)built.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn view<A, B>(&mut self, target: &Mol<A, B>) -> Result<Arc<GraphView>, GraphError> {
        let address = identity(target);
        if let Some(entry) = &self.entry {
            let fresh = entry.built.elapsed() < self.ttl;
            let same = entry.target == address;
            if fresh
                && same
                && entry.atom_count == target.atom_count()
                && entry.bond_count == target.bond_count()
            {
                trace!(atoms = entry.atom_count, "graph cache hit");
                return Ok(Arc::clone(&entry.view));
            }
            trace!(fresh, same, "graph cache entry is stale, rebuilding");
        }
        let view = Arc::new(GraphView::from_mol(target)?);
        self.rebuilds += 1;
        self.entry = Some(Entry {
            view: Arc::clone(&view),
            target: address,
            atom_count: target.atom_count(),
            bond_count: target.bond_count(),
            built: Instant::now(),
        });
        Ok(view)
    }
}

/// Address of the target molecule, used to tell targets apart.
fn identity<A, B>(target: &Mol<A, B>) -> usize {
    std::ptr::from_ref(target) as usize
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
