use std::time::Duration;

use thiserror::Error;

/// Structural problems found while building a graph view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A bond names an atom index that does not exist.
    #[error("bond {bond} references atom {atom}, but the graph has {atom_count} atoms")]
    BondOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },
    /// A bond connects an atom to itself.
    #[error("bond {bond} connects atom {atom} to itself")]
    SelfLoop { bond: usize, atom: usize },
    /// Two bonds connect the same pair of atoms.
    #[error("bond {bond} duplicates an existing bond between atoms {a} and {b}")]
    DuplicateBond { bond: usize, a: usize, b: usize },
}

/// Which graph of a search an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Query,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Query => write!(f, "query"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// Errors returned by pattern construction and matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Element matching was requested but an atom has no atomic number.
    #[error("{side} atom {index} has no atomic number")]
    UnsetAtomicNumber { side: Side, index: usize },
    /// The configured time budget ran out before the search finished. This is
    /// never reported as "no match".
    #[error("search exceeded its time budget of {budget:?}")]
    Timeout { budget: Duration },
}
