//! Configuration for a pattern search.
//!
//! A [`MatchConfig`] picks the backtracking algorithm, whether the query must
//! be a substructure of the target or identical to it, whether stereo
//! descriptors on the query are enforced, and an optional time budget.
//!
//! The configuration is plain data and can be loaded from JSON:
//!
//! ```
//! use isocrab::{Algorithm, MatchConfig, MatchMode};
//!
//! let cfg: MatchConfig =
//!     serde_json::from_str(r#"{ "algorithm": "ullmann", "mode": "identical" }"#).unwrap();
//! assert_eq!(cfg.algorithm, Algorithm::Ullmann);
//! assert_eq!(cfg.mode, MatchMode::Identical);
//! assert!(cfg.stereo);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Backtracking strategy used to enumerate mappings.
///
/// - Vf: Vento-Foggia vertex-pair search with terminal-set look-ahead. Good
///   general default.
/// - Ullmann: refines a query-by-target compatibility matrix after every
///   assignment. Strong pruning on dense or highly symmetric targets.
/// - DepthFirst: walks query bonds depth first and only tries neighbors of
///   the parent's image. Fastest for chain-like queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Vf,
    Ullmann,
    DepthFirst,
}

/// What counts as a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The query maps injectively into the target; extra target atoms and
    /// bonds are allowed.
    #[default]
    Substructure,
    /// The query and target are isomorphic: same atom and bond counts and a
    /// bijection preserving adjacency in both directions.
    Identical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub algorithm: Algorithm,
    pub mode: MatchMode,
    /// Enforce tetrahedral and double-bond stereo carried by the query.
    pub stereo: bool,
    /// Wall-clock budget for one enumeration. `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl MatchConfig {
    pub fn substructure() -> Self {
        Self::default()
    }

    pub fn identical() -> Self {
        Self {
            mode: MatchMode::Identical,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_stereo(mut self, stereo: bool) -> Self {
        self.stereo = stereo;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Vf,
            mode: MatchMode::Substructure,
            stereo: true,
            timeout: None,
        }
    }
}
