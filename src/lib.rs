pub mod atom;
pub mod bond;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod mappings;
pub mod matcher;
pub mod mol;
pub mod pattern;
pub mod query;
pub mod state;
pub mod stream;
pub mod traits;

pub use atom::{Atom, Chirality, ReactionRole};
pub use bond::{Bond, BondOrder};
pub use cache::GraphCache;
pub use config::{Algorithm, MatchConfig, MatchMode};
pub use error::{GraphError, MatchError, Side};
pub use filter::{AtomMapFilter, ComponentFilter, MappingFilter, StereoFilter};
pub use graph::{component_labels, GraphView};
pub use mappings::{AtomMapping, BondMapping, MappingIter, Mappings, Substructure};
pub use matcher::{
    AnyMatcher, AtomMatcher, BondMatcher, ElementMatcher, OrderMatcher, QueryAtom, QueryBond,
    QueryMatcher,
};
pub use mol::{DoubleBondConfig, DoubleBondStereo, Mol, TetrahedralStereo, Winding};
pub use pattern::Pattern;
pub use query::{AtomExpr, BondExpr};
pub use state::{
    CompatibilityMatrix, DfPlan, DfState, Problem, State, UllmannState, VfState, UNMAPPED,
};
pub use stream::{Deadline, StateStream};
pub use traits::{
    HasAromaticity, HasAtomMap, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount,
    HasIsotope,
};

#[cfg(test)]
mod fixtures;
