//! Reusable query bound to matchers and a search configuration.

use std::sync::Arc;

use tracing::debug;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::cache::GraphCache;
use crate::config::{MatchConfig, MatchMode};
use crate::error::MatchError;
use crate::filter::{paired_map_classes, AtomMapFilter, ComponentFilter, MapClass, StereoFilter};
use crate::graph::GraphView;
use crate::mappings::Mappings;
use crate::matcher::{AtomMatcher, BondMatcher, QueryAtom, QueryBond};
use crate::mol::Mol;
use crate::state::{DfPlan, Problem};

/// A query prepared for matching against many targets.
///
/// Building a pattern validates the query against the atom matcher, builds
/// the query's adjacency view and depth-first plan, and decides which
/// post-filters every search needs: stereo when the query carries stereo
/// descriptors, component grouping when the query sets one, and atom-map
/// checks when reactant and product query atoms share map classes.
///
/// A pattern is immutable. It can be shared between threads and used for
/// any number of concurrent searches.
///
/// # Examples
///
/// ```
/// use isocrab::{Atom, Bond, Mol, Pattern};
///
/// let mut ethanol = Mol::new();
/// let c1 = ethanol.add_atom(Atom::element(6));
/// let c2 = ethanol.add_atom(Atom::element(6));
/// let o = ethanol.add_atom(Atom::element(8));
/// ethanol.add_bond(c1, c2, Bond::default());
/// ethanol.add_bond(c2, o, Bond::default());
///
/// let mut hydroxyl_carbon = Mol::new();
/// let c = hydroxyl_carbon.add_atom(Atom::element(6));
/// let o = hydroxyl_carbon.add_atom(Atom::element(8));
/// hydroxyl_carbon.add_bond(c, o, Bond::default());
///
/// let pattern = Pattern::find_substructure(&hydroxyl_carbon).unwrap();
/// assert_eq!(pattern.find_match(&ethanol).unwrap(), Some(vec![1, 2]));
/// ```
pub struct Pattern<'q, QA, QB> {
    query: &'q Mol<QA, QB>,
    view: GraphView,
    plan: DfPlan,
    atom_matcher: Box<dyn AtomMatcher<QA>>,
    bond_matcher: Box<dyn BondMatcher<QB>>,
    config: MatchConfig,
    stereo: bool,
    map_classes: Vec<MapClass>,
}

impl<'q, QA: QueryAtom, QB: QueryBond> Pattern<'q, QA, QB> {
    pub fn find_substructure(query: &'q Mol<QA, QB>) -> Result<Self, MatchError> {
        Self::with_config(query, MatchConfig::substructure())
    }

    pub fn find_identical(query: &'q Mol<QA, QB>) -> Result<Self, MatchError> {
        Self::with_config(query, MatchConfig::identical())
    }

    /// Uses the default matchers of the query atom and bond types.
    pub fn with_config(query: &'q Mol<QA, QB>, config: MatchConfig) -> Result<Self, MatchError> {
        Self::with_matchers(
            query,
            QA::Matcher::default(),
            QB::Matcher::default(),
            config,
        )
    }

    pub fn with_matchers(
        query: &'q Mol<QA, QB>,
        atom_matcher: impl AtomMatcher<QA> + 'static,
        bond_matcher: impl BondMatcher<QB> + 'static,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        for idx in query.atoms() {
            atom_matcher.check_query(query.atom(idx), idx.index())?;
        }
        let view = GraphView::from_mol(query)?;
        let plan = DfPlan::new(&view);
        let stereo = config.stereo && query.has_stereo();
        let map_classes = paired_map_classes(query);
        debug!(
            atoms = query.atom_count(),
            bonds = query.bond_count(),
            algorithm = ?config.algorithm,
            mode = ?config.mode,
            stereo,
            components = query.component_grouping().is_some(),
            map_classes = map_classes.len(),
            "built pattern"
        );
        Ok(Self {
            query,
            view,
            plan,
            atom_matcher: Box::new(atom_matcher),
            bond_matcher: Box::new(bond_matcher),
            config,
            stereo,
            map_classes,
        })
    }

    pub fn query(&self) -> &'q Mol<QA, QB> {
        self.query
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn view(&self) -> &GraphView {
        &self.view
    }

    pub fn plan(&self) -> &DfPlan {
        &self.plan
    }

    pub(crate) fn problem<'b>(
        &'b self,
        target: &'b Mol<Atom, Bond>,
        target_view: &'b GraphView,
    ) -> Problem<'b, QA, QB> {
        Problem::new(
            self.query,
            target,
            &self.view,
            target_view,
            self.atom_matcher.as_ref(),
            self.bond_matcher.as_ref(),
            self.config.mode,
        )
    }

    /// First mapping of the query onto `target`, or `None`.
    pub fn find_match(&self, target: &Mol<Atom, Bond>) -> Result<Option<Vec<usize>>, MatchError> {
        self.match_all(target)?.first()
    }

    pub fn matches(&self, target: &Mol<Atom, Bond>) -> Result<bool, MatchError> {
        Ok(self.find_match(target)?.is_some())
    }

    /// All mappings of the query onto `target`, as a lazy pipeline.
    pub fn match_all<'a>(
        &'a self,
        target: &'a Mol<Atom, Bond>,
    ) -> Result<Mappings<'a, QA, QB>, MatchError> {
        let view = Arc::new(GraphView::from_mol(target)?);
        self.mappings(target, view)
    }

    /// Like [`Pattern::match_all`], reusing the target view held by `cache`
    /// when it is still valid for `target`.
    pub fn match_all_cached<'a>(
        &'a self,
        target: &'a Mol<Atom, Bond>,
        cache: &mut GraphCache,
    ) -> Result<Mappings<'a, QA, QB>, MatchError> {
        let view = cache.view(target)?;
        self.mappings(target, view)
    }

    fn mappings<'a>(
        &'a self,
        target: &'a Mol<Atom, Bond>,
        view: Arc<GraphView>,
    ) -> Result<Mappings<'a, QA, QB>, MatchError> {
        for idx in target.atoms() {
            self.atom_matcher.check_target(target.atom(idx), idx.index())?;
        }
        let feasible = self.sizes_compatible(&view);
        let grouping = self
            .query
            .component_grouping()
            .map(|g| ComponentFilter::new(g, &view));
        let mut mappings = Mappings::new(self, target, view, feasible);
        if self.stereo {
            mappings = mappings.filter(StereoFilter::new(self.query, target));
        }
        if let Some(components) = grouping {
            mappings = mappings.filter(components);
        }
        if !self.map_classes.is_empty() {
            mappings = mappings.filter(AtomMapFilter::new(&self.map_classes, target));
        }
        Ok(mappings)
    }

    fn sizes_compatible(&self, target: &GraphView) -> bool {
        let (n1, e1) = (self.view.atom_count(), self.view.bond_count());
        let (n2, e2) = (target.atom_count(), target.bond_count());
        match self.config.mode {
            MatchMode::Substructure => n1 <= n2 && e1 <= e2,
            MatchMode::Identical => n1 == n2 && e1 == e2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;
    use crate::config::Algorithm;
    use crate::error::Side;
    use crate::fixtures::{benzene, chain, mol_from, naphthalene, ring};
    use crate::matcher::AnyMatcher;
    use petgraph::graph::NodeIndex;
    use std::time::Duration;

    #[test]
    fn propane_contains_ethane_four_ways() {
        let ethane = chain(2, 6);
        let propane = chain(3, 6);
        let pattern = Pattern::find_substructure(&ethane).unwrap();
        assert_eq!(pattern.match_all(&propane).unwrap().count().unwrap(), 4);
    }

    #[test]
    fn cyclohexane_contains_ethane_twelve_ways() {
        let ethane = chain(2, 6);
        let pattern = Pattern::find_substructure(&ethane).unwrap();
        assert_eq!(pattern.match_all(&ring(6, 6)).unwrap().count().unwrap(), 12);
    }

    #[test]
    fn benzene_has_twelve_automorphisms() {
        let benz = benzene();
        for algorithm in [Algorithm::Vf, Algorithm::Ullmann, Algorithm::DepthFirst] {
            let config = MatchConfig::identical().with_algorithm(algorithm);
            let pattern = Pattern::with_config(&benz, config).unwrap();
            assert_eq!(pattern.match_all(&benz).unwrap().count().unwrap(), 12);
        }
    }

    #[test]
    fn element_mismatch_has_no_match() {
        let query = mol_from(&[6, 8], &[(0, 1, BondOrder::Single)]);
        let pattern = Pattern::find_substructure(&query).unwrap();
        assert!(!pattern.matches(&chain(4, 6)).unwrap());
    }

    #[test]
    fn bond_order_must_match() {
        let query = mol_from(&[6, 6], &[(0, 1, BondOrder::Double)]);
        let pattern = Pattern::find_substructure(&query).unwrap();
        assert!(!pattern.matches(&chain(3, 6)).unwrap());
        let topology = Pattern::with_matchers(
            &query,
            AnyMatcher,
            AnyMatcher,
            MatchConfig::substructure(),
        )
        .unwrap();
        assert!(topology.matches(&chain(3, 6)).unwrap());
    }

    #[test]
    fn identical_mode_rejects_larger_target() {
        let benz = benzene();
        let pattern = Pattern::find_identical(&benz).unwrap();
        assert!(!pattern.matches(&naphthalene()).unwrap());
    }

    #[test]
    fn unset_query_element_fails_construction() {
        let mut query = Mol::new();
        query.add_atom(Atom::default());
        let err = Pattern::<Atom, Bond>::find_substructure(&query).err().unwrap();
        assert_eq!(
            err,
            MatchError::UnsetAtomicNumber {
                side: Side::Query,
                index: 0
            }
        );
    }

    #[test]
    fn unset_target_element_fails_the_call() {
        let query = chain(1, 6);
        let mut target = chain(2, 6);
        target.atom_mut(NodeIndex::new(1)).atomic_num = None;
        let pattern = Pattern::find_substructure(&query).unwrap();
        assert!(matches!(
            pattern.find_match(&target),
            Err(MatchError::UnsetAtomicNumber {
                side: Side::Target,
                index: 1
            })
        ));
    }

    #[test]
    fn zero_budget_times_out() {
        let query = chain(3, 6);
        let config = MatchConfig::substructure().with_timeout(Duration::ZERO);
        let pattern = Pattern::with_config(&query, config).unwrap();
        let err = pattern.find_match(&ring(6, 6)).unwrap_err();
        assert_eq!(
            err,
            MatchError::Timeout {
                budget: Duration::ZERO
            }
        );
    }

    #[test]
    fn cached_view_is_reused_across_calls() {
        let query = chain(2, 6);
        let target = ring(6, 6);
        let pattern = Pattern::find_substructure(&query).unwrap();
        let mut cache = GraphCache::new(Duration::from_secs(60));
        for _ in 0..3 {
            let n = pattern
                .match_all_cached(&target, &mut cache)
                .unwrap()
                .count()
                .unwrap();
            assert_eq!(n, 12);
        }
        assert_eq!(cache.rebuilds(), 1);
    }
}
