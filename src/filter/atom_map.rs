use std::collections::{BTreeMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::atom::{Atom, ReactionRole};
use crate::bond::Bond;
use crate::mol::Mol;
use crate::traits::HasAtomMap;

use super::MappingFilter;

/// Query atoms sharing one atom-map class, split by reaction side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapClass {
    pub class: u16,
    pub reactants: Vec<usize>,
    pub products: Vec<usize>,
}

/// Collects the query map classes that appear on both the reactant and the
/// product side. Classes seen on only one side constrain nothing.
pub fn paired_map_classes<QA: HasAtomMap, QB>(query: &Mol<QA, QB>) -> Vec<MapClass> {
    let mut by_class: BTreeMap<u16, MapClass> = BTreeMap::new();
    for idx in query.atoms() {
        let atom = query.atom(idx);
        let class = atom.atom_map();
        if class == 0 {
            continue;
        }
        let entry = by_class.entry(class).or_insert_with(|| MapClass {
            class,
            reactants: Vec::new(),
            products: Vec::new(),
        });
        match atom.reaction_role() {
            ReactionRole::Reactant => entry.reactants.push(idx.index()),
            ReactionRole::Product => entry.products.push(idx.index()),
            ReactionRole::Agent | ReactionRole::None => {}
        }
    }
    by_class
        .into_values()
        .filter(|c| !c.reactants.is_empty() && !c.products.is_empty())
        .collect()
}

/// Requires the target to carry a consistent atom map wherever the query
/// pairs a reactant atom with a product atom.
///
/// With one reactant atom in a class, its image must have a non-zero map
/// and every product image must carry the same map. With several reactant
/// atoms in a class, each reactant image must be mapped and every product
/// image must carry one of their maps.
pub struct AtomMapFilter<'a> {
    classes: &'a [MapClass],
    target: &'a Mol<Atom, Bond>,
}

impl<'a> AtomMapFilter<'a> {
    pub fn new(classes: &'a [MapClass], target: &'a Mol<Atom, Bond>) -> Self {
        Self { classes, target }
    }

    fn map_of(&self, mapping: &[usize], query_atom: usize) -> u16 {
        self.target
            .atom(NodeIndex::new(mapping[query_atom]))
            .map_num
    }

    fn class_ok(&self, class: &MapClass, mapping: &[usize]) -> bool {
        if let [reactant] = class.reactants.as_slice() {
            let expected = self.map_of(mapping, *reactant);
            return expected != 0
                && class
                    .products
                    .iter()
                    .all(|&p| self.map_of(mapping, p) == expected);
        }
        let mut allowed = HashSet::with_capacity(class.reactants.len());
        for &r in &class.reactants {
            let map = self.map_of(mapping, r);
            if map == 0 {
                return false;
            }
            allowed.insert(map);
        }
        class
            .products
            .iter()
            .all(|&p| allowed.contains(&self.map_of(mapping, p)))
    }
}

impl MappingFilter for AtomMapFilter<'_> {
    fn accept(&self, mapping: &[usize]) -> bool {
        self.classes.iter().all(|c| self.class_ok(c, mapping))
    }
}
