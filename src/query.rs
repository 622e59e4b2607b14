use petgraph::graph::NodeIndex;

use crate::atom::{Chirality, ReactionRole};
use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{
    HasAromaticity, HasAtomMap, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount,
    HasIsotope,
};

/// Boolean expression tree for a query atom.
///
/// Each variant represents a primitive test or a logical combination of tests.
/// During search, [`AtomExpr::matches`] evaluates the tree against one atom
/// of the target molecule.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomExpr {
    /// Matches any atom (wildcard `*`).
    True,
    /// Matches by element. `aromatic` is `None` for either form, `Some(true)`
    /// for aromatic only, `Some(false)` for aliphatic only.
    Element {
        atomic_num: u8,
        aromatic: Option<bool>,
    },
    /// Matches any aromatic atom.
    Aromatic,
    /// Matches any aliphatic atom.
    Aliphatic,
    /// Matches a specific isotope number.
    Isotope(u16),
    /// Matches explicit degree, the number of bonded neighbors.
    Degree(u8),
    /// Matches total connectivity: degree plus implicit H count.
    Connectivity(u8),
    /// Matches total hydrogen count including explicit H neighbors.
    TotalHCount(u8),
    /// Matches implicit (virtual) hydrogen count.
    ImplicitHCount(u8),
    /// Matches total valence: sum of bond orders plus implicit H count.
    Valence(u8),
    /// Matches formal charge.
    Charge(i8),
    /// Matches the count of non-C, non-H neighbors.
    HeteroNeighborCount(u8),
    /// Matches atoms carrying tetrahedral stereo. The handedness itself is
    /// checked by the stereo filter after a full mapping is known.
    Chirality(Chirality),
    /// Atom map class. Always matches; read by the reaction atom-map filter.
    AtomMapClass(u16),
    /// Matches atoms playing the given reaction role.
    Role(ReactionRole),
    And(Vec<AtomExpr>),
    Or(Vec<AtomExpr>),
    Not(Box<AtomExpr>),
}

/// Boolean expression tree for a query bond.
#[derive(Debug, Clone, PartialEq)]
pub enum BondExpr {
    /// Matches any bond.
    True,
    /// Matches a non-aromatic single bond.
    Single,
    /// Matches a non-aromatic double bond.
    Double,
    Triple,
    Aromatic,
    /// Default for unspecified query bonds: single or aromatic.
    SingleOrAromatic,
    And(Vec<BondExpr>),
    Or(Vec<BondExpr>),
    Not(Box<BondExpr>),
}

fn degree<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> usize {
    mol.neighbors(idx).count()
}

fn explicit_h_count<A: HasAtomicNum, B>(mol: &Mol<A, B>, idx: NodeIndex) -> usize {
    mol.neighbors(idx)
        .filter(|&nb| mol.atom(nb).atomic_num() == Some(1))
        .count()
}

fn hetero_neighbor_count<A: HasAtomicNum, B>(mol: &Mol<A, B>, idx: NodeIndex) -> usize {
    mol.neighbors(idx)
        .filter(|&nb| !matches!(mol.atom(nb).atomic_num(), Some(1) | Some(6) | None))
        .count()
}

fn bond_order_sum<A, B: HasBondOrder>(mol: &Mol<A, B>, idx: NodeIndex) -> usize {
    mol.bonds_of(idx)
        .map(|ei| usize::from(mol.bond(ei).bond_order().as_u8()))
        .sum()
}

impl AtomExpr {
    pub fn element(atomic_num: u8) -> Self {
        AtomExpr::Element {
            atomic_num,
            aromatic: None,
        }
    }

    pub fn matches<A, B>(&self, mol: &Mol<A, B>, idx: NodeIndex) -> bool
    where
        A: HasAtomicNum
            + HasAromaticity
            + HasIsotope
            + HasHydrogenCount
            + HasFormalCharge
            + HasAtomMap,
        B: HasBondOrder,
    {
        let atom = mol.atom(idx);
        let implicit_h = usize::from(atom.hydrogen_count());
        match self {
            AtomExpr::True => true,
            AtomExpr::Element {
                atomic_num,
                aromatic,
            } => {
                atom.atomic_num() == Some(*atomic_num)
                    && aromatic.is_none_or(|a| atom.is_aromatic() == a)
            }
            AtomExpr::Aromatic => atom.is_aromatic(),
            AtomExpr::Aliphatic => !atom.is_aromatic(),
            AtomExpr::Isotope(iso) => atom.isotope() == *iso,
            AtomExpr::Degree(d) => degree(mol, idx) == usize::from(*d),
            AtomExpr::Connectivity(x) => degree(mol, idx) + implicit_h == usize::from(*x),
            AtomExpr::TotalHCount(h) => implicit_h + explicit_h_count(mol, idx) == usize::from(*h),
            AtomExpr::ImplicitHCount(h) => atom.hydrogen_count() == *h,
            AtomExpr::Valence(v) => bond_order_sum(mol, idx) + implicit_h == usize::from(*v),
            AtomExpr::Charge(c) => atom.formal_charge() == *c,
            AtomExpr::HeteroNeighborCount(n) => {
                hetero_neighbor_count(mol, idx) == usize::from(*n)
            }
            AtomExpr::Chirality(q_chiral) => match q_chiral {
                Chirality::None => true,
                Chirality::Cw | Chirality::Ccw => mol.tetrahedral_stereo_for(idx).is_some(),
            },
            AtomExpr::AtomMapClass(_) => true,
            AtomExpr::Role(role) => atom.reaction_role() == *role,
            AtomExpr::And(exprs) => exprs.iter().all(|e| e.matches(mol, idx)),
            AtomExpr::Or(exprs) => exprs.iter().any(|e| e.matches(mol, idx)),
            AtomExpr::Not(expr) => !expr.matches(mol, idx),
        }
    }

    /// Atom map class carried by the expression, looking through `And`.
    pub fn map_class(&self) -> Option<u16> {
        match self {
            AtomExpr::AtomMapClass(n) => Some(*n),
            AtomExpr::And(parts) => parts.iter().find_map(|p| p.map_class()),
            _ => None,
        }
    }

    /// Reaction role required by the expression, looking through `And`.
    pub fn role(&self) -> Option<ReactionRole> {
        match self {
            AtomExpr::Role(r) => Some(*r),
            AtomExpr::And(parts) => parts.iter().find_map(|p| p.role()),
            _ => None,
        }
    }
}

impl HasAtomMap for AtomExpr {
    fn atom_map(&self) -> u16 {
        self.map_class().unwrap_or(0)
    }

    fn reaction_role(&self) -> ReactionRole {
        self.role().unwrap_or_default()
    }
}

impl BondExpr {
    pub fn matches<B: HasBondOrder + HasAromaticity>(&self, bond: &B) -> bool {
        let order = bond.bond_order();
        let aromatic = bond.is_aromatic();
        match self {
            BondExpr::True => true,
            BondExpr::Single => order == BondOrder::Single && !aromatic,
            BondExpr::Double => order == BondOrder::Double && !aromatic,
            BondExpr::Triple => order == BondOrder::Triple,
            BondExpr::Aromatic => aromatic,
            BondExpr::SingleOrAromatic => order == BondOrder::Single || aromatic,
            BondExpr::And(exprs) => exprs.iter().all(|e| e.matches(bond)),
            BondExpr::Or(exprs) => exprs.iter().any(|e| e.matches(bond)),
            BondExpr::Not(expr) => !expr.matches(bond),
        }
    }
}
