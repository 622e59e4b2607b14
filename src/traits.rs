use crate::atom::ReactionRole;
use crate::bond::BondOrder;

pub trait HasAtomicNum {
    /// `None` when the element has not been assigned.
    fn atomic_num(&self) -> Option<u8>;

    fn is_pseudo(&self) -> bool {
        false
    }
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasIsotope {
    fn isotope(&self) -> u16;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

/// Reaction atom-atom mapping information. A map class of `0` means the atom
/// is unmapped.
pub trait HasAtomMap {
    fn atom_map(&self) -> u16;

    fn reaction_role(&self) -> ReactionRole {
        ReactionRole::None
    }
}
