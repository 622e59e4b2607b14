/// Chirality tag used in query atom expressions.
///
/// This enum appears in [`AtomExpr::Chirality`](crate::AtomExpr::Chirality)
/// to require a stereocenter. It does **not** carry stereochemistry for actual
/// molecules; that is stored in [`TetrahedralStereo`](crate::TetrahedralStereo)
/// on the [`Mol`](crate::Mol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    /// No chirality constraint.
    #[default]
    None,
    /// Clockwise (@@) arrangement.
    Cw,
    /// Counterclockwise (@) arrangement.
    Ccw,
}

/// Role of an atom inside a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReactionRole {
    /// Not part of a reaction, or the role is unknown.
    #[default]
    None,
    Reactant,
    Agent,
    Product,
}

/// Default atom type for a molecular graph node.
///
/// `Atom` stores the intrinsic properties the matching core looks at. It
/// deliberately omits computed properties like valence or coordinates.
///
/// # Examples
///
/// ```
/// use isocrab::Atom;
///
/// let carbon = Atom {
///     hydrogen_count: 3,
///     ..Atom::element(6)
/// };
/// assert_eq!(carbon.atomic_num, Some(6));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). `None` means the element was
    /// never assigned, which element-based matching refuses to guess about.
    pub atomic_num: Option<u8>,
    /// Pseudo (wildcard, R-group, attachment point) atom. Compares as
    /// atomic number 0 under element matching.
    pub is_pseudo: bool,
    /// Formal charge in elementary charge units (e.g. −1 for a carboxylate oxygen).
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance (the common case).
    pub isotope: u16,
    /// Number of virtual (suppressed) hydrogens on this atom.
    pub hydrogen_count: u8,
    /// Whether this atom is in an aromatic ring.
    pub is_aromatic: bool,
    /// Reaction atom-atom map class. `0` means unmapped.
    pub map_num: u16,
    /// Which side of a reaction this atom belongs to.
    pub role: ReactionRole,
}

impl Atom {
    pub fn element(atomic_num: u8) -> Self {
        Self {
            atomic_num: Some(atomic_num),
            ..Self::default()
        }
    }

    pub fn aromatic(atomic_num: u8) -> Self {
        Self {
            atomic_num: Some(atomic_num),
            is_aromatic: true,
            ..Self::default()
        }
    }

    pub fn pseudo() -> Self {
        Self {
            is_pseudo: true,
            ..Self::default()
        }
    }

    /// Returns the atom tagged with a reaction map class and role.
    pub fn mapped(mut self, map_num: u16, role: ReactionRole) -> Self {
        self.map_num = map_num;
        self.role = role;
        self
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> Option<u8> {
        self.atomic_num
    }

    fn is_pseudo(&self) -> bool {
        self.is_pseudo
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::HasAtomMap for Atom {
    fn atom_map(&self) -> u16 {
        self.map_num
    }

    fn reaction_role(&self) -> ReactionRole {
        self.role
    }
}
