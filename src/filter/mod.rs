//! Post-filters applied to complete mappings.
//!
//! Some constraints cannot be decided pair by pair during the search. Stereo
//! parity needs every carrier mapped and component grouping needs the whole
//! partition, so these checks run on each complete mapping instead.

mod atom_map;
mod component;
mod stereo;

pub use atom_map::{paired_map_classes, AtomMapFilter, MapClass};
pub use component::ComponentFilter;
pub use stereo::StereoFilter;

/// Accepts or rejects one complete query-to-target mapping.
pub trait MappingFilter {
    fn accept(&self, mapping: &[usize]) -> bool;
}

impl<F> MappingFilter for F
where
    F: Fn(&[usize]) -> bool,
{
    fn accept(&self, mapping: &[usize]) -> bool {
        self(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_filters() {
        let first_is_zero = |m: &[usize]| m.first() == Some(&0);
        assert!(first_is_zero.accept(&[0, 2]));
        assert!(!first_is_zero.accept(&[1, 2]));
    }
}
