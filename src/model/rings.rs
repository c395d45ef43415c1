use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Ring membership for one molecule, as reported by the chemistry engine's
/// ring perception.
///
/// Atom indices stored here are only meaningful for the molecule the info
/// was computed on; ring data never transfers between structural variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingInfo {
    rings: Vec<Vec<usize>>,
}

impl RingInfo {
    pub fn new(rings: Vec<Vec<usize>>) -> Self {
        Self { rings }
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// All rings, each a list of member atom indices.
    pub fn rings(&self) -> &[Vec<usize>] {
        &self.rings
    }

    /// True when `atom` lies in at least one ring whose size falls in
    /// `sizes`.
    pub fn atom_in_ring_sized(&self, atom: usize, sizes: RangeInclusive<usize>) -> bool {
        self.rings
            .iter()
            .any(|ring| sizes.contains(&ring.len()) && ring.contains(&atom))
    }

    /// Indices of rings containing at least one of `atoms`. Two atom sets
    /// share a ring system iff their touched-ring sets intersect.
    pub fn rings_touching(&self, atoms: &[usize]) -> BTreeSet<usize> {
        self.rings
            .iter()
            .enumerate()
            .filter(|(_, ring)| atoms.iter().any(|a| ring.contains(a)))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fused_naphthalene_like() -> RingInfo {
        // Two fused six-rings sharing atoms 3 and 8.
        RingInfo::new(vec![vec![0, 1, 2, 3, 8, 9], vec![3, 4, 5, 6, 7, 8]])
    }

    #[test]
    fn atom_in_ring_respects_size_range() {
        let info = RingInfo::new(vec![vec![0, 1, 2], vec![3, 4, 5, 6, 7, 8, 9, 10, 11]]);
        assert!(info.atom_in_ring_sized(0, 3..=8));
        // Atom 3 is only in the nine-ring, outside the 3..=8 window.
        assert!(!info.atom_in_ring_sized(3, 3..=8));
        assert!(info.atom_in_ring_sized(3, 3..=9));
    }

    #[test]
    fn rings_touching_reports_all_touched_rings() {
        let info = fused_naphthalene_like();
        assert_eq!(info.rings_touching(&[0]), BTreeSet::from([0]));
        assert_eq!(info.rings_touching(&[5]), BTreeSet::from([1]));
        // Fusion atoms touch both rings.
        assert_eq!(info.rings_touching(&[3]), BTreeSet::from([0, 1]));
        assert!(info.rings_touching(&[42]).is_empty());
    }

    #[test]
    fn shared_ring_system_via_intersection() {
        let info = fused_naphthalene_like();
        let left = info.rings_touching(&[0, 1]);
        let right = info.rings_touching(&[4, 5]);
        assert!(left.is_disjoint(&right));

        let spanning = info.rings_touching(&[3]);
        assert!(!left.is_disjoint(&spanning));
        assert!(!right.is_disjoint(&spanning));
    }
}
