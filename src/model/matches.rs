use std::fmt;
use std::ops::RangeInclusive;

use super::rings::RingInfo;

/// Ring sizes that count towards ring classification. Larger macrocycles
/// are treated as acyclic for overlap resolution.
pub const CLASSIFIED_RING_SIZES: RangeInclusive<usize> = 3..=8;

/// Structural form of the target molecule a match was found on.
///
/// `ALL` lists the variants in the fixed fallback order the collector
/// probes them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Original,
    WithHydrogens,
    WithoutHydrogens,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::Original,
        Variant::WithHydrogens,
        Variant::WithoutHydrogens,
    ];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Original => write!(f, "original"),
            Variant::WithHydrogens => write!(f, "with-hydrogens"),
            Variant::WithoutHydrogens => write!(f, "without-hydrogens"),
        }
    }
}

/// One pattern's match: the group name, one matched atom tuple, and the
/// variant those indices are valid on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub group: String,
    pub atoms: Vec<usize>,
    pub source: Variant,
}

impl MatchRecord {
    pub fn new(group: impl Into<String>, atoms: Vec<usize>, source: Variant) -> Self {
        Self {
            group: group.into(),
            atoms,
            source,
        }
    }
}

/// A match record split into its ring and non-ring atoms.
///
/// `ring_atoms` and `non_ring_atoms` are disjoint and together cover the
/// record's atom tuple.
#[derive(Debug, Clone)]
pub struct RingClassifiedMatch {
    pub record: MatchRecord,
    pub ring_atoms: Vec<usize>,
    pub non_ring_atoms: Vec<usize>,
}

impl RingClassifiedMatch {
    /// Partition a record's atoms by membership in rings of size 3 through 8.
    pub fn classify(record: MatchRecord, rings: &RingInfo) -> Self {
        let mut ring_atoms = Vec::new();
        let mut non_ring_atoms = Vec::new();
        for &atom in &record.atoms {
            if rings.atom_in_ring_sized(atom, CLASSIFIED_RING_SIZES) {
                ring_atoms.push(atom);
            } else {
                non_ring_atoms.push(atom);
            }
        }
        Self {
            record,
            ring_atoms,
            non_ring_atoms,
        }
    }

    /// True when at least one matched atom sits in a classified ring.
    pub fn involves_ring(&self) -> bool {
        !self.ring_atoms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_order_is_the_fallback_order() {
        assert_eq!(
            Variant::ALL,
            [
                Variant::Original,
                Variant::WithHydrogens,
                Variant::WithoutHydrogens
            ]
        );
    }

    #[test]
    fn classify_partitions_atoms() {
        let rings = RingInfo::new(vec![vec![1, 2, 3, 4, 5, 6]]);
        let record = MatchRecord::new("toluene_methyl_ring", vec![0, 1, 2, 3], Variant::Original);
        let classified = RingClassifiedMatch::classify(record, &rings);

        assert_eq!(classified.ring_atoms, vec![1, 2, 3]);
        assert_eq!(classified.non_ring_atoms, vec![0]);
        assert!(classified.involves_ring());

        let mut all: Vec<usize> = classified
            .ring_atoms
            .iter()
            .chain(&classified.non_ring_atoms)
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[test]
    fn oversized_rings_do_not_classify() {
        let rings = RingInfo::new(vec![(0..12).collect()]);
        let record = MatchRecord::new("macrocycle", vec![0, 1], Variant::Original);
        let classified = RingClassifiedMatch::classify(record, &rings);
        assert!(!classified.involves_ring());
        assert_eq!(classified.non_ring_atoms, vec![0, 1]);
    }
}
