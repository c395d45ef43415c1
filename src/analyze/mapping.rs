use std::collections::HashMap;

use crate::chem::Molecule;

/// Map atom indices from a match-source molecule onto the display molecule.
///
/// Relies on the engine's guarantee that hydrogen addition and removal
/// preserve heavy-atom order: walking both molecules in index order and
/// pairing heavy atoms positionally recovers the correspondence. When the
/// two molecules have the same atom count the mapping is the identity, so
/// equal-variant lookups stay cheap.
///
/// Source hydrogens (present when the match came from the hydrogen-added
/// form) get no entry; callers drop them from highlights by mapping each
/// matched index and skipping misses.
pub fn build_atom_mapping<M: Molecule>(source: &M, display: &M) -> HashMap<usize, usize> {
    let mut mapping = HashMap::new();

    if source.atom_count() == display.atom_count() {
        for i in 0..source.atom_count() {
            mapping.insert(i, i);
        }
        return mapping;
    }

    let mut next_display = 0;
    for src in 0..source.atom_count() {
        if source.is_hydrogen(src) {
            continue;
        }
        while next_display < display.atom_count() && display.is_hydrogen(next_display) {
            next_display += 1;
        }
        if next_display >= display.atom_count() {
            break;
        }
        mapping.insert(src, next_display);
        next_display += 1;
    }

    mapping
}
