use super::molecule::{BondOrder, GraphMolecule};

/// True when `target` contains `pattern` as a subgraph.
pub fn has_substructure(target: &GraphMolecule, pattern: &GraphMolecule) -> bool {
    let mut search = Vf2Search::new(target, pattern);
    search.run(true);
    !search.matches.is_empty()
}

/// The first match found, as target atom indices in pattern-atom order.
///
/// Enumeration order is fixed by atom indices on both sides, so identical
/// inputs always return the same tuple.
pub fn first_substructure_match(
    target: &GraphMolecule,
    pattern: &GraphMolecule,
) -> Option<Vec<usize>> {
    let mut search = Vf2Search::new(target, pattern);
    search.run(true);
    search.matches.into_iter().next()
}

/// Every match, each as target atom indices in pattern-atom order.
pub fn all_substructure_matches(
    target: &GraphMolecule,
    pattern: &GraphMolecule,
) -> Vec<Vec<usize>> {
    let mut search = Vf2Search::new(target, pattern);
    search.run(false);
    search.matches
}

/// VF2-style backtracking state. Pattern atoms are mapped in index order;
/// candidates for each step come from neighbors of already-mapped atoms
/// when possible.
struct Vf2Search<'a> {
    target: &'a GraphMolecule,
    pattern: &'a GraphMolecule,
    pattern_to_target: Vec<Option<usize>>,
    target_to_pattern: Vec<Option<usize>>,
    matches: Vec<Vec<usize>>,
}

impl<'a> Vf2Search<'a> {
    fn new(target: &'a GraphMolecule, pattern: &'a GraphMolecule) -> Self {
        Self {
            target,
            pattern,
            pattern_to_target: vec![None; pattern.atom_count()],
            target_to_pattern: vec![None; target.atom_count()],
            matches: Vec::new(),
        }
    }

    fn run(&mut self, first_only: bool) {
        if self.pattern.atom_count() == 0
            || self.pattern.atom_count() > self.target.atom_count()
            || self.pattern.bond_count() > self.target.bond_count()
            || !self.element_counts_fit()
        {
            return;
        }
        self.extend(0, first_only);
    }

    /// Cheap rejection: the target must carry at least as many atoms of
    /// every element as the pattern.
    fn element_counts_fit(&self) -> bool {
        let mut pattern_counts = [0u16; 256];
        let mut target_counts = [0u16; 256];
        for atom in &self.pattern.atoms {
            pattern_counts[atom.atomic_number as usize] += 1;
        }
        for atom in &self.target.atoms {
            target_counts[atom.atomic_number as usize] += 1;
        }
        pattern_counts
            .iter()
            .zip(&target_counts)
            .all(|(p, t)| p <= t)
    }

    fn extend(&mut self, depth: usize, first_only: bool) {
        if first_only && !self.matches.is_empty() {
            return;
        }
        if depth == self.pattern.atom_count() {
            let tuple: Vec<usize> = self
                .pattern_to_target
                .iter()
                .map(|t| t.unwrap_or_default())
                .collect();
            self.matches.push(tuple);
            return;
        }

        for target_atom in self.candidates(depth) {
            if self.target_to_pattern[target_atom].is_some()
                || !self.feasible(depth, target_atom)
            {
                continue;
            }

            self.pattern_to_target[depth] = Some(target_atom);
            self.target_to_pattern[target_atom] = Some(depth);

            self.extend(depth + 1, first_only);

            self.pattern_to_target[depth] = None;
            self.target_to_pattern[target_atom] = None;

            if first_only && !self.matches.is_empty() {
                return;
            }
        }
    }

    /// Candidate target atoms for a pattern atom: the intersection of the
    /// neighborhoods of its already-mapped pattern neighbors, or every
    /// unmapped target atom when none are mapped yet.
    fn candidates(&self, pattern_atom: usize) -> Vec<usize> {
        let mut restricted: Option<Vec<usize>> = None;

        for &(p_neighbor, _) in &self.pattern.adjacency[pattern_atom] {
            let Some(mapped) = self.pattern_to_target[p_neighbor] else {
                continue;
            };
            let neighborhood: Vec<usize> = self.target.adjacency[mapped]
                .iter()
                .map(|&(n, _)| n)
                .filter(|&n| self.target_to_pattern[n].is_none())
                .collect();

            restricted = Some(match restricted {
                None => neighborhood,
                Some(existing) => existing
                    .into_iter()
                    .filter(|n| neighborhood.contains(n))
                    .collect(),
            });
        }

        restricted.unwrap_or_else(|| {
            (0..self.target.atom_count())
                .filter(|&i| self.target_to_pattern[i].is_none())
                .collect()
        })
    }

    fn feasible(&self, pattern_atom: usize, target_atom: usize) -> bool {
        if self.pattern.atoms[pattern_atom].atomic_number
            != self.target.atoms[target_atom].atomic_number
        {
            return false;
        }

        // Every bond to an already-mapped pattern neighbor must exist in
        // the target with a compatible order.
        for &(p_neighbor, p_bond) in &self.pattern.adjacency[pattern_atom] {
            let Some(mapped) = self.pattern_to_target[p_neighbor] else {
                continue;
            };
            match self.target.bond(target_atom, mapped) {
                None => return false,
                Some(t_bond) => {
                    if !bond_compatible(self.pattern.bonds[p_bond].order, t_bond.order) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

/// Orders must match exactly; aromatic only matches aromatic, so an
/// aromatic ring pattern never hits its saturated counterpart.
fn bond_compatible(pattern: BondOrder, target: BondOrder) -> bool {
    pattern == target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::smiles::parse_smiles;

    #[test]
    fn benzene_in_phenol() {
        let phenol = parse_smiles("Oc1ccccc1").unwrap();
        let benzene = parse_smiles("c1ccccc1").unwrap();
        assert!(has_substructure(&phenol, &benzene));

        let tuple = first_substructure_match(&phenol, &benzene).unwrap();
        assert_eq!(tuple.len(), 6);
        assert!(!tuple.contains(&0));
    }

    #[test]
    fn aromatic_pattern_misses_saturated_ring() {
        let cyclohexane = parse_smiles("C1CCCCC1").unwrap();
        let benzene = parse_smiles("c1ccccc1").unwrap();
        assert!(!has_substructure(&cyclohexane, &benzene));
        assert!(first_substructure_match(&cyclohexane, &benzene).is_none());
    }

    #[test]
    fn tuple_follows_pattern_atom_order() {
        let ethanol = parse_smiles("CCO").unwrap();
        let pattern = parse_smiles("OC").unwrap();
        let tuple = first_substructure_match(&ethanol, &pattern).unwrap();
        // Pattern atom 0 is the oxygen, atom 1 the carbon.
        assert_eq!(tuple, vec![2, 1]);
    }

    #[test]
    fn all_matches_enumerates_every_site() {
        let glycol = parse_smiles("OCCO").unwrap();
        let pattern = parse_smiles("CO").unwrap();
        let tuples = all_substructure_matches(&glycol, &pattern);
        assert_eq!(tuples.len(), 2);
        assert!(tuples.contains(&vec![1, 0]));
        assert!(tuples.contains(&vec![2, 3]));
    }

    #[test]
    fn first_match_is_stable() {
        let naphthalene = parse_smiles("c1ccc2ccccc2c1").unwrap();
        let benzene = parse_smiles("c1ccccc1").unwrap();
        let a = first_substructure_match(&naphthalene, &benzene).unwrap();
        let b = first_substructure_match(&naphthalene, &benzene).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_pattern_never_matches() {
        let methane = parse_smiles("C").unwrap();
        let ethane = parse_smiles("CC").unwrap();
        assert!(!has_substructure(&methane, &ethane));
    }
}
