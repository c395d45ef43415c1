use std::collections::VecDeque;

use crate::model::RingInfo;

use super::molecule::GraphMolecule;

/// Perceive the smallest set of smallest rings.
///
/// For every bond whose endpoints survive terminal pruning, the shortest
/// cycle through that bond is recovered by BFS with the bond itself
/// excluded. Rings are normalized and deduplicated, then trimmed to the
/// ring count given by the cyclomatic number.
pub fn perceive_rings(mol: &GraphMolecule) -> RingInfo {
    if mol.atom_count() == 0 || mol.bond_count() == 0 {
        return RingInfo::default();
    }

    let expected = mol.bond_count() as isize - mol.atom_count() as isize
        + component_count(mol) as isize;
    if expected <= 0 {
        return RingInfo::default();
    }

    let in_ring = ring_atoms(mol);
    let mut rings: Vec<Vec<usize>> = Vec::new();

    for (bi, bond) in mol.bonds.iter().enumerate() {
        if !in_ring[bond.atom1] || !in_ring[bond.atom2] {
            continue;
        }
        if let Some(mut ring) = shortest_path_avoiding(mol, bond.atom1, bond.atom2, bi, &in_ring) {
            normalize_ring(&mut ring);
            if !rings.contains(&ring) {
                rings.push(ring);
            }
        }
    }

    rings.sort_by_key(|r| r.len());
    rings.truncate(expected as usize);
    RingInfo::new(rings)
}

fn component_count(mol: &GraphMolecule) -> usize {
    let n = mol.atom_count();
    let mut visited = vec![false; n];
    let mut components = 0;

    for start in 0..n {
        if visited[start] {
            continue;
        }
        components += 1;
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(curr) = queue.pop_front() {
            for &(neighbor, _) in &mol.adjacency[curr] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    components
}

/// Flag ring atoms by repeatedly pruning degree-one atoms.
fn ring_atoms(mol: &GraphMolecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut degree: Vec<usize> = (0..n).map(|i| mol.adjacency[i].len()).collect();
    let mut pruned = vec![false; n];

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| degree[i] <= 1).collect();
    while let Some(atom) = queue.pop_front() {
        if pruned[atom] {
            continue;
        }
        pruned[atom] = true;
        for &(neighbor, _) in &mol.adjacency[atom] {
            if !pruned[neighbor] {
                degree[neighbor] -= 1;
                if degree[neighbor] <= 1 {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    pruned.iter().map(|&p| !p).collect()
}

/// BFS shortest path between the endpoints of a bond, not using the bond,
/// restricted to ring atoms. The path is the ring through that bond.
fn shortest_path_avoiding(
    mol: &GraphMolecule,
    start: usize,
    end: usize,
    excluded_bond: usize,
    in_ring: &[bool],
) -> Option<Vec<usize>> {
    let n = mol.atom_count();
    let mut parent = vec![usize::MAX; n];
    let mut visited = vec![false; n];
    visited[start] = true;

    let mut queue = VecDeque::from([start]);
    while let Some(curr) = queue.pop_front() {
        if curr == end {
            let mut path = vec![end];
            let mut node = end;
            while node != start {
                node = parent[node];
                path.push(node);
            }
            path.reverse();
            return Some(path);
        }
        for &(neighbor, bond_idx) in &mol.adjacency[curr] {
            if bond_idx == excluded_bond || visited[neighbor] || !in_ring[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            parent[neighbor] = curr;
            queue.push_back(neighbor);
        }
    }

    None
}

/// Rotate a ring so its smallest atom index leads, walking in the
/// direction that gives the lexicographically smaller sequence.
fn normalize_ring(ring: &mut Vec<usize>) {
    let Some(min_pos) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
    else {
        return;
    };
    ring.rotate_left(min_pos);

    let n = ring.len();
    if n > 2 && ring[n - 1] < ring[1] {
        ring[1..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::smiles::parse_smiles;

    #[test]
    fn benzene_has_one_six_ring() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        let info = perceive_rings(&mol);
        assert_eq!(info.ring_count(), 1);
        assert_eq!(info.rings()[0], vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn naphthalene_has_two_fused_six_rings() {
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        let info = perceive_rings(&mol);
        assert_eq!(info.ring_count(), 2);
        assert!(info.rings().iter().all(|r| r.len() == 6));
    }

    #[test]
    fn chains_have_no_rings() {
        let mol = parse_smiles("CCCC").unwrap();
        assert_eq!(perceive_rings(&mol).ring_count(), 0);
    }

    #[test]
    fn substituents_stay_outside_the_ring() {
        let mol = parse_smiles("Cc1ccccc1").unwrap();
        let info = perceive_rings(&mol);
        assert_eq!(info.ring_count(), 1);
        assert!(!info.rings()[0].contains(&0));
    }
}
