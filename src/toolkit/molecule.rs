use crate::chem;

/// Bond order classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric order for valence bookkeeping.
    pub fn as_f64(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

/// An atom in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphAtom {
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub is_aromatic: bool,
    pub implicit_hydrogens: u8,
}

impl GraphAtom {
    pub fn new(atomic_number: u8) -> Self {
        Self {
            atomic_number,
            formal_charge: 0,
            is_aromatic: false,
            implicit_hydrogens: 0,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == 1
    }
}

/// A bond between two atoms, by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphBond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

/// A molecular graph with an adjacency list.
///
/// Atom indices are stable for the lifetime of one instance; the hydrogen
/// derivation methods return new molecules that keep every heavy atom at
/// its original relative position.
#[derive(Debug, Clone)]
pub struct GraphMolecule {
    pub atoms: Vec<GraphAtom>,
    pub bonds: Vec<GraphBond>,
    /// adjacency[atom] = (neighbor atom index, bond index) pairs.
    pub adjacency: Vec<Vec<(usize, usize)>>,
}

impl GraphMolecule {
    pub fn new(atoms: Vec<GraphAtom>, bonds: Vec<GraphBond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bi, bond) in bonds.iter().enumerate() {
            adjacency[bond.atom1].push((bond.atom2, bi));
            adjacency[bond.atom2].push((bond.atom1, bi));
        }
        Self {
            atoms,
            bonds,
            adjacency,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// The bond between two atoms, if they are bonded.
    pub fn bond(&self, a: usize, b: usize) -> Option<&GraphBond> {
        self.adjacency[a]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, bi)| &self.bonds[bi])
    }

    /// Copy with every implicit hydrogen materialized as a graph atom.
    ///
    /// New hydrogens are appended after the existing atoms, attached by
    /// single bonds in owner-atom order, so indices of existing atoms are
    /// unchanged.
    pub fn with_explicit_hydrogens(&self) -> GraphMolecule {
        let mut atoms = self.atoms.clone();
        let mut bonds = self.bonds.clone();

        for owner in 0..self.atoms.len() {
            let count = atoms[owner].implicit_hydrogens;
            atoms[owner].implicit_hydrogens = 0;
            for _ in 0..count {
                let h_idx = atoms.len();
                atoms.push(GraphAtom::new(1));
                bonds.push(GraphBond {
                    atom1: owner,
                    atom2: h_idx,
                    order: BondOrder::Single,
                });
            }
        }

        GraphMolecule::new(atoms, bonds)
    }

    /// Copy with terminal explicit hydrogens folded back into implicit
    /// counts on their heavy neighbor.
    ///
    /// Charged hydrogens and hydrogens not bonded to exactly one heavy
    /// atom (isolated H, H-H) are kept as-is. Remaining atoms keep their
    /// relative order.
    pub fn without_explicit_hydrogens(&self) -> GraphMolecule {
        let strippable: Vec<bool> = (0..self.atoms.len())
            .map(|i| {
                let atom = &self.atoms[i];
                atom.is_hydrogen()
                    && atom.formal_charge == 0
                    && self.degree(i) == 1
                    && !self.atoms[self.adjacency[i][0].0].is_hydrogen()
            })
            .collect();

        if !strippable.iter().any(|&s| s) {
            return self.clone();
        }

        let mut remap = vec![usize::MAX; self.atoms.len()];
        let mut atoms = Vec::new();
        for (i, atom) in self.atoms.iter().enumerate() {
            if !strippable[i] {
                remap[i] = atoms.len();
                atoms.push(atom.clone());
            }
        }

        for (i, stripped) in strippable.iter().enumerate() {
            if *stripped {
                let owner = self.adjacency[i][0].0;
                atoms[remap[owner]].implicit_hydrogens += 1;
            }
        }

        let bonds = self
            .bonds
            .iter()
            .filter(|b| !strippable[b.atom1] && !strippable[b.atom2])
            .map(|b| GraphBond {
                atom1: remap[b.atom1],
                atom2: remap[b.atom2],
                order: b.order,
            })
            .collect();

        GraphMolecule::new(atoms, bonds)
    }
}

impl chem::Molecule for GraphMolecule {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn is_hydrogen(&self, atom: usize) -> bool {
        self.atoms[atom].is_hydrogen()
    }

    fn bond_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, bi)| bi)
    }
}
