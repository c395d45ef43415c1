use std::collections::BTreeMap;

use crate::chem::ChemError;

use super::molecule::{BondOrder, GraphAtom, GraphBond, GraphMolecule};

/// Parse a SMILES string.
///
/// Covers the organic subset, branches, ring closures (including `%nn`),
/// bracket atoms with hydrogen counts and charges, and disconnected
/// fragments. Isotope and stereo annotations are accepted and discarded.
pub fn parse_smiles(smiles: &str) -> Result<GraphMolecule, ChemError> {
    let mut parser = SmilesParser::new(smiles);
    parser.run()?;
    parser.finish()?;
    parser.assign_implicit_hydrogens();
    Ok(GraphMolecule::new(parser.atoms, parser.bonds))
}

fn element_number(symbol: &str) -> Option<u8> {
    Some(match symbol {
        "H" => 1,
        "B" => 5,
        "C" => 6,
        "N" => 7,
        "O" => 8,
        "F" => 9,
        "Si" => 14,
        "P" => 15,
        "S" => 16,
        "Cl" => 17,
        "Se" => 34,
        "Br" => 35,
        "I" => 53,
        _ => return None,
    })
}

/// Normal valence used to fill implicit hydrogens on organic-subset atoms.
fn default_valence(atomic_number: u8) -> Option<usize> {
    Some(match atomic_number {
        5 => 3,
        6 => 4,
        7 => 3,
        8 => 2,
        9 | 17 | 35 | 53 => 1,
        15 => 3,
        16 => 2,
        _ => return None,
    })
}

struct SmilesParser<'a> {
    input: &'a [u8],
    pos: usize,
    atoms: Vec<GraphAtom>,
    bonds: Vec<GraphBond>,
    /// True for atoms written in brackets; their hydrogen count is taken
    /// verbatim instead of being filled from valence.
    bracket: Vec<bool>,
    /// Open ring bonds: number -> (atom index, bond order written at open).
    open_rings: BTreeMap<u16, (usize, Option<BondOrder>)>,
    branch_stack: Vec<usize>,
    prev_atom: Option<usize>,
    pending_bond: Option<BondOrder>,
}

impl<'a> SmilesParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            bracket: Vec::new(),
            open_rings: BTreeMap::new(),
            branch_stack: Vec::new(),
            prev_atom: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn fail(&self, message: impl Into<String>) -> ChemError {
        ChemError::Parse(format!("{} (at position {})", message.into(), self.pos))
    }

    fn run(&mut self) -> Result<(), ChemError> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    self.advance();
                    let Some(prev) = self.prev_atom else {
                        return Err(self.fail("branch opened before any atom"));
                    };
                    self.branch_stack.push(prev);
                }
                b')' => {
                    self.advance();
                    let Some(back) = self.branch_stack.pop() else {
                        return Err(self.fail("unmatched ')'"));
                    };
                    self.prev_atom = Some(back);
                    self.pending_bond = None;
                }
                b'-' => {
                    self.advance();
                    self.pending_bond = Some(BondOrder::Single);
                }
                b'=' => {
                    self.advance();
                    self.pending_bond = Some(BondOrder::Double);
                }
                b'#' => {
                    self.advance();
                    self.pending_bond = Some(BondOrder::Triple);
                }
                b':' => {
                    self.advance();
                    self.pending_bond = Some(BondOrder::Aromatic);
                }
                // Stereo bond markers carry no graph information here.
                b'/' | b'\\' => {
                    self.advance();
                }
                b'%' => {
                    self.advance();
                    let number = self.two_digit_ring_number()?;
                    self.ring_bond(number)?;
                }
                b'[' => self.bracket_atom()?,
                b'0'..=b'9' => {
                    self.advance();
                    self.ring_bond((ch - b'0') as u16)?;
                }
                b'.' => {
                    self.advance();
                    self.prev_atom = None;
                    self.pending_bond = None;
                }
                _ if organic_atom_start(ch) => self.organic_atom()?,
                _ => {
                    return Err(self.fail(format!("unexpected character '{}'", ch as char)));
                }
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<(), ChemError> {
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Err(self.fail("expected atom")),
        };
        let is_aromatic = ch.is_ascii_lowercase();
        let upper = ch.to_ascii_uppercase();

        // Two-letter organic-subset symbols are never aromatic.
        let symbol = match (upper, self.peek()) {
            (b'B', Some(b'r')) if !is_aromatic => {
                self.advance();
                "Br"
            }
            (b'C', Some(b'l')) if !is_aromatic => {
                self.advance();
                "Cl"
            }
            _ => match upper {
                b'B' => "B",
                b'C' => "C",
                b'N' => "N",
                b'O' => "O",
                b'P' => "P",
                b'S' => "S",
                b'F' => "F",
                b'I' => "I",
                _ => return Err(self.fail(format!("unknown atom '{}'", upper as char))),
            },
        };

        let atomic_number = match element_number(symbol) {
            Some(n) => n,
            None => return Err(self.fail(format!("unknown element '{symbol}'"))),
        };

        let mut atom = GraphAtom::new(atomic_number);
        atom.is_aromatic = is_aromatic;
        self.push_atom(atom, false);
        Ok(())
    }

    fn bracket_atom(&mut self) -> Result<(), ChemError> {
        self.advance(); // '['

        // Isotope prefix, accepted and dropped.
        let _ = self.number();

        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Err(self.fail("unterminated bracket atom")),
        };
        let is_aromatic = ch.is_ascii_lowercase();
        let upper = (ch.to_ascii_uppercase() as char).to_string();

        let symbol = match self.peek() {
            Some(next) if next.is_ascii_lowercase() => {
                let two = format!("{}{}", upper, next as char);
                if element_number(&two).is_some() {
                    self.advance();
                    two
                } else {
                    upper
                }
            }
            _ => upper,
        };

        let atomic_number = match element_number(&symbol) {
            Some(n) => n,
            None => return Err(self.fail(format!("unknown element '{symbol}'"))),
        };

        // Chirality markers, accepted and dropped.
        while self.peek() == Some(b'@') {
            self.advance();
        }

        let mut hydrogens = 0u8;
        // A lone bracket hydrogen ([H], [2H]) takes no H count of its own.
        if atomic_number != 1 && self.peek() == Some(b'H') {
            self.advance();
            hydrogens = match self.peek() {
                Some(d) if d.is_ascii_digit() => {
                    self.advance();
                    d - b'0'
                }
                _ => 1,
            };
        }

        let charge = self.charge()?;

        if self.advance() != Some(b']') {
            return Err(self.fail("expected ']'"));
        }

        let mut atom = GraphAtom::new(atomic_number);
        atom.is_aromatic = is_aromatic;
        atom.formal_charge = charge;
        atom.implicit_hydrogens = hydrogens;
        self.push_atom(atom, true);
        Ok(())
    }

    fn charge(&mut self) -> Result<i8, ChemError> {
        let sign: i8 = match self.peek() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Ok(0),
        };
        self.advance();

        match self.peek() {
            Some(d) if d.is_ascii_digit() => {
                self.advance();
                Ok(sign * (d - b'0') as i8)
            }
            _ => {
                // Repeated signs ([O--], [Fe+++]).
                let mut magnitude = 1i8;
                let repeat = if sign > 0 { b'+' } else { b'-' };
                while self.peek() == Some(repeat) {
                    self.advance();
                    magnitude += 1;
                }
                Ok(sign * magnitude)
            }
        }
    }

    fn number(&mut self) -> Option<u32> {
        let mut value = 0u32;
        let mut found = false;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.advance();
            value = value * 10 + (ch - b'0') as u32;
            found = true;
        }
        found.then_some(value)
    }

    fn two_digit_ring_number(&mut self) -> Result<u16, ChemError> {
        let (d1, d2) = match (self.advance(), self.advance()) {
            (Some(d1), Some(d2)) if d1.is_ascii_digit() && d2.is_ascii_digit() => (d1, d2),
            _ => return Err(self.fail("expected two digits after '%'")),
        };
        Ok((d1 - b'0') as u16 * 10 + (d2 - b'0') as u16)
    }

    fn ring_bond(&mut self, number: u16) -> Result<(), ChemError> {
        let Some(current) = self.prev_atom else {
            return Err(self.fail("ring bond before any atom"));
        };

        if let Some((partner, opening_order)) = self.open_rings.remove(&number) {
            let order = self.pending_bond.or(opening_order);
            self.connect(partner, current, order);
            self.pending_bond = None;
        } else {
            self.open_rings
                .insert(number, (current, self.pending_bond.take()));
        }
        Ok(())
    }

    fn push_atom(&mut self, atom: GraphAtom, from_bracket: bool) {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        self.bracket.push(from_bracket);
        if let Some(prev) = self.prev_atom {
            let order = self.pending_bond.take();
            self.connect(prev, idx, order);
        }
        self.pending_bond = None;
        self.prev_atom = Some(idx);
    }

    fn connect(&mut self, a: usize, b: usize, written_order: Option<BondOrder>) {
        let both_aromatic = self.atoms[a].is_aromatic && self.atoms[b].is_aromatic;
        let order = written_order.unwrap_or(if both_aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        });
        self.bonds.push(GraphBond {
            atom1: a,
            atom2: b,
            order,
        });
    }

    fn finish(&self) -> Result<(), ChemError> {
        if !self.open_rings.is_empty() {
            let open: Vec<u16> = self.open_rings.keys().copied().collect();
            return Err(ChemError::Parse(format!(
                "unmatched ring bond number(s): {open:?}"
            )));
        }
        if !self.branch_stack.is_empty() {
            return Err(ChemError::Parse(format!(
                "{} unmatched '('",
                self.branch_stack.len()
            )));
        }
        Ok(())
    }

    /// Fill hydrogen counts on organic-subset atoms from normal valence.
    /// Bracket atoms state their count explicitly and are left alone.
    fn assign_implicit_hydrogens(&mut self) {
        for i in 0..self.atoms.len() {
            if self.bracket[i] {
                continue;
            }
            let Some(valence) = default_valence(self.atoms[i].atomic_number) else {
                continue;
            };

            // One valence electron of an aromatic atom sits in the pi
            // system; its ring bonds then count as one each.
            let (capacity, used) = if self.atoms[i].is_aromatic {
                (valence.saturating_sub(1), self.graph_degree(i))
            } else {
                (valence, self.bond_order_sum(i))
            };
            if capacity > used {
                self.atoms[i].implicit_hydrogens = (capacity - used) as u8;
            }
        }
    }

    fn graph_degree(&self, atom: usize) -> usize {
        self.bonds
            .iter()
            .filter(|b| b.atom1 == atom || b.atom2 == atom)
            .count()
    }

    fn bond_order_sum(&self, atom: usize) -> usize {
        self.bonds
            .iter()
            .filter(|b| b.atom1 == atom || b.atom2 == atom)
            .map(|b| b.order.as_f64())
            .sum::<f64>()
            .round() as usize
    }
}

fn organic_atom_start(ch: u8) -> bool {
    matches!(
        ch,
        b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I' | b'b' | b'c' | b'n' | b'o' | b'p'
            | b's'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ethanol() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 3);
        assert_eq!(mol.atoms[1].implicit_hydrogens, 2);
        assert_eq!(mol.atoms[2].implicit_hydrogens, 1);
    }

    #[test]
    fn benzene_is_aromatic_with_one_hydrogen_each() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        for atom in &mol.atoms {
            assert!(atom.is_aromatic);
            assert_eq!(atom.implicit_hydrogens, 1);
        }
        for bond in &mol.bonds {
            assert_eq!(bond.order, BondOrder::Aromatic);
        }
    }

    #[test]
    fn branches_and_bond_orders() {
        let mol = parse_smiles("CC(=O)O").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond(1, 2).unwrap().order, BondOrder::Double);
        assert_eq!(mol.bond(1, 3).unwrap().order, BondOrder::Single);
        assert_eq!(mol.degree(1), 3);
    }

    #[test]
    fn triple_bond_and_two_letter_elements() {
        let mol = parse_smiles("N#CBr").unwrap();
        assert_eq!(mol.bond(0, 1).unwrap().order, BondOrder::Triple);
        assert_eq!(mol.atoms[2].atomic_number, 35);
    }

    #[test]
    fn bracket_atoms_keep_their_stated_hydrogens() {
        let mol = parse_smiles("[NH4+]").unwrap();
        assert_eq!(mol.atoms[0].atomic_number, 7);
        assert_eq!(mol.atoms[0].formal_charge, 1);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 4);

        let mol = parse_smiles("O[H]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert!(mol.atoms[1].is_hydrogen());
        assert_eq!(mol.atoms[1].implicit_hydrogens, 0);
    }

    #[test]
    fn two_digit_ring_numbers() {
        let mol = parse_smiles("C%10CCCCCCCCC%10").unwrap();
        assert_eq!(mol.atom_count(), 10);
        assert_eq!(mol.bond_count(), 10);
    }

    #[test]
    fn fragments_are_disconnected() {
        let mol = parse_smiles("C.C").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn malformed_inputs_error() {
        assert!(parse_smiles("C(").is_err());
        assert!(parse_smiles("C1CC").is_err());
        assert!(parse_smiles("[").is_err());
        assert!(parse_smiles("Cx").is_err());
    }
}
