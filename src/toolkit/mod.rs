//! Built-in chemistry engine.
//!
//! A self-contained implementation of the [`crate::chem`] traits on a
//! plain molecular graph: a SMILES-subset parser, smallest-set-of-smallest
//! rings perception, and VF2 substructure search. Pattern notation is
//! limited to what SMILES itself can express; query-only constructs
//! (wildcards, logical operators, ring-membership primitives) are not
//! understood and fail to compile, which the catalog loader reports per
//! entry. Deployments needing full pattern semantics or structure-file
//! input should implement the traits over an external engine instead.

mod molecule;
mod rings;
mod smiles;
mod substructure;

pub use molecule::{BondOrder, GraphAtom, GraphBond, GraphMolecule};
pub use rings::perceive_rings;
pub use smiles::parse_smiles;
pub use substructure::{all_substructure_matches, first_substructure_match, has_substructure};

use crate::chem::{ChemError, ChemistryEngine, InputFormat, Matcher, PatternCompiler};
use crate::model::RingInfo;

/// The built-in engine. Stateless; one value serves any number of
/// requests.
pub struct Toolkit;

impl ChemistryEngine for Toolkit {
    type Mol = GraphMolecule;

    fn parse_molecule(&self, input: &str, format: InputFormat) -> Result<GraphMolecule, ChemError> {
        match format {
            InputFormat::MolFile => Err(ChemError::Parse(
                "structure file input requires an external chemistry engine".into(),
            )),
            InputFormat::Smiles | InputFormat::Smarts => parse_smiles(input),
        }
    }

    fn add_explicit_hydrogens(&self, mol: &GraphMolecule) -> Result<GraphMolecule, ChemError> {
        Ok(mol.with_explicit_hydrogens())
    }

    fn remove_explicit_hydrogens(&self, mol: &GraphMolecule) -> Result<GraphMolecule, ChemError> {
        Ok(mol.without_explicit_hydrogens())
    }

    fn ring_info(&self, mol: &GraphMolecule) -> Result<RingInfo, ChemError> {
        Ok(perceive_rings(mol))
    }
}

impl PatternCompiler for Toolkit {
    type Pattern = GraphMolecule;

    fn compile_pattern(&self, text: &str) -> Result<GraphMolecule, ChemError> {
        parse_smiles(text).map_err(|e| ChemError::PatternCompile(e.to_string()))
    }
}

impl Matcher for Toolkit {
    fn has_match(&self, mol: &GraphMolecule, pattern: &GraphMolecule) -> Result<bool, ChemError> {
        Ok(has_substructure(mol, pattern))
    }

    fn first_match(
        &self,
        mol: &GraphMolecule,
        pattern: &GraphMolecule,
    ) -> Result<Option<Vec<usize>>, ChemError> {
        Ok(first_substructure_match(mol, pattern))
    }

    fn all_matches(
        &self,
        mol: &GraphMolecule,
        pattern: &GraphMolecule,
    ) -> Result<Vec<Vec<usize>>, ChemError> {
        Ok(all_substructure_matches(mol, pattern))
    }
}
