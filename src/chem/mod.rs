//! Interfaces to the external chemistry collaborators.
//!
//! The matching pipeline never parses chemistry itself: molecule parsing,
//! hydrogen addition/removal, ring perception, pattern compilation,
//! substructure search, and rendering all live behind the traits defined
//! here. The crate ships a small reference implementation in
//! [`crate::toolkit`]; production deployments are expected to adapt a full
//! cheminformatics engine instead.

use thiserror::Error;

use crate::model::{HighlightPlan, RingInfo};

/// Errors reported by chemistry collaborators.
///
/// Only [`ChemError::Parse`] on the primary input molecule is fatal to an
/// analysis request. Every other variant is recovered by the pipeline:
/// the offending catalog entry, molecule variant, match probe, or render
/// call is skipped and the failure logged.
#[derive(Debug, Error)]
pub enum ChemError {
    /// Input text could not become a molecule.
    #[error("failed to parse molecule: {0}")]
    Parse(String),

    /// Pattern text could not be compiled into a matchable object.
    #[error("failed to compile pattern: {0}")]
    PatternCompile(String),

    /// Hydrogen addition or removal failed for one variant.
    #[error("failed to derive molecule variant: {0}")]
    VariantDerivation(String),

    /// A substructure probe failed for one pattern on one variant.
    #[error("substructure match failed: {0}")]
    Match(String),

    /// Ring perception failed; overlap resolution degrades to a no-op.
    #[error("ring perception failed: {0}")]
    RingInfo(String),

    /// Rendering failed; the response omits the image.
    #[error("rendering failed: {0}")]
    Render(String),
}

/// Input notations accepted by [`ChemistryEngine::parse_molecule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Path to a MOL/SDF structure file.
    MolFile,
    /// SMILES line notation.
    Smiles,
    /// Substructure pattern notation.
    Smarts,
}

impl InputFormat {
    /// Guess the notation of a raw input string.
    ///
    /// Structure-file suffixes win, then characters that only occur in
    /// pattern notation; everything else is assumed to be SMILES.
    pub fn detect(input: &str) -> Self {
        if input.ends_with(".mol") || input.ends_with(".sdf") {
            InputFormat::MolFile
        } else if input.contains('[')
            || input.contains('#')
            || input.chars().any(|c| matches!(c, '!' | '@' | '$' | '%'))
        {
            InputFormat::Smarts
        } else {
            InputFormat::Smiles
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::MolFile => write!(f, "MOL file"),
            InputFormat::Smiles => write!(f, "SMILES"),
            InputFormat::Smarts => write!(f, "SMARTS"),
        }
    }
}

/// Read access the pipeline needs from an engine's molecule handle.
pub trait Molecule {
    fn atom_count(&self) -> usize;

    /// True when the atom at `atom` is a hydrogen.
    fn is_hydrogen(&self, atom: usize) -> bool;

    /// Index of the bond between two atoms, if they are bonded.
    fn bond_between(&self, a: usize, b: usize) -> Option<usize>;
}

/// Molecule parsing, variant derivation, and ring perception.
pub trait ChemistryEngine {
    type Mol: Molecule;

    fn parse_molecule(&self, input: &str, format: InputFormat) -> Result<Self::Mol, ChemError>;

    /// Derive a copy of `mol` with implicit hydrogens materialized.
    ///
    /// Implementations must not reorder heavy atoms relative to `mol`;
    /// the atom index mapper relies on it.
    fn add_explicit_hydrogens(&self, mol: &Self::Mol) -> Result<Self::Mol, ChemError>;

    /// Derive a copy of `mol` with explicit hydrogens folded back into
    /// implicit counts. The same heavy-atom ordering guarantee applies.
    fn remove_explicit_hydrogens(&self, mol: &Self::Mol) -> Result<Self::Mol, ChemError>;

    /// Perceive rings on `mol`. Must be re-run per variant; ring data from
    /// one variant is meaningless on another.
    fn ring_info(&self, mol: &Self::Mol) -> Result<RingInfo, ChemError>;
}

/// Pattern text compilation.
pub trait PatternCompiler {
    type Pattern;

    fn compile_pattern(&self, text: &str) -> Result<Self::Pattern, ChemError>;
}

/// The substructure search primitive over an engine's molecules and
/// compiled patterns.
pub trait Matcher: ChemistryEngine + PatternCompiler {
    fn has_match(&self, mol: &Self::Mol, pattern: &Self::Pattern) -> Result<bool, ChemError>;

    /// One matched atom tuple, in pattern-atom order. Which tuple is
    /// returned may depend on the engine's enumeration order, but must be
    /// stable for identical inputs.
    fn first_match(
        &self,
        mol: &Self::Mol,
        pattern: &Self::Pattern,
    ) -> Result<Option<Vec<usize>>, ChemError>;

    /// Every matched atom tuple.
    fn all_matches(
        &self,
        mol: &Self::Mol,
        pattern: &Self::Pattern,
    ) -> Result<Vec<Vec<usize>>, ChemError>;
}

/// Rendering of a display molecule plus a highlight plan into image bytes.
pub trait Renderer {
    type Mol: Molecule;

    fn render(
        &self,
        mol: &Self::Mol,
        plan: &HighlightPlan,
        size: (u32, u32),
    ) -> Result<Vec<u8>, ChemError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_structure_files_by_suffix() {
        assert_eq!(InputFormat::detect("aspirin.mol"), InputFormat::MolFile);
        assert_eq!(InputFormat::detect("library.sdf"), InputFormat::MolFile);
    }

    #[test]
    fn detects_pattern_notation_by_characters() {
        assert_eq!(InputFormat::detect("[OX2H]"), InputFormat::Smarts);
        assert_eq!(InputFormat::detect("C#N"), InputFormat::Smarts);
        assert_eq!(InputFormat::detect("c1ccccc1!"), InputFormat::Smarts);
    }

    #[test]
    fn plain_text_defaults_to_smiles() {
        assert_eq!(InputFormat::detect("CCO"), InputFormat::Smiles);
        assert_eq!(InputFormat::detect("c1ccccc1"), InputFormat::Smiles);
    }
}
