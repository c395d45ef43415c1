use log::warn;

use crate::chem::{ChemistryEngine, Molecule};
use crate::model::{RingInfo, Variant};

/// The three structural forms of one target molecule.
///
/// Request-scoped and read-only after construction. A derivation failure
/// leaves that variant absent rather than aborting the request, so
/// matching can still proceed on the forms that exist.
pub struct VariantSet<M> {
    original: M,
    with_hydrogens: Option<M>,
    without_hydrogens: Option<M>,
    ring_info: Option<RingInfo>,
}

impl<M: Molecule> VariantSet<M> {
    /// Derive the hydrogen-added and hydrogen-removed forms of `original`.
    ///
    /// Ring perception is re-run on every successfully derived form, since
    /// ring data computed on one variant does not transfer to another. The
    /// original's ring info is retained for overlap resolution; when that
    /// perception fails, resolution later degrades to a pass-through.
    pub fn build<E>(engine: &E, original: M) -> Self
    where
        E: ChemistryEngine<Mol = M>,
    {
        let ring_info = match engine.ring_info(&original) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("ring perception failed on input molecule: {}", e);
                None
            }
        };

        let with_hydrogens = match engine.add_explicit_hydrogens(&original) {
            Ok(mol) => {
                if let Err(e) = engine.ring_info(&mol) {
                    warn!("ring perception failed after hydrogen addition: {}", e);
                }
                Some(mol)
            }
            Err(e) => {
                warn!("hydrogen addition failed: {}", e);
                None
            }
        };

        let without_hydrogens = match engine.remove_explicit_hydrogens(&original) {
            Ok(mol) => {
                if let Err(e) = engine.ring_info(&mol) {
                    warn!("ring perception failed after hydrogen removal: {}", e);
                }
                Some(mol)
            }
            Err(e) => {
                warn!("hydrogen removal failed: {}", e);
                None
            }
        };

        Self {
            original,
            with_hydrogens,
            without_hydrogens,
            ring_info,
        }
    }

    pub fn original(&self) -> &M {
        &self.original
    }

    pub fn get(&self, variant: Variant) -> Option<&M> {
        match variant {
            Variant::Original => Some(&self.original),
            Variant::WithHydrogens => self.with_hydrogens.as_ref(),
            Variant::WithoutHydrogens => self.without_hydrogens.as_ref(),
        }
    }

    /// Present variants in the fixed fallback order the collector probes:
    /// original, then with hydrogens, then without.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &M)> {
        Variant::ALL
            .iter()
            .filter_map(move |&v| self.get(v).map(|m| (v, m)))
    }

    /// Ring info perceived on the original molecule, if it succeeded.
    pub fn ring_info(&self) -> Option<&RingInfo> {
        self.ring_info.as_ref()
    }

    /// The canonical molecule everything is drawn on: the hydrogen-removed
    /// form, falling back to the original when that derivation failed.
    pub fn display_molecule(&self) -> &M {
        self.without_hydrogens.as_ref().unwrap_or(&self.original)
    }

    /// Which variant [`display_molecule`](Self::display_molecule) refers to.
    pub fn display_variant(&self) -> Variant {
        if self.without_hydrogens.is_some() {
            Variant::WithoutHydrogens
        } else {
            Variant::Original
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::{ChemError, InputFormat};
    use crate::toolkit::{GraphMolecule, Toolkit};

    fn parse(smiles: &str) -> GraphMolecule {
        Toolkit.parse_molecule(smiles, InputFormat::Smiles).unwrap()
    }

    #[test]
    fn builds_all_three_variants() {
        let set = VariantSet::build(&Toolkit, parse("CCO"));
        assert_eq!(set.original().atom_count(), 3);
        // Ethanol gains six explicit hydrogens.
        assert_eq!(set.get(Variant::WithHydrogens).unwrap().atom_count(), 9);
        assert_eq!(set.get(Variant::WithoutHydrogens).unwrap().atom_count(), 3);

        let order: Vec<Variant> = set.iter().map(|(v, _)| v).collect();
        assert_eq!(order, Variant::ALL.to_vec());
    }

    #[test]
    fn ring_info_comes_from_the_original() {
        let set = VariantSet::build(&Toolkit, parse("c1ccccc1"));
        let info = set.ring_info().unwrap();
        assert_eq!(info.ring_count(), 1);
        assert_eq!(info.rings()[0].len(), 6);
    }

    #[test]
    fn display_molecule_prefers_hydrogen_removed_form() {
        let set = VariantSet::build(&Toolkit, parse("C"));
        assert_eq!(set.display_variant(), Variant::WithoutHydrogens);
        assert_eq!(set.display_molecule().atom_count(), 1);
    }

    /// Engine whose hydrogen addition always fails.
    struct NoHydrogenAddition;

    impl ChemistryEngine for NoHydrogenAddition {
        type Mol = GraphMolecule;

        fn parse_molecule(
            &self,
            input: &str,
            format: InputFormat,
        ) -> Result<GraphMolecule, ChemError> {
            Toolkit.parse_molecule(input, format)
        }

        fn add_explicit_hydrogens(&self, _: &GraphMolecule) -> Result<GraphMolecule, ChemError> {
            Err(ChemError::VariantDerivation("hydrogen addition unsupported".into()))
        }

        fn remove_explicit_hydrogens(
            &self,
            mol: &GraphMolecule,
        ) -> Result<GraphMolecule, ChemError> {
            Toolkit.remove_explicit_hydrogens(mol)
        }

        fn ring_info(&self, mol: &GraphMolecule) -> Result<crate::model::RingInfo, ChemError> {
            Toolkit.ring_info(mol)
        }
    }

    #[test]
    fn failed_derivation_leaves_variant_absent() {
        let set = VariantSet::build(&NoHydrogenAddition, parse("CCO"));
        assert!(set.get(Variant::WithHydrogens).is_none());
        assert!(set.get(Variant::WithoutHydrogens).is_some());

        let order: Vec<Variant> = set.iter().map(|(v, _)| v).collect();
        assert_eq!(order, vec![Variant::Original, Variant::WithoutHydrogens]);
    }
}
