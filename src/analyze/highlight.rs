use log::debug;

use super::catalog::Catalog;
use super::mapping::build_atom_mapping;
use super::variants::VariantSet;
use crate::chem::{Matcher, Molecule};
use crate::model::{Color, HighlightPlan};

/// Fixed palette used for the first eight highlighted groups. High-contrast
/// and stable, so repeated runs over the same molecule color the same
/// groups the same way.
const PALETTE: [Color; 8] = [
    Color::new(1.0, 0.0, 0.0),
    Color::new(0.0, 0.8, 0.0),
    Color::new(0.0, 0.4, 1.0),
    Color::new(1.0, 0.6, 0.0),
    Color::new(0.8, 0.0, 0.8),
    Color::new(0.0, 0.8, 0.8),
    Color::new(0.6, 0.4, 0.0),
    Color::new(0.5, 0.0, 0.5),
];

const GOLDEN_RATIO: f64 = 0.618033988749895;

/// Produce `count` visually distinct colors.
///
/// Up to eight groups take the fixed palette in order. Beyond that, hues
/// are generated by golden-ratio stepping from a random start, with
/// saturation and value cycled slightly so neighboring colors stay apart;
/// those extra colors differ between processes but not within one.
pub fn color_sequence(count: usize) -> Vec<Color> {
    if count <= PALETTE.len() {
        return PALETTE[..count].to_vec();
    }

    let mut colors = Vec::with_capacity(count);
    let mut hue: f64 = rand::random();
    for i in 0..count {
        hue = (hue + GOLDEN_RATIO) % 1.0;
        let saturation = 0.7 + (i % 3) as f64 * 0.1;
        let value = 0.8 + (i % 2) as f64 * 0.15;
        colors.push(Color::from_hsv(hue, saturation, value));
    }
    colors
}

/// Build the highlight plan for the named groups on the display molecule.
///
/// Each requested group gets the next color in sequence, keeping a group's
/// color stable regardless of how many sites it matched. Unlike detection,
/// highlighting paints every occurrence: all match tuples for a group are
/// colored, not just the first. Matched indices are translated onto the
/// display molecule through the positional heavy-atom mapping; hydrogens
/// without a display counterpart are silently dropped. Bonds are painted
/// for every bonded pair inside a match, giving the induced subgraph of
/// the matched atoms.
pub fn plan_highlights<T>(
    matcher: &T,
    catalog: &Catalog<T::Pattern>,
    variants: &VariantSet<T::Mol>,
    names: &[String],
) -> HighlightPlan
where
    T: Matcher,
{
    let mut plan = HighlightPlan::default();
    if names.is_empty() {
        return plan;
    }

    let display = variants.display_molecule();
    let colors = color_sequence(names.len());

    for (name, color) in names.iter().zip(colors) {
        let Some(pattern) = catalog.lookup(name) else {
            debug!("cannot highlight unknown or uncompiled group '{}'", name);
            continue;
        };

        let Some((source, tuples)) = resolve_matches(matcher, variants, name, pattern) else {
            continue;
        };

        let mapping = build_atom_mapping(source, display);
        for tuple in tuples {
            let mapped: Vec<usize> = tuple
                .iter()
                .filter_map(|a| mapping.get(a).copied())
                .collect();

            for &atom in &mapped {
                plan.paint_atom(atom, color);
            }
            for (i, &a) in mapped.iter().enumerate() {
                for &b in &mapped[i + 1..] {
                    if let Some(bond) = display.bond_between(a, b) {
                        plan.paint_bond(bond, color);
                    }
                }
            }
        }
    }

    plan
}

/// Find all match tuples for one pattern, probing variants in fallback
/// order. Returns the matched variant's molecule alongside its tuples so
/// the caller can map indices off it.
fn resolve_matches<'v, T>(
    matcher: &T,
    variants: &'v VariantSet<T::Mol>,
    name: &str,
    pattern: &T::Pattern,
) -> Option<(&'v T::Mol, Vec<Vec<usize>>)>
where
    T: Matcher,
{
    for (variant, mol) in variants.iter() {
        match matcher.all_matches(mol, pattern) {
            Ok(tuples) if !tuples.is_empty() => return Some((mol, tuples)),
            Ok(_) => {}
            Err(e) => {
                debug!(
                    "highlight match for '{}' failed on {} variant: {}",
                    name, variant, e
                );
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::{ChemistryEngine, InputFormat};
    use crate::model::GroupDefinition;
    use crate::toolkit::{GraphMolecule, Toolkit};

    fn variants_of(smiles: &str) -> VariantSet<GraphMolecule> {
        let mol = Toolkit.parse_molecule(smiles, InputFormat::Smiles).unwrap();
        VariantSet::build(&Toolkit, mol)
    }

    fn catalog_of(defs: Vec<(&str, &str)>) -> Catalog<GraphMolecule> {
        let definitions = defs
            .into_iter()
            .map(|(name, smarts)| GroupDefinition::new(name, smarts))
            .collect();
        Catalog::load(&Toolkit, definitions).unwrap()
    }

    #[test]
    fn palette_is_deterministic_and_distinct() {
        let eight = color_sequence(8);
        assert_eq!(eight, color_sequence(8));
        for (i, a) in eight.iter().enumerate() {
            for b in &eight[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(color_sequence(2), vec![PALETTE[0], PALETTE[1]]);
    }

    #[test]
    fn oversized_sequences_still_have_the_right_length() {
        assert_eq!(color_sequence(13).len(), 13);
    }

    #[test]
    fn empty_request_gives_empty_plan() {
        let catalog = catalog_of(vec![("hydroxyl", "CO")]);
        let plan = plan_highlights(&Toolkit, &catalog, &variants_of("CCO"), &[]);
        assert!(plan.is_empty());
    }

    #[test]
    fn every_occurrence_is_painted() {
        // Glycol: both hydroxyl sites get the group's single color.
        let catalog = catalog_of(vec![("hydroxyl", "CO")]);
        let plan = plan_highlights(
            &Toolkit,
            &catalog,
            &variants_of("OCCO"),
            &["hydroxyl".to_string()],
        );

        assert_eq!(plan.atoms(), vec![0, 1, 2, 3]);
        let colors: Vec<Color> = plan.atoms().iter().map(|a| plan.atom_colors[a]).collect();
        assert!(colors.iter().all(|c| *c == PALETTE[0]));
    }

    #[test]
    fn bonds_inside_a_match_are_painted() {
        let catalog = catalog_of(vec![("benzene_ring", "c1ccccc1")]);
        let plan = plan_highlights(
            &Toolkit,
            &catalog,
            &variants_of("c1ccccc1"),
            &["benzene_ring".to_string()],
        );

        assert_eq!(plan.atoms().len(), 6);
        // All six ring bonds belong to the induced subgraph.
        assert_eq!(plan.bonds().len(), 6);
    }

    #[test]
    fn unknown_group_is_skipped() {
        let catalog = catalog_of(vec![("hydroxyl", "CO")]);
        let plan = plan_highlights(
            &Toolkit,
            &catalog,
            &variants_of("CCO"),
            &["no_such_group".to_string(), "hydroxyl".to_string()],
        );

        // The unknown name consumed the first color; hydroxyl gets the second.
        assert!(!plan.is_empty());
        assert_eq!(plan.atom_colors[&1], PALETTE[1]);
    }

    #[test]
    fn shared_atoms_keep_the_first_color() {
        let catalog = catalog_of(vec![("carbonyl", "C=O"), ("ester_link", "C(=O)O")]);
        // Methyl acetate: the carbonyl carbon is shared by both groups.
        let plan = plan_highlights(
            &Toolkit,
            &catalog,
            &variants_of("CC(=O)OC"),
            &["carbonyl".to_string(), "ester_link".to_string()],
        );

        assert_eq!(plan.atom_colors[&1], PALETTE[0]);
    }

    #[test]
    fn hydrogen_sourced_matches_map_onto_heavy_atoms() {
        let catalog = catalog_of(vec![("o_h_pair", "O[H]")]);
        let plan = plan_highlights(
            &Toolkit,
            &catalog,
            &variants_of("CCO"),
            &["o_h_pair".to_string()],
        );

        // Only the oxygen survives the mapping onto the display molecule.
        assert_eq!(plan.atoms(), vec![2]);
        assert!(plan.bonds().is_empty());
    }
}
