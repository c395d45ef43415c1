use log::debug;

use super::catalog::Catalog;
use super::variants::VariantSet;
use crate::chem::Matcher;
use crate::model::MatchRecord;

/// Probe every catalog pattern against the variant set.
///
/// Patterns are tried in catalog (name) order. For each pattern the
/// variants are probed in fallback order and the first variant reporting a
/// hit settles the pattern; later variants are not consulted. A `has_match`
/// error on one variant is logged and treated as "no match there", so a
/// single misbehaving form never silences a pattern that matches another
/// form. If the settling variant then yields no atom tuple, the pattern is
/// simply absent from the results.
pub fn collect_matches<T>(
    matcher: &T,
    catalog: &Catalog<T::Pattern>,
    variants: &VariantSet<T::Mol>,
) -> Vec<MatchRecord>
where
    T: Matcher,
{
    let mut records = Vec::new();

    for (name, pattern) in catalog.iter() {
        for (variant, mol) in variants.iter() {
            let hit = match matcher.has_match(mol, pattern) {
                Ok(hit) => hit,
                Err(e) => {
                    debug!("match probe for '{}' failed on {} variant: {}", name, variant, e);
                    false
                }
            };
            if !hit {
                continue;
            }

            match matcher.first_match(mol, pattern) {
                Ok(Some(atoms)) if !atoms.is_empty() => {
                    records.push(MatchRecord::new(name, atoms, variant));
                }
                Ok(_) => {
                    debug!(
                        "'{}' reported a hit on {} variant but produced no atoms",
                        name, variant
                    );
                }
                Err(e) => {
                    debug!(
                        "atom extraction for '{}' failed on {} variant: {}",
                        name, variant, e
                    );
                }
            }
            break;
        }
    }

    records
}
