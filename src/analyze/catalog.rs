use std::collections::BTreeMap;

use log::warn;

use super::error::Error;
use crate::chem::PatternCompiler;
use crate::model::GroupDefinition;

/// A definition whose pattern failed to compile at catalog load.
#[derive(Debug, Clone)]
pub struct CompileFailure {
    pub name: String,
    pub reason: String,
}

struct Entry<P> {
    definition: GroupDefinition,
    pattern: P,
}

/// The compiled functional group set.
///
/// Built once at startup and read-only afterwards, so it can be shared
/// across concurrently handled analysis requests without synchronization.
/// Names iterate in lexicographic (case-sensitive) order, which fixes the
/// collector's processing order and thus every downstream tie-break.
pub struct Catalog<P> {
    entries: BTreeMap<String, Entry<P>>,
    failures: Vec<CompileFailure>,
}

impl<P> Catalog<P> {
    /// Compile every definition's pattern.
    ///
    /// A definition whose pattern fails to compile is logged, recorded as a
    /// [`CompileFailure`], and excluded from the usable set; the load only
    /// fails when not a single entry compiled.
    pub fn load<C>(compiler: &C, definitions: Vec<GroupDefinition>) -> Result<Self, Error>
    where
        C: PatternCompiler<Pattern = P>,
    {
        let mut entries = BTreeMap::new();
        let mut failures = Vec::new();

        for definition in definitions {
            match compiler.compile_pattern(&definition.smarts) {
                Ok(pattern) => {
                    entries.insert(
                        definition.name.clone(),
                        Entry {
                            definition,
                            pattern,
                        },
                    );
                }
                Err(e) => {
                    warn!(
                        "excluding functional group '{}' from catalog: {}",
                        definition.name, e
                    );
                    failures.push(CompileFailure {
                        name: definition.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if entries.is_empty() {
            return Err(Error::EmptyCatalog {
                failed: failures.len(),
            });
        }

        Ok(Self { entries, failures })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compiled pattern for `name`, if the entry exists and compiled.
    pub fn lookup(&self, name: &str) -> Option<&P> {
        self.entries.get(name).map(|e| &e.pattern)
    }

    pub fn definition(&self, name: &str) -> Option<&GroupDefinition> {
        self.entries.get(name).map(|e| &e.definition)
    }

    /// All usable group names, lexicographically ordered.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Usable entries as `(name, pattern)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &P)> {
        self.entries.iter().map(|(name, e)| (name.as_str(), &e.pattern))
    }

    /// Definitions whose patterns failed to compile at load.
    pub fn failures(&self) -> &[CompileFailure] {
        &self.failures
    }

    /// Names of groups listing `category` among their categories or
    /// subcategories (case-insensitive).
    pub fn by_category(&self, category: &str) -> Vec<&str> {
        let category = category.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, e)| {
                e.definition
                    .categories
                    .iter()
                    .chain(&e.definition.subcategories)
                    .any(|c| c.to_lowercase() == category)
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Names of groups with the given reactivity level (case-insensitive).
    pub fn by_reactivity(&self, level: &str) -> Vec<&str> {
        let level = level.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, e)| e.definition.reactivity.to_lowercase() == level)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Case-insensitive substring search over name, description,
    /// categories, subcategories, and common reactions. The first matching
    /// field wins, so every name appears at most once.
    pub fn search(&self, term: &str) -> Vec<&str> {
        let term = term.to_lowercase();
        let mut hits = Vec::new();

        for (name, entry) in &self.entries {
            let def = &entry.definition;

            if name.to_lowercase().contains(&term)
                || def.description.to_lowercase().contains(&term)
            {
                hits.push(name.as_str());
                continue;
            }

            if def.categories.iter().any(|c| c.to_lowercase().contains(&term)) {
                hits.push(name.as_str());
                continue;
            }

            if def
                .subcategories
                .iter()
                .any(|c| c.to_lowercase().contains(&term))
            {
                hits.push(name.as_str());
                continue;
            }

            if def
                .common_reactions
                .iter()
                .any(|r| r.to_lowercase().contains(&term))
            {
                hits.push(name.as_str());
            }
        }

        hits
    }

    /// Every distinct category and subcategory across the usable set,
    /// sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .entries
            .values()
            .flat_map(|e| {
                e.definition
                    .categories
                    .iter()
                    .chain(&e.definition.subcategories)
                    .cloned()
            })
            .collect();
        all.sort();
        all.dedup();
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::Toolkit;

    fn sample_definitions() -> Vec<GroupDefinition> {
        let mut hydroxyl = GroupDefinition::new("hydroxyl", "CO");
        hydroxyl.description = "An oxygen-hydrogen group bound to carbon".into();
        hydroxyl.categories = vec!["Oxygen-containing".into()];
        hydroxyl.subcategories = vec!["Alcohols".into()];
        hydroxyl.reactivity = "moderate".into();
        hydroxyl.common_reactions = vec!["esterification".into()];

        let mut carbonyl = GroupDefinition::new("carbonyl", "C=O");
        carbonyl.categories = vec!["Oxygen-containing".into()];
        carbonyl.reactivity = "high".into();
        carbonyl.common_reactions = vec!["nucleophilic addition".into()];

        let mut benzene = GroupDefinition::new("benzene_ring", "c1ccccc1");
        benzene.categories = vec!["Aromatic".into()];
        benzene.reactivity = "low".into();

        vec![hydroxyl, carbonyl, benzene]
    }

    #[test]
    fn names_are_lexicographic() {
        let catalog = Catalog::load(&Toolkit, sample_definitions()).unwrap();
        assert_eq!(catalog.names(), vec!["benzene_ring", "carbonyl", "hydroxyl"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn failed_pattern_is_recorded_not_fatal() {
        let mut defs = sample_definitions();
        defs.push(GroupDefinition::new("broken", "C1CC"));

        let catalog = Catalog::load(&Toolkit, defs).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.lookup("broken").is_none());
        assert_eq!(catalog.failures().len(), 1);
        assert_eq!(catalog.failures()[0].name, "broken");
        assert!(!catalog.names().contains(&"broken"));
    }

    #[test]
    fn all_patterns_failing_is_fatal() {
        let defs = vec![
            GroupDefinition::new("bad_a", "C("),
            GroupDefinition::new("bad_b", "C1CC"),
        ];
        let err = match Catalog::load(&Toolkit, defs) {
            Ok(_) => panic!("load should fail when nothing compiles"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::EmptyCatalog { failed: 2 }));
    }

    #[test]
    fn by_category_checks_both_levels_case_insensitively() {
        let catalog = Catalog::load(&Toolkit, sample_definitions()).unwrap();
        assert_eq!(
            catalog.by_category("oxygen-containing"),
            vec!["carbonyl", "hydroxyl"]
        );
        assert_eq!(catalog.by_category("ALCOHOLS"), vec!["hydroxyl"]);
        assert!(catalog.by_category("halogens").is_empty());
    }

    #[test]
    fn by_reactivity_matches_exact_level() {
        let catalog = Catalog::load(&Toolkit, sample_definitions()).unwrap();
        assert_eq!(catalog.by_reactivity("High"), vec!["carbonyl"]);
        assert!(catalog.by_reactivity("extreme").is_empty());
    }

    #[test]
    fn search_includes_each_name_once() {
        let catalog = Catalog::load(&Toolkit, sample_definitions()).unwrap();
        // "oxygen" hits hydroxyl via description AND category; one entry only.
        let hits = catalog.search("oxygen");
        assert_eq!(hits, vec!["carbonyl", "hydroxyl"]);

        assert_eq!(catalog.search("esterification"), vec!["hydroxyl"]);
        assert_eq!(catalog.search("AROMATIC"), vec!["benzene_ring"]);
        assert!(catalog.search("phosphorus").is_empty());
    }

    #[test]
    fn categories_are_sorted_and_deduplicated() {
        let catalog = Catalog::load(&Toolkit, sample_definitions()).unwrap();
        assert_eq!(
            catalog.categories(),
            vec![
                "Alcohols".to_string(),
                "Aromatic".to_string(),
                "Oxygen-containing".to_string()
            ]
        );
    }
}
