use serde::{Deserialize, Serialize};

/// A named functional group: its pattern text plus descriptive metadata.
///
/// Definitions are created once at catalog load and never mutated
/// afterwards. The serialized form matches one element of the
/// `functional_groups` array in a catalog JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// Catalog-assigned identifier (`fg_NNN`).
    #[serde(default)]
    pub id: String,

    /// Unique group name, the key used throughout the pipeline.
    pub name: String,

    /// Substructure pattern text, compiled by the pattern compiler.
    pub smarts: String,

    #[serde(default)]
    pub description: String,

    /// Top-level chemical categories, in catalog order.
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub subcategories: Vec<String>,

    /// Qualitative reactivity level (e.g. "high", "moderate").
    #[serde(default = "default_reactivity")]
    pub reactivity: String,

    #[serde(default)]
    pub common_reactions: Vec<String>,

    /// Example molecules containing this group.
    #[serde(default)]
    pub examples: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chebi_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chebi_description: Option<String>,

    /// Simplified alternative pattern, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplified: Option<String>,
}

fn default_reactivity() -> String {
    "unknown".to_string()
}

impl GroupDefinition {
    /// Minimal definition with just a name and pattern text.
    pub fn new(name: impl Into<String>, smarts: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            smarts: smarts.into(),
            description: String::new(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            reactivity: default_reactivity(),
            common_reactions: Vec::new(),
            examples: Vec::new(),
            chebi_id: None,
            chebi_description: None,
            simplified: None,
        }
    }

    /// Hierarchical path: categories, subcategories, then the name,
    /// joined with " > ".
    pub fn path(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.categories.iter().map(String::as_str));
        parts.extend(self.subcategories.iter().map(String::as_str));
        parts.push(&self.name);
        parts.join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let def = GroupDefinition::new("hydroxyl", "CO");
        assert_eq!(def.name, "hydroxyl");
        assert_eq!(def.smarts, "CO");
        assert_eq!(def.reactivity, "unknown");
        assert!(def.categories.is_empty());
    }

    #[test]
    fn path_joins_categories_and_name() {
        let mut def = GroupDefinition::new("hydroxyl", "CO");
        def.categories = vec!["oxygen-containing".into()];
        def.subcategories = vec!["alcohols".into()];
        assert_eq!(def.path(), "oxygen-containing > alcohols > hydroxyl");
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = r#"{"name": "carbonyl", "smarts": "C=O"}"#;
        let def: GroupDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.name, "carbonyl");
        assert_eq!(def.reactivity, "unknown");
        assert!(def.chebi_id.is_none());
    }
}
