//! Catalog file reading, writing, and editing.
//!
//! A catalog is a JSON document with a `metadata` header and a
//! `functional_groups` array of definitions. Editing operations
//! (`add_group`, `remove_group`) keep the metadata's group count and the
//! `fg_NNN` identifier sequence consistent.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::GroupDefinition;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("catalog JSON is malformed")]
    Json(#[from] serde_json::Error),

    #[error("a group named '{0}' already exists")]
    DuplicateGroup(String),

    #[error("group definition is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Header block of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: String,

    /// Kept equal to the length of `functional_groups` by the editing
    /// operations.
    #[serde(default)]
    pub total_groups: usize,
}

/// One catalog JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub metadata: CatalogMetadata,

    #[serde(default)]
    pub functional_groups: Vec<GroupDefinition>,
}

impl CatalogFile {
    /// Append a definition, assigning it the next free `fg_NNN` id, which
    /// is returned.
    ///
    /// Rejects definitions without a name or pattern, and names already
    /// present in the catalog.
    pub fn add_group(&mut self, mut definition: GroupDefinition) -> Result<String, Error> {
        if definition.name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if definition.smarts.is_empty() {
            return Err(Error::MissingField("smarts"));
        }
        if self
            .functional_groups
            .iter()
            .any(|g| g.name == definition.name)
        {
            return Err(Error::DuplicateGroup(definition.name));
        }

        let id = self.next_id();
        definition.id = id.clone();
        self.functional_groups.push(definition);
        self.metadata.total_groups = self.functional_groups.len();
        Ok(id)
    }

    /// Remove the group named `name`. Returns whether it was present.
    pub fn remove_group(&mut self, name: &str) -> bool {
        let before = self.functional_groups.len();
        self.functional_groups.retain(|g| g.name != name);
        let removed = self.functional_groups.len() != before;
        if removed {
            self.metadata.total_groups = self.functional_groups.len();
        }
        removed
    }

    pub fn find(&self, name: &str) -> Option<&GroupDefinition> {
        self.functional_groups.iter().find(|g| g.name == name)
    }

    /// Smallest `fg_NNN` id not already taken.
    fn next_id(&self) -> String {
        let mut n = self.functional_groups.len() + 1;
        loop {
            let candidate = format!("fg_{n:03}");
            if !self.functional_groups.iter().any(|g| g.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Parse catalog JSON text.
pub fn parse_catalog(text: &str) -> Result<CatalogFile, Error> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a catalog file from disk.
pub fn read_catalog_file(path: &Path) -> Result<CatalogFile, Error> {
    let text = fs::read_to_string(path)?;
    parse_catalog(&text)
}

/// Write a catalog back to disk as pretty-printed JSON.
pub fn write_catalog_file(path: &Path, catalog: &CatalogFile) -> Result<(), Error> {
    let text = serde_json::to_string_pretty(catalog)?;
    fs::write(path, text)?;
    Ok(())
}
