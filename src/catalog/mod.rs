pub mod bundled;
pub mod locale;

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::quiz::MIN_CATALOG_SIZE;

pub use locale::Locale;

/// One glossary term. `term` is the primary key within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub category: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl GlossaryEntry {
    pub fn new(term: &str, category: &str, definition: &str) -> Self {
        Self {
            term: term.to_string(),
            category: category.to_string(),
            definition: definition.to_string(),
            tip: None,
        }
    }

    pub fn with_tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }

    /// Absent tips read as the empty string.
    pub fn tip_text(&self) -> &str {
        self.tip.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no bundled catalog for locale '{0}'")]
    MissingBundled(Locale),
    #[error("entry #{index} has an empty term")]
    EmptyTerm { index: usize },
    #[error("entry '{term}' has an empty definition")]
    EmptyDefinition { term: String },
    #[error("entry '{term}' has an empty category")]
    EmptyCategory { term: String },
    #[error("term '{term}' appears more than once")]
    DuplicateTerm { term: String },
}

/// Immutable, shared list of glossary entries. Cloning shares the entries.
///
/// Engines assume terms are unique and fields are non-empty; catalogs from
/// untrusted sources should go through [`Catalog::validate`] (done by
/// [`Catalog::from_path`]).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Arc<[GlossaryEntry]>,
}

impl Catalog {
    pub fn new(entries: Vec<GlossaryEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Parse a JSON array of entries. Does not validate.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let entries: Vec<GlossaryEntry> = serde_json::from_slice(bytes)?;
        Ok(Self::new(entries))
    }

    /// Load and validate a user-supplied catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let bytes = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_slice(&bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlossaryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, term: &str) -> Option<&GlossaryEntry> {
        self.entries.iter().find(|e| e.term == term)
    }

    /// Distinct categories in ascending lexical order.
    pub fn categories(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Enough entries to build a four-option question.
    pub fn is_playable(&self) -> bool {
        self.entries.len() >= MIN_CATALOG_SIZE
    }

    /// Checks the preconditions the engines rely on. Reports the first
    /// offending entry in catalog order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            let term = entry.term.trim();
            if term.is_empty() {
                return Err(CatalogError::EmptyTerm { index });
            }
            if entry.definition.trim().is_empty() {
                return Err(CatalogError::EmptyDefinition {
                    term: entry.term.clone(),
                });
            }
            if entry.category.trim().is_empty() {
                return Err(CatalogError::EmptyCategory {
                    term: entry.term.clone(),
                });
            }
            if !seen.insert(entry.term.as_str()) {
                return Err(CatalogError::DuplicateTerm {
                    term: entry.term.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a GlossaryEntry;
    type IntoIter = std::slice::Iter<'a, GlossaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<GlossaryEntry>> for Catalog {
    fn from(entries: Vec<GlossaryEntry>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(term: &str, category: &str) -> GlossaryEntry {
        GlossaryEntry::new(term, category, &format!("{term} definition"))
    }

    #[test]
    fn test_parse_with_and_without_tip() {
        let json = r#"[
            {"term": "Seed", "category": "Wallet", "definition": "Backup words", "tip": "Never share it"},
            {"term": "Node", "category": "Network", "definition": "Full copy of the chain"},
            {"term": "Fee", "category": "Network", "definition": "Miner reward", "tip": null}
        ]"#;
        let catalog = Catalog::from_json_slice(json.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].tip.as_deref(), Some("Never share it"));
        assert_eq!(catalog.entries()[1].tip, None);
        assert_eq!(catalog.entries()[2].tip_text(), "");
    }

    #[test]
    fn test_parse_rejects_missing_term() {
        let json = r#"[{"category": "Wallet", "definition": "Backup words"}]"#;
        let err = Catalog::from_json_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let catalog = Catalog::new(vec![
            entry("a", "Wallet"),
            entry("b", "Basics"),
            entry("c", "Wallet"),
            entry("d", "Scams"),
        ]);
        assert_eq!(catalog.categories(), vec!["Basics", "Scams", "Wallet"]);
    }

    #[test]
    fn test_validate_duplicate_term() {
        let catalog = Catalog::new(vec![entry("a", "x"), entry("b", "x"), entry("a", "y")]);
        match catalog.validate() {
            Err(CatalogError::DuplicateTerm { term }) => assert_eq!(term, "a"),
            other => panic!("expected duplicate term, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_fields() {
        let catalog = Catalog::new(vec![entry("a", "x"), entry("  ", "x")]);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::EmptyTerm { index: 1 })
        ));

        let catalog = Catalog::new(vec![GlossaryEntry::new("a", "x", "")]);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::EmptyDefinition { .. })
        ));

        let catalog = Catalog::new(vec![GlossaryEntry::new("a", "", "def")]);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::EmptyCategory { .. })
        ));
    }

    #[test]
    fn test_playable_threshold() {
        let three = Catalog::new(vec![entry("a", "x"), entry("b", "x"), entry("c", "x")]);
        assert!(!three.is_playable());
        let four = Catalog::new(vec![
            entry("a", "x"),
            entry("b", "x"),
            entry("c", "x"),
            entry("d", "x"),
        ]);
        assert!(four.is_playable());
    }

    #[test]
    fn test_from_path_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dupes.json");
        fs::write(
            &path,
            r#"[{"term":"a","category":"x","definition":"d"},{"term":"a","category":"x","definition":"d"}]"#,
        )
        .unwrap();
        assert!(matches!(
            Catalog::from_path(&path),
            Err(CatalogError::DuplicateTerm { .. })
        ));

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Catalog::from_path(&missing),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_clone_shares_entries() {
        let catalog = Catalog::new(vec![entry("a", "x")]);
        let other = catalog.clone();
        assert!(std::ptr::eq(catalog.entries(), other.entries()));
    }
}
