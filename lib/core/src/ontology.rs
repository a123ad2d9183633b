//! Genre ontology
//!
//! Maps a canonical category to the set of categories it is directly related
//! to. Relations are stored one-directionally but queried symmetrically, and
//! sibling ("same group") relations are derived from an inverted index built
//! once at construction. A store is never mutated after it is built; loading an
//! external definition replaces the built-in table wholesale.

use crate::error::{Error, Result};
use crate::lexicon;
use crate::normalize::clean;
use crate::Category;
use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the active ontology table came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum OntologySource {
    BuiltIn,
    File(PathBuf),
}

/// Immutable category ontology with direct and sibling relation queries
#[derive(Debug, Clone)]
pub struct OntologyStore {
    relations: AHashMap<Category, AHashSet<Category>>,
    // member -> categories listing it
    parents: AHashMap<Category, AHashSet<Category>>,
    source: OntologySource,
    empty: AHashSet<Category>,
}

impl OntologyStore {
    /// The built-in genre ontology
    pub fn builtin() -> Self {
        let relations: AHashMap<Category, AHashSet<Category>> = lexicon::ONTOLOGY
            .iter()
            .map(|(category, related)| {
                (
                    category.to_string(),
                    related.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect();
        Self::from_relations(relations, OntologySource::BuiltIn)
    }

    /// Build a store from an arbitrary relation table
    ///
    /// Keys and members are cleaned so lookups see canonical tokens.
    pub fn from_map<I, K, V, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut relations: AHashMap<Category, AHashSet<Category>> = AHashMap::new();
        for (category, related) in table {
            let entry = relations.entry(clean(category.as_ref())).or_default();
            entry.extend(
                related
                    .into_iter()
                    .map(|r| clean(r.as_ref()))
                    .filter(|r| !r.is_empty()),
            );
        }
        relations.remove("");
        Self::from_relations(relations, OntologySource::BuiltIn)
    }

    /// Parse a JSON definition: an object of `"category": ["related", ...]`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| Error::OntologyLoad(format!("invalid ontology definition: {e}")))?;

        if table.is_empty() {
            return Err(Error::OntologyLoad("ontology definition has no categories".to_string()));
        }

        Ok(Self::from_map(table))
    }

    /// Load an external JSON definition, failing on any error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::OntologyLoad(format!("cannot read {}: {e}", path.display())))?;

        let mut store = Self::from_json_str(&json)?;
        store.source = OntologySource::File(path.to_path_buf());
        info!("Loaded ontology from {} ({} categories)", path.display(), store.len());
        Ok(store)
    }

    /// Load an external definition, falling back to the built-in table on failure
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                warn!("{e}; using built-in ontology");
                Self::builtin()
            }
        }
    }

    fn from_relations(
        relations: AHashMap<Category, AHashSet<Category>>,
        source: OntologySource,
    ) -> Self {
        let mut parents: AHashMap<Category, AHashSet<Category>> = AHashMap::new();
        for (category, related) in &relations {
            for member in related {
                parents
                    .entry(member.clone())
                    .or_default()
                    .insert(category.clone());
            }
        }

        Self {
            relations,
            parents,
            source,
            empty: AHashSet::new(),
        }
    }

    /// Directly related categories (empty for unknown categories)
    pub fn related(&self, category: &str) -> &AHashSet<Category> {
        self.relations.get(category).unwrap_or(&self.empty)
    }

    /// True if either category lists the other as related
    pub fn are_related(&self, a: &str, b: &str) -> bool {
        self.related(a).contains(b) || self.related(b).contains(a)
    }

    /// True if some category lists both `a` and `b` as related
    pub fn share_group(&self, a: &str, b: &str) -> bool {
        match (self.parents.get(a), self.parents.get(b)) {
            (Some(pa), Some(pb)) => !pa.is_disjoint(pb),
            _ => false,
        }
    }

    /// True if the category is a key of the table
    pub fn contains(&self, category: &str) -> bool {
        self.relations.contains_key(category)
    }

    pub fn source(&self) -> &OntologySource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// All entries sorted by category, members sorted, for display and export
    pub fn entries(&self) -> Vec<(Category, Vec<Category>)> {
        let mut entries: Vec<(Category, Vec<Category>)> = self
            .relations
            .iter()
            .map(|(category, related)| {
                let mut members: Vec<Category> = related.iter().cloned().collect();
                members.sort();
                (category.clone(), members)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl Default for OntologyStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_relations() {
        let ontology = OntologyStore::builtin();
        assert_eq!(ontology.len(), 16);
        assert!(ontology.related("terror").contains("gore"));
        assert!(ontology.related("unknown").is_empty());
        assert_eq!(ontology.source(), &OntologySource::BuiltIn);
    }

    #[test]
    fn test_are_related_is_symmetric() {
        let ontology = OntologyStore::builtin();
        assert!(ontology.are_related("terror", "gore"));
        assert!(ontology.are_related("gore", "terror"));
        assert!(!ontology.are_related("drama", "terror"));
    }

    #[test]
    fn test_share_group() {
        let ontology = OntologyStore::builtin();
        // both listed under "terror"
        assert!(ontology.share_group("gore", "slasher"));
        assert!(ontology.share_group("slasher", "gore"));
        // "psicologico" sits under both terror and drama
        assert!(ontology.share_group("psicologico", "biografia"));
        assert!(!ontology.share_group("gore", "cartoon"));
        assert!(!ontology.share_group("nada", "gore"));
    }

    #[test]
    fn test_from_json_replaces_wholesale() {
        let ontology = OntologyStore::from_json_str(r#"{"Jazz": ["Bebop", "Swing"]}"#).unwrap();
        assert_eq!(ontology.len(), 1);
        assert!(ontology.are_related("jazz", "bebop"));
        assert!(!ontology.contains("terror"));
    }

    #[test]
    fn test_from_json_rejects_bad_definitions() {
        assert!(matches!(
            OntologyStore::from_json_str("not json"),
            Err(Error::OntologyLoad(_))
        ));
        assert!(matches!(
            OntologyStore::from_json_str("{}"),
            Err(Error::OntologyLoad(_))
        ));
        assert!(matches!(
            OntologyStore::from_json_str(r#"{"terror": "gore"}"#),
            Err(Error::OntologyLoad(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"drama": ["terror"]}}"#).unwrap();

        let ontology = OntologyStore::load(file.path()).unwrap();
        assert!(ontology.are_related("terror", "drama"));
        assert_eq!(
            ontology.source(),
            &OntologySource::File(file.path().to_path_buf())
        );
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let ontology = OntologyStore::load_or_builtin("/definitely/not/here/ontology.json");
        assert_eq!(ontology.source(), &OntologySource::BuiltIn);
        assert_eq!(ontology.len(), 16);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ broken").unwrap();
        let ontology = OntologyStore::load_or_builtin(file.path());
        assert_eq!(ontology.source(), &OntologySource::BuiltIn);
        assert!(ontology.related("terror").contains("gore"));
    }

    #[test]
    fn test_entries_are_sorted() {
        let ontology = OntologyStore::from_map([("b", vec!["z", "y"]), ("a", vec!["x"])]);
        let entries = ontology.entries();
        assert_eq!(entries[0].0, "a");
        assert_eq!(entries[1].1, vec!["y".to_string(), "z".to_string()]);
    }
}
