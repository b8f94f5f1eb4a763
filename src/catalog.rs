//! Entity catalog boundary.
//!
//! The catalog of known entity names lives in an external relational store;
//! the pattern compiler only needs `(entity_type, entity_name)` pairs for a
//! language. The trait keeps that boundary narrow so tests can supply an
//! in-memory catalog.

use indexmap::IndexMap;

use crate::errors::DatagenError;
use crate::types::{EntityType, LanguageTag};

/// One catalog entry: an entity type and its display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRecord {
    /// Entity type identifier, e.g. `tt:country` or `sportradar:nba`.
    pub entity_type: EntityType,
    /// Human-readable entity name, tokenized downstream.
    pub name: String,
}

/// Catalog-facing interface: distinct entities per language tag.
pub trait EntityCatalog {
    /// Distinct `(entity_type, entity_name)` records for `language`.
    fn entities(&self, language: &str) -> Result<Vec<EntityRecord>, DatagenError>;
}

/// In-memory catalog used by tests and small offline runs.
#[derive(Default)]
pub struct InMemoryCatalog {
    entries: IndexMap<LanguageTag, Vec<EntityRecord>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity under `language`.
    pub fn insert(
        &mut self,
        language: impl Into<LanguageTag>,
        entity_type: impl Into<EntityType>,
        name: impl Into<String>,
    ) {
        self.entries
            .entry(language.into())
            .or_default()
            .push(EntityRecord {
                entity_type: entity_type.into(),
                name: name.into(),
            });
    }
}

impl EntityCatalog for InMemoryCatalog {
    fn entities(&self, language: &str) -> Result<Vec<EntityRecord>, DatagenError> {
        Ok(self.entries.get(language).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_catalog_scopes_by_language() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert("en", "tt:country", "France");
        catalog.insert("it", "tt:country", "Francia");
        let en = catalog.entities("en").unwrap();
        assert_eq!(en.len(), 1);
        assert_eq!(en[0].name, "France");
        assert!(catalog.entities("de").unwrap().is_empty());
    }
}
