use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::catalog::motif::{Motif, MotifDefinition, DEFAULT_BACKTRACK_LIMIT};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid pattern for motif '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("Duplicate motif name: {0}")]
    DuplicateMotif(String),

    #[error("Catalog contains no motifs")]
    Empty,
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub motifs: Vec<MotifDefinition>,
}

/// The ordered set of compiled motif patterns.
///
/// Order is the order of definition and determines the per-sequence output
/// order of the scanner. The catalog cannot be modified once built.
#[derive(Debug, Clone)]
pub struct MotifCatalog {
    motifs: Vec<Motif>,

    /// Index: motif name -> index in motifs vec
    name_to_index: HashMap<String, usize>,

    backtrack_limit: usize,
}

impl MotifCatalog {
    /// Load the embedded built-in catalog of non-B DNA motifs
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded catalog fails to compile.
    pub fn load_builtin() -> Result<Self, CatalogError> {
        // Embedded at compile time, validated by build.rs
        const BUILTIN_CATALOG: &str = include_str!("../../catalogs/nonb_motifs.json");
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadError` if the file cannot be read, or any
    /// error from [`MotifCatalog::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` for malformed JSON, or any error from
    /// [`MotifCatalog::from_definitions`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        Self::from_definitions(data.motifs)
    }

    /// Build a catalog from definitions using the default backtrack limit
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty`, `CatalogError::DuplicateMotif`, or
    /// `CatalogError::InvalidPattern`.
    pub fn from_definitions(definitions: Vec<MotifDefinition>) -> Result<Self, CatalogError> {
        Self::from_definitions_with_limit(definitions, DEFAULT_BACKTRACK_LIMIT)
    }

    /// Build a catalog from definitions with an explicit backtrack limit
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty`, `CatalogError::DuplicateMotif`, or
    /// `CatalogError::InvalidPattern`.
    pub fn from_definitions_with_limit(
        definitions: Vec<MotifDefinition>,
        backtrack_limit: usize,
    ) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut motifs = Vec::with_capacity(definitions.len());
        let mut name_to_index = HashMap::new();

        for definition in definitions {
            if name_to_index.contains_key(&definition.name) {
                return Err(CatalogError::DuplicateMotif(definition.name));
            }
            name_to_index.insert(definition.name.clone(), motifs.len());
            motifs.push(Motif::compile(definition, backtrack_limit)?);
        }

        Ok(Self {
            motifs,
            name_to_index,
            backtrack_limit,
        })
    }

    /// Recompile this catalog with a different backtrack limit
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPattern` if a pattern fails to recompile.
    pub fn with_backtrack_limit(self, backtrack_limit: usize) -> Result<Self, CatalogError> {
        if backtrack_limit == self.backtrack_limit {
            return Ok(self);
        }
        let definitions = self.motifs.into_iter().map(|m| m.definition().clone()).collect();
        Self::from_definitions_with_limit(definitions, backtrack_limit)
    }

    /// Get a motif by name
    pub fn get(&self, name: &str) -> Option<&Motif> {
        self.name_to_index.get(name).map(|&idx| &self.motifs[idx])
    }

    /// Motifs in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Motif> {
        self.motifs.iter()
    }

    /// Motif names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.motifs.iter().map(Motif::name)
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn backtrack_limit(&self) -> usize {
        self.backtrack_limit
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            motifs: self.motifs.iter().map(|m| m.definition().clone()).collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

impl<'a> IntoIterator for &'a MotifCatalog {
    type Item = &'a Motif;
    type IntoIter = std::slice::Iter<'a, Motif>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
