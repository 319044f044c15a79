use fancy_regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::catalog::store::CatalogError;

/// Character class substituted for the `N` wildcard in motif patterns
pub const WILDCARD_CLASS: &str = "[ACGTN]";

/// Default cap on backtracking steps per match attempt: unlimited.
///
/// Unbounded repeat units such as Cruciform do work quadratic in the
/// distance between matches, so a finite cap must be opted into.
pub const DEFAULT_BACKTRACK_LIMIT: usize = usize::MAX;

/// A named motif pattern as written in a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifDefinition {
    /// Unique motif name
    pub name: String,

    /// Pattern over A, C, G, T with `N` as a single-nucleotide wildcard
    pub pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MotifDefinition {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            description: None,
        }
    }
}

/// A motif definition with its compiled pattern
#[derive(Debug, Clone)]
pub struct Motif {
    definition: MotifDefinition,
    regex: Regex,
}

impl Motif {
    /// Compile a definition, expanding `N` wildcards first
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPattern` if the expanded pattern does not compile.
    pub fn compile(definition: MotifDefinition, backtrack_limit: usize) -> Result<Self, CatalogError> {
        let expanded = expand_wildcards(&definition.pattern);
        let regex = RegexBuilder::new(&expanded)
            .backtrack_limit(backtrack_limit)
            .build()
            .map_err(|e| CatalogError::InvalidPattern {
                name: definition.name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { definition, regex })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The pattern as written in the catalog (before wildcard expansion)
    pub fn pattern(&self) -> &str {
        &self.definition.pattern
    }

    pub fn description(&self) -> Option<&str> {
        self.definition.description.as_deref()
    }

    pub fn definition(&self) -> &MotifDefinition {
        &self.definition
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Replace every `N` outside a character class with [`WILDCARD_CLASS`].
///
/// Escaped characters and the contents of `[...]` classes are copied verbatim.
#[must_use]
pub fn expand_wildcards(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            'N' if !in_class => out.push_str(WILDCARD_CLASS),
            _ => out.push(c),
        }
    }

    out
}
