use serde::{Deserialize, Serialize};

/// A single motif occurrence within one sequence.
///
/// Positions are 1-based and inclusive: `start` is the regex start offset plus
/// one and `end` is the regex end offset, so the match covers
/// `residues[start - 1..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotifMatch {
    /// Catalog name of the motif
    pub motif: String,

    /// 1-based start position (inclusive)
    pub start: usize,

    /// 1-based end position (inclusive)
    pub end: usize,

    /// The residues covered by the match
    pub matched: String,
}

impl MotifMatch {
    /// Create a match from 0-based half-open regex offsets
    pub fn from_offsets(motif: impl Into<String>, start: usize, end: usize, matched: &str) -> Self {
        Self {
            motif: motif.into(),
            start: start + 1,
            end,
            matched: matched.to_string(),
        }
    }

    /// Number of residues covered
    #[must_use]
    pub fn span(&self) -> usize {
        self.end + 1 - self.start
    }
}

/// One row of the result table: a match tagged with its sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultRow {
    pub sequence_id: String,
    pub motif: String,
    pub start: usize,
    pub end: usize,
    pub matched_sequence: String,

    /// Length of the whole sequence the match was found in
    pub length: usize,
}

impl ResultRow {
    pub fn new(sequence_id: impl Into<String>, length: usize, m: MotifMatch) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            motif: m.motif,
            start: m.start,
            end: m.end,
            matched_sequence: m.matched,
            length,
        }
    }
}
