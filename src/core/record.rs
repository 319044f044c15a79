use serde::{Deserialize, Serialize};

/// Identifier given to the record built from pasted residue text
pub const PASTED_SEQUENCE_ID: &str = "Pasted_Sequence";

/// A single input sequence: identifier plus residues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Record identifier (FASTA definition name)
    pub id: String,

    /// Nucleotide residues, ASCII, in input case
    pub residues: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }

    /// Wrap pasted text as the synthetic `Pasted_Sequence` record.
    ///
    /// The text is kept verbatim, line breaks included, so coordinates refer
    /// to positions in exactly what was pasted. Returns `None` only for an
    /// empty string.
    #[must_use]
    pub fn from_pasted(text: &str) -> Option<Self> {
        if text.is_empty() {
            None
        } else {
            Some(Self::new(PASTED_SEQUENCE_ID, text))
        }
    }

    /// Sequence length in residues
    #[must_use]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
