use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::core::record::{SequenceRecord, PASTED_SEQUENCE_ID};
use crate::core::table::ResultTable;
use crate::parsing::fasta::{parse_fasta_bytes, parse_fasta_file, parse_fasta_from};
use crate::parsing::ParseError;
use crate::scanning::scanner::{MotifScanner, ScanError};
use crate::utils::validation::{check_record_limit, MAX_RECORDS};

/// Failure of one analysis request
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An input source could not be parsed into sequence records
    #[error("Failed to parse {source_name}: {source}")]
    InputFormat {
        source_name: String,
        #[source]
        source: ParseError,
    },

    /// Analysis completed but no motif matched anywhere
    #[error("No motifs found in {sequences} sequence(s)")]
    NoMotifsFound { sequences: usize },

    #[error("No input provided: supply FASTA files or a pasted sequence")]
    NoInput,

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl AnalysisError {
    /// Whether this is the informational "nothing found" outcome
    #[must_use]
    pub fn is_no_motifs_found(&self) -> bool {
        matches!(self, Self::NoMotifsFound { .. })
    }
}

/// Where a batch of FASTA records comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    Bytes { name: String, content: Vec<u8> },
}

impl InputSource {
    /// Human-readable name used in error messages
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
            Self::Bytes { name, .. } => name.clone(),
        }
    }

    /// Parse all records from this source
    ///
    /// # Errors
    ///
    /// Returns the underlying `ParseError` if the source is not valid FASTA.
    pub fn read_records(&self) -> Result<Vec<SequenceRecord>, ParseError> {
        match self {
            Self::File(path) => parse_fasta_file(path),
            Self::Stdin => parse_fasta_from(std::io::stdin().lock()),
            Self::Bytes { content, .. } => parse_fasta_bytes(content),
        }
    }
}

/// One analysis: any number of FASTA sources plus an optional pasted sequence
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub sources: Vec<InputSource>,
    pub pasted: Option<String>,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source(mut self, source: InputSource) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn with_pasted(mut self, text: impl Into<String>) -> Self {
        self.pasted = Some(text.into());
        self
    }

    /// True when there is nothing to analyze
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.pasted.as_deref().map_or(true, str::is_empty)
    }

    /// Gather records from every source, then the pasted sequence last.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InputFormat` for the first source that fails to
    /// parse; nothing from other sources is kept.
    pub fn collect_records(&self) -> Result<Vec<SequenceRecord>, AnalysisError> {
        let mut records = Vec::new();

        for source in &self.sources {
            let mut parsed = source
                .read_records()
                .map_err(|e| AnalysisError::InputFormat {
                    source_name: source.name(),
                    source: e,
                })?;

            if records.len() + parsed.len() > MAX_RECORDS {
                return Err(AnalysisError::InputFormat {
                    source_name: source.name(),
                    source: ParseError::TooManyRecords(records.len() + parsed.len()),
                });
            }
            records.append(&mut parsed);
        }

        if let Some(record) = self.pasted.as_deref().and_then(SequenceRecord::from_pasted) {
            if !record.residues.is_ascii() {
                return Err(AnalysisError::InputFormat {
                    source_name: "pasted sequence".to_string(),
                    source: ParseError::InvalidResidues(PASTED_SEQUENCE_ID.to_string()),
                });
            }
            if check_record_limit(records.len()).is_some() {
                return Err(AnalysisError::InputFormat {
                    source_name: "pasted sequence".to_string(),
                    source: ParseError::TooManyRecords(records.len() + 1),
                });
            }
            records.push(record);
        }

        Ok(records)
    }
}

/// Run one analysis request end to end.
///
/// Parses every input, scans all records, and returns the result table. This
/// is the single error boundary for a request: a parse failure anywhere aborts
/// the whole request, and a table without any matched sequence is reported as
/// `AnalysisError::NoMotifsFound` rather than an empty success.
///
/// # Errors
///
/// Returns `AnalysisError::NoInput`, `AnalysisError::InputFormat`,
/// `AnalysisError::Scan`, or `AnalysisError::NoMotifsFound`.
pub fn analyze(
    scanner: &MotifScanner<'_>,
    request: &AnalysisRequest,
) -> Result<ResultTable, AnalysisError> {
    if request.is_empty() {
        return Err(AnalysisError::NoInput);
    }

    let records = request.collect_records()?;
    let table = scanner.scan_all(&records)?;

    if !table.has_matches() {
        info!("No motifs found in {} sequences", records.len());
        return Err(AnalysisError::NoMotifsFound {
            sequences: records.len(),
        });
    }

    info!(
        "Analysis completed: {} matches across {} sequences",
        table.len(),
        records.len()
    );
    Ok(table)
}
