//! Parser for FASTA files using noodles.
//!
//! Reads every record into a [`SequenceRecord`]. Supports both uncompressed
//! and gzip/bgzip compressed input.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::record::SequenceRecord;
use crate::parsing::ParseError;
use crate::utils::validation::check_record_limit;

/// Leading bytes of a gzip (and therefore bgzip) stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Check if a byte buffer starts with the gzip magic number
#[must_use]
pub fn is_gzip_content(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Parse all records from a FASTA file.
///
/// Compression is chosen from the file extension.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// a record is malformed, `ParseError::InvalidResidues` if a record contains
/// non-ASCII residues, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    let file = std::fs::File::open(path)?;

    let records = if is_gzipped(path) {
        parse_fasta_reader(BufReader::new(MultiGzDecoder::new(file)))?
    } else {
        parse_fasta_reader(BufReader::new(file))?
    };

    debug!(
        "Parsed {} records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse all records from an in-memory FASTA buffer.
///
/// Gzip content is detected from its magic number rather than a filename.
///
/// # Errors
///
/// Same as [`parse_fasta_file`], minus file access errors.
pub fn parse_fasta_bytes(bytes: &[u8]) -> Result<Vec<SequenceRecord>, ParseError> {
    if is_gzip_content(bytes) {
        parse_fasta_reader(BufReader::new(MultiGzDecoder::new(bytes)))
    } else {
        parse_fasta_reader(bytes)
    }
}

/// Parse all records from FASTA text
///
/// # Errors
///
/// Same as [`parse_fasta_bytes`].
pub fn parse_fasta_text(text: &str) -> Result<Vec<SequenceRecord>, ParseError> {
    parse_fasta_reader(text.as_bytes())
}

/// Parse all records from any unbuffered FASTA source (e.g. stdin)
///
/// # Errors
///
/// Same as [`parse_fasta_bytes`].
pub fn parse_fasta_from<R: Read>(mut source: R) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut buffer = Vec::new();
    source.read_to_end(&mut buffer)?;
    parse_fasta_bytes(&buffer)
}

/// Parse from a buffered reader through noodles
fn parse_fasta_reader<R: BufRead>(inner: R) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut reader = fasta::io::Reader::new(inner);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check record limit for DOS protection
        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let id = String::from_utf8_lossy(record.name()).to_string();
        let residues = record.sequence().as_ref();

        if !residues.is_ascii() {
            return Err(ParseError::InvalidResidues(id));
        }

        records.push(SequenceRecord::new(
            id,
            String::from_utf8_lossy(residues).into_owned(),
        ));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }

    Ok(records)
}
