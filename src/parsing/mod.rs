//! Parsers turning input text into [`SequenceRecord`]s.
//!
//! - **FASTA files**: plain, gzip, or bgzip; one or more records each
//! - **Pasted text**: raw residues wrapped into a single `Pasted_Sequence` record
//!
//! ## Example
//!
//! ```rust,no_run
//! use nonb_finder::parsing::fasta::{parse_fasta_file, parse_fasta_text};
//! use std::path::Path;
//!
//! let records = parse_fasta_file(Path::new("sample.fa")).unwrap();
//! let records = parse_fasta_text(">seq1\nCGCGCGCGCGCG\n").unwrap();
//! ```
//!
//! [`SequenceRecord`]: crate::core::record::SequenceRecord

use thiserror::Error;

use crate::utils::validation::MAX_RECORDS;

pub mod fasta;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Record '{0}' contains non-ASCII residues")]
    InvalidResidues(String),

    #[error("Too many records: {0} exceeds maximum allowed ({max})", max = MAX_RECORDS)]
    TooManyRecords(usize),
}
