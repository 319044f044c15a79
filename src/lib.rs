//! # nonb-finder
//!
//! A library for finding non-canonical ("non-B") DNA structural motifs in
//! DNA sequences.
//!
//! Besides the right-handed B-form double helix, DNA can fold into other
//! structures: left-handed Z-DNA, G-quadruplexes, i-motifs, cruciforms,
//! R-loops and slipped strands. Each is associated with a characteristic
//! sequence pattern. `nonb-finder` scans sequences against a catalog of such
//! patterns and reports every occurrence in a flat result table.
//!
//! ## Features
//!
//! - **Built-in catalog**: ten motif classes, embedded at compile time
//! - **Custom catalogs**: load your own named patterns from JSON
//! - **Parallel scanning**: sequences are scanned concurrently with rayon
//! - **FASTA input**: plain, gzip or bgzip; many records per file
//! - **Export**: text, JSON, TSV and CSV tables, plus per-motif summaries
//!
//! ## Example
//!
//! ```rust,no_run
//! use nonb_finder::{MotifCatalog, MotifScanner, SequenceRecord};
//! use nonb_finder::parsing::fasta::parse_fasta_text;
//!
//! // Load the embedded catalog of non-B DNA motifs
//! let catalog = MotifCatalog::load_builtin().unwrap();
//!
//! // Parse some FASTA
//! let records = parse_fasta_text(">promoter\nGGGTTTAGGGTTTAGGGTTTAGGG\n").unwrap();
//!
//! // Scan all records in parallel
//! let scanner = MotifScanner::new(&catalog);
//! let table = scanner.scan_all(&records).unwrap();
//!
//! for row in table.rows() {
//!     println!("{} {} {}-{} {}", row.sequence_id, row.motif, row.start, row.end, row.matched_sequence);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Motif definitions and the ordered motif catalog
//! - [`core`]: Sequence records, matches, result rows and the result table
//! - [`scanning`]: The motif scanner and the analysis request boundary
//! - [`parsing`]: FASTA and pasted-text input
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based analysis

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod scanning;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::motif::{Motif, MotifDefinition};
pub use catalog::store::MotifCatalog;
pub use core::record::SequenceRecord;
pub use core::table::ResultTable;
pub use core::types::*;
pub use scanning::analysis::{analyze, AnalysisError, AnalysisRequest, InputSource};
pub use scanning::scanner::{find_motifs, MotifScanner, ScanConfig};
