//! Motif scanning engine and the analysis request boundary.
//!
//! - [`MotifScanner`]: applies every catalog motif to each sequence, in parallel
//!   across sequences
//! - [`analyze`]: parses a request's inputs, scans them, and classifies the
//!   outcome
//!
//! ## Matching Semantics
//!
//! For each sequence, motifs are applied in catalog order. Each motif reports
//! its matches left to right without overlap: once a match is found, the
//! search resumes at its end, so overlapping occurrences of the same motif are
//! not all reported. Different motifs may overlap freely.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nonb_finder::{MotifCatalog, MotifScanner, SequenceRecord};
//!
//! let catalog = MotifCatalog::load_builtin().unwrap();
//! let scanner = MotifScanner::new(&catalog);
//!
//! let records = vec![SequenceRecord::new("seq1", "CGCGCGCGCGCGCG")];
//! let table = scanner.scan_all(&records).unwrap();
//!
//! for row in table.rows() {
//!     println!("{}\t{}\t{}-{}", row.sequence_id, row.motif, row.start, row.end);
//! }
//! ```
//!
//! [`MotifScanner`]: scanner::MotifScanner
//! [`analyze`]: analysis::analyze

pub mod analysis;
pub mod scanner;
