//! Core data types for motif scanning.
//!
//! - [`SequenceRecord`]: an input sequence (identifier + residues)
//! - [`MotifMatch`]: one motif occurrence within a sequence
//! - [`ResultRow`]: a match tagged with its sequence ID and length
//! - [`ResultTable`]: the ordered, flat aggregation of all rows
//!
//! ## Coordinates
//!
//! All positions are **1-based and inclusive**. A row with `start = 3` and
//! `end = 6` covers residues `residues[2..6]` in 0-based half-open terms.
//!
//! [`SequenceRecord`]: record::SequenceRecord
//! [`MotifMatch`]: types::MotifMatch
//! [`ResultRow`]: types::ResultRow
//! [`ResultTable`]: table::ResultTable

pub mod record;
pub mod table;
pub mod types;
