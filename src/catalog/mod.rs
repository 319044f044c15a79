//! Motif catalog storage.
//!
//! The catalog is an ordered list of named patterns, one per non-B DNA motif
//! class. A built-in catalog is compiled into the binary, but custom catalogs
//! can also be loaded from JSON files with the same layout.
//!
//! ## Built-in Catalog
//!
//! | Motif | Pattern |
//! |-------|---------|
//! | Slipped DNA | `([ATGC]{2,6})\1{1,}` |
//! | Z-DNA | `(CG){6,}` |
//! | I-Motif | `((C[AT]C){3,})` |
//! | R-Loop | `(A{4,}[CG]{2,}A{4,})` |
//! | Cruciform | `([ATGC]{4,})\1{2,}` |
//! | G-Quadruplex | `(G{3,7}[ATCG]{1,7})\1{2,}G{3,7}` |
//! | Bipartite G-Quadruplex | `(G{3}N{1,3}G{3}N{1,3}G{3})N{1,7}(G{3}N{1,3}G{3}N{1,3}G{3})` |
//! | G-Triplex DNA (G3-DNA) | `(G{3}N{1,7}){2}G{3}` |
//! | G-Hairpin | `(G{3,})N{1,7}(G{3,})` |
//! | G-Guanine Slip-Strand DNA | `(GGG){3,}` |
//!
//! `N` is a single-nucleotide wildcard and compiles to `[ACGTN]`.
//!
//! ## Custom Catalogs
//!
//! ```rust,no_run
//! use nonb_finder::MotifCatalog;
//! use std::path::Path;
//!
//! // Export the built-in catalog as a starting point
//! let catalog = MotifCatalog::load_builtin().unwrap();
//! let json = catalog.to_json().unwrap();
//!
//! // Load from custom file
//! let custom = MotifCatalog::load_from_file(Path::new("my_motifs.json")).unwrap();
//! ```

pub mod motif;
pub mod store;
