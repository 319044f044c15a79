//! Command-line interface for nonb-finder.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **scan**: Scan FASTA files and/or a pasted sequence for non-B DNA motifs
//! - **motifs**: List the motifs in the catalog
//! - **serve**: Start the upload-and-analyze web service
//!
//! ## Usage
//!
//! ```text
//! # Scan one or more FASTA files
//! nonb-finder scan genome.fa plasmids.fa.gz
//!
//! # Scan a pasted sequence
//! nonb-finder scan --sequence GGGTTTAGGGTTTAGGGTTTAGGG
//!
//! # Pipe FASTA from another tool, export CSV
//! zcat reads.fa.gz | nonb-finder scan - --format csv -o motifs.csv
//!
//! # Per-motif occurrence counts only
//! nonb-finder scan genome.fa --summary
//!
//! # Start the web service
//! nonb-finder serve --port 8080 --open
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::{CatalogError, MotifCatalog};

pub mod motifs;
pub mod scan;

#[derive(Parser)]
#[command(name = "nonb-finder")]
#[command(version)]
#[command(about = "Scan DNA sequences for non-B DNA structural motifs")]
#[command(
    long_about = "nonb-finder scans DNA sequences from FASTA files or pasted text for non-canonical (non-B) DNA structural motifs.\n\nA fixed catalog of patterns covers slipped DNA, Z-DNA, i-motifs, R-loops, cruciforms and several G-quadruplex families. Every match is reported with 1-based inclusive coordinates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan sequences for non-B DNA motifs
    Scan(scan::ScanArgs),

    /// List the motif catalog
    Motifs(motifs::MotifsArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
    Csv,
}

/// Load a custom catalog if a path is given, otherwise the built-in one,
/// optionally capping pattern backtracking
///
/// # Errors
///
/// Returns a `CatalogError` if the catalog cannot be read or compiled.
pub fn load_catalog(
    path: Option<&Path>,
    backtrack_limit: Option<usize>,
) -> Result<MotifCatalog, CatalogError> {
    let catalog = match path {
        Some(path) => MotifCatalog::load_from_file(path)?,
        None => MotifCatalog::load_builtin()?,
    };

    match backtrack_limit {
        Some(limit) => catalog.with_backtrack_limit(limit),
        None => Ok(catalog),
    }
}
