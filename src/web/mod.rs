//! Web server for browser-based motif analysis.
//!
//! This module provides a small upload-and-analyze service using Axum.
//! Users can upload FASTA files and/or paste a sequence, and get the result
//! table back as JSON or as a CSV download.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! nonb-finder serve
//!
//! # Custom port and auto-open browser
//! nonb-finder serve --port 3000 --open
//!
//! # Bind to all interfaces
//! nonb-finder serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Upload form
//! - `POST /api/analyze` - Scan uploaded FASTA (`file`, repeatable) and/or
//!   pasted text (`sequence`); `format=csv` returns a CSV attachment
//! - `GET /api/motifs` - List the motifs in the catalog

pub mod server;
