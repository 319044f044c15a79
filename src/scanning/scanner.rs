use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::catalog::store::MotifCatalog;
use crate::core::record::SequenceRecord;
use crate::core::table::ResultTable;
use crate::core::types::{MotifMatch, ResultRow};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Pattern engine failed on motif '{motif}': {message}")]
    Engine { motif: String, message: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for the scanner's worker pool
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Number of worker threads; `None` uses the host's available parallelism
    pub threads: Option<usize>,
}

/// Applies every catalog motif to each sequence.
///
/// Sequences are independent, so [`MotifScanner::scan_all`] runs one task per
/// sequence on a rayon pool and joins before building the table. Output order
/// follows input order regardless of completion order.
pub struct MotifScanner<'a> {
    catalog: &'a MotifCatalog,
    pool: Option<rayon::ThreadPool>,
}

impl<'a> MotifScanner<'a> {
    /// Create a scanner that runs on rayon's global pool
    pub fn new(catalog: &'a MotifCatalog) -> Self {
        Self {
            catalog,
            pool: None,
        }
    }

    /// Create a scanner with its own pool when a thread count is given
    ///
    /// # Errors
    ///
    /// Returns `ScanError::ThreadPool` if the pool cannot be built.
    pub fn with_config(catalog: &'a MotifCatalog, config: &ScanConfig) -> Result<Self, ScanError> {
        let pool = match config.threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };
        Ok(Self { catalog, pool })
    }

    pub fn catalog(&self) -> &MotifCatalog {
        self.catalog
    }

    /// Number of worker threads scans will use
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, rayon::ThreadPool::current_num_threads)
    }

    /// Find all motif occurrences in one sequence.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Engine` if the pattern engine gives up on a match
    /// attempt (backtrack limit exceeded).
    pub fn find_motifs(&self, residues: &str) -> Result<Vec<MotifMatch>, ScanError> {
        find_motifs(self.catalog, residues)
    }

    /// Scan every record and aggregate the matches into one table.
    ///
    /// Rows are ordered by record, then catalog motif, then occurrence.
    ///
    /// # Errors
    ///
    /// Returns the first `ScanError` raised by any record; no partial table
    /// is produced.
    pub fn scan_all(&self, records: &[SequenceRecord]) -> Result<ResultTable, ScanError> {
        let start_time = std::time::Instant::now();
        let catalog = self.catalog;

        let scan = || {
            records
                .par_iter()
                .map(|record| find_motifs(catalog, &record.residues))
                .collect::<Result<Vec<_>, ScanError>>()
        };

        let per_record = match &self.pool {
            Some(pool) => pool.install(scan)?,
            None => scan()?,
        };

        let table: ResultTable = records
            .iter()
            .zip(per_record)
            .flat_map(|(record, matches)| {
                let length = record.len();
                matches
                    .into_iter()
                    .map(move |m| ResultRow::new(record.id.clone(), length, m))
            })
            .collect();

        debug!(
            "Scanned {} sequences with {} motifs on {} threads: {} matches in {:?}",
            records.len(),
            catalog.len(),
            self.threads(),
            table.len(),
            start_time.elapsed()
        );

        Ok(table)
    }
}

/// Find all occurrences of every catalog motif in `residues`.
///
/// For each motif in catalog order, matches are reported left to right without
/// overlap: a match consumes its span before the search resumes. Positions are
/// 1-based inclusive. Characters outside the motif alphabet simply never match.
///
/// # Errors
///
/// Returns `ScanError::Engine` if the pattern engine gives up on a match attempt.
pub fn find_motifs(catalog: &MotifCatalog, residues: &str) -> Result<Vec<MotifMatch>, ScanError> {
    let mut matches = Vec::new();

    for motif in catalog {
        for result in motif.regex().find_iter(residues) {
            let m = result.map_err(|e| ScanError::Engine {
                motif: motif.name().to_string(),
                message: e.to_string(),
            })?;
            matches.push(MotifMatch::from_offsets(
                motif.name(),
                m.start(),
                m.end(),
                m.as_str(),
            ));
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::motif::MotifDefinition;

    fn builtin() -> MotifCatalog {
        MotifCatalog::load_builtin().unwrap()
    }

    fn of_motif<'m>(matches: &'m [MotifMatch], motif: &str) -> Vec<&'m MotifMatch> {
        matches.iter().filter(|m| m.motif == motif).collect()
    }

    #[test]
    fn test_z_dna_full_span() {
        let catalog = builtin();
        let seq = "CG".repeat(7);
        let matches = find_motifs(&catalog, &seq).unwrap();
        let z = of_motif(&matches, "Z-DNA");
        assert_eq!(z.len(), 1);
        assert_eq!((z[0].start, z[0].end), (1, 14));
        assert_eq!(z[0].matched, seq);
    }

    #[test]
    fn test_z_dna_needs_six_repeats() {
        let catalog = builtin();
        let matches = find_motifs(&catalog, &"CG".repeat(5)).unwrap();
        assert!(of_motif(&matches, "Z-DNA").is_empty());
    }

    #[test]
    fn test_r_loop_full_span() {
        let catalog = builtin();
        let matches = find_motifs(&catalog, "AAAACCCCAAAA").unwrap();
        let r = of_motif(&matches, "R-Loop");
        assert_eq!(r.len(), 1);
        assert_eq!((r[0].start, r[0].end), (1, 12));
    }

    #[test]
    fn test_slipped_dna_dinucleotide() {
        let catalog = builtin();
        let matches = find_motifs(&catalog, "ATATATAT").unwrap();
        let slipped = of_motif(&matches, "Slipped DNA");
        assert_eq!(slipped.len(), 1);
        assert_eq!(slipped[0].start, 1);
        assert_eq!(slipped[0].matched, "ATATATAT");
    }

    #[test]
    fn test_g_quadruplex() {
        let catalog = builtin();
        let seq = "GGGTTTAGGGTTTAGGGTTTAGGG";
        let matches = find_motifs(&catalog, seq).unwrap();
        let g4 = of_motif(&matches, "G-Quadruplex");
        assert!(!g4.is_empty());
        assert_eq!((g4[0].start, g4[0].end), (1, 24));
    }

    #[test]
    fn test_wildcard_motifs_match_any_loop() {
        let catalog = builtin();
        let matches = find_motifs(&catalog, "GGGACTGGGTTGGG").unwrap();
        assert_eq!(of_motif(&matches, "G-Triplex DNA (G3-DNA)").len(), 1);
        assert!(!of_motif(&matches, "G-Hairpin").is_empty());
    }

    #[test]
    fn test_i_motif() {
        let catalog = builtin();
        let matches = find_motifs(&catalog, "GGCACCTCCACGG").unwrap();
        let i = of_motif(&matches, "I-Motif");
        assert_eq!(i.len(), 1);
        assert_eq!(i[0].matched, "CACCTCCAC");
    }

    #[test]
    fn test_output_in_catalog_order() {
        let catalog = builtin();
        // Z-DNA at the end of the sequence, Slipped DNA at the start
        let seq = format!("ATATAT{}", "CG".repeat(6));
        let matches = find_motifs(&catalog, &seq).unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.motif.as_str()).collect();
        let slipped = names.iter().position(|n| *n == "Slipped DNA").unwrap();
        let z = names.iter().position(|n| *n == "Z-DNA").unwrap();
        assert!(slipped < z);
    }

    #[test]
    fn test_matches_are_non_overlapping() {
        let catalog = builtin();
        let seq = "GGGAGGGAGGGAGGGTTTTGGGCGGGAAGGGCCGGG";
        let matches = find_motifs(&catalog, seq).unwrap();
        for motif in catalog.names() {
            let spans = of_motif(&matches, motif);
            for pair in spans.windows(2) {
                assert!(pair[0].end < pair[1].start, "{motif} overlaps: {pair:?}");
            }
        }
    }

    #[test]
    fn test_lowercase_and_unknown_characters_do_not_match() {
        let catalog = builtin();
        assert!(find_motifs(&catalog, &"cg".repeat(10)).unwrap().is_empty());
        assert!(find_motifs(&catalog, "XYZ-123").unwrap().is_empty());
        assert!(find_motifs(&catalog, "").unwrap().is_empty());
    }

    #[test]
    fn test_scan_all_tags_rows_in_record_order() {
        let catalog = builtin();
        let scanner = MotifScanner::new(&catalog);
        let records = vec![
            SequenceRecord::new("a", "CG".repeat(6)),
            SequenceRecord::new("b", "ACGT"),
            SequenceRecord::new("c", "AAAACCCCAAAA"),
        ];

        let table = scanner.scan_all(&records).unwrap();
        let ids = table.sequence_ids();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(table
            .rows()
            .iter()
            .all(|r| r.length == records.iter().find(|s| s.id == r.sequence_id).unwrap().len()));
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let catalog = builtin();
        let records: Vec<SequenceRecord> = (0..32)
            .map(|i| SequenceRecord::new(format!("s{i}"), "GGGTTAGGGATATAT".repeat(i % 5 + 1)))
            .collect();

        let global = MotifScanner::new(&catalog).scan_all(&records).unwrap();
        let pooled = MotifScanner::with_config(&catalog, &ScanConfig { threads: Some(3) })
            .unwrap()
            .scan_all(&records)
            .unwrap();

        assert_eq!(global, pooled);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = MotifCatalog::from_definitions(vec![MotifDefinition::new(
            "TATA box",
            "TATA[AT]A[AT]",
        )])
        .unwrap();
        let matches = find_motifs(&catalog, "GCTATAAAAGC").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (3, 9));
    }

    #[test]
    fn test_backtrack_limit_surfaces_engine_error() {
        let catalog = MotifCatalog::from_definitions_with_limit(
            vec![MotifDefinition::new("Repeat", r"([ACGT]{2,6})\1{1,}X")],
            10,
        )
        .unwrap();
        let result = find_motifs(&catalog, &"ACGTTGCA".repeat(50));
        assert!(matches!(
            result,
            Err(ScanError::Engine { motif, .. }) if motif == "Repeat"
        ));
    }
}
