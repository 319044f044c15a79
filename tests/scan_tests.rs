//! End-to-end scanning tests
//!
//! Exercises the public scanning API against the built-in catalog: coordinate
//! invariants, non-overlap, determinism under parallel scheduling, batch
//! splitting, and the canonical motif examples.

use nonb_finder::parsing::fasta::parse_fasta_text;
use nonb_finder::{
    analyze, AnalysisError, AnalysisRequest, InputSource, MotifCatalog, MotifScanner, ScanConfig,
    SequenceRecord,
};

/// Deterministic pseudo-random DNA with G/C-rich stretches so that most
/// catalog motifs fire somewhere
fn synthetic_sequence(seed: u64, len: usize) -> String {
    const ALPHABET: &[u8] = b"ACGTGGGCGA";
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            #[allow(clippy::cast_possible_truncation)]
            let idx = ((state >> 33) % ALPHABET.len() as u64) as usize;
            ALPHABET[idx] as char
        })
        .collect()
}

fn synthetic_records(count: usize) -> Vec<SequenceRecord> {
    (0..count)
        .map(|i| SequenceRecord::new(format!("syn{i}"), synthetic_sequence(i as u64, 300 + i * 17)))
        .collect()
}

/// Uniform pseudo-random ACGT, with few long repeats
fn uniform_sequence(seed: u64, len: usize) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            #[allow(clippy::cast_possible_truncation)]
            let idx = ((state >> 33) % ALPHABET.len() as u64) as usize;
            ALPHABET[idx] as char
        })
        .collect()
}

fn bytes(name: &str, content: &str) -> InputSource {
    InputSource::Bytes {
        name: name.to_string(),
        content: content.as_bytes().to_vec(),
    }
}

#[test]
fn test_rows_lie_within_sequence_and_match_residues() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let records = synthetic_records(20);

    let table = scanner.scan_all(&records).unwrap();
    assert!(!table.is_empty(), "synthetic input should contain motifs");

    for row in table.rows() {
        let record = records.iter().find(|r| r.id == row.sequence_id).unwrap();
        assert_eq!(row.length, record.len());
        assert!(1 <= row.start && row.start <= row.end && row.end <= row.length);
        assert_eq!(&record.residues[row.start - 1..row.end], row.matched_sequence);
    }
}

#[test]
fn test_matches_of_one_motif_never_overlap() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let records = synthetic_records(10);
    let table = scanner.scan_all(&records).unwrap();

    for record in &records {
        for motif in catalog.names() {
            let spans: Vec<(usize, usize)> = table
                .rows()
                .iter()
                .filter(|r| r.sequence_id == record.id && r.motif == motif)
                .map(|r| (r.start, r.end))
                .collect();
            for pair in spans.windows(2) {
                assert!(
                    pair[0].1 < pair[1].0,
                    "{motif} in {} overlaps: {pair:?}",
                    record.id
                );
            }
        }
    }
}

#[test]
fn test_scanning_is_deterministic_across_thread_counts() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let records = synthetic_records(40);

    let single = MotifScanner::with_config(&catalog, &ScanConfig { threads: Some(1) })
        .unwrap()
        .scan_all(&records)
        .unwrap();
    let many = MotifScanner::with_config(&catalog, &ScanConfig { threads: Some(8) })
        .unwrap()
        .scan_all(&records)
        .unwrap();
    let again = MotifScanner::new(&catalog).scan_all(&records).unwrap();

    assert_eq!(single, many);
    assert_eq!(single, again);
}

#[test]
fn test_split_batches_equal_single_batch() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let records = synthetic_records(12);

    let whole = scanner.scan_all(&records).unwrap();
    let mut split = scanner.scan_all(&records[..5]).unwrap();
    split.append(scanner.scan_all(&records[5..]).unwrap());

    assert_eq!(whole, split);
}

#[test]
fn test_rows_grouped_by_sequence_then_catalog_order() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let records = synthetic_records(6);
    let table = scanner.scan_all(&records).unwrap();

    let motif_rank = |name: &str| catalog.names().position(|n| n == name).unwrap();
    let record_rank = |id: &str| records.iter().position(|r| r.id == id).unwrap();

    for pair in table.rows().windows(2) {
        let a = (record_rank(&pair[0].sequence_id), motif_rank(&pair[0].motif));
        let b = (record_rank(&pair[1].sequence_id), motif_rank(&pair[1].motif));
        assert!(a <= b, "rows out of order: {pair:?}");
        if a == b {
            assert!(pair[0].start < pair[1].start);
        }
    }
}

#[test]
fn test_z_dna_covers_whole_cg_repeat() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let request = AnalysisRequest::new().with_pasted("CGCGCGCGCGCGCG");

    let table = analyze(&scanner, &request).unwrap();
    let z: Vec<_> = table.rows().iter().filter(|r| r.motif == "Z-DNA").collect();
    assert_eq!(z.len(), 1);
    assert_eq!(z[0].sequence_id, "Pasted_Sequence");
    assert_eq!((z[0].start, z[0].end), (1, 14));
    assert_eq!(z[0].length, 14);
}

#[test]
fn test_r_loop_spans_flanking_a_tracts() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let request = AnalysisRequest::new().with_pasted("AAAACCCCAAAA");

    let table = analyze(&scanner, &request).unwrap();
    let r: Vec<_> = table.rows().iter().filter(|r| r.motif == "R-Loop").collect();
    assert_eq!(r.len(), 1);
    assert_eq!(r[0].matched_sequence, "AAAACCCCAAAA");
}

#[test]
fn test_slipped_dna_on_dinucleotide_repeat() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let request = AnalysisRequest::new().with_pasted("ATATATAT");

    let table = analyze(&scanner, &request).unwrap();
    let slipped: Vec<_> = table
        .rows()
        .iter()
        .filter(|r| r.motif == "Slipped DNA")
        .collect();
    assert_eq!(slipped.len(), 1);
    assert_eq!(slipped[0].start, 1);
}

#[test]
fn test_g_quadruplex_on_telomeric_repeat() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let request = AnalysisRequest::new().with_source(bytes(
        "g4.fa",
        ">g4\nGGGTTTAGGGTTTAGGGTTTAGGG\n",
    ));

    let table = analyze(&scanner, &request).unwrap();
    assert!(table.rows().iter().any(|r| r.motif == "G-Quadruplex"));
}

#[test]
fn test_no_motifs_reported_as_outcome() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);

    let empty = AnalysisRequest::new().with_source(bytes("empty.fa", ">empty\n"));
    assert!(matches!(
        analyze(&scanner, &empty),
        Err(AnalysisError::NoMotifsFound { sequences: 1 })
    ));

    let plain = AnalysisRequest::new().with_pasted("ACGTTGCA");
    assert!(matches!(
        analyze(&scanner, &plain),
        Err(AnalysisError::NoMotifsFound { sequences: 1 })
    ));
}

#[test]
fn test_identical_records_are_not_deduplicated() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let request = AnalysisRequest::new().with_source(bytes(
        "twins.fa",
        ">twin1\nCGCGCGCGCGCGCG\n>twin2\nCGCGCGCGCGCGCG\n",
    ));

    let table = analyze(&scanner, &request).unwrap();
    let first: Vec<_> = table.rows().iter().filter(|r| r.sequence_id == "twin1").collect();
    let second: Vec<_> = table.rows().iter().filter(|r| r.sequence_id == "twin2").collect();

    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(
            (&a.motif, a.start, a.end, &a.matched_sequence),
            (&b.motif, b.start, b.end, &b.matched_sequence)
        );
    }
}

#[test]
fn test_multiple_files_concatenate_in_order() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let request = AnalysisRequest::new()
        .with_source(bytes("a.fa", ">a1\nAAAACCCCAAAA\n"))
        .with_source(bytes("b.fa", ">b1\nCGCGCGCGCGCG\n"))
        .with_pasted("GGGAGGGAGGG");

    let table = analyze(&scanner, &request).unwrap();
    assert_eq!(table.sequence_ids(), vec!["a1", "b1", "Pasted_Sequence"]);
}

#[test]
fn test_parsed_fasta_scans_like_direct_records() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);

    let parsed = parse_fasta_text(">s1\nGGGTTTAGGG\nTTTAGGGTTTAGGG\n").unwrap();
    let direct = vec![SequenceRecord::new("s1", "GGGTTTAGGGTTTAGGGTTTAGGG")];

    assert_eq!(
        scanner.scan_all(&parsed).unwrap(),
        scanner.scan_all(&direct).unwrap()
    );
}

#[test]
fn test_long_sequence_scans_to_completion() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::new(&catalog);
    let residues = uniform_sequence(42, 20_000);
    let request = AnalysisRequest::new().with_pasted(residues.clone());

    match analyze(&scanner, &request) {
        Ok(table) => {
            for row in table.rows() {
                assert_eq!(row.length, 20_000);
                assert_eq!(&residues[row.start - 1..row.end], row.matched_sequence);
            }
        }
        Err(AnalysisError::NoMotifsFound { sequences: 1 }) => {}
        Err(e) => panic!("20 kb scan failed: {e}"),
    }
}

#[test]
fn test_long_fasta_record_scans_in_batch() {
    let catalog = MotifCatalog::load_builtin().unwrap();
    let scanner = MotifScanner::with_config(&catalog, &ScanConfig { threads: Some(2) }).unwrap();
    let records = vec![
        SequenceRecord::new("long", uniform_sequence(7, 20_000)),
        SequenceRecord::new("short", "CGCGCGCGCGCGCG"),
    ];

    let table = scanner.scan_all(&records).unwrap();
    assert!(table.rows().iter().any(|r| r.sequence_id == "short" && r.motif == "Z-DNA"));
}
