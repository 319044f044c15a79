use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{load_catalog, OutputFormat};
use crate::core::table::{MotifCount, ResultTable};
use crate::scanning::analysis::{analyze, AnalysisError, AnalysisRequest, InputSource};
use crate::scanning::scanner::{MotifScanner, ScanConfig};

#[derive(Args)]
pub struct ScanArgs {
    /// FASTA files to scan (plain, .gz or .bgz). Use '-' for stdin
    pub inputs: Vec<PathBuf>,

    /// A raw DNA sequence to scan as the record 'Pasted_Sequence'
    #[arg(short, long)]
    pub sequence: Option<String>,

    /// Path to custom motif catalog (JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Number of worker threads (default: all available cores)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Abort the scan if a pattern needs more backtracking steps than this
    /// for one match attempt (default: unlimited)
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub backtrack_limit: Option<usize>,

    /// Only print per-motif occurrence counts
    #[arg(long)]
    pub summary: bool,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute scan subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, an input cannot be parsed,
/// the scan fails, or output cannot be written. Finding no motifs is not an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref(), args.backtrack_limit)
        .context("Failed to load motif catalog")?;

    if verbose {
        eprintln!("Loaded catalog with {} motifs", catalog.len());
    }

    let config = ScanConfig {
        threads: args.threads.map(usize::from),
    };
    let scanner = MotifScanner::with_config(&catalog, &config)?;

    let request = build_request(&args);
    let table = match analyze(&scanner, &request) {
        Ok(table) => table,
        Err(AnalysisError::NoMotifsFound { sequences }) => {
            eprintln!("No motifs found in {sequences} sequence(s).");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if verbose {
        eprintln!(
            "Found {} motif occurrences in {} sequences using {} threads",
            table.len(),
            table.sequence_ids().len(),
            scanner.threads()
        );
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if args.summary {
        write_summary(&mut out, &table.motif_counts(), format)?;
    } else {
        write_table(&mut out, &table, format)?;
    }
    out.flush()?;

    Ok(())
}

fn build_request(args: &ScanArgs) -> AnalysisRequest {
    let mut request = AnalysisRequest::new();
    for input in &args.inputs {
        let source = if input.to_string_lossy() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(input.clone())
        };
        request = request.with_source(source);
    }
    if let Some(sequence) = &args.sequence {
        request = request.with_pasted(sequence.clone());
    }
    request
}

fn write_table<W: Write>(out: &mut W, table: &ResultTable, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => write_text_table(out, table)?,
        OutputFormat::Json => {
            let json = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "match_count": table.len(),
                "rows": table.rows(),
                "summary": table.motif_counts(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Tsv => table.write_delimited(out, b'\t')?,
        OutputFormat::Csv => table.write_csv(out)?,
    }
    Ok(())
}

fn write_text_table<W: Write>(out: &mut W, table: &ResultTable) -> io::Result<()> {
    let id_width = table
        .rows()
        .iter()
        .map(|r| r.sequence_id.len())
        .max()
        .unwrap_or(0)
        .max("Sequence ID".len());
    let motif_width = table
        .rows()
        .iter()
        .map(|r| r.motif.len())
        .max()
        .unwrap_or(0)
        .max("Motif".len());

    writeln!(
        out,
        "{:<id_width$}  {:<motif_width$}  {:>10}  {:>10}  {:>10}  Matched Sequence",
        "Sequence ID", "Motif", "Start", "End", "Length"
    )?;
    writeln!(out, "{}", "─".repeat(id_width + motif_width + 56))?;

    for row in table.rows() {
        writeln!(
            out,
            "{:<id_width$}  {:<motif_width$}  {:>10}  {:>10}  {:>10}  {}",
            row.sequence_id, row.motif, row.start, row.end, row.length, row.matched_sequence
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Motif Occurrence Summary")?;
    for count in table.motif_counts() {
        writeln!(out, "   {:<motif_width$}  {}", count.motif, count.count)?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, counts: &[MotifCount], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for count in counts {
                writeln!(out, "{}\t{}", count.motif, count.count)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(counts)?)?;
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(out);
            wtr.write_record(["Motif", "Total Count"])?;
            for count in counts {
                wtr.write_record([count.motif.as_str(), count.count.to_string().as_str()])?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}
