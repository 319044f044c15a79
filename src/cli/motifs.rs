use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::MotifCatalog;
use crate::cli::{load_catalog, OutputFormat};

#[derive(Args)]
pub struct MotifsArgs {
    /// Path to custom motif catalog (JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute motifs subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or serialized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MotifsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref(), None)?;

    match format {
        OutputFormat::Text => print_text(&catalog, verbose),
        OutputFormat::Json => println!("{}", catalog.to_json()?),
        OutputFormat::Tsv | OutputFormat::Csv => {
            let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(std::io::stdout().lock());
            wtr.write_record(["name", "pattern", "description"])?;
            for motif in &catalog {
                wtr.write_record([motif.name(), motif.pattern(), motif.description().unwrap_or("")])?;
            }
            wtr.flush()?;
        }
    }

    Ok(())
}

fn print_text(catalog: &MotifCatalog, verbose: bool) {
    let width = catalog.names().map(str::len).max().unwrap_or(0);

    println!("{} motifs:\n", catalog.len());
    for (i, motif) in catalog.iter().enumerate() {
        println!("{:>3}. {:<width$}  {}", i + 1, motif.name(), motif.pattern());
        if verbose {
            if let Some(description) = motif.description() {
                println!("     {description}");
            }
        }
    }
}
