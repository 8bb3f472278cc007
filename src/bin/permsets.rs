//! Regenerates the data sets `numset` compares: the distinct permanents of
//! the nonsingular, or singular, (0,1)-matrices of a given order, one per
//! line and in increasing order.
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use numset::search::{search, Kind};

/// List the distinct permanents of (0,1)-matrices of one order
#[derive(Debug, Parser)]
#[command(name = "permsets", version)]
struct Args {
    /// Which matrices to look at
    #[arg(value_enum)]
    kind: Kind,
    /// Order of the matrices
    #[arg(long, short)]
    order: usize,
    /// File to write the values to [default: stdout]
    #[arg(long)]
    out: Option<PathBuf>,
    /// Logging level to use: one of "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();
    numset::install_logger(args.log_level)?;

    let found = search(args.kind, args.order)?;
    tracing::info!(distinct = found.values.len(), matrices = found.matrices, "done");

    match &args.out {
        None => write_values(&found.values.sorted(), BufWriter::new(io::stdout().lock())),
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Can't create file: {}", path.display()))?;
            write_values(&found.values.sorted(), BufWriter::new(file))
                .with_context(|| format!("Can't write file: {}", path.display()))
        }
    }
}

fn write_values(values: &[u64], mut out: impl Write) -> Result<()> {
    for value in values {
        writeln!(out, "{value}")?;
    }
    out.flush()?;
    Ok(())
}
