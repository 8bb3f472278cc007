//! The `run` function is the kernel of the application. The `args` module
//! parses the command line, `operands` loads each input file as a
//! `NumericSet`, `compare` does the set arithmetic, and `report` prints it.
//!
//! An input file is any text containing non-negative integers separated by
//! commas or whitespace (or, with `Split::Lines`, one per line). Whatever
//! isn't such an integer is skipped without complaint.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use anyhow::{Context, Result};
use is_terminal::IsTerminal;

pub mod args;
pub mod checks;
pub mod compare;
pub mod matrix;
pub mod operands;
pub mod report;
pub mod search;
pub mod set;
pub mod style;
pub mod tokens;

use crate::args::Config;
use crate::checks::all_passed;
use crate::compare::{compare, missing};
use crate::operands::load;
use crate::report::{write_report, Gaps, Report, Source};

/// Loads `config.a` and `config.b`, compares them, and writes the report to
/// `out`, wrapping long lists at `width` columns. Returns `true` if every
/// expectation in `config` was met.
pub fn run(config: &Config, width: usize, out: impl std::io::Write) -> Result<bool> {
    let a = load(&config.a, &config.load).context("Can't load A")?;
    let b = load(&config.b, &config.load).context("Can't load B")?;

    let comparison = compare(&a.set, &b.set);
    let gaps = config.gaps.map(|scan| {
        let missing = missing(&a.set, &b.set, scan.upper, scan.stride);
        let count = missing.remaining();
        // Only a short list is ever collected, however wide the range
        let listed = if count < config.list_gaps_below as u128 {
            missing.collect()
        } else {
            Vec::new()
        };
        Gaps { upper: scan.upper, stride: scan.stride, count, listed }
    });
    let checks = config.expectations.evaluate(&comparison, &a.set);
    for failed in checks.iter().filter(|c| !c.passed) {
        tracing::info!(
            what = %failed.what,
            found = %failed.found,
            expected = %failed.expected,
            "check failed"
        );
    }

    let report = Report {
        a: Source { letter: 'A', label: &config.label_a, path: &config.a, loaded: &a },
        b: Source { letter: 'B', label: &config.label_b, path: &config.b, loaded: &b },
        comparison: &comparison,
        list_overlap: config.list_overlap,
        gaps,
        checks: &checks,
    };
    write_report(&report, style::colored(config.color), width, out)?;
    Ok(all_passed(&checks))
}

/// Sends `tracing` events at `level` and above to stderr, without timestamps,
/// colored only when stderr is a terminal.
pub fn install_logger(level: tracing::Level) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .without_time()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
