//! Writes the human-readable comparison report.
use anyhow::Result;
use std::io;
use std::num::NonZeroU64;
use std::path::Path;
use textwrap::Options;

use crate::checks::Check;
use crate::compare::Comparison;
use crate::set::Loaded;
use crate::style::{display_width, StyleSheet};

/// One of the two operands, as the report sees it
pub struct Source<'a> {
    /// "A" or "B"
    pub letter: char,
    /// The caller's name for the data, e.g. "Nonsingular"
    pub label: &'a str,
    /// Where it was loaded from
    pub path: &'a Path,
    /// What was loaded
    pub loaded: &'a Loaded,
}

impl Source<'_> {
    fn name(&self) -> String {
        if self.label == self.letter.to_string() {
            self.label.to_owned()
        } else {
            format!("{} ({})", self.label, self.letter)
        }
    }
}

/// The result of a gap scan, with the parameters that produced it
pub struct Gaps {
    /// Upper end of the scanned range
    pub upper: u64,
    /// Step between scanned values
    pub stride: NonZeroU64,
    /// How many values were found in neither set
    pub count: u128,
    /// The values found in neither set, when there are few enough to list;
    /// empty otherwise
    pub listed: Vec<u64>,
}

/// Everything that goes into a report
pub struct Report<'a> {
    /// The first operand
    pub a: Source<'a>,
    /// The second operand
    pub b: Source<'a>,
    /// Their comparison
    pub comparison: &'a Comparison,
    /// Print the members of the overlap?
    pub list_overlap: bool,
    /// The gap scan, if one was asked for
    pub gaps: Option<Gaps>,
    /// Outcomes of the caller's expectations
    pub checks: &'a [Check],
}

/// Writes `report` to `out`, styled by `style`, wrapping number lists to
/// `width` columns.
pub fn write_report(
    report: &Report,
    style: &StyleSheet,
    width: usize,
    mut out: impl io::Write,
) -> Result<()> {
    let Report { a, b, comparison: c, .. } = report;

    let heading = style.title(&format!("{} vs {}", a.name(), b.name()));
    writeln!(out, "{heading}")?;
    writeln!(out, "{}", "-".repeat(display_width(&heading)))?;

    for source in [a, b] {
        if !source.loaded.found {
            let complaint = format!("{} not found, counted as empty", source.path.display());
            writeln!(out, "{}", style.bad(&complaint))?;
        }
    }

    let rows = [
        (a.name(), c.a_len),
        (b.name(), c.b_len),
        ("Overlap (A and B)".to_owned(), c.overlap_len()),
        ("Union (A or B)".to_owned(), c.union_len()),
    ];
    // Padding in `{:width$}` counts chars, so the width must too
    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, count) in &rows {
        writeln!(out, "{label:label_width$} : {count}")?;
    }
    writeln!(out, "{} + {} - {} = {}", c.a_len, c.b_len, c.overlap_len(), c.union_len())?;

    if report.list_overlap {
        writeln!(out)?;
        writeln!(out, "{}", style.title("Overlap values"))?;
        writeln!(out, "{}", number_list(&c.overlap_sorted(), width))?;
    }

    for source in [a, b] {
        if source.loaded.flagged.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", style.title(&format!("Left out of {}", source.name())))?;
        for flagged in &source.loaded.flagged {
            writeln!(out, "  {} ({})", flagged.value, flagged.reason)?;
        }
    }

    if let Some(gaps) = &report.gaps {
        writeln!(out)?;
        writeln!(out, "{}", style.title("Gaps"))?;
        let which = if gaps.stride.get() == 1 {
            "values".to_owned()
        } else {
            format!("multiples of {}", gaps.stride)
        };
        writeln!(out, "Of the {which} up to {}, {} are missing.", gaps.upper, gaps.count)?;
        if !gaps.listed.is_empty() {
            writeln!(out, "{}", number_list(&gaps.listed, width))?;
        }
    }

    if !report.checks.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", style.title("Checks"))?;
        for check in report.checks {
            let mark = if check.passed {
                style.good("✓")
            } else {
                style.bad("✗")
            };
            let Check { what, found, expected, .. } = check;
            writeln!(out, "  {mark} {what}: {found} (expected {expected})")?;
        }
    }

    out.flush()?;
    Ok(())
}

/// `values` separated by commas, indented, and wrapped to `width` columns
fn number_list(values: &[u64], width: usize) -> String {
    let joined = values.iter().map(u64::to_string).collect::<Vec<_>>().join(", ");
    let options = Options::new(width.max(20)).initial_indent("  ").subsequent_indent("  ");
    textwrap::fill(&joined, options)
}
