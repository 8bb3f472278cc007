//! Code to parse the command line using `clap`, and the definition of the
//! parsed result, `Config`.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::num::NonZeroU64;
use std::path::PathBuf;

use crate::checks::Expectations;
use crate::compare::GapScan;
use crate::operands::{LoadConfig, MissingFile};
use crate::set::Constraints;
use crate::style::ColorChoice;
use crate::tokens::Split;

/// Returns the parsed command line, or exits with clap's usual message if
/// the command line doesn't make sense.
#[must_use]
pub fn parsed() -> Config {
    Config::from_cli(CliArgs::parse()).unwrap_or_else(|e| e.exit())
}

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the first operand
    pub a: PathBuf,
    /// Path of the second operand
    pub b: PathBuf,
    /// Name for the first operand in the report
    pub label_a: String,
    /// Name for the second operand in the report
    pub label_b: String,
    /// How to load both operands
    pub load: LoadConfig,
    /// Whether, and how, to look for gaps
    pub gaps: Option<GapScan>,
    /// List gaps only when there are fewer than this many
    pub list_gaps_below: usize,
    /// Print the members of the overlap
    pub list_overlap: bool,
    /// Expected results
    pub expectations: Expectations,
    /// When to color the report
    pub color: ColorChoice,
    /// Most verbose level of log message written to stderr
    pub log_level: tracing::Level,
}

/// Compare two files of integers, treating each as a set
#[derive(Debug, Parser)]
#[command(name = "numset", version)]
struct CliArgs {
    /// First input file (A)
    a: PathBuf,
    /// Second input file (B)
    b: PathBuf,

    /// Name for A in the report
    #[arg(long, default_value = "A")]
    label_a: String,
    /// Name for B in the report
    #[arg(long, default_value = "B")]
    label_b: String,

    /// How to cut input files into tokens
    #[arg(long, value_enum, default_value_t)]
    split: Split,
    /// What to do when an input file doesn't exist
    #[arg(long, value_enum, default_value_t)]
    missing: MissingFile,

    /// Leave odd values out of both sets (and flag them)
    #[arg(long)]
    even: bool,
    /// Leave values greater than MAX out of both sets (and flag them)
    #[arg(long, conflicts_with = "order")]
    max: Option<u64>,
    /// Like --max, with MAX = ORDER factorial
    #[arg(long)]
    order: Option<u64>,

    /// Look for values up to the maximum that are in neither set
    #[arg(long)]
    gaps: bool,
    /// Step between the values the gap scan looks at [default: 2 with --even, else 1]
    #[arg(long)]
    stride: Option<NonZeroU64>,
    /// List the gaps only if there are fewer than this many
    #[arg(long, default_value_t = 20)]
    list_gaps_below: usize,
    /// Print the values in both sets
    #[arg(long)]
    list_overlap: bool,

    /// Expected number of values in A
    #[arg(long, value_name = "COUNT")]
    expect_a: Option<usize>,
    /// Expected number of values in B
    #[arg(long, value_name = "COUNT")]
    expect_b: Option<usize>,
    /// Expected number of values in both sets
    #[arg(long, value_name = "COUNT")]
    expect_overlap: Option<usize>,
    /// Expected number of values in either set
    #[arg(long, value_name = "COUNT")]
    expect_union: Option<usize>,
    /// A value that must not be in A (may be repeated)
    #[arg(long, value_name = "VALUE")]
    absent_from_a: Vec<u64>,

    /// When to color the report
    #[arg(long, value_enum, default_value_t)]
    color: ColorChoice,
    /// Logging level to use: one of "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

/// `n!`, if it fits in a `u64`
fn factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1_u64, u64::checked_mul)
}

impl Config {
    fn from_cli(cli: CliArgs) -> Result<Config, clap::Error> {
        let max = match cli.order {
            None => cli.max,
            Some(order) => match factorial(order) {
                Some(max) => Some(max),
                None => {
                    let complaint = format!("{order}! is too big for a 64-bit integer");
                    return Err(CliArgs::command().error(ErrorKind::ValueValidation, complaint));
                }
            },
        };

        let gaps = match (cli.gaps, max) {
            (false, _) => None,
            (true, None) => {
                let complaint = "--gaps needs an upper bound: give --max or --order";
                return Err(CliArgs::command().error(ErrorKind::MissingRequiredArgument, complaint));
            }
            (true, Some(upper)) => {
                let default_stride = if cli.even { 2 } else { 1 };
                let stride = cli.stride.or(NonZeroU64::new(default_stride));
                stride.map(|stride| GapScan { upper, stride })
            }
        };

        Ok(Config {
            a: cli.a,
            b: cli.b,
            label_a: cli.label_a,
            label_b: cli.label_b,
            load: LoadConfig {
                split: cli.split,
                constraints: Constraints { even_only: cli.even, max },
                missing: cli.missing,
            },
            gaps,
            list_gaps_below: cli.list_gaps_below,
            list_overlap: cli.list_overlap,
            expectations: Expectations {
                a: cli.expect_a,
                b: cli.expect_b,
                overlap: cli.expect_overlap,
                union: cli.expect_union,
                absent_from_a: cli.absent_from_a,
            },
            color: cli.color,
            log_level: cli.log_level,
        })
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn config(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = ["numset"].iter().chain(args.iter());
        Config::from_cli(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn cli_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let c = config(&["a.txt", "b.txt"]).unwrap();
        assert_eq!(c.a, PathBuf::from("a.txt"));
        assert_eq!((c.label_a.as_str(), c.label_b.as_str()), ("A", "B"));
        assert_eq!(c.load.split, Split::Tokens);
        assert_eq!(c.load.missing, MissingFile::Warn);
        assert_eq!(c.load.constraints, Constraints::default());
        assert!(c.gaps.is_none());
        assert_eq!(c.list_gaps_below, 20);
        assert_eq!(c.log_level, tracing::Level::WARN);
    }

    #[test]
    fn order_sets_the_bound_to_its_factorial() {
        let c = config(&["a", "b", "--order", "7", "--even", "--gaps"]).unwrap();
        assert_eq!(c.load.constraints, Constraints { even_only: true, max: Some(5040) });
        let gaps = c.gaps.unwrap();
        assert_eq!((gaps.upper, gaps.stride.get()), (5040, 2));
    }

    #[test]
    fn explicit_stride_wins() {
        let c = config(&["a", "b", "--max", "100", "--even", "--gaps", "--stride", "10"]).unwrap();
        assert_eq!(c.gaps.unwrap().stride.get(), 10);
        let c = config(&["a", "b", "--max", "100", "--gaps"]).unwrap();
        assert_eq!(c.gaps.unwrap().stride.get(), 1);
    }

    #[test]
    fn bad_combinations() {
        let kind = |args: &[&str]| config(args).unwrap_err().kind();
        assert_eq!(kind(&["a", "b", "--gaps"]), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind(&["a", "b", "--order", "21"]), ErrorKind::ValueValidation);
        assert_eq!(kind(&["a", "b", "--order", "6", "--max", "720"]), ErrorKind::ArgumentConflict);
        assert_eq!(
            kind(&["a", "b", "--gaps", "--max", "9", "--stride", "0"]),
            ErrorKind::ValueValidation
        );
        assert_eq!(kind(&["a"]), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn expectations_are_collected() {
        let c = config(&[
            "a", "b", "--expect-a", "149", "--expect-overlap", "9", "--absent-from-a", "0",
            "--absent-from-a", "1",
        ])
        .unwrap();
        let e = c.expectations;
        assert_eq!((e.a, e.b, e.overlap, e.union), (Some(149), None, Some(9), None));
        assert_eq!(e.absent_from_a, vec![0, 1]);
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(6), Some(720));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
    }
}
