//! Expected results to hold a comparison against. A run with no expectations
//! has no checks, and passes.
use crate::compare::Comparison;
use crate::set::NumericSet;

/// The results the caller expects. `None` means "don't check".
#[derive(Clone, Debug, Default)]
pub struct Expectations {
    /// Expected `|A|`
    pub a: Option<usize>,
    /// Expected `|B|`
    pub b: Option<usize>,
    /// Expected `|A ∩ B|`
    pub overlap: Option<usize>,
    /// Expected `|A ∪ B|`
    pub union: Option<usize>,
    /// Values that must not be members of `A`
    pub absent_from_a: Vec<u64>,
}

/// The outcome of one expectation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Check {
    /// What was checked, e.g. "overlap"
    pub what: String,
    /// What we found
    pub found: String,
    /// What we were told to expect
    pub expected: String,
    /// Did `found` match `expected`?
    pub passed: bool,
}

impl Check {
    fn count(what: &str, found: usize, expected: usize) -> Check {
        Check {
            what: what.to_owned(),
            found: found.to_string(),
            expected: expected.to_string(),
            passed: found == expected,
        }
    }
}

impl Expectations {
    /// Checks `comparison` (and the members of `a`) against `self`, in the
    /// order `a`, `b`, `overlap`, `union`, then each forbidden value.
    #[must_use]
    pub fn evaluate(&self, comparison: &Comparison, a: &NumericSet) -> Vec<Check> {
        let counts = [
            ("A", comparison.a_len, self.a),
            ("B", comparison.b_len, self.b),
            ("overlap", comparison.overlap_len(), self.overlap),
            ("union", comparison.union_len(), self.union),
        ];
        let mut checks: Vec<Check> = counts
            .into_iter()
            .filter_map(|(what, found, expected)| Some(Check::count(what, found, expected?)))
            .collect();
        for &value in &self.absent_from_a {
            let present = a.contains(value);
            checks.push(Check {
                what: format!("{value} in A"),
                found: if present { "present" } else { "absent" }.to_owned(),
                expected: "absent".to_owned(),
                passed: !present,
            });
        }
        checks
    }
}

/// Did every check pass? (Vacuously true for no checks.)
#[must_use]
pub fn all_passed(checks: &[Check]) -> bool {
    checks.iter().all(|c| c.passed)
}
