//! Provides the `NumericSet` structure, the set of integers loaded from one
//! input file, and the `Constraints` a value must meet to be loaded.
use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::fmt;

type FxIndexSet = IndexSet<u64, FxBuildHasher>;

/// A `NumericSet` is a set of non-negative integers.
/// * Duplicates collapse, and the order of insertion carries no meaning
/// * There is no public way to add or remove members: a set is built once,
///   by the loader or by collecting an iterator, and then only read.
#[derive(Clone, Debug, Default)]
pub struct NumericSet {
    values: FxIndexSet,
}

impl NumericSet {
    /// Number of distinct members
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Is the set empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Is `value` a member?
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.values.contains(&value)
    }

    /// The members, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.values.iter().copied()
    }

    /// The members in increasing order
    #[must_use]
    pub fn sorted(&self) -> Vec<u64> {
        let mut sorted: Vec<u64> = self.iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// The members of both `self` and `other`. We walk the smaller set and
    /// look each member up in the larger.
    #[must_use]
    pub fn intersection(&self, other: &NumericSet) -> NumericSet {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|&v| large.contains(v)).collect()
    }

    /// The members of either `self` or `other`
    #[must_use]
    pub fn union(&self, other: &NumericSet) -> NumericSet {
        self.iter().chain(other.iter()).collect()
    }

    pub(crate) fn insert(&mut self, value: u64) {
        self.values.insert(value);
    }
}

impl FromIterator<u64> for NumericSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        NumericSet { values: iter.into_iter().collect() }
    }
}

impl PartialEq for NumericSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}
impl Eq for NumericSet {}

/// Restrictions on which parsed values are admitted to a `NumericSet`.
/// The default admits everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Admit only even values
    pub even_only: bool,
    /// Admit only values no greater than this
    pub max: Option<u64>,
}

/// Why a value was refused by `Constraints`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Odd, when only even values are admitted
    Odd,
    /// Greater than the bound
    AboveMax(u64),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Odd => write!(f, "odd"),
            Violation::AboveMax(max) => write!(f, "greater than {max}"),
        }
    }
}

impl Constraints {
    /// `Ok(())` if `value` is admitted. The bound is checked first, so a value
    /// that is both odd and too big is reported as too big.
    pub fn check(&self, value: u64) -> Result<(), Violation> {
        match self.max {
            Some(max) if value > max => Err(Violation::AboveMax(max)),
            _ if self.even_only && value % 2 != 0 => Err(Violation::Odd),
            _ => Ok(()),
        }
    }
}

/// A value that parsed, but was refused by the `Constraints`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flagged {
    /// The refused value
    pub value: u64,
    /// Why it was refused
    pub reason: Violation,
}

/// What the loader returns for one input file
#[derive(Clone, Debug, Default)]
pub struct Loaded {
    /// The admitted values
    pub set: NumericSet,
    /// The refused values, each listed once, in increasing order
    pub flagged: Vec<Flagged>,
    /// `false` if the file didn't exist (and the loader was told to shrug)
    pub found: bool,
}

impl Loaded {
    /// Sorts `values` into admitted and flagged according to `constraints`
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = u64>, constraints: Constraints) -> Loaded {
        let mut set = NumericSet::default();
        let mut refused = IndexMap::<u64, Violation, FxBuildHasher>::default();
        for value in values {
            match constraints.check(value) {
                Ok(()) => set.insert(value),
                Err(reason) => {
                    refused.insert(value, reason);
                }
            }
        }
        let mut flagged: Vec<Flagged> =
            refused.into_iter().map(|(value, reason)| Flagged { value, reason }).collect();
        flagged.sort_unstable_by_key(|f| f.value);
        Loaded { set, flagged, found: true }
    }

    /// The result of loading a file that isn't there
    #[must_use]
    pub fn not_found() -> Loaded {
        Loaded { found: false, ..Loaded::default() }
    }
}
