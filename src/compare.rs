//! Houses the `compare` and `gap_scan` functions. Neither can fail: any two
//! sets, empty or not, have an intersection and a union.

use std::iter::Peekable;
use std::num::NonZeroU64;

use crate::set::NumericSet;

/// The result of comparing two sets `A` and `B`
#[derive(Clone, Debug)]
pub struct Comparison {
    /// `|A|`
    pub a_len: usize,
    /// `|B|`
    pub b_len: usize,
    /// `A ∩ B`
    pub overlap: NumericSet,
}

impl Comparison {
    /// `|A ∩ B|`
    #[must_use]
    pub fn overlap_len(&self) -> usize {
        self.overlap.len()
    }

    /// `|A ∪ B|`, computed as `|A| + |B| - |A ∩ B|`. Since the overlap is no
    /// bigger than either set, this can't underflow.
    #[must_use]
    pub fn union_len(&self) -> usize {
        self.a_len + self.b_len - self.overlap_len()
    }

    /// The members of `A ∩ B` in increasing order
    #[must_use]
    pub fn overlap_sorted(&self) -> Vec<u64> {
        self.overlap.sorted()
    }
}

/// Where a gap scan looks: `0, stride, 2*stride, ...` up to `upper`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GapScan {
    /// Largest value that may be scanned
    pub upper: u64,
    /// Step between scanned values
    pub stride: NonZeroU64,
}

/// Compares `a` and `b`
#[must_use]
pub fn compare(a: &NumericSet, b: &NumericSet) -> Comparison {
    Comparison { a_len: a.len(), b_len: b.len(), overlap: a.intersection(b) }
}

/// The values `0, stride, 2*stride, ...` up to and including `upper` that are
/// in neither `a` nor `b`, in increasing order. This materializes every gap;
/// use `missing` when the range may be large.
#[must_use]
pub fn gap_scan(a: &NumericSet, b: &NumericSet, upper: u64, stride: NonZeroU64) -> Vec<u64> {
    missing(a, b, upper, stride).collect()
}

/// A lazy `gap_scan`. Building it costs time and memory proportional to
/// `|A ∪ B|`, not to the scanned range, and it knows how many gaps it will
/// yield before yielding any.
#[must_use]
pub fn missing(a: &NumericSet, b: &NumericSet, upper: u64, stride: NonZeroU64) -> Missing {
    let step = stride.get();
    let mut covered: Vec<u64> = a
        .iter()
        .chain(b.iter().filter(|&v| !a.contains(v)))
        .filter(|&v| v <= upper && v % step == 0)
        .collect();
    covered.sort_unstable();
    let candidates = u128::from(upper / step) + 1;
    Missing {
        remaining: candidates - covered.len() as u128,
        covered: covered.into_iter().peekable(),
        next: Some(0),
        stride: step,
        upper,
    }
}

/// Iterator over the gaps of a scan, in increasing order; see `missing`
pub struct Missing {
    covered: Peekable<std::vec::IntoIter<u64>>,
    next: Option<u64>,
    stride: u64,
    upper: u64,
    remaining: u128,
}

impl Missing {
    /// How many gaps are still to come. This is `2^64` for a full scan of the
    /// `u64` range with stride one, hence the `u128`.
    #[must_use]
    pub fn remaining(&self) -> u128 {
        self.remaining
    }
}

impl Iterator for Missing {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            let value = self.next?;
            self.next = value.checked_add(self.stride).filter(|&n| n <= self.upper);
            if self.covered.peek() == Some(&value) {
                self.covered.next();
                continue;
            }
            self.remaining -= 1;
            return Some(value);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
