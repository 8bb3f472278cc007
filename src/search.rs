//! Exhaustive searches over square (0,1)-matrices of a given order, collecting
//! the distinct permanents of the nonsingular ones, or of the singular ones.
//! These are the two data sets the comparison report is built for.
//!
//! Permuting the rows of a matrix changes neither its permanent nor whether
//! it is singular, so only matrices whose rows, read as binary numbers, are
//! in increasing order are visited. A nonsingular matrix can't repeat a row,
//! so its rows are strictly increasing; the singular search allows repeats.
use clap::ValueEnum;
use num_integer::Integer;
use thiserror::Error;

use crate::matrix::{determinant, permanent, Matrix, MatrixError};
use crate::set::NumericSet;

/// The largest order `search` accepts. Order 8 already means visiting more
/// than 10^13 row multisets in the singular search.
pub const MAX_ORDER: usize = 8;

/// Which matrices to collect permanents from
#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
pub enum Kind {
    /// Matrices with a nonzero determinant
    Nonsingular,
    /// Matrices with determinant zero
    Singular,
}

/// What a search found
#[derive(Clone, Debug)]
pub struct Found {
    /// The distinct permanents
    pub values: NumericSet,
    /// How many canonical matrices of the requested kind were visited
    pub matrices: u64,
}

/// Why a search couldn't run
#[derive(Debug, Error)]
pub enum SearchError {
    /// The order is zero or larger than `MAX_ORDER`
    #[error("order must be between 1 and {max}, not {0}", max = MAX_ORDER)]
    Order(usize),
    /// A permanent or determinant couldn't be computed exactly
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Collects the permanents of every (0,1)-matrix of the given `order` and
/// `kind`
pub fn search(kind: Kind, order: usize) -> Result<Found, SearchError> {
    if order == 0 || order > MAX_ORDER {
        return Err(SearchError::Order(order));
    }
    let mut search =
        Search { order, rows: Vec::with_capacity(order), found: Vec::new(), matrices: 0 };
    match kind {
        Kind::Nonsingular => search.nonsingular(1, &Basis::default())?,
        Kind::Singular => search.singular(0)?,
    }
    tracing::info!(?kind, order, matrices = search.matrices, "search finished");
    Ok(Found { values: search.found.into_iter().collect(), matrices: search.matrices })
}

struct Search {
    order: usize,
    rows: Vec<u32>,
    found: Vec<u64>,
    matrices: u64,
}

impl Search {
    fn row_values(&self) -> std::ops::Range<u32> {
        // `order` is at most MAX_ORDER, so this doesn't overflow
        0..(1_u32 << self.order)
    }

    fn record(&mut self, matrix: &Matrix) -> Result<(), SearchError> {
        let value = permanent(matrix)?;
        // A (0,1)-matrix has a non-negative permanent no larger than order!
        let value = u64::try_from(value).map_err(|_| MatrixError::Overflow)?;
        self.found.push(value);
        self.matrices += 1;
        Ok(())
    }

    /// Rows are strictly increasing, and each must be independent of the
    /// rows before it.
    fn nonsingular(&mut self, start: u32, basis: &Basis) -> Result<(), SearchError> {
        if self.rows.len() == self.order {
            let matrix = Matrix::from_row_bits(self.order, &self.rows);
            if determinant(&matrix)? != 0 {
                self.record(&matrix)?;
            }
            return Ok(());
        }
        for bits in start..self.row_values().end {
            if let Some(extended) = basis.extended_by(&bit_vector(self.order, bits)) {
                if self.rows.is_empty() {
                    tracing::debug!(first_row = bits, found = self.found.len(), "searching");
                }
                self.rows.push(bits);
                self.nonsingular(bits + 1, &extended)?;
                self.rows.pop();
            }
        }
        Ok(())
    }

    /// Rows are non-decreasing; there's nothing to prune on.
    fn singular(&mut self, start: u32) -> Result<(), SearchError> {
        if self.rows.len() == self.order {
            let matrix = Matrix::from_row_bits(self.order, &self.rows);
            if determinant(&matrix)? == 0 {
                self.record(&matrix)?;
            }
            return Ok(());
        }
        for bits in start..self.row_values().end {
            if self.rows.is_empty() {
                tracing::debug!(first_row = bits, found = self.found.len(), "searching");
            }
            self.rows.push(bits);
            self.singular(bits)?;
            self.rows.pop();
        }
        Ok(())
    }
}

fn bit_vector(order: usize, bits: u32) -> Vec<i64> {
    (0..order).map(|b| i64::from(bits >> b & 1)).collect()
}

/// Linearly independent integer rows in echelon form: each row is zero at
/// the pivot column of every row before it.
#[derive(Clone, Default)]
struct Basis {
    rows: Vec<(usize, Vec<i64>)>,
}

impl Basis {
    /// The basis with `v` added, or `None` if `v` depends on the rows already
    /// there. Elimination is fraction-free, and each step divides out the gcd
    /// so entries stay small.
    fn extended_by(&self, v: &[i64]) -> Option<Basis> {
        let mut v = v.to_vec();
        for (pivot, row) in &self.rows {
            let x = v[*pivot];
            if x == 0 {
                continue;
            }
            let p = row[*pivot];
            for (entry, &r) in v.iter_mut().zip(row) {
                *entry = *entry * p - r * x;
            }
            let divisor = v.iter().fold(0_i64, |g, &e| g.gcd(&e));
            if divisor > 1 {
                v.iter_mut().for_each(|e| *e /= divisor);
            }
        }
        let pivot = v.iter().position(|&e| e != 0)?;
        let mut extended = self.clone();
        extended.rows.push((pivot, v));
        Some(extended)
    }
}
