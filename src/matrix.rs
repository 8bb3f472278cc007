//! Small integer matrices, with exact permanents and determinants.
//!
//! The permanent has two implementations that must agree:
//! * `permanent` uses the Gray-code row-sum formula (Glynn, in the form given
//!   by Spies). Rectangular `m x n` inputs with `m < n` are padded with rows
//!   of ones to a square matrix, and the result divided by `(n - m)!`.
//! * `permanent_ryser` uses Ryser's inclusion-exclusion over column subsets,
//!   which handles rectangular inputs directly.
//!
//! All arithmetic is on `i128` and checked, so a result is either exact or a
//! `MatrixError::Overflow`.
use itertools::Itertools;
use thiserror::Error;

/// A row-major matrix of small integers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    entries: Vec<i8>,
}

/// Why a matrix couldn't be built, or a value couldn't be computed exactly
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// `entries.len()` isn't `rows * cols`
    #[error("{len} entries don't make a {rows}x{cols} matrix")]
    Shape {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Entries supplied
        len: usize,
    },
    /// The operation needs a square matrix
    #[error("a {rows}x{cols} matrix isn't square")]
    NotSquare {
        /// Rows of the offending matrix
        rows: usize,
        /// Columns of the offending matrix
        cols: usize,
    },
    /// The Gray-code loop runs `2^(n-1)` times; `n` must stay below 64
    #[error("order {0} is too large for the Gray-code permanent")]
    TooLarge(usize),
    /// An intermediate value didn't fit in an `i128`
    #[error("arithmetic overflow")]
    Overflow,
}

impl Matrix {
    /// A `rows x cols` matrix; `entries` are in row-major order
    pub fn new(rows: usize, cols: usize, entries: Vec<i8>) -> Result<Matrix, MatrixError> {
        if rows.checked_mul(cols) != Some(entries.len()) {
            return Err(MatrixError::Shape { rows, cols, len: entries.len() });
        }
        Ok(Matrix { rows, cols, entries })
    }

    /// The square (0,1)-matrix of the given order whose row `r` has a one in
    /// column `b` exactly when bit `b` of `rows[r]` is set
    #[must_use]
    pub fn from_row_bits(order: usize, rows: &[u32]) -> Matrix {
        let entries = rows
            .iter()
            .flat_map(|&bits| (0..order).map(move |b| i8::from(bits >> b & 1 == 1)))
            .collect();
        Matrix { rows: rows.len(), cols: order, entries }
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The entry in row `r`, column `c`
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> i8 {
        self.entries[r * self.cols + c]
    }

    /// Row `r` as a slice
    #[must_use]
    pub fn row(&self, r: usize) -> &[i8] {
        &self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// The transpose
    #[must_use]
    pub fn transposed(&self) -> Matrix {
        let entries = (0..self.cols)
            .flat_map(|c| (0..self.rows).map(move |r| (r, c)))
            .map(|(r, c)| self.get(r, c))
            .collect();
        Matrix { rows: self.cols, cols: self.rows, entries }
    }
}

/// The permanent of `a` by the Gray-code formula. Zero if `a` has more rows
/// than columns; one for a matrix with no rows.
pub fn permanent(a: &Matrix) -> Result<i128, MatrixError> {
    let (m, n) = (a.rows, a.cols);
    if m > n {
        return Ok(0);
    }
    // Pad with rows of ones, stored transposed so that flipping a column of
    // the padded matrix reads one contiguous row.
    let mut padded = vec![1_i8; n * n];
    for r in 0..m {
        for c in 0..n {
            padded[c * n + r] = a.get(r, c);
        }
    }
    let total = gray_code_permanent(&Matrix { rows: n, cols: n, entries: padded })?;
    Ok(total / factorial(n - m)?)
}

/// The kernel of `permanent`. `t` is the transpose of a square matrix `A`;
/// row `c` of `t` is column `c` of `A`.
fn gray_code_permanent(t: &Matrix) -> Result<i128, MatrixError> {
    let n = t.rows;
    if n == 0 {
        return Ok(1);
    }
    if n >= 64 {
        return Err(MatrixError::TooLarge(n));
    }
    let mut row_sums: Vec<i128> =
        (0..n).map(|r| (0..n).map(|c| i128::from(t.get(c, r))).sum()).collect();

    let loops = 1_u64 << (n - 1);
    let mut total = 0_i128;
    let mut positive = true;
    let mut old_gray = 0_u64;
    for i in 1..=loops {
        let product = row_sums
            .iter()
            .try_fold(1_i128, |acc, &s| acc.checked_mul(s))
            .ok_or(MatrixError::Overflow)?;
        total = if positive {
            total.checked_add(product)
        } else {
            total.checked_sub(product)
        }
        .ok_or(MatrixError::Overflow)?;

        let new_gray = i ^ (i >> 1);
        let col = (old_gray ^ new_gray).trailing_zeros() as usize;
        let direction: i128 = if new_gray > old_gray { -2 } else { 2 };
        for (sum, &entry) in row_sums.iter_mut().zip(t.row(col)) {
            *sum += i128::from(entry) * direction;
        }

        positive = !positive;
        old_gray = new_gray;
    }
    Ok(total / i128::from(loops))
}

/// The permanent of `a` by Ryser's formula for an `m x n` matrix, `m <= n`:
/// the sum over column subsets `S` with `|S| = t` of
/// `(-1)^(m-t) * C(n-t, m-t) * prod_r sum_{c in S} a[r][c]`.
pub fn permanent_ryser(a: &Matrix) -> Result<i128, MatrixError> {
    let (m, n) = (a.rows, a.cols);
    if m > n {
        return Ok(0);
    }
    if m == 0 {
        return Ok(1);
    }
    let mut total = 0_i128;
    for t in 1..=m {
        let weight = binomial(n - t, m - t)?;
        let mut subtotal = 0_i128;
        for subset in (0..n).combinations(t) {
            let product = (0..m)
                .map(|r| subset.iter().map(|&c| i128::from(a.get(r, c))).sum::<i128>())
                .try_fold(1_i128, i128::checked_mul)
                .ok_or(MatrixError::Overflow)?;
            subtotal = subtotal.checked_add(product).ok_or(MatrixError::Overflow)?;
        }
        let term = subtotal.checked_mul(weight).ok_or(MatrixError::Overflow)?;
        total = if (m - t) % 2 == 0 {
            total.checked_add(term)
        } else {
            total.checked_sub(term)
        }
        .ok_or(MatrixError::Overflow)?;
    }
    Ok(total)
}

/// The determinant of the square matrix `a`, by Bareiss' fraction-free
/// elimination. Every division is exact.
pub fn determinant(a: &Matrix) -> Result<i128, MatrixError> {
    let n = a.rows;
    if n != a.cols {
        return Err(MatrixError::NotSquare { rows: a.rows, cols: a.cols });
    }
    if n == 0 {
        return Ok(1);
    }
    let mut m: Vec<Vec<i128>> =
        (0..n).map(|r| a.row(r).iter().map(|&x| i128::from(x)).collect()).collect();
    let mut sign = 1_i128;
    let mut previous_pivot = 1_i128;
    for k in 0..n - 1 {
        if m[k][k] == 0 {
            match (k + 1..n).find(|&r| m[r][k] != 0) {
                None => return Ok(0),
                Some(swap) => {
                    m.swap(k, swap);
                    sign = -sign;
                }
            }
        }
        let pivot = m[k][k];
        for i in k + 1..n {
            for j in k + 1..n {
                let kept = m[i][j].checked_mul(pivot).ok_or(MatrixError::Overflow)?;
                let removed = m[i][k].checked_mul(m[k][j]).ok_or(MatrixError::Overflow)?;
                m[i][j] = kept.checked_sub(removed).ok_or(MatrixError::Overflow)? / previous_pivot;
            }
        }
        previous_pivot = pivot;
    }
    Ok(sign * m[n - 1][n - 1])
}

fn factorial(n: usize) -> Result<i128, MatrixError> {
    (2..=n).try_fold(1_i128, |acc, k| acc.checked_mul(k as i128)).ok_or(MatrixError::Overflow)
}

fn binomial(n: usize, k: usize) -> Result<i128, MatrixError> {
    if k > n {
        return Ok(0);
    }
    let k = k.min(n - k);
    (1..=k).try_fold(1_i128, |acc, i| {
        // acc * (n - k + i) is divisible by i
        Some(acc.checked_mul((n - k + i) as i128)? / i as i128)
    })
    .ok_or(MatrixError::Overflow)
}
