//! Square weight matrix for complete bipartite graphs.
//!
//! Row `x` holds the weights of the edges from X-node `x` to every Y-node,
//! so `w[(x, y)]` is the weight of edge (x, y).

use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Weight;

/// Immutable n×n matrix of edge weights, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Weight>>", into = "Vec<Vec<Weight>>")]
pub struct WeightMatrix {
    size: usize,
    // row-major, size * size entries
    data: Vec<Weight>,
}

impl WeightMatrix {
    /// Build a matrix of declared `size` from its rows.
    ///
    /// Fails if `size` is negative, if there are not exactly `size` rows,
    /// or if any row is not exactly `size` weights long.
    pub fn new(size: i64, rows: Vec<Vec<Weight>>) -> Result<WeightMatrix> {
        let size = usize::try_from(size).map_err(|_| Error::NegativeSize(size))?;
        if rows.len() != size {
            return Err(Error::RowCount {
                expected: size,
                got: rows.len(),
            });
        }
        let mut data = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for (row, weights) in rows.into_iter().enumerate() {
            if weights.len() != size {
                return Err(Error::RowLength {
                    row,
                    expected: size,
                    got: weights.len(),
                });
            }
            data.extend(weights);
        }
        Ok(WeightMatrix { size, data })
    }

    /// Build a matrix whose size is the number of rows given.
    pub fn from_rows(rows: Vec<Vec<Weight>>) -> Result<WeightMatrix> {
        let size = rows.len() as i64;
        WeightMatrix::new(size, rows)
    }

    /// An n×n matrix with every weight zero.
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn zeros(size: usize) -> WeightMatrix {
        let cells = match size.checked_mul(size) {
            Some(cells) => cells,
            None => panic!("{}x{} matrix does not fit in memory", size, size),
        };
        WeightMatrix {
            size,
            data: vec![0; cells],
        }
    }

    /// Number of nodes in each partition.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All weights leaving X-node `x`.
    #[inline]
    pub fn row(&self, x: usize) -> &[Weight] {
        &self.data[x * self.size..(x + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> {
        // chunks() panics on zero, and an empty matrix has no rows anyway
        self.data.chunks(self.size.max(1))
    }

    /// Total weight of the pairing `(x, y)` pairs.
    pub fn total(&self, pairs: &[(usize, usize)]) -> i64 {
        pairs.iter().map(|&(x, y)| i64::from(self[(x, y)])).sum()
    }
}

impl Index<(usize, usize)> for WeightMatrix {
    type Output = Weight;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Weight {
        assert!(
            x < self.size && y < self.size,
            "edge ({}, {}) out of bounds for size {}",
            x,
            y,
            self.size
        );
        &self.data[x * self.size + y]
    }
}

impl TryFrom<Vec<Vec<Weight>>> for WeightMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<Weight>>) -> Result<WeightMatrix> {
        WeightMatrix::from_rows(rows)
    }
}

impl From<WeightMatrix> for Vec<Vec<Weight>> {
    fn from(matrix: WeightMatrix) -> Vec<Vec<Weight>> {
        matrix.rows().map(<[Weight]>::to_vec).collect()
    }
}

/// Parses the plain text input format: the size, followed by size×size
/// whitespace-separated weights in row-major order. Anything after the
/// last weight is ignored.
impl FromStr for WeightMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<WeightMatrix> {
        let mut tokens = s.split_whitespace();
        let size: i64 = parse_token(tokens.next().ok_or(Error::MissingSize)?)?;
        let size = usize::try_from(size).map_err(|_| Error::NegativeSize(size))?;

        // The size comes from untrusted text, so only reserve what the
        // remaining tokens could fill.
        let remaining = tokens.clone().count();
        let mut data = Vec::with_capacity(size.saturating_mul(size).min(remaining));
        for row in 0..size {
            for col in 0..size {
                let token = tokens.next().ok_or(Error::MissingWeight { row, col })?;
                data.push(parse_token(token)?);
            }
        }
        Ok(WeightMatrix { size, data })
    }
}

fn parse_token<T: FromStr>(token: &str) -> Result<T> {
    token.parse().map_err(|_| Error::InvalidToken {
        token: token.to_string(),
    })
}
