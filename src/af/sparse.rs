//! A sparse, matrix-oriented view over an [`AAFramework`](super::AAFramework)'s
//! attack relation, plus a minimal sparse integer matrix used by the
//! matrix-power solvers (Cat's single matvec, Dbs's repeated squaring-free
//! power iteration).

use super::AAFramework;
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// Read-only, row- and column-oriented view of the `n x n` 0/1 adjacency
/// matrix `M` where `M[i, j] = 1` iff argument `i` attacks argument `j`.
pub struct SparseMatrixView<'a> {
    af: &'a AAFramework,
}

impl<'a> SparseMatrixView<'a> {
    pub(super) fn new(af: &'a AAFramework) -> Self {
        Self { af }
    }

    /// Dimension of the (square) matrix.
    pub fn n(&self) -> usize {
        self.af.n_arguments()
    }

    /// Non-zero column indices of row `i` (arguments attacked by `i`).
    pub fn row_nonzeros(&self, i: usize) -> &[usize] {
        self.af.attackees_of_id(i)
    }

    /// Non-zero row indices of column `j` (arguments attacking `j`), i.e.
    /// row `j` of `Mᵀ`.
    pub fn col_nonzeros(&self, j: usize) -> &[usize] {
        self.af.attackers_of_id(j)
    }

    /// Computes `Mᵀ · v` for a dense vector `v`, the matvec Cat iterates.
    pub fn transpose_matvec(&self, v: &[f64]) -> Vec<f64> {
        (0..self.n())
            .map(|i| self.col_nonzeros(i).iter().map(|&j| v[j]).sum())
            .collect()
    }

    /// Materialises `Mᵀ` (attacker counts into each argument) as a sparse
    /// integer matrix, the seed for Dbs's repeated power computation.
    pub fn transpose_as_sparse_int_matrix(&self) -> SparseIntMatrix {
        let mut rows = vec![Vec::new(); self.n()];
        for i in 0..self.n() {
            for &j in self.col_nonzeros(i) {
                rows[i].push((j, 1_i64));
            }
        }
        SparseIntMatrix { n: self.n(), rows }
    }
}

/// A sparse `n x n` matrix of `i64` entries, stored row-major as
/// `(column, value)` pairs. Used only by Dbs, where entries are attack-path
/// counts and can grow quickly with the path length.
#[derive(Debug, Clone)]
pub struct SparseIntMatrix {
    n: usize,
    rows: Vec<Vec<(usize, i64)>>,
}

impl SparseIntMatrix {
    /// `true` iff every entry is zero (used by Dbs to stop the power
    /// iteration early).
    pub fn is_zero(&self) -> bool {
        self.rows.iter().all(|r| r.is_empty())
    }

    /// Sum of row `i`, i.e. the total path count ending at argument `i` for
    /// the path length this matrix power represents.
    pub fn row_sum(&self, i: usize) -> i64 {
        self.rows[i].iter().map(|&(_, v)| v).sum()
    }

    /// Computes `self * other`, checking for `i64` overflow in every
    /// accumulated entry.
    ///
    /// Per §4.2's numerical note, path counts may grow exponentially;
    /// overflow is treated as a [`CoreError::SolverError`] rather than
    /// silently saturating or wrapping, since a silently wrong ranking is
    /// worse than a solver that refuses to answer.
    pub fn checked_mul(&self, other: &SparseIntMatrix) -> CoreResult<SparseIntMatrix> {
        debug_assert_eq!(self.n, other.n);
        let mut result_rows = vec![HashMap::<usize, i64>::new(); self.n];
        for (i, row) in self.rows.iter().enumerate() {
            for &(k, a) in row {
                for &(j, b) in &other.rows[k] {
                    let contrib = a
                        .checked_mul(b)
                        .ok_or_else(|| overflow_error(i))?;
                    let entry = result_rows[i].entry(j).or_insert(0);
                    *entry = entry
                        .checked_add(contrib)
                        .ok_or_else(|| overflow_error(i))?;
                }
            }
        }
        let rows = result_rows
            .into_iter()
            .map(|m| m.into_iter().filter(|&(_, v)| v != 0).collect())
            .collect();
        Ok(SparseIntMatrix { n: self.n, rows })
    }
}

fn overflow_error(row: usize) -> CoreError {
    CoreError::SolverError(format!(
        "i64 overflow while accumulating attack-path counts at argument index {row}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::{AAFramework, ArgumentSet};

    #[test]
    fn test_transpose_matvec() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        let view = af.sparse_view();
        let v = vec![1.0, 1.0, 1.0];
        let result = view.transpose_matvec(&v);
        assert_eq!(result, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_sparse_power_and_row_sum() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        let m_t = af.sparse_view().transpose_as_sparse_int_matrix();
        assert_eq!(m_t.row_sum(1), 1);
        let m_t2 = m_t.checked_mul(&m_t).unwrap();
        assert!(m_t2.is_zero() || m_t2.row_sum(2) >= 0);
    }
}
