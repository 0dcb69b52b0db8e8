//! Dbs — the discussion-based semantics (C3): ranks arguments by the
//! lexicographic order of their discussion vectors, built from sparse
//! matrix powers of the transposed adjacency matrix.

use crate::af::AAFramework;
use crate::error::CoreResult;
use crate::ranking::EquivalenceRanking;

/// Tuning parameters for [`dbs_vectors`]/[`dbs_ranking`].
#[derive(Debug, Clone, Copy)]
pub struct DbsOptions {
    /// Maximum path length `L`. `None` defaults to `|A|`.
    pub max_path_length: Option<usize>,
}

impl Default for DbsOptions {
    fn default() -> Self {
        Self {
            max_path_length: None,
        }
    }
}

/// Computes every argument's discussion vector `v(a) ∈ ℤᴸ`.
///
/// `v(a)[k-1]` is `sign(k) * (number of length-k attack paths ending at
/// a)`, where `sign(k) = +1` for odd `k` and `-1` for even `k`. `B = Mᵀ` is
/// repeatedly squared-free multiplied by itself; once `Bᵏ` is all-zero,
/// remaining positions are padded with `0` and no further multiplication is
/// performed.
pub fn dbs_vectors(af: &AAFramework, options: DbsOptions) -> CoreResult<Vec<Vec<i64>>> {
    let n = af.n_arguments();
    let l = options.max_path_length.unwrap_or(n);
    let mut vectors = vec![vec![0_i64; l]; n];
    if l == 0 || n == 0 {
        return Ok(vectors);
    }

    let b = af.sparse_view().transpose_as_sparse_int_matrix();
    let mut power = b.clone();
    for k in 1..=l {
        let sign: i64 = if k % 2 == 1 { 1 } else { -1 };
        for (i, row) in vectors.iter_mut().enumerate() {
            row[k - 1] = sign * power.row_sum(i);
        }
        if power.is_zero() {
            break;
        }
        if k < l {
            power = power.checked_mul(&b)?;
        }
    }
    Ok(vectors)
}

/// Computes the Dbs ranking: arguments sorted ascending by discussion
/// vector (smaller vector = stronger defence = better rank), equal vectors
/// grouped into the same class.
pub fn dbs_ranking(af: &AAFramework, options: DbsOptions) -> CoreResult<EquivalenceRanking> {
    let vectors = dbs_vectors(af, options)?;
    let mut by_label: Vec<(usize, Vec<i64>)> = af
        .argument_set()
        .iter()
        .map(|arg| (arg.label(), vectors[arg.id()].clone()))
        .collect();
    by_label.sort_by(|a, b| a.1.cmp(&b.1));

    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut prev: Option<&Vec<i64>> = None;
    for (label, vector) in &by_label {
        let same = prev.map(|p| p == vector).unwrap_or(false);
        if same {
            classes.last_mut().unwrap().push(*label);
        } else {
            classes.push(vec![*label]);
        }
        prev = Some(vector);
    }
    Ok(EquivalenceRanking::new(classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    #[test]
    fn test_unattacked_argument_has_zero_vector() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let af = AAFramework::new_with_argument_set(args);
        let vectors = dbs_vectors(&af, DbsOptions::default()).unwrap();
        assert!(vectors[0].iter().all(|&x| x == 0));
    }

    #[test]
    fn test_single_attacker_vector_sign() {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        let vectors = dbs_vectors(&af, DbsOptions::default()).unwrap();
        let v2 = &vectors[af.argument_set().get_argument(2).unwrap().id()];
        assert_eq!(v2[0], 1);
        assert!(v2[1..].iter().all(|&x| x == 0));
    }

    #[test]
    fn test_ranking_prefers_fewer_attack_paths() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(1, 3).unwrap();
        af.new_attack(2, 3).unwrap();
        let ranking = dbs_ranking(&af, DbsOptions::default()).unwrap();
        let order = ranking.normalise(&[1, 2, 3]);
        assert_eq!(order[0], 1);
        assert_eq!(*order.last().unwrap(), 3);
    }
}
