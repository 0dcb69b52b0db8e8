//! Cat — the categoriser semantics (C2): an iterative fixed-point solver.

use crate::af::AAFramework;
use crate::ranking::{group_by_tolerance, EquivalenceRanking};

/// Tuning parameters for [`cat_scores`]/[`cat_ranking`].
#[derive(Debug, Clone, Copy)]
pub struct CatOptions {
    /// Convergence tolerance on the infinity norm of successive iterates.
    pub tolerance: f64,
    /// Maximum number of iterations before giving up and returning the last
    /// iterate (with a logged warning).
    pub max_iter: usize,
}

impl Default for CatOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iter: 1000,
        }
    }
}

/// Computes the categoriser strength of every argument: `s[i] = 1 / (1 +
/// sum of strengths of i's attackers)`, iterated to a fixed point.
///
/// Strengths lie in `(0, 1]`: unattacked arguments converge to `1`, heavily
/// attacked ones approach `0`.
pub fn cat_scores(af: &AAFramework, options: CatOptions) -> Vec<f64> {
    let n = af.n_arguments();
    let view = af.sparse_view();
    let mut current = vec![0.0_f64; n];
    for iteration in 0..options.max_iter {
        let attacker_sums = view.transpose_matvec(&current);
        let next: Vec<f64> = attacker_sums.iter().map(|&sum| 1.0 / (1.0 + sum)).collect();
        let max_diff = current
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        current = next;
        if max_diff < options.tolerance {
            return current;
        }
        if iteration + 1 == options.max_iter {
            log::warn!(
                "categoriser iteration did not converge to tolerance {} after {} iterations (last delta {})",
                options.tolerance,
                options.max_iter,
                max_diff
            );
        }
    }
    current
}

/// Computes the Cat ranking: arguments grouped into equivalence classes by
/// descending strength, ties within `tolerance` of each other merged.
pub fn cat_ranking(af: &AAFramework, options: CatOptions) -> EquivalenceRanking {
    let scores = cat_scores(af, options);
    let by_label: Vec<(usize, f64)> = af
        .argument_set()
        .iter()
        .map(|arg| (arg.label(), scores[arg.id()]))
        .collect();
    EquivalenceRanking::new(group_by_tolerance(by_label, options.tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    #[test]
    fn test_unattacked_argument_converges_to_one() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let af = AAFramework::new_with_argument_set(args);
        let scores = cat_scores(&af, CatOptions::default());
        assert!((scores[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_attacker_converges_to_golden_ratio_conjugate() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 1).unwrap();
        let scores = cat_scores(&af, CatOptions::default());
        // s = 1/(1+s) => s^2 + s - 1 = 0 => s = (sqrt(5)-1)/2.
        let expected = (5.0_f64.sqrt() - 1.0) / 2.0;
        assert!((scores[0] - expected).abs() < 1e-4);
    }

    #[test]
    fn test_single_attacker_ranks_below_unattacked() {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        let ranking = cat_ranking(&af, CatOptions::default());
        assert_eq!(ranking.classes, vec![vec![1], vec![2]]);
    }
}
