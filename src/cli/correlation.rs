//! Correlation aggregation (C14): Kendall's tau-b and Spearman's rho between
//! two rankings over the same argument set, reimplemented in plain `f64`
//! folds (no `numpy`) per `SPEC_FULL.md` §4.12.

use crate::ranking::EquivalenceRanking;
use std::collections::HashMap;

/// Assigns each label its mid-rank (1-indexed, ties share the mean rank of
/// their class), the standard tie-handling for both statistics below.
fn mid_ranks(ranking: &EquivalenceRanking, labels: &[usize]) -> HashMap<usize, f64> {
    let order = ranking.normalise(labels);
    let mut class_of: HashMap<usize, usize> = HashMap::new();
    for (class_idx, class) in ranking.classes.iter().enumerate() {
        for &label in class {
            class_of.insert(label, class_idx);
        }
    }
    // Labels absent from every class (shouldn't happen once validated, but
    // normalise() appends them) form one implicit trailing class each.
    let mut next_synthetic_class = ranking.classes.len();
    for &label in &order {
        class_of.entry(label).or_insert_with(|| {
            let c = next_synthetic_class;
            next_synthetic_class += 1;
            c
        });
    }

    let mut position_of: HashMap<usize, usize> = HashMap::new();
    for (pos, &label) in order.iter().enumerate() {
        position_of.insert(label, pos);
    }

    let mut positions_by_class: HashMap<usize, Vec<usize>> = HashMap::new();
    for &label in &order {
        let class_idx = class_of[&label];
        positions_by_class.entry(class_idx).or_default().push(position_of[&label]);
    }

    let mut ranks = HashMap::with_capacity(order.len());
    for (_class_idx, positions) in positions_by_class {
        let mean_rank = positions.iter().map(|&p| p as f64 + 1.0).sum::<f64>() / positions.len() as f64;
        for &pos in &positions {
            ranks.insert(order[pos], mean_rank);
        }
    }
    ranks
}

/// Kendall's tau-b (with tie correction) between two rankings over `labels`.
///
/// Returns `f64::NAN` if either ranking has zero variance (every label tied
/// in one class), matching the convention of treating an undefined
/// correlation as not-a-number rather than an arbitrary fallback value.
pub fn kendall_tau_b(a: &EquivalenceRanking, b: &EquivalenceRanking, labels: &[usize]) -> f64 {
    let ra = mid_ranks(a, labels);
    let rb = mid_ranks(b, labels);
    let n = labels.len();
    if n < 2 {
        return f64::NAN;
    }

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_a_only = 0i64;
    let mut ties_b_only = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let da = ra[&labels[i]] - ra[&labels[j]];
            let db = rb[&labels[i]] - rb[&labels[j]];
            let sa = da.partial_cmp(&0.0).unwrap();
            let sb = db.partial_cmp(&0.0).unwrap();
            match (sa, sb) {
                (std::cmp::Ordering::Equal, std::cmp::Ordering::Equal) => {}
                (std::cmp::Ordering::Equal, _) => ties_a_only += 1,
                (_, std::cmp::Ordering::Equal) => ties_b_only += 1,
                _ if sa == sb => concordant += 1,
                _ => discordant += 1,
            }
        }
    }

    let n0 = (n * (n - 1) / 2) as f64;
    let n1 = ties_a_only as f64;
    let n2 = ties_b_only as f64;
    let numerator = (concordant - discordant) as f64;
    let denominator = ((n0 - n1) * (n0 - n2)).sqrt();
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// Spearman's rho: the Pearson correlation of mid-ranks between two
/// rankings over `labels`.
pub fn spearman_rho(a: &EquivalenceRanking, b: &EquivalenceRanking, labels: &[usize]) -> f64 {
    let ra = mid_ranks(a, labels);
    let rb = mid_ranks(b, labels);
    let n = labels.len() as f64;
    if labels.len() < 2 {
        return f64::NAN;
    }

    let mean_a: f64 = labels.iter().map(|l| ra[l]).sum::<f64>() / n;
    let mean_b: f64 = labels.iter().map(|l| rb[l]).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for &label in labels {
        let da = ra[&label] - mean_a;
        let db = rb[&label] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        cov / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_rankings_give_perfect_correlation() {
        let ranking = EquivalenceRanking::new(vec![vec![1], vec![2], vec![3]]);
        let labels = [1, 2, 3];
        assert!((kendall_tau_b(&ranking, &ranking, &labels) - 1.0).abs() < 1e-9);
        assert!((spearman_rho(&ranking, &ranking, &labels) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_rankings_give_negative_one() {
        let a = EquivalenceRanking::new(vec![vec![1], vec![2], vec![3]]);
        let b = EquivalenceRanking::new(vec![vec![3], vec![2], vec![1]]);
        let labels = [1, 2, 3];
        assert!((kendall_tau_b(&a, &b, &labels) + 1.0).abs() < 1e-9);
        assert!((spearman_rho(&a, &b, &labels) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fully_tied_ranking_is_nan() {
        let a = EquivalenceRanking::new(vec![vec![1, 2, 3]]);
        let b = EquivalenceRanking::new(vec![vec![1], vec![2], vec![3]]);
        let labels = [1, 2, 3];
        assert!(kendall_tau_b(&a, &b, &labels).is_nan());
        assert!(spearman_rho(&a, &b, &labels).is_nan());
    }

    #[test]
    fn test_partial_tie_between_distinct_rankings() {
        let a = EquivalenceRanking::new(vec![vec![1, 2], vec![3]]);
        let b = EquivalenceRanking::new(vec![vec![1], vec![2], vec![3]]);
        let labels = [1, 2, 3];
        let tau = kendall_tau_b(&a, &b, &labels);
        assert!(tau > 0.0 && tau < 1.0);
    }
}
