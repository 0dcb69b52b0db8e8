//! The ranking normaliser (C9): converts a solver's score map or
//! equivalence-class sequence into a single canonical total order over
//! argument labels, with deterministic tie-breaking.

use crate::error::{CoreError, CoreResult};
use std::collections::{HashMap, HashSet};

/// An ordered sequence of non-empty, disjoint equivalence classes
/// partitioning the argument set, best class first — the shared output
/// shape of Cat, Dbs, Ser and every probabilistic semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceRanking {
    /// Classes, best (most acceptable) first. Each inner `Vec` is sorted
    /// ascending by label.
    pub classes: Vec<Vec<usize>>,
}

impl EquivalenceRanking {
    /// Builds a ranking from classes, sorting each class ascending.
    pub fn new(mut classes: Vec<Vec<usize>>) -> Self {
        for class in &mut classes {
            class.sort_unstable();
        }
        Self { classes }
    }

    /// Checks invariant (i) of §8: every argument in `all_labels` appears in
    /// exactly one class, with no duplicates and nothing extraneous.
    pub fn validate_partition(&self, all_labels: &[usize]) -> CoreResult<()> {
        validate_partition(&self.classes, all_labels)
    }

    /// Flattens the classes into a single total order, per C9's contract
    /// for equivalence-class input: within each class ascending by label,
    /// classes concatenated in order, any label from `all_labels` missing
    /// from every class appended at the end in ascending order.
    pub fn normalise(&self, all_labels: &[usize]) -> Vec<usize> {
        normalise_classes(&self.classes, all_labels)
    }
}

/// Checks that `classes` is a partition of `all_labels`: no duplicates, no
/// missing arguments, no extraneous arguments.
pub fn validate_partition(classes: &[Vec<usize>], all_labels: &[usize]) -> CoreResult<()> {
    let mut seen: HashSet<usize> = HashSet::new();
    for class in classes {
        if class.is_empty() {
            return Err(CoreError::InvariantViolation(
                "ranking contains an empty equivalence class".to_string(),
            ));
        }
        for &label in class {
            if !seen.insert(label) {
                return Err(CoreError::InvariantViolation(format!(
                    "argument {label} appears in more than one equivalence class"
                )));
            }
        }
    }
    let expected: HashSet<usize> = all_labels.iter().copied().collect();
    if seen != expected {
        let missing: Vec<usize> = expected.difference(&seen).copied().collect();
        let extra: Vec<usize> = seen.difference(&expected).copied().collect();
        return Err(CoreError::InvariantViolation(format!(
            "ranking does not partition the argument set (missing: {missing:?}, extra: {extra:?})"
        )));
    }
    Ok(())
}

/// Converts an equivalence-class sequence into a total order (C9, case b).
///
/// Within each class, arguments are sorted ascending by label; classes are
/// concatenated best-first; any label present in `all_labels` but absent
/// from every class is appended at the end in ascending order.
pub fn normalise_classes(classes: &[Vec<usize>], all_labels: &[usize]) -> Vec<usize> {
    let mut seen: HashSet<usize> = HashSet::new();
    let mut order = Vec::with_capacity(all_labels.len());
    for class in classes {
        let mut sorted_class = class.clone();
        sorted_class.sort_unstable();
        for label in sorted_class {
            if seen.insert(label) {
                order.push(label);
            }
        }
    }
    let mut missing: Vec<usize> = all_labels
        .iter()
        .copied()
        .filter(|label| !seen.contains(label))
        .collect();
    missing.sort_unstable();
    order.extend(missing);
    order
}

/// Converts a score map into a total order (C9, case a): descending by
/// score, ties (including arguments missing from `scores`, treated as
/// `f64::NEG_INFINITY`) broken by ascending label.
pub fn normalise_scores(scores: &HashMap<usize, f64>, all_labels: &[usize]) -> Vec<usize> {
    let mut labels = all_labels.to_vec();
    labels.sort_unstable();
    labels.sort_by(|&a, &b| {
        let sa = scores.get(&a).copied().unwrap_or(f64::NEG_INFINITY);
        let sb = scores.get(&b).copied().unwrap_or(f64::NEG_INFINITY);
        sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
    });
    labels
}

/// Groups a descending-by-score list of `(label, score)` pairs into
/// equivalence classes, collapsing consecutive entries whose scores differ
/// by less than `tolerance` into the same class (Cat's convergence-tolerance
/// grouping, also used by the probabilistic semantics' float-equality
/// grouping with a small epsilon).
///
/// `sorted_desc` need not already be sorted; it is sorted internally.
/// Grouping is chained rather than compared against the class's first
/// member, so a class's span can exceed `tolerance` when scores decrease
/// gradually — this matches the reference categoriser's behaviour of
/// comparing only adjacent ranks.
pub fn group_by_tolerance(mut sorted_desc: Vec<(usize, f64)>, tolerance: f64) -> Vec<Vec<usize>> {
    sorted_desc.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut prev_score: Option<f64> = None;
    for (label, score) in sorted_desc {
        let same_class = prev_score
            .map(|prev| (prev - score).abs() < tolerance)
            .unwrap_or(false);
        if same_class {
            classes.last_mut().unwrap().push(label);
        } else {
            classes.push(vec![label]);
        }
        prev_score = Some(score);
    }
    classes
}

/// Groups a list of `(label, key)` pairs into equivalence classes of equal
/// key, ordered by descending key (Dbs's and Ser's exact-equality grouping,
/// where the key is a discussion vector or a serialisation index).
pub fn group_by_equality<T: Ord + Clone>(mut items: Vec<(usize, T)>) -> Vec<Vec<usize>> {
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut prev_key: Option<T> = None;
    for (label, key) in items {
        let same_class = prev_key.as_ref().map(|prev| *prev == key).unwrap_or(false);
        if same_class {
            classes.last_mut().unwrap().push(label);
        } else {
            classes.push(vec![label]);
        }
        prev_key = Some(key);
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_partition_ok() {
        let classes = vec![vec![1, 2], vec![3]];
        assert!(validate_partition(&classes, &[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_validate_partition_missing() {
        let classes = vec![vec![1]];
        assert!(validate_partition(&classes, &[1, 2]).is_err());
    }

    #[test]
    fn test_validate_partition_duplicate() {
        let classes = vec![vec![1, 2], vec![2]];
        assert!(validate_partition(&classes, &[1, 2]).is_err());
    }

    #[test]
    fn test_normalise_classes() {
        let classes = vec![vec![2, 1], vec![3]];
        let order = normalise_classes(&classes, &[1, 2, 3]);
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_normalise_classes_appends_missing() {
        let classes = vec![vec![1]];
        let order = normalise_classes(&classes, &[1, 2, 3]);
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_normalise_scores_descending_with_tiebreak() {
        let mut scores = HashMap::new();
        scores.insert(1, 0.5);
        scores.insert(2, 0.9);
        scores.insert(3, 0.5);
        let order = normalise_scores(&scores, &[1, 2, 3]);
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn test_group_by_tolerance() {
        let scores = vec![(1, 0.9), (2, 0.5), (3, 0.899), (4, 0.1)];
        let classes = group_by_tolerance(scores, 0.01);
        assert_eq!(classes, vec![vec![1, 3], vec![2], vec![4]]);
    }

    #[test]
    fn test_group_by_equality() {
        let items = vec![(1, 3), (2, 1), (3, 3), (4, 2)];
        let classes = group_by_equality(items);
        assert_eq!(classes, vec![vec![1, 3], vec![4], vec![2]]);
    }

    #[test]
    fn test_idempotent_normalise_then_regroup() {
        let classes = vec![vec![1, 2], vec![3]];
        let order = normalise_classes(&classes, &[1, 2, 3]);
        let order2 = normalise_classes(&classes, &[1, 2, 3]);
        assert_eq!(order, order2);
    }
}
