//! The probabilistic semantics family (C5/C6/C7): p-Admissible, p-Stable,
//! p-Grounded, p-Complete, p-Preferred and p-Ideal, all sharing the
//! sample-or-enumerate dispatcher of [`base`] and differing only in the
//! [`family::ExtensionFamily`] capability they plug in (or, for the two
//! analytical scorers, bypassing it entirely via a closed form).

mod analytical;
mod base;
mod family;

pub use base::ProbabilisticOptions;

use crate::af::AAFramework;
use crate::error::CoreResult;
use crate::ranking::{group_by_tolerance, EquivalenceRanking};
use family::{CompleteFamily, GroundedFamily, IdealFamily, PreferredFamily};
use std::collections::HashMap;

/// Per §3, probabilistic scorers group equal scores within `1e-9`.
const PROBABILISTIC_TOLERANCE: f64 = 1e-9;

fn ranking_from_scores(scores: &HashMap<usize, f64>) -> EquivalenceRanking {
    let by_label: Vec<(usize, f64)> = scores.iter().map(|(&label, &score)| (label, score)).collect();
    EquivalenceRanking::new(group_by_tolerance(by_label, PROBABILISTIC_TOLERANCE))
}

/// `score(a) = Pr[{a} is admissible]`, a closed-form computation (C6) that
/// never samples.
pub fn p_admissible_ranking(af: &AAFramework, p: f64) -> EquivalenceRanking {
    ranking_from_scores(&analytical::p_admissible_scores(af, p))
}

/// `log score(a) = log Pr[{a} is stable]` (C6), descending (less negative is
/// better). Self-attackers score `−∞` and always rank last.
pub fn p_stable_ranking(af: &AAFramework, p: f64) -> EquivalenceRanking {
    ranking_from_scores(&analytical::p_stable_log_scores(af, p))
}

/// `score(a) = Pr[a credulously accepted]` under grounded semantics (C5 +
/// C7). Grounded is excluded from the large-graph fixed-size heuristic
/// (§4.4/§9) since its extension is cheap to recompute per sample.
pub fn p_grounded_ranking(af: &AAFramework, options: ProbabilisticOptions) -> CoreResult<EquivalenceRanking> {
    let scores = base::dispatch(af, &GroundedFamily, options)?;
    Ok(ranking_from_scores(&scores))
}

/// `score(a) = Pr[a credulously accepted]` under complete semantics.
pub fn p_complete_ranking(af: &AAFramework, options: ProbabilisticOptions) -> CoreResult<EquivalenceRanking> {
    let scores = base::dispatch(af, &CompleteFamily, options)?;
    Ok(ranking_from_scores(&scores))
}

/// `score(a) = Pr[a credulously accepted]` under preferred semantics.
pub fn p_preferred_ranking(af: &AAFramework, options: ProbabilisticOptions) -> CoreResult<EquivalenceRanking> {
    let scores = base::dispatch(af, &PreferredFamily, options)?;
    Ok(ranking_from_scores(&scores))
}

/// `score(a) = Pr[a credulously accepted]` under ideal semantics.
pub fn p_ideal_ranking(af: &AAFramework, options: ProbabilisticOptions) -> CoreResult<EquivalenceRanking> {
    let scores = base::dispatch(af, &IdealFamily, options)?;
    Ok(ranking_from_scores(&scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    fn simple_chain() -> AAFramework {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af
    }

    #[test]
    fn test_p_complete_simple_chain() {
        let af = simple_chain();
        let ranking = p_complete_ranking(&af, ProbabilisticOptions::default()).unwrap();
        let order = ranking.normalise(&[1, 2]);
        assert_eq!(order, vec![1, 2]);
        ranking.validate_partition(&[1, 2]).unwrap();
    }

    #[test]
    fn test_p_admissible_and_p_stable_partition() {
        let af = simple_chain();
        let admissible = p_admissible_ranking(&af, 0.5);
        admissible.validate_partition(&[1, 2]).unwrap();
        let stable = p_stable_ranking(&af, 0.5);
        stable.validate_partition(&[1, 2]).unwrap();
    }

    #[test]
    fn test_p_grounded_self_attack_scores_zero() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 1).unwrap();
        let ranking = p_grounded_ranking(&af, ProbabilisticOptions::default()).unwrap();
        ranking.validate_partition(&[1]).unwrap();
    }
}
