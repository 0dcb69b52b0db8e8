//! The probabilistic base (C5): per-argument existence probability, a
//! sample-or-enumerate dispatcher, and a bounded Monte-Carlo worker pool.

use super::family::ExtensionFamily;
use crate::af::AAFramework;
use crate::error::{CoreError, CoreResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// Tuning parameters shared by every probabilistic semantics.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilisticOptions {
    /// Uniform per-argument existence probability, `p ∈ (0,1)`.
    pub p: f64,
    /// Monte-Carlo sample budget `N`. Also the threshold against which
    /// `2^n` is compared to decide exact enumeration vs. sampling.
    pub n_samples: usize,
    /// Base seed; worker `i` draws from a RNG seeded with `base_seed ^ i`.
    pub base_seed: u64,
    /// Above this argument count, samples are drawn via the fixed-size
    /// heuristic of §4.4/§9 instead of independent per-argument Bernoulli
    /// draws (subject to [`ExtensionFamily::allows_large_graph_heuristic`]).
    pub large_graph_threshold: usize,
    /// The fixed sample size used by the large-graph heuristic, capped at
    /// the argument count.
    pub heuristic_sample_size: usize,
}

impl Default for ProbabilisticOptions {
    fn default() -> Self {
        Self {
            p: 0.5,
            n_samples: 10_000,
            base_seed: 0,
            large_graph_threshold: 30,
            heuristic_sample_size: 16,
        }
    }
}

/// Computes `score(a) = Pr[a is credulously accepted]` for every argument,
/// dispatching between exact enumeration and Monte-Carlo sampling per
/// §4.4's `2^n < N` rule.
pub fn dispatch(
    af: &AAFramework,
    family: &dyn ExtensionFamily,
    options: ProbabilisticOptions,
) -> CoreResult<HashMap<usize, f64>> {
    let n = af.n_arguments();
    if should_enumerate_exactly(n, options.n_samples) {
        log::debug!(
            "{}: exact enumeration over 2^{} subgraphs (p={})",
            family.name(),
            n,
            options.p
        );
        exact_scores(af, family, options.p)
    } else {
        log::debug!(
            "{}: Monte-Carlo sampling, {} samples (p={})",
            family.name(),
            options.n_samples,
            options.p
        );
        sampled_scores(af, family, options)
    }
}

fn should_enumerate_exactly(n: usize, n_samples: usize) -> bool {
    if n == 0 {
        return true;
    }
    if n > 62 {
        // 2^n would overflow a u64; an AF that large is always sampled.
        return false;
    }
    (1u64 << n) < n_samples as u64
}

/// Exact enumeration over all `2^n` induced subgraphs, weighting each by
/// `p^|S| (1-p)^(n-|S|)`.
fn exact_scores(
    af: &AAFramework,
    family: &dyn ExtensionFamily,
    p: f64,
) -> CoreResult<HashMap<usize, f64>> {
    let n = af.n_arguments();
    let mut scores: HashMap<usize, f64> = af
        .argument_set()
        .iter()
        .map(|arg| (arg.label(), 0.0))
        .collect();
    if n == 0 {
        return Ok(scores);
    }

    for mask in 0u64..(1u64 << n) {
        let ids: Vec<usize> = (0..n).filter(|&i| mask & (1 << i) != 0).collect();
        let k = ids.len();
        if k == 0 {
            continue;
        }
        let weight = p.powi(k as i32) * (1.0 - p).powi((n - k) as i32);
        let subgraph = af.induced_subgraph(&ids);
        let accepted = credulously_accepted(family, &subgraph)?;
        for label in accepted {
            *scores.get_mut(&label).expect("label from parent AF") += weight;
        }
    }
    Ok(scores)
}

fn credulously_accepted(
    family: &dyn ExtensionFamily,
    subgraph: &AAFramework,
) -> CoreResult<HashSet<usize>> {
    let extensions = family.extensions(subgraph)?;
    Ok(extensions.into_iter().flatten().collect())
}

/// Monte-Carlo sampling: `N` independent existence draws, each subgraph's
/// credulous-acceptance set accumulated into a per-argument count, divided
/// by `N`. Parallelised across a bounded worker pool per §5.
fn sampled_scores(
    af: &AAFramework,
    family: &dyn ExtensionFamily,
    options: ProbabilisticOptions,
) -> CoreResult<HashMap<usize, f64>> {
    let n = af.n_arguments();
    let labels: Vec<usize> = af.argument_set().iter().map(|arg| arg.label()).collect();
    if n == 0 {
        return Ok(HashMap::new());
    }

    let use_heuristic =
        n > options.large_graph_threshold && family.allows_large_graph_heuristic();
    let n_threads = std::cmp::max(1, std::thread::available_parallelism().map_or(1, |p| p.get()) / 2);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .map_err(|e| CoreError::SolverError(format!("failed to build sampling thread pool: {e}")))?;

    let counts = pool.install(|| {
        use rayon::prelude::*;
        (0..options.n_samples)
            .into_par_iter()
            .try_fold(
                || vec![0u64; n],
                |mut acc, sample_index| -> CoreResult<Vec<u64>> {
                    let mut rng = StdRng::seed_from_u64(options.base_seed ^ (sample_index as u64));
                    let existing_ids = draw_existing_ids(&mut rng, n, options.p, use_heuristic, options.heuristic_sample_size);
                    if existing_ids.is_empty() {
                        return Ok(acc);
                    }
                    let subgraph = af.induced_subgraph(&existing_ids);
                    let accepted = credulously_accepted(family, &subgraph)?;
                    for label in accepted {
                        let id = af
                            .argument_set()
                            .get_argument(label)
                            .expect("label from parent AF")
                            .id();
                        acc[id] += 1;
                    }
                    Ok(acc)
                },
            )
            .try_reduce(
                || vec![0u64; n],
                |mut a, b| {
                    for i in 0..n {
                        a[i] += b[i];
                    }
                    Ok(a)
                },
            )
    })?;

    Ok(labels
        .into_iter()
        .map(|label| {
            let id = af.argument_set().get_argument(label).expect("label from parent AF").id();
            (label, counts[id] as f64 / options.n_samples as f64)
        })
        .collect())
}

fn draw_existing_ids(
    rng: &mut StdRng,
    n: usize,
    p: f64,
    use_heuristic: bool,
    heuristic_sample_size: usize,
) -> Vec<usize> {
    if use_heuristic {
        let k = std::cmp::min(heuristic_sample_size, n);
        rand::seq::index::sample(rng, n, k).into_vec()
    } else {
        (0..n).filter(|_| rng.gen::<f64>() < p).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;
    use crate::probabilistic::family::GroundedFamily;

    fn two_cycle() -> AAFramework {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 1).unwrap();
        af
    }

    #[test]
    fn test_should_enumerate_exactly() {
        assert!(should_enumerate_exactly(8, 10_000));
        assert!(!should_enumerate_exactly(20, 10_000));
        assert!(should_enumerate_exactly(0, 1));
    }

    #[test]
    fn test_exact_scores_single_attack_chain() {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        let scores = exact_scores(&af, &GroundedFamily, 0.5).unwrap();
        // 1 is grounded-accepted in every subgraph where it exists: p=0.5.
        assert!((scores[&1] - 0.5).abs() < 1e-9);
        // 2 is accepted only in subgraphs where it exists and 1 does not.
        assert!((scores[&2] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_sampled_scores_bounds() {
        let af = two_cycle();
        let options = ProbabilisticOptions {
            n_samples: 200,
            ..ProbabilisticOptions::default()
        };
        let scores = sampled_scores(&af, &GroundedFamily, options).unwrap();
        for &s in scores.values() {
            assert!((0.0..=1.0).contains(&s));
        }
    }
}
