//! The `run` subcommand (§6): for each framework, runs every applicable
//! semantics under a 600-second timeout and writes the pairwise correlation
//! CSVs, or a `.timeout` sentinel if any semantics exceeded its deadline.

use crate::af::{read_iccma_af, AAFramework};
use crate::error::{CoreError, CoreResult};
use crate::probabilistic::{
    p_admissible_ranking, p_complete_ranking, p_grounded_ranking, p_ideal_ranking,
    p_preferred_ranking, p_stable_ranking, ProbabilisticOptions,
};
use crate::ranking::EquivalenceRanking;
use crate::solvers::{cat_ranking, dbs_ranking, ser_ranking, CatOptions, DbsOptions, SerOptions};
use crate::timeout::{run_with_timeout, TimeoutOutcome};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use super::correlation::{kendall_tau_b, spearman_rho};
use super::discovery::find_framework_files;
use super::resultfiles::{pairwise_matrix, should_skip, write_correlation_matrix, write_timeout_sentinel};

const TIMEOUT: Duration = Duration::from_secs(600);

/// All nine semantics, in a fixed, stable CSV-header order.
const ALL_SEMANTICS: &[&str] = &[
    "Cat", "Dbs", "Ser", "p-Admissible", "p-Stable", "p-Grounded", "p-Complete", "p-Preferred",
    "p-Ideal",
];

/// The fast four used for the larger, non-tweety benchmark set.
const FAST_SEMANTICS: &[&str] = &["Cat", "Dbs", "p-Stable", "p-Admissible"];

fn semantics_for(path: &Path) -> &'static [&'static str] {
    if path.to_string_lossy().contains("benchmarks_tweety") {
        ALL_SEMANTICS
    } else {
        FAST_SEMANTICS
    }
}

fn solve(name: &str, af: AAFramework) -> CoreResult<EquivalenceRanking> {
    match name {
        "Cat" => Ok(cat_ranking(&af, CatOptions::default())),
        "Dbs" => dbs_ranking(&af, DbsOptions::default()),
        "Ser" => ser_ranking(&af, SerOptions::default()),
        "p-Admissible" => Ok(p_admissible_ranking(&af, 0.5)),
        "p-Stable" => Ok(p_stable_ranking(&af, 0.5)),
        "p-Grounded" => p_grounded_ranking(&af, ProbabilisticOptions::default()),
        "p-Complete" => p_complete_ranking(&af, ProbabilisticOptions::default()),
        "p-Preferred" => p_preferred_ranking(&af, ProbabilisticOptions::default()),
        "p-Ideal" => p_ideal_ranking(&af, ProbabilisticOptions::default()),
        other => unreachable!("unknown semantics name {other}"),
    }
}

fn run_one_framework(path: &Path, results_dir: &Path) -> Result<()> {
    let framework_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let base_name = framework_name.trim_end_matches(".af").to_string();

    if should_skip(results_dir, &base_name) {
        log::info!("skipping {framework_name}: already processed or previously timed out");
        return Ok(());
    }

    let af = read_iccma_af(path).with_context(|| format!("parsing {}", path.display()))?;
    let labels: Vec<usize> = af.argument_set().iter().map(|a| a.label()).collect();
    let semantics = semantics_for(path);

    let mut completed: Vec<(String, EquivalenceRanking)> = Vec::new();
    let mut timed_out = false;

    for &name in semantics {
        let af_clone = af.clone();
        let name_owned = name.to_string();
        let outcome = run_with_timeout(move || solve(&name_owned, af_clone), TIMEOUT);
        match outcome {
            TimeoutOutcome::Completed { result, elapsed } => {
                log::debug!("{framework_name}: {name} finished in {:.2}s", elapsed.as_secs_f64());
                completed.push((name.to_string(), result));
            }
            TimeoutOutcome::Timeout => {
                log::warn!("{framework_name}: {name} exceeded {:.0}s timeout", TIMEOUT.as_secs_f64());
                let sentinel = results_dir.join(format!("{base_name}.timeout"));
                write_timeout_sentinel(&sentinel, name)?;
                timed_out = true;
            }
            TimeoutOutcome::Error(message) => {
                log::warn!("{framework_name}: {name} failed: {message}");
            }
        }
    }

    if completed.len() < 2 {
        log::warn!("{framework_name}: fewer than two semantics completed, skipping correlation output");
        return Ok(());
    }

    let names: Vec<&str> = completed.iter().map(|(n, _)| n.as_str()).collect();
    let kendall = pairwise_matrix(&completed, &labels, kendall_tau_b);
    let spearman = pairwise_matrix(&completed, &labels, spearman_rho);

    write_correlation_matrix(&results_dir.join(format!("{base_name}_kendall.csv")), &names, |i, j| kendall[i][j])?;
    write_correlation_matrix(&results_dir.join(format!("{base_name}_spearman.csv")), &names, |i, j| spearman[i][j])?;

    if timed_out {
        log::info!("{framework_name}: partial results written alongside timeout sentinel");
    } else {
        log::info!("{framework_name}: wrote correlation matrices for {} semantics", names.len());
    }
    Ok(())
}

/// Runs the `run` subcommand over every `.af` file under `benchmark_dir`.
pub fn run(benchmark_dir: &Path, results_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(results_dir).with_context(|| format!("creating {}", results_dir.display()))?;
    let paths = find_framework_files(benchmark_dir)
        .with_context(|| format!("scanning {}", benchmark_dir.display()))?;
    if paths.is_empty() {
        return Err(CoreError::InputError(format!(
            "no '.af' files found under {}",
            benchmark_dir.display()
        ))
        .into());
    }
    log::info!("running semantics over {} frameworks", paths.len());
    for path in &paths {
        if let Err(e) = run_one_framework(path, results_dir) {
            log::error!("error processing {}: {e:#}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantics_for_tweety_path_is_all_nine() {
        let path = Path::new("/data/benchmarks_tweety/foo.af");
        assert_eq!(semantics_for(path), ALL_SEMANTICS);
    }

    #[test]
    fn test_semantics_for_iccma_path_is_fast_four() {
        let path = Path::new("/data/benchmarks2023/main/foo.af");
        assert_eq!(semantics_for(path), FAST_SEMANTICS);
    }
}
