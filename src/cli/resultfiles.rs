//! Result/cache file writers (C15): the `_kendall.csv`/`_spearman.csv`
//! matrices and `.timeout` sentinel files of §6, plus the rerun guard that
//! checks for their presence before redoing work.

use crate::ranking::EquivalenceRanking;
use anyhow::{Context, Result};
use std::path::Path;

/// Writes a square correlation matrix CSV: header row of semantics names,
/// then one row per semantics with its name in the first column. The
/// diagonal is forced to `1.0` regardless of the computed value, per §6.
pub fn write_correlation_matrix(
    path: &Path,
    names: &[&str],
    matrix: impl Fn(usize, usize) -> f64,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let mut header = vec![String::new()];
    header.extend(names.iter().map(|n| n.to_string()));
    writer.write_record(&header)?;
    for (i, &row_name) in names.iter().enumerate() {
        let mut row = vec![row_name.to_string()];
        for j in 0..names.len() {
            let value = if i == j { 1.0 } else { matrix(i, j) };
            row.push(format!("{value}"));
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a `.timeout` sentinel: a human-readable timestamp plus the
/// offending semantics name. Presence of this file is the rerun guard.
pub fn write_timeout_sentinel(path: &Path, semantics_name: &str) -> Result<()> {
    let contents = format!(
        "{} timed out under semantics '{}'\n",
        chrono::Utc::now().to_rfc2822(),
        semantics_name
    );
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// `true` iff `name`'s results under `results_dir` should be skipped: either
/// the timeout sentinel is present, or both correlation CSVs already exist.
pub fn should_skip(results_dir: &Path, base_name: &str) -> bool {
    let timeout_marker = results_dir.join(format!("{base_name}.timeout"));
    if timeout_marker.exists() {
        return true;
    }
    let kendall = results_dir.join(format!("{base_name}_kendall.csv"));
    let spearman = results_dir.join(format!("{base_name}_spearman.csv"));
    kendall.exists() && spearman.exists()
}

/// Computes the full `n x n` correlation matrix between a list of named
/// rankings using the given pairwise statistic.
pub fn pairwise_matrix(
    rankings: &[(String, EquivalenceRanking)],
    labels: &[usize],
    statistic: impl Fn(&EquivalenceRanking, &EquivalenceRanking, &[usize]) -> f64,
) -> Vec<Vec<f64>> {
    let n = rankings.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            matrix[i][j] = if i == j { 1.0 } else { statistic(&rankings[i].1, &rankings[j].1, labels) };
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_false_when_nothing_present() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!should_skip(tmp.path(), "foo"));
    }

    #[test]
    fn test_should_skip_true_with_timeout_sentinel() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("foo.timeout"), "x").unwrap();
        assert!(should_skip(tmp.path(), "foo"));
    }

    #[test]
    fn test_should_skip_true_with_both_csvs() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("foo_kendall.csv"), "x").unwrap();
        std::fs::write(tmp.path().join("foo_spearman.csv"), "x").unwrap();
        assert!(should_skip(tmp.path(), "foo"));
    }

    #[test]
    fn test_should_skip_false_with_only_one_csv() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("foo_kendall.csv"), "x").unwrap();
        assert!(!should_skip(tmp.path(), "foo"));
    }

    #[test]
    fn test_write_correlation_matrix_forces_diagonal() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_correlation_matrix(&path, &["a", "b"], |_, _| 0.42).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("1.0"));
        assert!(contents.contains("0.42"));
    }
}
