//! The `report` subcommand (§6): aggregates per-framework correlation CSVs
//! into mean/median/standard-deviation matrices, optionally stratified by
//! structural category.
//!
//! Supplements `original_source/src/generate_report.py`'s aggregation logic,
//! reimplemented here against §6's literal stratification set — `{all,
//! cyclic, acyclic, sparse, dense}` — rather than the original's
//! dataset-specific fast/tweety split, which is an artifact of that script's
//! particular benchmark layout and not part of this specification.

use crate::af::read_iccma_af;
use crate::error::CoreError;
use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::classify::{density_group, is_cyclic, DensityGroup};
use super::discovery::find_framework_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Stratum {
    All,
    Cyclic,
    Acyclic,
    Sparse,
    Dense,
}

impl Stratum {
    fn label(&self) -> &'static str {
        match self {
            Stratum::All => "all",
            Stratum::Cyclic => "cyclic",
            Stratum::Acyclic => "acyclic",
            Stratum::Sparse => "sparse",
            Stratum::Dense => "dense",
        }
    }
}

fn strata_for(cyclic: bool, density: DensityGroup) -> Vec<Stratum> {
    let mut strata = vec![Stratum::All];
    strata.push(if cyclic { Stratum::Cyclic } else { Stratum::Acyclic });
    match density {
        DensityGroup::Sparse => strata.push(Stratum::Sparse),
        DensityGroup::Dense => strata.push(Stratum::Dense),
        DensityGroup::Medium => {}
    }
    strata
}

/// One correlation matrix parsed from a `_kendall.csv`/`_spearman.csv` file:
/// semantics names plus every cell, keyed by `(row, col)`.
struct ParsedMatrix {
    cells: HashMap<(String, String), f64>,
}

fn parse_matrix_csv(path: &Path) -> Result<ParsedMatrix> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let header: Vec<String> = reader.headers()?.iter().skip(1).map(|s| s.to_string()).collect();
    let mut cells = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let row_name = fields.next().context("missing row name column")?.to_string();
        for (col_name, value) in header.iter().zip(fields) {
            let parsed: f64 = value.parse().with_context(|| format!("parsing cell value '{value}'"))?;
            cells.insert((row_name.clone(), col_name.clone()), parsed);
        }
    }
    Ok(ParsedMatrix { cells })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Writes the mean/median/stddev matrices for one stratum and one statistic
/// kind (`"kendall"` or `"spearman"`) out of its contributing matrices.
fn write_stratum_report(output_dir: &Path, stratum: Stratum, kind: &str, matrices: &[ParsedMatrix]) -> Result<()> {
    if matrices.is_empty() {
        return Ok(());
    }
    let mut names: BTreeSet<String> = BTreeSet::new();
    for matrix in matrices {
        for (row, col) in matrix.cells.keys() {
            names.insert(row.clone());
            names.insert(col.clone());
        }
    }
    let names: Vec<String> = names.into_iter().collect();

    let mut per_cell: HashMap<(String, String), Vec<f64>> = HashMap::new();
    for matrix in matrices {
        for (key, &value) in &matrix.cells {
            per_cell.entry(key.clone()).or_default().push(value);
        }
    }

    for (stat_name, aggregator) in [
        ("mean", mean as fn(&[f64]) -> f64),
        ("median", median as fn(&[f64]) -> f64),
        ("stddev", stddev as fn(&[f64]) -> f64),
    ] {
        let path = output_dir.join(format!("{}_{kind}_{stat_name}.csv", stratum.label()));
        let mut writer = csv::Writer::from_path(&path).with_context(|| format!("opening {}", path.display()))?;
        let mut header = vec![String::new()];
        header.extend(names.iter().cloned());
        writer.write_record(&header)?;
        for row_name in &names {
            let mut row = vec![row_name.clone()];
            for col_name in &names {
                let key = (row_name.clone(), col_name.clone());
                let cell = per_cell
                    .get(&key)
                    .map(|values| aggregator(values))
                    .unwrap_or(f64::NAN);
                row.push(format!("{cell}"));
            }
            writer.write_record(&row)?;
        }
        writer.flush()?;
    }
    Ok(())
}

/// Runs the `report` subcommand: aggregates every `_kendall.csv`/
/// `_spearman.csv` pair found in `results_dir` for which a matching `.af`
/// framework exists under `benchmark_dir`, stratified per §6.
pub fn run(results_dir: &Path, benchmark_dir: &Path, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).with_context(|| format!("creating {}", output_dir.display()))?;
    let frameworks = find_framework_files(benchmark_dir)
        .with_context(|| format!("scanning {}", benchmark_dir.display()))?;
    if frameworks.is_empty() {
        return Err(CoreError::InputError(format!(
            "no '.af' files found under {}",
            benchmark_dir.display()
        ))
        .into());
    }

    let mut kendall_by_stratum: HashMap<Stratum, Vec<ParsedMatrix>> = HashMap::new();
    let mut spearman_by_stratum: HashMap<Stratum, Vec<ParsedMatrix>> = HashMap::new();
    let mut n_included = 0;

    for framework_path in &frameworks {
        let base_name = framework_path
            .file_name()
            .map(|n| n.to_string_lossy().trim_end_matches(".af").to_string())
            .unwrap_or_default();
        let kendall_path = results_dir.join(format!("{base_name}_kendall.csv"));
        let spearman_path = results_dir.join(format!("{base_name}_spearman.csv"));
        if !kendall_path.exists() || !spearman_path.exists() {
            continue;
        }
        let af = match read_iccma_af(framework_path) {
            Ok(af) => af,
            Err(e) => {
                log::warn!("skipping {}: {e}", framework_path.display());
                continue;
            }
        };
        if af.n_arguments() == 0 {
            continue;
        }
        let n = af.n_arguments();
        let density = af.n_attacks() as f64 / (n * (n - 1)).max(1) as f64;
        let strata = strata_for(is_cyclic(&af), density_group(density));

        let kendall_matrix = parse_matrix_csv(&kendall_path)?;
        let spearman_matrix = parse_matrix_csv(&spearman_path)?;
        for stratum in strata {
            kendall_by_stratum.entry(stratum).or_default().push(ParsedMatrix {
                cells: kendall_matrix.cells.clone(),
            });
            spearman_by_stratum.entry(stratum).or_default().push(ParsedMatrix {
                cells: spearman_matrix.cells.clone(),
            });
        }
        n_included += 1;
    }

    if n_included == 0 {
        anyhow::bail!("no processed frameworks found under {}", results_dir.display());
    }

    for stratum in [Stratum::All, Stratum::Cyclic, Stratum::Acyclic, Stratum::Sparse, Stratum::Dense] {
        if let Some(matrices) = kendall_by_stratum.get(&stratum) {
            write_stratum_report(output_dir, stratum, "kendall", matrices)?;
        }
        if let Some(matrices) = spearman_by_stratum.get(&stratum) {
            write_stratum_report(output_dir, stratum, "spearman", matrices)?;
        }
    }

    log::info!("aggregated {} frameworks into {}", n_included, output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_median_stddev() {
        let values = vec![1.0, 2.0, 3.0];
        assert!((mean(&values) - 2.0).abs() < 1e-9);
        assert!((median(&values) - 2.0).abs() < 1e-9);
        assert!(stddev(&values) > 0.0);
    }

    #[test]
    fn test_median_even_length() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert!((median(&values) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_stddev_single_value_is_zero() {
        assert_eq!(stddev(&[1.0]), 0.0);
    }

    #[test]
    fn test_strata_for_cyclic_sparse() {
        let strata = strata_for(true, DensityGroup::Sparse);
        assert!(strata.contains(&Stratum::All));
        assert!(strata.contains(&Stratum::Cyclic));
        assert!(strata.contains(&Stratum::Sparse));
        assert!(!strata.contains(&Stratum::Acyclic));
    }
}
