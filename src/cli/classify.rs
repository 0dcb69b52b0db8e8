//! The `classify` subcommand (§6): scans a benchmark tree and emits a CSV
//! of structural properties per framework, mirroring
//! `original_source/src/classify_frameworks.py`'s `get_framework_properties`.

use crate::af::{read_iccma_af, AAFramework};
use crate::error::CoreError;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use super::discovery::find_framework_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum Cyclicity {
    Cyclic,
    Acyclic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum SizeGroup {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum DensityGroup {
    Sparse,
    Medium,
    Dense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum Connectivity {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum Status {
    Processed,
    #[serde(rename = "Timed Out")]
    TimedOut,
    #[serde(rename = "Not Processed")]
    NotProcessed,
}

#[derive(Debug, Serialize)]
struct FrameworkRecord {
    framework_name: String,
    source_dataset: String,
    num_args: usize,
    num_attacks: usize,
    cyclicity: Cyclicity,
    size_group: SizeGroup,
    density_group: DensityGroup,
    density_value: f64,
    connectivity: Connectivity,
    num_components: usize,
    status: Status,
}

pub(crate) fn size_group(n: usize) -> SizeGroup {
    if n < 25 {
        SizeGroup::Small
    } else if n <= 75 {
        SizeGroup::Medium
    } else {
        SizeGroup::Large
    }
}

pub(crate) fn density_group(density: f64) -> DensityGroup {
    if density < 0.05 {
        DensityGroup::Sparse
    } else if density <= 0.15 {
        DensityGroup::Medium
    } else {
        DensityGroup::Dense
    }
}

pub(crate) fn is_cyclic(af: &AAFramework) -> bool {
    // Plain DFS cycle detection over the attack relation (white/gray/black
    // colouring); self-loops count as cycles.
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }
    let n = af.n_arguments();
    let mut color = vec![Color::White; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..n {
        if color[start] != Color::White {
            continue;
        }
        stack.push((start, 0));
        color[start] = Color::Gray;
        while let Some(&mut (node, ref mut next_child)) = stack.last_mut() {
            let children = af.attackees_of_id(node);
            if *next_child < children.len() {
                let child = children[*next_child];
                *next_child += 1;
                match color[child] {
                    Color::White => {
                        color[child] = Color::Gray;
                        stack.push((child, 0));
                    }
                    Color::Gray => return true,
                    Color::Black => {}
                }
            } else {
                color[node] = Color::Black;
                stack.pop();
            }
        }
    }
    false
}

fn num_weakly_connected_components(af: &AAFramework) -> usize {
    let n = af.n_arguments();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]);
        }
        parent[x]
    }

    for node in 0..n {
        for &attackee in af.attackees_of_id(node) {
            let a = find(&mut parent, node);
            let b = find(&mut parent, attackee);
            if a != b {
                parent[a] = b;
            }
        }
    }
    let roots: HashSet<usize> = (0..n).map(|i| find(&mut parent, i)).collect();
    roots.len()
}

fn result_status(results_dir: &Path, base_name: &str) -> Status {
    let timeout_marker = results_dir.join(format!("{base_name}.timeout"));
    let kendall = results_dir.join(format!("{base_name}_kendall.csv"));
    let spearman = results_dir.join(format!("{base_name}_spearman.csv"));
    if timeout_marker.exists() {
        Status::TimedOut
    } else if kendall.exists() && spearman.exists() {
        Status::Processed
    } else {
        Status::NotProcessed
    }
}

fn classify_one(path: &Path, results_dir: &Path) -> Result<Option<FrameworkRecord>> {
    let af = read_iccma_af(path).with_context(|| format!("parsing {}", path.display()))?;
    let n = af.n_arguments();
    if n == 0 {
        return Ok(None);
    }
    let num_attacks = af.n_attacks();
    let max_edges = n * (n - 1);
    let density_value = if max_edges > 0 {
        num_attacks as f64 / max_edges as f64
    } else {
        0.0
    };
    let num_components = num_weakly_connected_components(&af);
    let framework_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source_dataset = if path.to_string_lossy().contains("benchmarks_tweety") {
        "tweety".to_string()
    } else {
        "iccma23".to_string()
    };
    let base_name = framework_name.trim_end_matches(".af").to_string();

    Ok(Some(FrameworkRecord {
        framework_name,
        source_dataset,
        num_args: n,
        num_attacks,
        cyclicity: if is_cyclic(&af) { Cyclicity::Cyclic } else { Cyclicity::Acyclic },
        size_group: size_group(n),
        density_group: density_group(density_value),
        density_value,
        connectivity: if num_components == 1 { Connectivity::Connected } else { Connectivity::Disconnected },
        num_components,
        status: result_status(results_dir, &base_name),
    }))
}

/// Runs the `classify` subcommand: walks `benchmark_dir`, writes a CSV of
/// structural properties to `output_csv`, checking per-framework processing
/// status against `results_dir`.
pub fn run(benchmark_dir: &Path, results_dir: &Path, output_csv: &Path) -> Result<()> {
    let paths = find_framework_files(benchmark_dir)
        .with_context(|| format!("scanning {}", benchmark_dir.display()))?;
    if paths.is_empty() {
        return Err(CoreError::InputError(format!(
            "no '.af' files found under {}",
            benchmark_dir.display()
        ))
        .into());
    }
    log::info!("classifying {} frameworks", paths.len());

    let mut writer = csv::Writer::from_path(output_csv)
        .with_context(|| format!("opening {}", output_csv.display()))?;
    let mut n_written = 0;
    for path in &paths {
        match classify_one(path, results_dir) {
            Ok(Some(record)) => {
                writer.serialize(&record)?;
                n_written += 1;
            }
            Ok(None) => log::warn!("skipping empty framework {}", path.display()),
            Err(e) => log::warn!("could not classify {}: {e}", path.display()),
        }
    }
    writer.flush()?;
    log::info!("wrote {} records to {}", n_written, output_csv.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    #[test]
    fn test_size_group_boundaries() {
        assert_eq!(size_group(24), SizeGroup::Small);
        assert_eq!(size_group(25), SizeGroup::Medium);
        assert_eq!(size_group(75), SizeGroup::Medium);
        assert_eq!(size_group(76), SizeGroup::Large);
    }

    #[test]
    fn test_density_group_boundaries() {
        assert_eq!(density_group(0.04), DensityGroup::Sparse);
        assert_eq!(density_group(0.05), DensityGroup::Medium);
        assert_eq!(density_group(0.15), DensityGroup::Medium);
        assert_eq!(density_group(0.16), DensityGroup::Dense);
    }

    #[test]
    fn test_is_cyclic_detects_two_cycle() {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 1).unwrap();
        assert!(is_cyclic(&af));
    }

    #[test]
    fn test_is_cyclic_false_for_chain() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        assert!(!is_cyclic(&af));
    }

    #[test]
    fn test_is_cyclic_true_for_self_loop() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 1).unwrap();
        assert!(is_cyclic(&af));
    }

    #[test]
    fn test_weakly_connected_components_disconnected() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3, 4]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        assert_eq!(num_weakly_connected_components(&af), 3);
    }
}
