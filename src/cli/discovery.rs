//! Recursive `.af` file discovery over a benchmark tree (§6's CLI surface),
//! mirroring `original_source/src/classify_frameworks.py`'s
//! `find_framework_files`.

use std::path::{Path, PathBuf};

/// Recursively collects every `.af` file under `root`, sorted for
/// deterministic processing order.
pub fn find_framework_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    walk(root, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    if !dir.exists() {
        log::warn!("benchmark directory not found: {}", dir.display());
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out)?;
        } else if path.extension().map(|e| e == "af").unwrap_or(false) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_af_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("a.af"), "p af 1\n").unwrap();
        std::fs::write(tmp.path().join("sub").join("b.af"), "p af 1\n").unwrap();
        std::fs::write(tmp.path().join("ignore.txt"), "x").unwrap();
        let found = find_framework_files(tmp.path()).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_missing_directory_returns_empty() {
        let found = find_framework_files(Path::new("/no/such/path/at/all")).unwrap();
        assert!(found.is_empty());
    }
}
