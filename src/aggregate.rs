//! Per-subdirectory aggregation of a root directory.

use crate::node::{Entry, ROOT_ENTRY_NAME, ScanWarning, Totals};
use crate::scanner::{Scanner, list_children};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything collected from one pass over a root directory.
#[derive(Debug)]
pub struct RootScan {
    /// Absolute path of the scanned root
    pub root: PathBuf,
    /// One entry per immediate subdirectory, in listing order
    pub dirs: Vec<Entry>,
    /// Loose files directly under the root
    pub root_files: Entry,
    /// Subdirectories plus the root itself
    pub total_dirs: u64,
    /// Everything found, root files included
    pub grand_totals: Totals,
    /// Unreadable paths, sorted by path
    pub warnings: Vec<ScanWarning>,
}

/// Scan each immediate subdirectory of `root` and fold loose files into the root entry.
///
/// `on_dir` is called with the name of each subdirectory before it is scanned.
pub fn scan_root(scanner: &Scanner, root: &Path, mut on_dir: impl FnMut(&str)) -> Result<RootScan> {
    let children = list_children(root)?;

    let (dir_children, file_children): (Vec<_>, Vec<_>) =
        children.into_iter().partition(|child| child.is_dir);
    debug!(
        dirs = ?dir_children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        files = ?file_children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "root members to process"
    );

    let root_totals = Totals::new(
        file_children.iter().map(|file| file.len).sum(),
        file_children.len() as u64,
    );

    let mut dirs = Vec::with_capacity(dir_children.len());
    let mut warnings = Vec::new();
    let mut grand_totals = root_totals;
    let mut total_dirs = 1;

    for child in dir_children {
        on_dir(&child.name);

        // Walk the link target so the subtree itself is scanned
        let target = if child.is_symlink {
            child.path.canonicalize().unwrap_or_else(|_| child.path.clone())
        } else {
            child.path.clone()
        };

        let subtree = scanner.scan(&target);
        debug!(
            dir = %child.name,
            size = subtree.totals.size,
            files = subtree.totals.files,
            "scanned"
        );

        grand_totals += subtree.totals;
        total_dirs += 1;
        warnings.extend(subtree.warnings);
        dirs.push(Entry::new(child.name, child.path, subtree.totals).symlinked(child.is_symlink));
    }

    warnings.sort();
    warnings.dedup();

    Ok(RootScan {
        root: root.to_path_buf(),
        dirs,
        root_files: Entry::new(ROOT_ENTRY_NAME, root, root_totals),
        total_dirs,
        grand_totals,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("A")).unwrap();
        fs::write(dir.path().join("A/one.bin"), "x".repeat(100)).unwrap();
        fs::create_dir(dir.path().join("B")).unwrap();
        fs::write(dir.path().join("B/two.bin"), "x".repeat(50)).unwrap();
        fs::write(dir.path().join("B/three.bin"), "x".repeat(150)).unwrap();
        fs::write(dir.path().join("root.txt"), "x".repeat(10)).unwrap();
        dir
    }

    fn find<'a>(scan: &'a RootScan, name: &str) -> &'a Entry {
        scan.dirs.iter().find(|e| e.name == name).unwrap()
    }

    #[test]
    fn test_scan_root_aggregates_per_directory() {
        let dir = sample_tree();
        let scan = scan_root(&Scanner::new(), dir.path(), |_| {}).unwrap();

        assert_eq!(scan.dirs.len(), 2);
        assert_eq!(find(&scan, "A").totals, Totals::new(100, 1));
        assert_eq!(find(&scan, "B").totals, Totals::new(200, 2));
        assert_eq!(find(&scan, "B").path, dir.path().join("B"));

        assert_eq!(scan.root_files.name, ROOT_ENTRY_NAME);
        assert_eq!(scan.root_files.totals, Totals::new(10, 1));

        assert_eq!(scan.total_dirs, 3);
        assert_eq!(scan.grand_totals, Totals::new(310, 4));
        assert!(scan.warnings.is_empty());
    }

    #[test]
    fn test_grand_totals_are_sum_of_entries() {
        let dir = sample_tree();
        let scan = scan_root(&Scanner::new(), dir.path(), |_| {}).unwrap();

        let mut sum = scan.root_files.totals;
        for entry in &scan.dirs {
            sum += entry.totals;
        }
        assert_eq!(sum, scan.grand_totals);
    }

    #[test]
    fn test_scan_root_reports_each_directory() {
        let dir = sample_tree();
        let mut seen = Vec::new();
        scan_root(&Scanner::new(), dir.path(), |name| seen.push(name.to_string())).unwrap();
        assert_eq!(seen, vec!["A", "B"]);
    }

    #[test]
    fn test_scan_root_empty() {
        let dir = tempdir().unwrap();
        let scan = scan_root(&Scanner::new(), dir.path(), |_| {}).unwrap();

        assert!(scan.dirs.is_empty());
        assert_eq!(scan.total_dirs, 1);
        assert_eq!(scan.grand_totals, Totals::default());
    }

    #[test]
    fn test_scan_root_is_repeatable() {
        let dir = sample_tree();
        let scanner = Scanner::new();
        let first = scan_root(&scanner, dir.path(), |_| {}).unwrap();
        let second = scan_root(&scanner, dir.path(), |_| {}).unwrap();

        assert_eq!(first.dirs, second.dirs);
        assert_eq!(first.grand_totals, second.grand_totals);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_contributes_nothing() {
        use std::os::unix::fs::PermissionsExt;

        let dir = sample_tree();
        let locked = dir.path().join("C");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.bin"), "x".repeat(500)).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let scan = scan_root(&Scanner::new(), dir.path(), |_| {});
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let scan = scan.unwrap();

        assert_eq!(find(&scan, "C").totals, Totals::default());
        assert_eq!(find(&scan, "A").totals, Totals::new(100, 1));
        assert_eq!(scan.grand_totals, Totals::new(310, 4));
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.warnings[0].path.ends_with("C"));
    }
}
