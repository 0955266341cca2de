//! Data structures for the per-directory totals collected during a scan.

use std::fmt;
use std::ops::AddAssign;
use std::path::PathBuf;

/// Name of the synthetic entry that holds the loose files directly under the root.
pub const ROOT_ENTRY_NAME: &str = "[RootDir]";

/// Accumulated size and file count of a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Size in bytes
    pub size: u64,
    /// Number of non-directory entries
    pub files: u64,
}

impl Totals {
    /// Create totals from a size and a file count
    pub fn new(size: u64, files: u64) -> Self {
        Self { size, files }
    }

    /// Count one more file of the given length
    pub fn add_file(&mut self, len: u64) {
        self.size += len;
        self.files += 1;
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.size += rhs.size;
        self.files += rhs.files;
    }
}

/// The metric a report ranks and scales its visual map by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Size,
    Files,
}

/// One reportable row: an immediate subdirectory of the root, or the root pseudo-entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Directory basename, or [`ROOT_ENTRY_NAME`]
    pub name: String,
    /// Absolute path of the directory
    pub path: PathBuf,
    /// Aggregated totals for everything below `path`
    pub totals: Totals,
    /// Whether the root member was reached through a symbolic link
    pub is_symlink: bool,
}

impl Entry {
    /// Create a new Entry
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, totals: Totals) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            totals,
            is_symlink: false,
        }
    }

    /// Mark the entry as reached through a symbolic link
    pub fn symlinked(mut self, is_symlink: bool) -> Self {
        self.is_symlink = is_symlink;
        self
    }

    /// Value of the given metric for this entry
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Size => self.totals.size,
            Metric::Files => self.totals.files,
        }
    }
}

/// A non-fatal problem hit while scanning: the path that failed and why.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl ScanWarning {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_accumulate() {
        let mut totals = Totals::default();
        totals.add_file(100);
        totals.add_file(50);
        totals += Totals::new(150, 2);

        assert_eq!(totals, Totals::new(300, 4));
    }

    #[test]
    fn test_entry_metric() {
        let entry = Entry::new("docs", "/tmp/docs", Totals::new(2048, 3));
        assert_eq!(entry.metric(Metric::Size), 2048);
        assert_eq!(entry.metric(Metric::Files), 3);
        assert!(!entry.is_symlink);
    }

    #[test]
    fn test_warning_display() {
        let warning = ScanWarning::new("/tmp/locked", "Permission denied");
        assert_eq!(warning.to_string(), "/tmp/locked: Permission denied");
    }
}
