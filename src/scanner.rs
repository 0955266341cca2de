//! Recursive subtree scanning and the root listing it is driven from.

use crate::node::{ScanWarning, Totals};
use anyhow::{Context, Result};
use jwalk::{Parallelism, WalkDir};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Scanner configuration
#[derive(Default)]
pub struct Scanner {
    /// Shared pool for parallel traversal (None = walk on the calling thread)
    pool: Option<Arc<ThreadPool>>,
}

/// Totals of one subtree together with the problems hit while walking it.
#[derive(Debug, Default)]
pub struct SubtreeScan {
    pub totals: Totals,
    pub warnings: Vec<ScanWarning>,
}

/// An immediate member of a directory.
#[derive(Debug, Clone)]
pub struct Child {
    pub name: String,
    /// Absolute path of the member
    pub path: PathBuf,
    /// True for directories, including symbolic links that resolve to one
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Length in bytes (0 for directories)
    pub len: u64,
}

impl Scanner {
    /// Create a new Scanner that walks on the calling thread
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk subtrees on a dedicated pool of `threads` workers (defaults to the number of cores)
    pub fn with_threads(mut self, threads: Option<usize>) -> Result<Self> {
        let num_threads = threads.unwrap_or_else(num_cpus).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("dirsize-walk-{i}"))
            .build()
            .context("Failed to start the scanning thread pool")?;
        debug!(num_threads, "scanner thread pool ready");
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    fn parallelism(&self) -> Parallelism {
        match &self.pool {
            Some(pool) => Parallelism::RayonExistingPool {
                pool: Arc::clone(pool),
                busy_timeout: None,
            },
            None => Parallelism::Serial,
        }
    }

    /// Recursively total the size and file count of everything below `dir`.
    ///
    /// Unreadable directories contribute nothing and are reported as warnings;
    /// the walk carries on with the rest of the tree. Symbolic links inside the
    /// subtree are counted as files and never followed.
    pub fn scan(&self, dir: &Path) -> SubtreeScan {
        let mut result = SubtreeScan::default();

        let walker = WalkDir::new(dir)
            .parallelism(self.parallelism())
            .skip_hidden(false)
            .follow_links(false);

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    // jwalk keeps a failed listing on the directory entry itself
                    if let Some(err) = &entry.read_children_error {
                        result.warnings.push(read_error_warning(
                            entry.path(),
                            err.io_error(),
                            || err.to_string(),
                        ));
                    }
                    if entry.file_type().is_dir() {
                        continue;
                    }
                    match entry.metadata() {
                        Ok(metadata) => result.totals.add_file(metadata.len()),
                        Err(err) => {
                            // Still a file, even if it vanished before we could size it
                            result.totals.add_file(0);
                            result
                                .warnings
                                .push(ScanWarning::new(entry.path(), err.to_string()));
                        }
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    result
                        .warnings
                        .push(read_error_warning(path, err.io_error(), || err.to_string()));
                }
            }
        }

        result
    }
}

/// Warning for a path the walk could not read, preferring the underlying I/O reason.
fn read_error_warning(
    path: PathBuf,
    io_error: Option<&io::Error>,
    describe: impl FnOnce() -> String,
) -> ScanWarning {
    let reason = io_error.map(|io| io.to_string()).unwrap_or_else(describe);
    debug!(path = %path.display(), %reason, "skipping unreadable entry");
    ScanWarning::new(path, reason)
}

/// List the immediate members of `dir`, sorted by name.
///
/// Members are classified by following symbolic links, so a link to a
/// directory is reported as a directory. A dangling link is reported as a
/// file with the length of the link itself.
pub fn list_children(dir: &Path) -> Result<Vec<Child>> {
    let read_dir =
        fs::read_dir(dir).with_context(|| format!("Failed to list '{}'", dir.display()))?;

    let mut children = Vec::new();
    for entry in read_dir {
        let entry = entry.with_context(|| format!("Failed to list '{}'", dir.display()))?;
        let path = entry.path();
        let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);

        let (is_dir, len) = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_dir() => (true, 0),
            Ok(metadata) => (false, metadata.len()),
            Err(_) => (false, fs::symlink_metadata(&path).map(|m| m.len()).unwrap_or(0)),
        };

        children.push(Child {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            is_dir,
            is_symlink,
            len,
        });
    }

    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

/// Get the number of CPU cores
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
