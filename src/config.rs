//! Resolution of command-line arguments into a validated run configuration.

use crate::cli::{Args, SortKey};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Narrowest output the report can be laid out in
pub const MIN_COLUMNS: usize = 60;

/// Problems with the invocation that stop the run before anything is scanned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot access path '{}': No such file or directory", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Could not create export file '{}'", .path.display())]
    ExportNotCreatable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the directory to report on
    pub root: PathBuf,
    pub sort: SortKey,
    pub reverse: bool,
    /// Output width, at least [`MIN_COLUMNS`]
    pub columns: usize,
    pub show_errors: bool,
    /// CSV file to write, already created
    pub export: Option<PathBuf>,
    pub threads: Option<usize>,
    pub color: bool,
}

impl Config {
    /// Validate `args`: the root must be an existing directory and the export file must be creatable.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let root = args
            .path
            .canonicalize()
            .map_err(|source| ConfigError::NotFound {
                path: args.path.clone(),
                source,
            })?;

        if !root.is_dir() {
            return Err(ConfigError::NotADirectory { path: root });
        }

        if let Some(path) = &args.export {
            // An existing file is never overwritten
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .map_err(|source| ConfigError::ExportNotCreatable {
                    path: path.clone(),
                    source,
                })?;
        }

        let columns = usize::from(args.columns).max(MIN_COLUMNS);
        if columns != usize::from(args.columns) {
            debug!(requested = args.columns, columns, "output width raised to minimum");
        }

        let config = Self {
            root,
            sort: args.sort,
            reverse: args.reverse,
            columns,
            show_errors: !args.no_errors,
            export: args.export.clone(),
            threads: args.threads,
            color: !args.no_color,
        };
        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("dirsize").chain(extra.iter().copied()))
    }

    #[test]
    fn test_resolves_root_and_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::from_args(&args(&[dir.path().to_str().unwrap()])).unwrap();

        assert_eq!(config.root, dir.path().canonicalize().unwrap());
        assert_eq!(config.sort, SortKey::Size);
        assert_eq!(config.columns, 90);
        assert!(config.show_errors);
        assert!(config.color);
        assert!(config.export.is_none());
    }

    #[test]
    fn test_columns_raised_to_minimum() {
        let dir = tempdir().unwrap();
        let config =
            Config::from_args(&args(&[dir.path().to_str().unwrap(), "-c", "20"])).unwrap();
        assert_eq!(config.columns, MIN_COLUMNS);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = Config::from_args(&args(&[missing.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_root_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "content").unwrap();

        let err = Config::from_args(&args(&[file.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory { .. }));
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_export_file_created_up_front() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("report.csv");
        let config = Config::from_args(&args(&[
            dir.path().to_str().unwrap(),
            "-x",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        assert!(out.exists());
        assert_eq!(config.export, Some(out));
    }

    #[test]
    fn test_export_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("precious.txt");
        fs::write(&out, "precious data").unwrap();

        let err = Config::from_args(&args(&[
            dir.path().to_str().unwrap(),
            "-x",
            out.to_str().unwrap(),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::ExportNotCreatable { .. }));
        assert_eq!(fs::read_to_string(&out).unwrap(), "precious data");
    }

    #[test]
    fn test_export_in_missing_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("no/such/dir/report.csv");
        let err = Config::from_args(&args(&[
            dir.path().to_str().unwrap(),
            "-x",
            out.to_str().unwrap(),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ExportNotCreatable { .. }));
    }
}
