//! Command-line argument parsing using clap derive macros.

use crate::node::Metric;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Column a report is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Total size of each directory
    #[value(alias = "s")]
    Size,
    /// Number of files in each directory
    #[value(alias = "f")]
    Files,
    /// Directory name, ignoring case
    #[value(aliases = ["d", "dir"])]
    Name,
}

impl SortKey {
    /// The metric the visual map is scaled by for this ordering
    pub fn metric(self) -> Metric {
        match self {
            SortKey::Files => Metric::Files,
            SortKey::Size | SortKey::Name => Metric::Size,
        }
    }
}

/// Display the size and file count of every subdirectory.
///
/// Each immediate subdirectory of PATH is scanned recursively and listed with
/// its total size, its file count and a map comparing it to its siblings.
#[derive(Parser, Debug)]
#[command(name = "dirsize")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory to report on (defaults to current directory)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Show debug output
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Do not list directories that could not be scanned
    #[arg(short = 'e', long = "no-errors")]
    pub no_errors: bool,

    /// Order the report by size, file count or name
    #[arg(short = 's', long = "sort", value_enum, default_value_t = SortKey::Size)]
    pub sort: SortKey,

    /// Reverse the sort order
    #[arg(short, long)]
    pub reverse: bool,

    /// Width of the output in columns
    #[arg(
        short = 'c',
        long = "columns",
        default_value = "90",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub columns: u16,

    /// Export the results as CSV to FILE
    #[arg(short = 'x', long = "export", value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Number of threads to use (defaults to number of CPU cores)
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
