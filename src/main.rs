//! dirsize: report the size and file count of every subdirectory.
//!
//! Each immediate subdirectory of the target is scanned recursively and
//! listed with its totals and a visual map comparing it to its siblings.

mod aggregate;
mod cli;
mod config;
mod display;
mod export;
mod node;
mod progress;
mod range;
mod scanner;
mod sort;

use aggregate::scan_root;
use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use display::{Display, paint};
use owo_colors::Style;
use progress::Spinner;
use scanner::Scanner;
use std::time::Instant;
use tracing::{Level, debug};

fn main() -> Result<()> {
    let args = Args::parse_args();
    init_logging(args.debug, !args.no_color);

    let config = Config::from_args(&args)?;
    if !config.color {
        owo_colors::set_override(false);
    }

    println!(
        "{}",
        paint(
            &format!("dirsize v{}", env!("CARGO_PKG_VERSION")),
            Style::new().cyan()
        )
    );

    let scanner = Scanner::new().with_threads(config.threads)?;

    // Debug lines would be torn up by the spinner redrawing
    let spinner = if args.debug {
        Spinner::hidden()
    } else {
        Spinner::start(format!("Scanning {}", config.root.display()))
    };

    let start = Instant::now();
    let scan = scan_root(&scanner, &config.root, |name| {
        spinner.set_message(format!("Scanning: {name}"));
    })
    .with_context(|| format!("Failed to scan '{}'", config.root.display()))?;
    let elapsed = start.elapsed();
    spinner.finish();

    let ranked = sort::ranked(&scan.dirs, config.sort, config.reverse);
    let display = Display::new(config.columns, config.sort.metric()).scaled_to(&scan.dirs);

    debug!(
        size = scan.root_files.totals.size,
        files = scan.root_files.totals.files,
        "loose files under root"
    );

    println!("Scanned {}", scan.root.display());
    display.print_report(&scan, &ranked, elapsed);

    if config.show_errors {
        display.print_errors(&scan.warnings);
    } else if !scan.warnings.is_empty() {
        debug!(count = scan.warnings.len(), "scan errors suppressed");
    }

    if let Some(path) = &config.export {
        match export::write_csv(path, &ranked) {
            Ok(()) => {
                println!();
                println!(
                    "{}",
                    paint(
                        &format!("Export completed to file: {}", path.display()),
                        Style::new().cyan()
                    )
                );
            }
            Err(err) => eprintln!("Error writing to export file: {err:#}"),
        }
    }

    Ok(())
}

/// Log to stderr; debug output only when asked for
fn init_logging(debug: bool, color: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();
}
