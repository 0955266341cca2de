//! Output formatting and display logic.

use crate::aggregate::RootScan;
use crate::node::{Entry, Metric, ScanWarning};
use crate::range;
use humansize::{BINARY, format_size};
use owo_colors::{OwoColorize, Stream, Style};
use std::time::Duration;
use tracing::debug;

/// Share of the output width given to each column, in percent
const PERCENT_NAME: usize = 30;
const PERCENT_SIZE: usize = 15;
const PERCENT_FILES: usize = 15;
const PERCENT_MAP: usize = 40;
/// Room taken by the `    [` `]` around the map
const MAP_GUTTER: usize = 5;

const MAP_FILLED: &str = "*";
const MAP_EMPTY: &str = "-";

/// Column widths derived from the output width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub name: usize,
    pub size: usize,
    pub files: usize,
    /// Number of slots in the visual map
    pub map: usize,
}

impl Layout {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            name: width * PERCENT_NAME / 100,
            size: width * PERCENT_SIZE / 100,
            files: width * PERCENT_FILES / 100,
            map: (width * PERCENT_MAP / 100).saturating_sub(MAP_GUTTER),
        }
    }
}

/// One formatted report line, split into the parts that are styled separately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub size: String,
    pub files: String,
    /// Filled and empty map slots, absent on the summary line
    pub map: Option<(usize, usize)>,
}

/// Report renderer
pub struct Display {
    layout: Layout,
    /// Metric the visual map represents
    metric: Metric,
    /// Metric units per map slot (0 = maps stay empty)
    unit: u64,
}

impl Display {
    /// Create a Display for an output `width` columns wide
    pub fn new(width: usize, metric: Metric) -> Self {
        let layout = Layout::new(width);
        debug!(?layout, "column widths");
        Self {
            layout,
            metric,
            unit: 0,
        }
    }

    /// Scale the visual map to the range of `dirs`
    pub fn scaled_to(mut self, dirs: &[Entry]) -> Self {
        self.unit = range::unit_per_slot(dirs, self.metric, self.layout.map);
        if !dirs.is_empty() {
            debug!(
                max_size = range::max_of(dirs, Metric::Size),
                min_size = range::min_of(dirs, Metric::Size),
                max_files = range::max_of(dirs, Metric::Files),
                min_files = range::min_of(dirs, Metric::Files),
                slots = self.layout.map,
                unit = self.unit,
                "visual map scale"
            );
        }
        self
    }

    /// Column titles
    pub fn header(&self) -> String {
        let map_title = match self.metric {
            Metric::Size => format!("Size Map [{}/slot]", format_size(self.unit, BINARY)),
            Metric::Files => format!("Files Map [{} files/slot]", format_number(self.unit)),
        };
        format!(
            "{:<name$}{:>size$}{:>files$}    {}",
            "Directory",
            "Size",
            "Files",
            map_title,
            name = self.layout.name,
            size = self.layout.size,
            files = self.layout.files,
        )
    }

    /// Format one directory line
    pub fn row(&self, entry: &Entry) -> Row {
        let filled = range::filled_slots(entry.metric(self.metric), self.unit, self.layout.map);
        Row {
            name: format!(
                "{:<width$}",
                truncate_name(&entry.name, self.layout.name),
                width = self.layout.name
            ),
            size: format!(
                "{:>width$}",
                format_size(entry.totals.size, BINARY),
                width = self.layout.size
            ),
            files: format!(
                "{:>width$}",
                format_number(entry.totals.files),
                width = self.layout.files
            ),
            map: Some((filled, self.layout.map - filled)),
        }
    }

    /// Format the grand total line
    pub fn summary(&self, scan: &RootScan) -> Row {
        Row {
            name: format!(
                "Directories: {:<width$}",
                scan.total_dirs,
                width = self.layout.name.saturating_sub(13)
            ),
            size: format!(
                "{:>width$}",
                format_size(scan.grand_totals.size, BINARY),
                width = self.layout.size
            ),
            files: format!(
                "{:>width$}",
                format_number(scan.grand_totals.files),
                width = self.layout.files
            ),
            map: None,
        }
    }

    /// Print the report for `ranked` directories followed by the totals of `scan`
    pub fn print_report(&self, scan: &RootScan, ranked: &[Entry], elapsed: Duration) {
        let rule = "-".repeat(self.layout.width);
        let rule_style = Style::new().cyan();

        println!("{}", paint(&rule, rule_style));
        println!("{}", paint(&self.header(), Style::new().white().bold()));
        println!("{}", paint(&rule, rule_style));

        if ranked.is_empty() {
            println!("{}", paint("No subdirectories found.", Style::new().dimmed()));
        }

        for (idx, entry) in ranked.iter().enumerate() {
            self.print_row(&self.row(entry), row_style(idx, entry.is_symlink));
        }

        println!("{}", paint(&rule, rule_style));
        let summary = self.summary(scan);
        println!(
            "{}{}{}",
            paint(&summary.name, Style::new().cyan()),
            paint(&summary.size, Style::new().white()),
            paint(&summary.files, Style::new().white()),
        );

        println!();
        println!(
            "{}",
            paint(
                &format!(
                    "Scanning time: {} ({:.3} files/ms)",
                    format_duration(elapsed),
                    files_per_ms(scan.grand_totals.files, elapsed)
                ),
                Style::new().cyan()
            )
        );
    }

    fn print_row(&self, row: &Row, style: Style) {
        let frame = Style::new().white();
        let (filled, empty) = row.map.unwrap_or((0, 0));
        println!(
            "{}{}{}{}{}{}{}",
            paint(&row.name, style),
            paint(&row.size, style),
            paint(&row.files, style),
            paint("    [", frame),
            paint(&MAP_FILLED.repeat(filled), Style::new().yellow()),
            paint(&MAP_EMPTY.repeat(empty), Style::new().cyan()),
            paint("]", frame),
        );
    }

    /// Print the directories that could not be scanned
    pub fn print_errors(&self, warnings: &[ScanWarning]) {
        if warnings.is_empty() {
            return;
        }
        let error_style = Style::new().red();
        let rule = "-".repeat(self.layout.width);

        println!();
        println!("{}", paint(&rule, error_style));
        println!(
            "{}",
            paint("Scanning Errors  [Use -e to suppress]", error_style)
        );
        println!("{}", paint(&rule, error_style));
        for warning in warnings {
            println!("{}", paint(&warning.to_string(), error_style));
        }
    }
}

/// Alternate row colors; symbolic links stand out
fn row_style(idx: usize, is_symlink: bool) -> Style {
    if is_symlink {
        Style::new().white().on_magenta()
    } else if idx % 2 == 0 {
        Style::new().white()
    } else {
        Style::new()
    }
}

/// Apply `style` when stdout supports color
pub fn paint(text: &str, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

/// Fit a name into `width` columns, marking cut names with "..."
fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let kept: String = name.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// File counts in the Files column and map title, grouped in threes: `1234567` -> `1,234,567`.
fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Scan time for the timing line: milliseconds under a second, seconds with
/// two decimals under a minute, whole minutes and seconds beyond that.
fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0 => format!("{}ms", elapsed.subsec_millis()),
        1..=59 => format!("{secs}.{:02}s", elapsed.subsec_millis() / 10),
        _ => format!("{}m {}s", secs / 60, secs % 60),
    }
}

/// Throughput shown next to the scan time
fn files_per_ms(files: u64, elapsed: Duration) -> f64 {
    let millis = elapsed.as_secs_f64() * 1000.0;
    if millis > 0.0 { files as f64 / millis } else { 0.0 }
}
