//! Renders benchmark results as text tables.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use crate::bench::{CodecReport, Scenario};
use crate::term::{BOLD, DIM, Style};

/// Time units used for display, largest first, with their size in
/// nanoseconds.
const TIME_UNITS: &[(&str, u128)] = &[
    ("m", 60_000_000_000),
    ("s", 1_000_000_000),
    ("ms", 1_000_000),
    ("µs", 1_000),
    ("ns", 1),
];

const COLUMNS: [&str; 7] = [
    "codec",
    "runs",
    "input size",
    "avg encode",
    "avg decode",
    "total encode",
    "total decode",
];

/// Displays a [`Duration`] in the largest unit it is at least 1 of.
///
/// The precision defaults to 3 decimals.
#[derive(Debug, Clone, Copy)]
pub struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        let nanos = self.0.as_nanos();
        let (unit, scale) = TIME_UNITS
            .iter()
            .copied()
            .find(|&(_, scale)| nanos >= scale)
            .unwrap_or(("ns", 1));

        let value = nanos as f64 / scale as f64;
        write!(f, "{value:.precision$}{unit}")
    }
}

/// Writes the results of a scenario as an aligned table.
///
/// # Errors
///
/// Returns [`Err`] if writing to `writer` fails.
pub fn write_table<W: Write>(mut writer: W, scenario: &Scenario, color: bool) -> io::Result<()> {
    let rows: Vec<[String; COLUMNS.len()]> = scenario.reports.iter().map(row).collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let title = Style::new(BOLD, color);
    let header = Style::new(DIM, color);

    writeln!(writer, "{}{}{}", title.start, scenario.name, title.end)?;

    write!(writer, "{}", header.start)?;
    write_cells(&mut writer, COLUMNS.iter().copied(), &widths)?;
    writeln!(writer, "{}", header.end)?;

    for row in &rows {
        write_cells(&mut writer, row.iter().map(String::as_str), &widths)?;
        writeln!(writer)?;
    }

    writeln!(writer)
}

fn row(report: &CodecReport) -> [String; COLUMNS.len()] {
    let average = report.average();
    let total = report.total();
    [
        report.codec.name().to_owned(),
        report.runs.len().to_string(),
        report.input.to_string(),
        Elapsed(average.encode).to_string(),
        Elapsed(average.decode).to_string(),
        Elapsed(total.encode).to_string(),
        Elapsed(total.decode).to_string(),
    ]
}

fn write_cells<'a, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let mut cells = cells.zip(widths).peekable();
    let mut first = true;
    while let Some((cell, &width)) = cells.next() {
        if !first {
            writer.write_all(b"  ")?;
        }
        first = false;

        // no trailing padding on the last column
        if cells.peek().is_some() {
            // `{:width$}` pads by char count, which is what's needed for `µs`
            write!(writer, "{cell:<width$}")?;
        } else {
            writer.write_all(cell.as_bytes())?;
        }
    }

    Ok(())
}
