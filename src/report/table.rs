use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::{Color, Stylize};

use super::Metrics;

const HEADERS: [&str; 7] = [
    "Name",
    "Total",
    "Fastest",
    "Slowest",
    "Mean",
    "Failed",
    "Status Codes",
];
const ALIGNMENTS: [Align; 7] = [
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Center,
    Align::Center,
];
const STATUS_SEPARATOR: &str = "   ";
/// Mean position within `[fastest, slowest]`, in percent, below which it is green.
const MEAN_FAST_PERCENT: u128 = 33;
/// Below this it is yellow; anything higher is red.
const MEAN_SLOW_PERCENT: u128 = 66;

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
    Center,
}

/// Styled fragment of a cell; width is measured on `text` only.
#[derive(Debug, Clone)]
struct Segment {
    text: String,
    color: Option<Color>,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

type Cell = Vec<Segment>;

/// Writes one row per metrics entry as a bordered table.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub fn render_table<W>(metrics: &[Metrics], out: &mut W, color: bool) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let rows: Vec<[Cell; 7]> = metrics.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell_width(cell));
        }
    }

    write_border(out, &widths, "┬")?;
    let header_cells = HEADERS.map(|header| vec![Segment::plain(header)]);
    write_row(out, &header_cells, &widths, color, true)?;
    write_border(out, &widths, "┼")?;
    for row in &rows {
        write_row(out, row, &widths, color, false)?;
        write_border(out, &widths, "┼")?;
    }
    if rows.is_empty() {
        writeln!(out, " no responses recorded")?;
    }
    out.flush()
}

/// Formats like `40ms` below one second and `1.5s` above.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        return format!("{}ms", millis);
    }
    let secs = duration.as_secs();
    let frac = duration.subsec_millis();
    if frac == 0 {
        return format!("{}s", secs);
    }
    let frac = format!("{:03}", frac);
    format!("{}.{}s", secs, frac.trim_end_matches('0'))
}

fn row_cells(metrics: &Metrics) -> [Cell; 7] {
    [
        vec![Segment::plain(metrics.name.clone())],
        vec![Segment::plain(metrics.total.to_string())],
        vec![duration_segment(metrics.fastest, metrics)],
        vec![duration_segment(metrics.slowest, metrics)],
        vec![mean_segment(metrics)],
        vec![failed_segment(metrics.failed)],
        status_cell(metrics),
    ]
}

fn duration_segment(duration: Duration, metrics: &Metrics) -> Segment {
    let text = format_duration(duration);
    if duration == metrics.fastest {
        Segment::colored(format!("⬆ {}", text), Color::Green)
    } else if duration == metrics.slowest {
        Segment::colored(format!("⬇ {}", text), Color::Red)
    } else {
        Segment::plain(text)
    }
}

fn mean_segment(metrics: &Metrics) -> Segment {
    let text = format_duration(metrics.average);
    if metrics.slowest <= metrics.fastest {
        return Segment::colored(format!("⬆ {}", text), Color::Green);
    }
    let spread = metrics.slowest.saturating_sub(metrics.fastest).as_nanos();
    let offset = metrics.average.saturating_sub(metrics.fastest).as_nanos();
    let percent = offset
        .saturating_mul(100)
        .checked_div(spread)
        .unwrap_or(0);
    if percent < MEAN_FAST_PERCENT {
        Segment::colored(format!("⬆ {}", text), Color::Green)
    } else if percent < MEAN_SLOW_PERCENT {
        Segment::colored(format!("→ {}", text), Color::Yellow)
    } else {
        Segment::colored(format!("⬇ {}", text), Color::Red)
    }
}

fn failed_segment(failed: usize) -> Segment {
    if failed > 0 {
        Segment::colored(failed.to_string(), Color::Red)
    } else {
        Segment::colored("0", Color::Green)
    }
}

fn status_cell(metrics: &Metrics) -> Cell {
    if metrics.status_codes.is_empty() {
        return vec![Segment::plain("-")];
    }
    let mut cell = Vec::with_capacity(metrics.status_codes.len().saturating_mul(2));
    for (code, count) in &metrics.status_codes {
        if !cell.is_empty() {
            cell.push(Segment::plain(STATUS_SEPARATOR));
        }
        let text = format!("{} × {}", count, code);
        cell.push(match *code {
            200..=299 => Segment::colored(text, Color::Green),
            400..=499 => Segment::colored(text, Color::Yellow),
            500.. => Segment::colored(text, Color::Red),
            _ => Segment::plain(text),
        });
    }
    cell
}

fn cell_width(cell: &[Segment]) -> usize {
    cell.iter()
        .map(|segment| segment.text.chars().count())
        .fold(0, usize::saturating_add)
}

fn write_border<W>(out: &mut W, widths: &[usize], junction: &str) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let line = widths
        .iter()
        .map(|width| "─".repeat(width.saturating_add(2)))
        .collect::<Vec<_>>()
        .join(junction);
    writeln!(out, "{}", line)
}

fn write_row<W>(
    out: &mut W,
    cells: &[Cell],
    widths: &[usize],
    color: bool,
    header: bool,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut line = String::new();
    for (position, ((cell, width), align)) in cells
        .iter()
        .zip(widths.iter())
        .zip(ALIGNMENTS.iter())
        .enumerate()
    {
        if position > 0 {
            line.push('│');
        }
        let padding = width.saturating_sub(cell_width(cell));
        let (left, right) = match align {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => {
                let left = padding.checked_div(2).unwrap_or(0);
                (left, padding.saturating_sub(left))
            }
        };
        line.push(' ');
        line.push_str(&" ".repeat(left));
        for segment in cell {
            line.push_str(&styled(segment, color, header));
        }
        line.push_str(&" ".repeat(right));
        line.push(' ');
    }
    writeln!(out, "{}", line.trim_end())
}

fn styled(segment: &Segment, color: bool, header: bool) -> String {
    if !color {
        return segment.text.clone();
    }
    if header {
        return segment.text.as_str().bold().with(Color::White).to_string();
    }
    match segment.color {
        Some(fg) => segment.text.as_str().with(fg).to_string(),
        None => segment.text.clone(),
    }
}
