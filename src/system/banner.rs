use std::io::{self, IsTerminal, Write};

use crossterm::style::{Color, Stylize};

const BANNER_LINES: [&str; 6] = [
    "     ██╗███████╗████████╗████████╗███████╗██████╗ ",
    "     ██║██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗",
    "     ██║█████╗     ██║      ██║   █████╗  ██████╔╝",
    "██   ██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗",
    "╚█████╔╝███████╗   ██║      ██║   ███████╗██║  ██║",
    " ╚════╝ ╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝",
];

const COLOR_TOP: (u8, u8, u8) = (0x3a, 0xa9, 0xff);
const COLOR_BOTTOM: (u8, u8, u8) = (0xff, 0x8c, 0x42);
const SUBTITLE_RGB: (u8, u8, u8) = (0xff, 0x8c, 0x42);

pub(crate) fn print_cli_banner(no_color: bool) {
    let use_color = !no_color && io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();
    if let Err(err) = write_banner(&mut stdout, use_color) {
        tracing::debug!("Failed to print banner: {}", err);
    }
}

pub(crate) fn write_banner<W>(out: &mut W, use_color: bool) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let denom = BANNER_LINES.len().saturating_sub(1);
    for (idx, line) in BANNER_LINES.iter().enumerate() {
        if use_color {
            let (r, g, b) = gradient_rgb(COLOR_TOP, COLOR_BOTTOM, idx, denom);
            writeln!(out, "{}", line.with(Color::Rgb { r, g, b }))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }

    let description = format!(
        "jetter v{} | .http scenarios, once or under load",
        env!("CARGO_PKG_VERSION")
    );
    if use_color {
        let (r, g, b) = SUBTITLE_RGB;
        writeln!(out, "{}\n", description.with(Color::Rgb { r, g, b }))
    } else {
        writeln!(out, "{description}\n")
    }
}

/// Linear blend between two colors; `idx` is clamped to `denom`.
fn gradient_rgb(start: (u8, u8, u8), end: (u8, u8, u8), idx: usize, denom: usize) -> (u8, u8, u8) {
    let denom = i32::try_from(denom.max(1)).unwrap_or(i32::MAX);
    let idx = i32::try_from(idx).unwrap_or(i32::MAX).min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        let value = b
            .checked_sub(a)
            .and_then(|delta| delta.checked_mul(idx))
            .and_then(|scaled| scaled.checked_div(denom))
            .and_then(|step| a.checked_add(step))
            .unwrap_or(a);
        u8::try_from(value.clamp(0, 255)).unwrap_or(0)
    };
    (
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}
