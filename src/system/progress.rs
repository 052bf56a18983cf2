use std::io::{self, Write};

use crossterm::style::Stylize;

const PENDING_ICON: &str = "⏳";
const SUCCESS_ICON: &str = "✔";
const FAILURE_ICON: &str = "✘";

/// A one-line status that is printed as pending and later overwritten in place.
pub(crate) struct Progress<'msg> {
    message: &'msg str,
    color: bool,
}

impl<'msg> Progress<'msg> {
    pub(crate) fn start<W>(out: &mut W, message: &'msg str, color: bool) -> io::Result<Self>
    where
        W: Write + ?Sized,
    {
        write!(out, "{} {}", PENDING_ICON, message)?;
        out.flush()?;
        Ok(Self { message, color })
    }

    pub(crate) fn succeed<W>(self, out: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        if self.color {
            writeln!(out, "\r{} {}", SUCCESS_ICON.green(), self.message)
        } else {
            writeln!(out, "\r{} {}", SUCCESS_ICON, self.message)
        }
    }

    pub(crate) fn fail<W>(self, out: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        if self.color {
            writeln!(out, "\r{} {}", FAILURE_ICON.red(), self.message)
        } else {
            writeln!(out, "\r{} {}", FAILURE_ICON, self.message)
        }
    }
}
