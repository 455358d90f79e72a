//! BoardPrinter: writes a board view to a real terminal.
//!
//! Output is line-oriented (no alternate screen, no raw mode) so it can be
//! piped into a file or interleaved with log lines.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};

use tenten_core::Board;

use crate::view::{BoardView, CellStyle, Line};

pub struct BoardPrinter {
    stdout: io::Stdout,
    view: BoardView,
    color: bool,
    buf: Vec<u8>,
}

impl BoardPrinter {
    pub fn new(view: BoardView) -> Self {
        Self {
            stdout: io::stdout(),
            view,
            color: true,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    /// Disable ANSI styling, e.g. when stdout is not a terminal.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn print(&mut self, board: &Board) -> Result<()> {
        let lines = self.view.lines(board);
        self.buf.clear();
        if self.color {
            encode_lines_into(&lines, &mut self.buf)?;
        } else {
            encode_plain_into(&lines, &mut self.buf)?;
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode styled lines into `out` as crossterm commands.
///
/// This builds the byte stream without writing to stdout.
pub fn encode_lines_into(lines: &[Line], out: &mut Vec<u8>) -> Result<()> {
    let mut current = CellStyle::Plain;
    for line in lines {
        for span in line {
            if span.style != current {
                apply_style_into(out, span.style)?;
                current = span.style;
            }
            out.queue(Print(&span.text))?;
        }
        if current != CellStyle::Plain {
            apply_style_into(out, CellStyle::Plain)?;
            current = CellStyle::Plain;
        }
        out.queue(Print("\n"))?;
    }
    Ok(())
}

fn encode_plain_into(lines: &[Line], out: &mut Vec<u8>) -> Result<()> {
    for line in lines {
        for span in line {
            out.write_all(span.text.as_bytes())?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    match style {
        CellStyle::Plain => {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        CellStyle::Placed => {
            out.queue(SetForegroundColor(Color::Red))?;
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        CellStyle::Cleared => {
            out.queue(SetForegroundColor(Color::Green))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Span;

    #[test]
    fn plain_lines_have_no_escapes() {
        let lines = vec![vec![Span::plain("a"), Span::plain("b")], vec![]];
        let mut out = Vec::new();
        encode_lines_into(&lines, &mut out).unwrap();
        assert_eq!(out, b"ab\n\n");
    }

    #[test]
    fn styled_span_is_reset_before_newline() {
        let lines = vec![vec![Span::styled(" X", CellStyle::Placed)]];
        let mut out = Vec::new();
        encode_lines_into(&lines, &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with('\u{1b}'));
        assert!(s.contains(" X"));
        assert!(s.ends_with('\n'));
        let before_newline = &s[..s.len() - 1];
        assert!(before_newline.ends_with('m'));
    }
}
