//! BoardView: turns a board into styled text lines.
//!
//! Pure and allocation-light; nothing here touches the terminal. The printer in
//! [`crate::renderer`] turns the spans into crossterm commands, and
//! [`BoardView::render_text`] drops the styles for logs and tests.

use tenten_core::Board;
use tenten_types::{Cell, Mark, BOARD_SIZE, EMPTY, FILLED};

/// How a span should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Plain,
    /// Block placed by the last move.
    Placed,
    /// Cell touched by a line cleared on the last move.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: CellStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Plain,
        }
    }

    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub type Line = Vec<Span>;

/// Text for one cell: blank when empty, `X` when filled, the digit for small
/// stacked values and the full number otherwise.
pub fn cell_text(value: Cell) -> String {
    match value {
        EMPTY => "  ".to_string(),
        FILLED => " X".to_string(),
        2..=9 => format!(" {}", value),
        _ => value.to_string(),
    }
}

pub fn cell_style(value: Cell, mark: Mark) -> CellStyle {
    match (value, mark) {
        (_, Mark::None) => CellStyle::Plain,
        (EMPTY, _) => CellStyle::Cleared,
        (_, Mark::Placed) => CellStyle::Placed,
        _ => CellStyle::Cleared,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Append the hand below the grid.
    pub show_hand: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        Self { show_hand: true }
    }
}

impl BoardView {
    pub fn new(show_hand: bool) -> Self {
        Self { show_hand }
    }

    pub fn lines(&self, board: &Board) -> Vec<Line> {
        let size = BOARD_SIZE as i8;
        let separator = format!(" {}", "-".repeat(4 * BOARD_SIZE as usize + 1));
        let mut lines = Vec::with_capacity(2 * BOARD_SIZE as usize + 8);

        let mut header = String::from(" ");
        for x in 0..size {
            header.push_str(&format!(" {}  ", x));
        }
        lines.push(vec![Span::plain(header.trim_end())]);

        for y in 0..size {
            lines.push(vec![Span::plain(separator.clone())]);
            let mut row = vec![Span::plain(format!("{}|", y))];
            for x in 0..size {
                let value = board.cell(x, y).unwrap_or(EMPTY);
                let mark = board.mark(x, y).unwrap_or_default();
                row.push(Span::styled(cell_text(value), cell_style(value, mark)));
                row.push(Span::plain(" |"));
            }
            lines.push(row);
        }
        lines.push(vec![Span::plain(separator)]);

        if self.show_hand {
            self.push_hand(board, &mut lines);
        }
        lines
    }

    fn push_hand(&self, board: &Board, lines: &mut Vec<Line>) {
        let catalog = board.catalog();
        if board.hand().is_empty() {
            lines.push(vec![Span::plain("Hand: (empty)")]);
            return;
        }
        lines.push(vec![Span::plain("Hand:")]);
        for (slot, &id) in board.hand().iter().enumerate() {
            let piece = catalog.get(id);
            lines.push(vec![Span::plain(format!(
                "  [{}] {} '{}'",
                slot,
                piece.id(),
                piece.glyph()
            ))]);
            for picture in piece.to_string().lines() {
                lines.push(vec![Span::plain(format!("      {}", picture))]);
            }
        }
    }

    /// Unstyled rendering, one `\n`-terminated line per row.
    pub fn render_text(&self, board: &Board) -> String {
        let mut out = String::new();
        for line in self.lines(board) {
            for span in &line {
                out.push_str(&span.text);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_widths() {
        assert_eq!(cell_text(0), "  ");
        assert_eq!(cell_text(1), " X");
        assert_eq!(cell_text(7), " 7");
        assert_eq!(cell_text(12), "12");
        assert_eq!(cell_text(-1), "-1");
    }

    #[test]
    fn style_follows_mark() {
        assert_eq!(cell_style(1, Mark::None), CellStyle::Plain);
        assert_eq!(cell_style(1, Mark::Placed), CellStyle::Placed);
        assert_eq!(cell_style(0, Mark::ClearedRow), CellStyle::Cleared);
        assert_eq!(cell_style(2, Mark::ClearedCol), CellStyle::Cleared);
        assert_eq!(cell_style(0, Mark::None), CellStyle::Plain);
    }
}
