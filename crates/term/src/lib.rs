//! Terminal board rendering.
//!
//! A small text layer for the puzzle grid. [`BoardView`] produces styled lines
//! from a board, and [`BoardPrinter`] flushes them through crossterm.
//!
//! Goals:
//! - Keep `core` free of any presentation code
//! - Read only cell values and overlay marks from the board
//! - Stay usable without a TTY (plain text output)

pub mod renderer;
pub mod view;

pub use tenten_core as core;
pub use tenten_types as types;

pub use renderer::{encode_lines_into, BoardPrinter};
pub use view::{cell_style, cell_text, BoardView, CellStyle, Line, Span};
