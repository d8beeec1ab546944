//! Character-cell canvas for composing the screen.
//!
//! Components render to plain multi-line strings; the canvas places them at
//! absolute cells so that an open dropdown list can be drawn over the result
//! rows beneath it.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Char(char),
    /// Right half of a double-width character.
    Tail,
}

/// A fixed-size grid of terminal cells.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Canvas {
    /// Creates a blank canvas.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Char(' '); width]; height],
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Draws `text` with its first line at `(x, y)`; each further line
    /// starts one row down at column `x`. Anything past the edges is
    /// clipped.
    pub fn put(&mut self, x: usize, y: usize, text: &str) {
        for (dy, line) in text.lines().enumerate() {
            let Some(row) = self.rows.get_mut(y + dy) else {
                break;
            };
            let mut col = x;
            for c in line.chars() {
                let w = c.width().unwrap_or(0);
                if w == 0 {
                    continue;
                }
                if col + w > self.width {
                    break;
                }
                clear_cell(row, col);
                row[col] = Cell::Char(c);
                if w == 2 {
                    clear_cell(row, col + 1);
                    row[col + 1] = Cell::Tail;
                }
                col += w;
            }
        }
    }

    /// Renders the canvas, one line per row, trailing spaces trimmed.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Rendered rows, trailing spaces trimmed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let line: String = row
                    .iter()
                    .filter_map(|cell| match cell {
                        Cell::Char(c) => Some(*c),
                        Cell::Tail => None,
                    })
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

/// Blanks the cell at `col`, also blanking the other half of a wide
/// character it belongs to.
fn clear_cell(row: &mut [Cell], col: usize) {
    match row[col] {
        Cell::Tail if col > 0 => row[col - 1] = Cell::Char(' '),
        Cell::Char(c) if c.width() == Some(2) => {
            if let Some(next) = row.get_mut(col + 1) {
                *next = Cell::Char(' ');
            }
        }
        _ => {}
    }
    row[col] = Cell::Char(' ');
}
