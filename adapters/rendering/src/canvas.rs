use crate::Color;

/// Single character cell with an optional foreground color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cell {
    pub(crate) glyph: char,
    pub(crate) color: Option<Color>,
}

impl Cell {
    const BLANK: Self = Self {
        glyph: ' ',
        color: None,
    };
}

/// Fixed-size grid of character cells addressed by column and row.
#[derive(Clone, Debug)]
pub(crate) struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    /// Writes a glyph; positions outside the canvas are ignored.
    pub(crate) fn set(&mut self, column: usize, row: usize, glyph: char, color: Option<Color>) {
        if column < self.width && row < self.height {
            self.cells[row * self.width + column] = Cell { glyph, color };
        }
    }

    pub(crate) fn get(&self, column: usize, row: usize) -> Option<Cell> {
        if column < self.width && row < self.height {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// Writes `text` starting at `column`, clipping at the right edge.
    pub(crate) fn text(&mut self, column: usize, row: usize, text: &str, color: Option<Color>) {
        for (offset, glyph) in text.chars().enumerate() {
            self.set(column + offset, row, glyph, color);
        }
    }

    /// Renders one row, wrapping colored cells in ANSI escapes when `colored` is set.
    pub(crate) fn row_to_string(&self, row: usize, colored: bool) -> String {
        let mut line = String::with_capacity(self.width);
        if row >= self.height {
            return line;
        }

        let mut active: Option<Color> = None;
        for cell in &self.cells[row * self.width..(row + 1) * self.width] {
            if colored && cell.color != active {
                match cell.color {
                    Some(color) => line.push_str(&color.ansi_foreground()),
                    None => line.push_str(Color::ANSI_RESET),
                }
                active = cell.color;
            }
            line.push(cell.glyph);
        }
        if colored && active.is_some() {
            line.push_str(Color::ANSI_RESET);
        }
        line
    }
}

/// Visits every cell on the line between two points using Bresenham's algorithm.
pub(crate) fn trace_line(
    from: (usize, usize),
    to: (usize, usize),
    mut visit: impl FnMut(usize, usize),
) {
    let (x0, y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: isize = if x0 < x1 { 1 } else { -1 };
    let sy: isize = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        visit(x as usize, y as usize);
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
