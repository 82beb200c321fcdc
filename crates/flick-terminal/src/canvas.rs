//! Cell-grid canvas.
//!
//! Widgets paint in logical pixels; each terminal cell covers a
//! [`CellMetrics`] block of them. A cell takes a shape's color when its
//! center lies inside the shape.

use crate::input::CellMetrics;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color as CrosstermColor, Print, ResetColor, SetBackgroundColor};
use flick_core::{Canvas, Color, Point, Rect};
use std::io::{self, BufWriter, Write};

/// Background-color grid the size of the terminal.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    columns: u16,
    rows: u16,
    metrics: CellMetrics,
    background: Color,
    cells: Vec<Color>,
}

impl CellCanvas {
    /// Create a canvas of `columns` x `rows` cells filled with `background`.
    #[must_use]
    pub fn new(columns: u16, rows: u16, metrics: CellMetrics, background: Color) -> Self {
        Self {
            columns,
            rows,
            metrics,
            background,
            cells: vec![background; usize::from(columns) * usize::from(rows)],
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    /// Height in cells.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Logical size of the whole grid.
    #[must_use]
    pub fn logical_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f32::from(self.columns) * self.metrics.width,
            f32::from(self.rows) * self.metrics.height,
        )
    }

    /// Color of a cell, if in range.
    #[must_use]
    pub fn cell(&self, column: u16, row: u16) -> Option<Color> {
        self.index(column, row).map(|i| self.cells[i])
    }

    /// Resize the grid and clear it.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![self.background; usize::from(columns) * usize::from(rows)];
    }

    /// Reset every cell to the background color.
    pub fn clear(&mut self) {
        self.cells.fill(self.background);
    }

    /// Write the grid to `writer`, one space per cell.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the writer fails.
    pub fn flush<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut out = BufWriter::with_capacity(8192, writer);
        queue!(out, ResetColor)?;
        let mut last: Option<(u8, u8, u8)> = None;
        for row in 0..self.rows {
            queue!(out, MoveTo(0, row))?;
            for column in 0..self.columns {
                let Some(color) = self.cell(column, row) else {
                    continue;
                };
                let rgb = color.to_rgb8();
                if last != Some(rgb) {
                    let (r, g, b) = rgb;
                    queue!(out, SetBackgroundColor(CrosstermColor::Rgb { r, g, b }))?;
                    last = Some(rgb);
                }
                queue!(out, Print(' '))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }

    fn index(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| usize::from(row) * usize::from(self.columns) + usize::from(column))
    }

    fn center(&self, column: u16, row: u16) -> Point {
        self.metrics.cell_center(column, row)
    }

    /// Cell range whose centers may fall inside `rect`.
    fn span(&self, rect: Rect) -> (u16, u16, u16, u16) {
        let to_cell = |v: f32, unit: f32, limit: u16| -> u16 {
            let cell = (v / unit).floor().max(0.0);
            if cell >= f32::from(limit) {
                limit
            } else {
                cell as u16
            }
        };
        let c0 = to_cell(rect.x, self.metrics.width, self.columns);
        let r0 = to_cell(rect.y, self.metrics.height, self.rows);
        let c1 = to_cell(rect.x + rect.width, self.metrics.width, self.columns);
        let r1 = to_cell(rect.y + rect.height, self.metrics.height, self.rows);
        (
            c0,
            r0,
            c1.saturating_add(1).min(self.columns),
            r1.saturating_add(1).min(self.rows),
        )
    }

    fn blend(&mut self, column: u16, row: u16, color: Color) {
        if let Some(i) = self.index(column, row) {
            self.cells[i] = color.over(&self.cells[i]);
        }
    }

    fn covered(&self, rect: Rect, radius: f32, column: u16, row: u16) -> bool {
        inside_rounded(rect, radius, self.center(column, row))
    }
}

/// Whether `p` lies inside `rect` with corners of `radius`.
fn inside_rounded(rect: Rect, radius: f32, p: Point) -> bool {
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;
    if p.x < rect.x || p.x > right || p.y < rect.y || p.y > bottom {
        return false;
    }
    let r = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
    if r <= 0.0 {
        return true;
    }
    let nearest = Point::new(
        p.x.clamp(rect.x + r, right - r),
        p.y.clamp(rect.y + r, bottom - r),
    );
    p.distance(&nearest) <= r
}

impl Canvas for CellCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_rounded_rect(rect, 0.0, color);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..r1 {
            for column in c0..c1 {
                if self.covered(rect, radius, column, row) {
                    self.blend(column, row, color);
                }
            }
        }
    }

    // Outlines thinner than a cell snap to the outermost covered cells.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        if width <= 0.0 {
            return;
        }
        let (c0, r0, c1, r1) = self.span(rect);
        let mut edge = Vec::new();
        for row in r0..r1 {
            for column in c0..c1 {
                if !self.covered(rect, radius, column, row) {
                    continue;
                }
                let outside = |dc: i32, dr: i32| {
                    let c = i32::from(column) + dc;
                    let r = i32::from(row) + dr;
                    match (u16::try_from(c), u16::try_from(r)) {
                        (Ok(c), Ok(r)) => !self.covered(rect, radius, c, r),
                        _ => true,
                    }
                };
                if outside(-1, 0) || outside(1, 0) || outside(0, -1) || outside(0, 1) {
                    edge.push((column, row));
                }
            }
        }
        for (column, row) in edge {
            self.blend(column, row, color);
        }
    }
}
