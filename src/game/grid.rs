use super::state::Position;

/// Rectangular arena whose outer ring of cells is wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True iff the position lies strictly inside the border ring
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row > 0
            && pos.col > 0
            && (pos.row as i64) < self.height as i64 - 1
            && (pos.col as i64) < self.width as i64 - 1
    }

    pub fn is_border(&self, pos: Position) -> bool {
        let inside_frame = pos.row >= 0
            && pos.col >= 0
            && (pos.row as i64) < self.height as i64
            && (pos.col as i64) < self.width as i64;
        inside_frame && !self.in_bounds(pos)
    }

    /// Inclusive range of interior rows
    pub fn interior_rows(&self) -> std::ops::RangeInclusive<i32> {
        1..=(self.height as i32 - 2)
    }

    /// Inclusive range of interior columns
    pub fn interior_cols(&self) -> std::ops::RangeInclusive<i32> {
        1..=(self.width as i32 - 2)
    }

    pub fn interior_len(&self) -> usize {
        self.width
            .saturating_sub(2)
            .saturating_mul(self.height.saturating_sub(2))
    }

    /// Every interior cell, row by row
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        self.interior_rows()
            .flat_map(move |row| self.interior_cols().map(move |col| Position::new(row, col)))
    }
}
