use std::ops::{Deref, DerefMut, Index, IndexMut};

use cell::Cell;

pub mod cell;
mod resize;

pub type Line = usize;
pub type Column = usize;

#[derive(Clone)]
pub struct Row(Vec<Cell>);

impl Deref for Row {
    type Target = Vec<Cell>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Row {
    pub fn new(columns: usize) -> Self {
        let mut inner = Vec::with_capacity(columns);

        inner.resize(columns, Cell::default());

        Self(inner)
    }

    /// A row of blank cells carrying `template`'s rendition attributes, as
    /// produced by scrolling or line-insertion under a non-default SGR state.
    pub fn blank(columns: usize, template: &Cell) -> Self {
        let mut cell = Cell::default();
        cell.apply_template(template);

        Self(vec![cell; columns])
    }
}

#[derive(Clone, Copy)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: 24,
            columns: 80,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Default)]
pub struct Position {
    pub line: Line,
    pub column: Column,
}

pub struct PositionedCell {
    pub position: Position,
    pub cell: Cell,
}

#[derive(Default, Clone)]
pub struct Cursor {
    pub position: Position,
    pub template: Cell,
}

pub struct Grid {
    rows: Vec<Row>,

    pub cursor: Cursor,

    dimensions: Dimensions,
    margin_top: Line,
    margin_bottom: Line,
    tab_stops: Vec<bool>,
}

impl Grid {
    pub fn with_dimensions(dimensions: Dimensions) -> Self {
        let rows = vec![Row::new(dimensions.columns); dimensions.rows];

        Self {
            rows,
            cursor: Cursor::default(),
            margin_bottom: dimensions.rows.saturating_sub(1),
            margin_top: 0,
            tab_stops: default_tab_stops(dimensions.columns),
            dimensions,
        }
    }

    pub fn width(&self) -> usize {
        self.dimensions.columns
    }

    pub fn height(&self) -> usize {
        self.dimensions.rows
    }

    /// Top/bottom of the current scrolling region (DECSTBM), both inclusive
    /// and 0-based.
    pub fn margins(&self) -> (Line, Line) {
        (self.margin_top, self.margin_bottom)
    }

    pub fn set_margins(&mut self, top: Line, bottom: Option<Line>) {
        let last = self.dimensions.rows.saturating_sub(1);
        let bottom = bottom.unwrap_or(last).min(last);
        let top = top.min(bottom);

        self.margin_top = top;
        self.margin_bottom = bottom;
    }

    pub fn reset_margins(&mut self) {
        self.margin_top = 0;
        self.margin_bottom = self.dimensions.rows.saturating_sub(1);
    }

    pub fn iter(&self) -> GridIterator<'_> {
        let end = Position {
            line: self.height(),
            column: self.width(),
        };

        GridIterator {
            grid: self,
            current: None,
            end,
        }
    }

    pub fn cell_at_cursor(&self) -> &Cell {
        &self[self.cursor.position]
    }

    pub fn cell_at_cursor_mut(&mut self) -> &mut Cell {
        let position = self.cursor.position;
        &mut self[position]
    }

    /// Scroll the region up `count` lines, discarding from the top and
    /// filling the bottom with cells carrying the cursor's current template.
    pub fn scroll_up(&mut self, count: usize) {
        let (top, bottom) = self.margins();
        let region = bottom + 1 - top;
        let count = count.min(region);

        if count == 0 {
            return;
        }

        self.rows[top..=bottom].rotate_left(count);

        let template = self.cursor.template;
        for row in &mut self.rows[(bottom + 1 - count)..=bottom] {
            *row = Row::blank(self.dimensions.columns, &template);
        }
    }

    /// Scroll the region down `count` lines, discarding from the bottom and
    /// filling the top with cells carrying the cursor's current template.
    pub fn scroll_down(&mut self, count: usize) {
        let (top, bottom) = self.margins();
        let region = bottom + 1 - top;
        let count = count.min(region);

        if count == 0 {
            return;
        }

        self.rows[top..=bottom].rotate_right(count);

        let template = self.cursor.template;
        for row in &mut self.rows[top..top + count] {
            *row = Row::blank(self.dimensions.columns, &template);
        }
    }

    /// IL: insert `count` blank lines at the cursor's line, within the
    /// scrolling region, pushing the lines below it down and off the bottom.
    pub fn insert_blank_lines(&mut self, count: usize) {
        let line = self.cursor.position.line;
        let (top, bottom) = self.margins();

        if line < top || line > bottom {
            return;
        }

        let saved_top = self.margin_top;
        self.margin_top = line;
        self.scroll_down(count);
        self.margin_top = saved_top;
    }

    /// DL: delete `count` lines starting at the cursor's line, within the
    /// scrolling region, pulling the lines below it up.
    pub fn delete_lines(&mut self, count: usize) {
        let line = self.cursor.position.line;
        let (top, bottom) = self.margins();

        if line < top || line > bottom {
            return;
        }

        let saved_top = self.margin_top;
        self.margin_top = line;
        self.scroll_up(count);
        self.margin_top = saved_top;
    }

    /// ICH: shift the cells from the cursor rightward by `count`, dropping
    /// whatever falls off the right edge.
    pub fn insert_blank_chars(&mut self, count: usize) {
        let line = self.cursor.position.line;
        let column = self.cursor.position.column;
        let width = self.dimensions.columns;
        let count = count.min(width - column);

        if count == 0 {
            return;
        }

        let template = self.cursor.template;
        let row = &mut self.rows[line];
        row.copy_within(column..(width - count), column + count);

        for cell in &mut row[column..(column + count)] {
            *cell = Cell::default();
            cell.apply_template(&template);
        }
    }

    /// DCH: pull the cells after the cursor leftward by `count`, filling the
    /// vacated right edge with blanks.
    pub fn delete_chars(&mut self, count: usize) {
        let line = self.cursor.position.line;
        let column = self.cursor.position.column;
        let width = self.dimensions.columns;
        let count = count.min(width - column);

        if count == 0 {
            return;
        }

        let template = self.cursor.template;
        let row = &mut self.rows[line];
        row.copy_within((column + count)..width, column);

        for cell in &mut row[(width - count)..width] {
            *cell = Cell::default();
            cell.apply_template(&template);
        }
    }

    /// ECH: blank `count` cells from the cursor onward, without shifting
    /// anything.
    pub fn erase_chars(&mut self, count: usize) {
        let line = self.cursor.position.line;
        let column = self.cursor.position.column;
        let end = (column + count).min(self.dimensions.columns);

        self.clear_line_range(line, column..end, false);
    }

    /// Blank a column range of one line. `selective` preserves DECSCA-
    /// protected cells (DECSEL).
    pub fn clear_line_range(&mut self, line: Line, range: std::ops::Range<usize>, selective: bool) {
        let template = self.cursor.template;

        for cell in &mut self.rows[line][range] {
            if selective && cell.protect {
                continue;
            }

            *cell = Cell::default();
            cell.apply_template(&template);
        }
    }

    /// Blank a range of whole lines. `selective` preserves DECSCA-protected
    /// cells (DECSED).
    pub fn clear_lines(&mut self, range: std::ops::Range<Line>, selective: bool) {
        let width = self.dimensions.columns;

        for line in range {
            self.clear_line_range(line, 0..width, selective);
        }
    }

    pub fn set_tab_stop(&mut self, column: Column) {
        if let Some(slot) = self.tab_stops.get_mut(column) {
            *slot = true;
        }
    }

    pub fn clear_tab_stop(&mut self, column: Column) {
        if let Some(slot) = self.tab_stops.get_mut(column) {
            *slot = false;
        }
    }

    pub fn clear_all_tab_stops(&mut self) {
        self.tab_stops.iter_mut().for_each(|slot| *slot = false);
    }

    /// CHT: the column `count` tab stops to the right of `from`, clamped to
    /// the last column.
    pub fn next_tab_stop(&self, from: Column, count: usize) -> Column {
        let last = self.dimensions.columns.saturating_sub(1);
        let mut column = from;

        for _ in 0..count {
            if column >= last {
                return last;
            }

            column += 1;
            while column < last && !self.tab_stops[column] {
                column += 1;
            }
        }

        column.min(last)
    }

    /// CBT: the column `count` tab stops to the left of `from`, clamped to
    /// column 0.
    pub fn prev_tab_stop(&self, from: Column, count: usize) -> Column {
        let mut column = from;

        for _ in 0..count {
            if column == 0 {
                return 0;
            }

            column -= 1;
            while column > 0 && !self.tab_stops[column] {
                column -= 1;
            }
        }

        column
    }
}

/// Default VT100 tab stops: every eighth column, not counting column 0.
fn default_tab_stops(columns: usize) -> Vec<bool> {
    (0..columns).map(|column| column != 0 && column % 8 == 0).collect()
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.rows[index.line].0[index.column]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self.rows[index.line].0[index.column]
    }
}

impl Index<Line> for Grid {
    type Output = Row;

    fn index(&self, index: Line) -> &Self::Output {
        &self.rows[index]
    }
}

impl IndexMut<Line> for Grid {
    fn index_mut(&mut self, index: Line) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

pub struct GridIterator<'a> {
    grid: &'a Grid,
    current: Option<Position>,
    end: Position,
}

impl<'a> Iterator for GridIterator<'a> {
    type Item = PositionedCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_some_and(|p| p == self.end) {
            return None;
        }

        let position = self
            .current
            .map(|p| match p {
                Position { column, .. } if column == self.grid.width() - 1 => Position {
                    line: p.line + 1,
                    column: 0,
                },
                _ => Position {
                    line: p.line,
                    column: p.column + 1,
                },
            })
            .unwrap_or_default();

        let cell = PositionedCell {
            cell: self.grid[position],
            position,
        };

        self.current = Some(position);

        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize() {
        let dimensions = Dimensions {
            rows: 42,
            columns: 37,
        };

        let grid = Grid::with_dimensions(dimensions);

        assert_eq!(grid.rows.len(), dimensions.rows);

        for row in grid.rows {
            assert_eq!(row.len(), dimensions.columns);

            for cell in row.iter() {
                assert_eq!(cell, &Cell::default());
            }
        }
    }

    #[test]
    fn scroll_up_discards_top_line() {
        let mut grid = Grid::with_dimensions(Dimensions { rows: 3, columns: 2 });
        grid.rows[0][0].char = Some('a');
        grid.rows[1][0].char = Some('b');
        grid.rows[2][0].char = Some('c');

        grid.scroll_up(1);

        assert_eq!(grid.rows[0][0].char, Some('b'));
        assert_eq!(grid.rows[1][0].char, Some('c'));
        assert_eq!(grid.rows[2][0].char, None);
    }

    #[test]
    fn insert_blank_lines_pushes_region_down() {
        let mut grid = Grid::with_dimensions(Dimensions { rows: 3, columns: 2 });
        grid.rows[0][0].char = Some('a');
        grid.rows[1][0].char = Some('b');
        grid.rows[2][0].char = Some('c');
        grid.cursor.position.line = 1;

        grid.insert_blank_lines(1);

        assert_eq!(grid.rows[0][0].char, Some('a'));
        assert_eq!(grid.rows[1][0].char, None);
        assert_eq!(grid.rows[2][0].char, Some('b'));
    }

    #[test]
    fn tab_stops_default_every_eight_columns() {
        let grid = Grid::with_dimensions(Dimensions { rows: 1, columns: 20 });

        assert_eq!(grid.next_tab_stop(0, 1), 8);
        assert_eq!(grid.next_tab_stop(0, 2), 16);
        assert_eq!(grid.next_tab_stop(16, 1), 19);
    }
}
