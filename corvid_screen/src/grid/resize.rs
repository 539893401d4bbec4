use std::{cmp::Ordering, mem};

use super::{cell::Cell, default_tab_stops, Dimensions, Grid, Row};

impl Grid {
    pub fn resize(&mut self, dimensions: Dimensions) {
        let template = mem::take(&mut self.cursor.template);

        match self.dimensions.rows.cmp(&dimensions.rows) {
            Ordering::Less => self.grow_rows_to(dimensions.rows),
            Ordering::Greater => self.shrink_rows_to(dimensions.rows),
            Ordering::Equal => (),
        }

        match self.dimensions.columns.cmp(&dimensions.columns) {
            Ordering::Less => self.grow_columns_to(dimensions.columns),
            Ordering::Greater => self.shrink_columns_to(dimensions.columns),
            Ordering::Equal => (),
        }

        self.tab_stops = default_tab_stops(self.dimensions.columns);
        self.reset_margins();
        self.cursor.position.line = self.cursor.position.line.min(self.dimensions.rows - 1);
        self.cursor.position.column = self.cursor.position.column.min(self.dimensions.columns - 1);
        self.cursor.template = template;
    }

    fn grow_rows_to(&mut self, target: usize) {
        self.rows
            .resize_with(target, || Row::new(self.dimensions.columns));

        self.dimensions.rows = target;
    }

    fn shrink_rows_to(&mut self, target: usize) {
        self.rows.truncate(target);

        self.dimensions.rows = target;
    }

    fn grow_columns_to(&mut self, target: usize) {
        let mut cell = Cell::default();
        cell.apply_template(&self.cursor.template);

        for row in self.rows.iter_mut() {
            row.resize_with(target, || cell);
        }

        self.dimensions.columns = target;
    }

    fn shrink_columns_to(&mut self, target: usize) {
        for row in self.rows.iter_mut() {
            row.truncate(target)
        }

        self.dimensions.columns = target;
    }
}
