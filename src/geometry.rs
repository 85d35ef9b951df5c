//! Canvas geometry primitives and table box sizing.

use serde::Serialize;

/// Logical size of the virtual canvas the diagram lives on.
pub const CANVAS_SIZE: f64 = 4000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Center of the virtual canvas; layouts are arranged around this point.
pub fn canvas_center() -> Point {
    Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0)
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Rendered table box sizing. Width is fixed; height depends on the
/// collapse state and the number of column rows, capped at a maximum.
#[derive(Debug, Clone, Copy)]
pub struct BoxMetrics {
    pub table_width: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub border_offset: f64,
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self {
            table_width: 200.0,
            header_height: 40.0,
            row_height: 24.0,
            min_height: 60.0,
            max_height: 350.0,
            border_offset: 2.0,
        }
    }
}

impl BoxMetrics {
    /// Rendered height for a table with the given column count.
    pub fn height(&self, collapsed: bool, column_count: usize) -> f64 {
        if collapsed {
            self.min_height
        } else {
            (self.min_height + column_count as f64 * self.row_height).min(self.max_height)
        }
    }

    pub fn table_rect(&self, pos: Point, collapsed: bool, column_count: usize) -> Rect {
        Rect::new(
            pos.x,
            pos.y,
            self.table_width,
            self.height(collapsed, column_count),
        )
    }

    /// Vertical connector anchor: header center when collapsed, the center
    /// of the matched column row when expanded.
    pub fn anchor_y(&self, table_y: f64, collapsed: bool, row: usize) -> f64 {
        if collapsed {
            table_y + self.header_height / 2.0
        } else {
            table_y + self.header_height + row as f64 * self.row_height + self.row_height / 2.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_height_is_minimum() {
        let m = BoxMetrics::default();
        assert_eq!(m.height(true, 40), 60.0);
    }

    #[test]
    fn test_expanded_height_grows_with_columns() {
        let m = BoxMetrics::default();
        assert_eq!(m.height(false, 3), 60.0 + 3.0 * 24.0);
    }

    #[test]
    fn test_expanded_height_is_capped() {
        let m = BoxMetrics::default();
        assert_eq!(m.height(false, 100), 350.0);
    }

    #[test]
    fn test_anchor_y_collapsed_uses_header_center() {
        let m = BoxMetrics::default();
        assert_eq!(m.anchor_y(100.0, true, 5), 120.0);
    }

    #[test]
    fn test_anchor_y_expanded_uses_column_row() {
        let m = BoxMetrics::default();
        // header 40 + row 2 * 24 + half row 12
        assert_eq!(m.anchor_y(0.0, false, 2), 100.0);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let c = Rect::new(200.0, 0.0, 50.0, 50.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 100.0, 100.0);
        assert!(!a.overlaps(&b));
    }
}
