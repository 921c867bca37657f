use crate::board::{Side, SquarePos};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Half-open: left/top inclusive, right/bottom exclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Shrinks every side by `by`.
    pub fn inset(&self, by: f64) -> Rect {
        Rect {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
        }
    }

    /// Perpendicular distance from `p` to the line of `side`.
    pub fn distance(&self, side: Side, p: Point) -> f64 {
        match side {
            Side::Bottom => self.bottom - p.y,
            Side::Left => p.x - self.left,
            Side::Right => self.right - p.x,
            Side::Top => p.y - self.top,
        }
    }

    /// End points of the segment drawn for `side`.
    pub fn segment(&self, side: Side) -> (Point, Point) {
        match side {
            Side::Bottom => (
                Point::new(self.left, self.bottom),
                Point::new(self.right, self.bottom),
            ),
            Side::Left => (
                Point::new(self.left, self.top),
                Point::new(self.left, self.bottom),
            ),
            Side::Right => (
                Point::new(self.right, self.top),
                Point::new(self.right, self.bottom),
            ),
            Side::Top => (
                Point::new(self.left, self.top),
                Point::new(self.right, self.top),
            ),
        }
    }

    /// A point inside the rect that hit-tests to `side` first.
    pub fn probe(&self, side: Side) -> Point {
        let mid = self.center();
        match side {
            Side::Bottom => Point::new(mid.x, self.bottom - 1.0),
            Side::Left => Point::new(self.left, mid.y),
            Side::Right => Point::new(self.right - 1.0, mid.y),
            Side::Top => Point::new(mid.x, self.top),
        }
    }
}

/// Maps grid coordinates onto a drawing surface.
///
/// The grid starts at `(origin_x, origin_y)`; everything above it is the
/// score header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub grid_size: usize,
    pub width: f64,
    pub height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_w: f64,
    pub cell_h: f64,
    pub stroke: f64,
    pub dot_radius: f64,
}

impl Layout {
    /// Pixel layout for a canvas of the given height. The width is 90% of the
    /// height and a one-cell margin is kept left and right of the grid.
    pub fn canvas(grid_size: usize, height: f64) -> Self {
        let width = height * 0.9;
        let cell = width / (grid_size as f64 + 2.0);
        let stroke = cell / 12.0;
        Self {
            grid_size,
            width,
            height,
            origin_x: cell,
            origin_y: height - (grid_size as f64 + 1.0) * cell,
            cell_w: cell,
            cell_h: cell,
            stroke,
            dot_radius: stroke,
        }
    }

    /// Character-cell layout for a terminal. Terminal cells are about twice as
    /// tall as they are wide, so squares are 8 columns by 4 rows.
    pub fn terminal(grid_size: usize) -> Self {
        const CELL_W: f64 = 8.0;
        const CELL_H: f64 = 4.0;
        const HEADER: f64 = 5.0;
        let grid_w = grid_size as f64 * CELL_W;
        Self {
            grid_size,
            width: grid_w + 2.0 * CELL_W,
            height: HEADER + grid_size as f64 * CELL_H + 2.0,
            origin_x: CELL_W,
            origin_y: HEADER,
            cell_w: CELL_W,
            cell_h: CELL_H,
            stroke: 1.0,
            dot_radius: 0.5,
        }
    }

    /// Height of the score header above the grid.
    pub fn margin(&self) -> f64 {
        self.origin_y
    }

    pub fn grid_x(&self, line_col: usize) -> f64 {
        self.origin_x + self.cell_w * line_col as f64
    }

    pub fn grid_y(&self, line_row: usize) -> f64 {
        self.origin_y + self.cell_h * line_row as f64
    }

    pub fn square_rect(&self, pos: SquarePos) -> Rect {
        let left = self.grid_x(pos.col);
        let top = self.grid_y(pos.row);
        Rect {
            left,
            top,
            right: left + self.cell_w,
            bottom: top + self.cell_h,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            left: 0.0,
            top: 0.0,
            right: self.width,
            bottom: self.height,
        }
    }

    /// The square whose bounds contain `p`, if any.
    pub fn square_at(&self, p: Point) -> Option<SquarePos> {
        let n = self.grid_size;
        (0..n)
            .flat_map(|row| (0..n).map(move |col| SquarePos::new(row, col)))
            .find(|pos| self.square_rect(*pos).contains(p))
    }
}
