// Line traversal - enumerates the grid cells a straight segment passes through
// Integer-only supercover walk, see
// http://playtechs.blogspot.com/2007/03/raytracing-on-grid.html

use log::trace;
use std::iter::FusedIterator;

/// Lazy walk over the cells between two cell coordinates (inclusive).
///
/// Every unit step along an axis crosses exactly one grid line and the cell
/// on the far side is yielded. When the segment passes exactly through a grid
/// corner both axes advance in a single step, so a 45 degree line visits one
/// cell per diagonal step instead of two.
#[derive(Debug, Clone)]
pub struct Traversal {
    x: i32,
    y: i32,
    x_inc: i32,
    y_inc: i32,
    // Doubled deltas, so the error term never needs fractions
    dx: i64,
    dy: i64,
    error: i64,
    remaining: i64,
}

impl Traversal {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        let (x0, y0) = start;
        let (x1, y1) = end;

        let dx = (i64::from(x1) - i64::from(x0)).abs();
        let dy = (i64::from(y1) - i64::from(y0)).abs();

        Self {
            x: x0,
            y: y0,
            x_inc: if x1 > x0 { 1 } else { -1 },
            y_inc: if y1 > y0 { 1 } else { -1 },
            dx: dx * 2,
            dy: dy * 2,
            error: dx - dy,
            remaining: 1 + dx + dy,
        }
    }
}

impl Iterator for Traversal {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining <= 0 {
            return None;
        }

        let current = (self.x, self.y);

        // Last cell: stepping past it could leave the i32 range
        if self.remaining == 1 {
            self.remaining = 0;
            return Some(current);
        }

        if self.error > 0 {
            self.x += self.x_inc;
            self.error -= self.dy;
        } else if self.error < 0 {
            self.y += self.y_inc;
            self.error += self.dx;
        } else {
            // Corner crossing: one diagonal step stands in for two unit steps
            trace!("diagonal step at ({}, {})", current.0, current.1);
            self.x += self.x_inc;
            self.y += self.y_inc;
            self.error += self.dx - self.dy;
            self.remaining -= 1;
        }
        self.remaining -= 1;

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining.max(0) as usize;
        (remaining.div_ceil(2), Some(remaining))
    }
}

impl FusedIterator for Traversal {}

/// Collect the ordered cells between `start` and `end`, both inclusive.
pub fn traverse(start: (i32, i32), end: (i32, i32)) -> Vec<(i32, i32)> {
    Traversal::new(start, end).collect()
}

/// Number of cells `traverse` would produce for the same endpoints.
pub fn traversal_len(start: (i32, i32), end: (i32, i32)) -> usize {
    Traversal::new(start, end).count()
}
