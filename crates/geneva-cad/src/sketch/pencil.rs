//! Cursor-based path drawing

use glam::Vec2;

use super::{SketchResult, check_loop};

/// Traces a closed straight-edged path one segment at a time
///
/// The cursor starts at the sketch origin unless created with [`Pencil::at`].
#[derive(Debug, Clone)]
pub struct Pencil {
    points: Vec<Vec2>,
}

impl Default for Pencil {
    fn default() -> Self {
        Self::new()
    }
}

impl Pencil {
    /// Start a path at the sketch origin
    pub fn new() -> Self {
        Self::at(Vec2::ZERO)
    }

    /// Start a path at `start`
    pub fn at(start: Vec2) -> Self {
        Self {
            points: vec![start],
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> Vec2 {
        // Never empty: every constructor seeds the start point
        self.points.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Current cursor X coordinate
    pub fn x(&self) -> f32 {
        self.cursor().x
    }

    /// Current cursor Y coordinate
    pub fn y(&self) -> f32 {
        self.cursor().y
    }

    /// Draw a segment to an absolute position
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.points.push(Vec2::new(x, y));
        self
    }

    /// Draw a segment relative to the cursor
    pub fn line(self, dx: f32, dy: f32) -> Self {
        let cursor = self.cursor();
        self.line_to(cursor.x + dx, cursor.y + dy)
    }

    /// Points drawn so far, including the start
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Close the path back to its start
    ///
    /// Zero-length segments are dropped, as is a final segment that already
    /// returns to the start.
    pub fn close(mut self) -> SketchResult<Vec<Vec2>> {
        self.points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
        let n = self.points.len();
        if n > 1 && self.points[0].distance_squared(self.points[n - 1]) < 1e-12 {
            self.points.pop();
        }
        check_loop(&self.points)?;
        Ok(self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_and_absolute_moves() {
        let pencil = Pencil::new().line_to(0.0, 3.0).line(9.5, 0.0).line(0.0, -3.0);
        assert_eq!(pencil.x(), 9.5);
        assert_eq!(pencil.y(), 0.0);
        assert_eq!(pencil.points().len(), 4);
    }

    #[test]
    fn test_cursor_reads_feed_absolute_moves() {
        let pencil = Pencil::new().line_to(10.0, 0.0).line(0.0, 2.5);
        let pencil = pencil.clone().line_to(4.0, pencil.y());
        assert_eq!(pencil.cursor(), Vec2::new(4.0, 2.5));
    }

    #[test]
    fn test_close_drops_duplicate_endpoint() {
        let points = Pencil::new()
            .line_to(1.0, 0.0)
            .line(0.0, 0.0)
            .line_to(1.0, 1.0)
            .line_to(0.0, 0.0)
            .close()
            .unwrap();
        assert_eq!(points, vec![Vec2::ZERO, Vec2::X, Vec2::ONE]);
    }

    #[test]
    fn test_close_rejects_segment() {
        assert!(Pencil::new().line_to(1.0, 0.0).close().is_err());
        assert!(Pencil::at(Vec2::ONE).close().is_err());
    }
}
