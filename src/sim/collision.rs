//! Shared collision primitives
//!
//! The ball and snake systems only need axis-aligned rectangles, circles and
//! an elastic reflection; anything fancier lives with the system that uses it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, pixel units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.max().x
            && other.pos.x < self.max().x
            && self.pos.y < other.max().y
            && other.pos.y < self.max().y
    }
}

/// Circle vs axis-aligned rectangle overlap test
///
/// Clamps the circle center onto the rectangle and compares the remaining
/// distance against the radius.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.pos, rect.max());
    center.distance_squared(closest) <= radius * radius
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);

        // Center inside
        assert!(circle_rect_overlap(Vec2::new(20.0, 20.0), 1.0, &rect));
        // Touching the left edge from outside
        assert!(circle_rect_overlap(Vec2::new(6.0, 20.0), 4.0, &rect));
        // Clearly outside
        assert!(!circle_rect_overlap(Vec2::new(2.0, 20.0), 4.0, &rect));
        // Near a corner: diagonal distance matters
        assert!(!circle_rect_overlap(Vec2::new(7.0, 7.0), 4.0, &rect));
    }

    #[test]
    fn test_rect_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // edge-adjacent, not overlapping
    }

    #[test]
    fn test_reflect() {
        let v = Vec2::new(3.0, -2.0);
        let n = Vec2::new(-1.0, 0.0);

        let r = reflect(v, n);
        assert!((r.x - (-3.0)).abs() < 1e-6);
        assert!((r.y - (-2.0)).abs() < 1e-6);
    }
}
