//! Distance and direction helpers
//!
//! Every hit test in the game is a circle-circle or circle-segment
//! distance check; counts stay in the tens so no spatial partitioning.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Circle-circle overlap: `distance < size_a + size_b`
#[inline]
pub fn circles_overlap(a: Vec2, size_a: f32, b: Vec2, size_b: f32) -> bool {
    distance(a, b) < size_a + size_b
}

/// Shortest distance from `p` to the segment `start..end`
///
/// A degenerate segment (start == end) collapses to point distance.
pub fn point_segment_distance(p: Vec2, start: Vec2, end: Vec2) -> f32 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return distance(p, start);
    }
    let t = ((p - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    distance(p, start + seg * t)
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
///
/// Callers skip the move or shot for that frame instead of producing NaN.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { Some(delta / len) } else { None }
}

/// Unit vector for a heading in radians
#[inline]
pub fn unit(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Axis-aligned play area with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `p` lies inside the area grown by `margin` on every side
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin
            && p.x <= self.width + margin
            && p.y >= -margin
            && p.y <= self.height + margin
    }

    /// Clamp a circle of radius `size` so it stays fully inside
    pub fn clamp_inside(&self, p: Vec2, size: f32) -> Vec2 {
        Vec2::new(
            p.x.clamp(size, (self.width - size).max(size)),
            p.y.clamp(size, (self.height - size).max(size)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_segment_distance_projects_inside() {
        let d = point_segment_distance(
            Vec2::new(5.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_segment_distance_clamps_to_endpoints() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);
        assert!((point_segment_distance(Vec2::new(-3.0, 4.0), start, end) - 5.0).abs() < 1e-5);
        assert!((point_segment_distance(Vec2::new(13.0, 4.0), start, end) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec2::new(3.0, 4.0);
        assert!((point_segment_distance(p, Vec2::ZERO, Vec2::ZERO) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_direction_to_coincident_points() {
        assert!(direction_to(Vec2::ONE, Vec2::ONE).is_none());
        let dir = direction_to(Vec2::ZERO, Vec2::new(0.0, 2.0)).unwrap();
        assert!((dir - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_bounds_clamp_inside() {
        let bounds = Bounds::new(800.0, 600.0);
        let p = bounds.clamp_inside(Vec2::new(-10.0, 700.0), 15.0);
        assert_eq!(p, Vec2::new(15.0, 585.0));
    }

    proptest! {
        #[test]
        fn segment_distance_never_exceeds_endpoint_distance(
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let p = Vec2::new(px, py);
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let d = point_segment_distance(p, a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= distance(p, a) + 1e-3);
            prop_assert!(d <= distance(p, b) + 1e-3);
        }
    }
}
