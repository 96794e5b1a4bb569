//! Cubic Bezier curves for polyline construction.
//!
//! Curves live in the XY plane with a per-point depth; the Z coordinate is
//! carried along but does not bend the curve.

use glam::Vec3;
use lyon::geom::CubicBezierSegment;
use lyon::math::point;

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point
    pub from: Vec3,
    /// First control point
    pub control1: Vec3,
    /// Second control point
    pub control2: Vec3,
    /// End point
    pub to: Vec3,
}

impl CubicBezier {
    /// Create a new cubic Bezier curve.
    pub fn new(from: Vec3, control1: Vec3, control2: Vec3, to: Vec3) -> Self {
        Self {
            from,
            control1,
            control2,
            to,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.from * mt3
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.to * t3
    }

    /// Split the curve at parameter t (de Casteljau), returning two curves.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let p01 = self.from.lerp(self.control1, t);
        let p12 = self.control1.lerp(self.control2, t);
        let p23 = self.control2.lerp(self.to, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let p0123 = p012.lerp(p123, t);

        (
            Self::new(self.from, p01, p012, p0123),
            Self::new(p0123, p123, p23, self.to),
        )
    }

    /// The point shared by both halves of `split(0.5)`.
    pub fn midpoint(&self) -> Vec3 {
        self.split(0.5).0.to
    }

    /// Start, subdivided midpoint, end.
    pub fn coarse_points(&self) -> [Vec3; 3] {
        [self.from, self.midpoint(), self.to]
    }

    /// Flatten into a polyline whose chords stay within `tolerance` of the
    /// curve in the XY plane. The first and last points are exactly `from`
    /// and `to`; Z is interpolated by the curve parameter of each point.
    pub fn flatten(&self, tolerance: f32) -> Vec<Vec3> {
        let segment = CubicBezierSegment {
            from: point(self.from.x, self.from.y),
            ctrl1: point(self.control1.x, self.control1.y),
            ctrl2: point(self.control2.x, self.control2.y),
            to: point(self.to.x, self.to.y),
        };

        let mut points = vec![self.from];
        segment.for_each_flattened_with_t(tolerance, &mut |line, t| {
            let z = self.eval(t.end).z;
            points.push(Vec3::new(line.to.x, line.to.y, z));
        });

        // Pin the end point exactly.
        if let Some(last) = points.last_mut() {
            *last = self.to;
        }
        points
    }

    /// Approximate the arc length of the curve.
    pub fn arc_length(&self, subdivisions: usize) -> f32 {
        let mut length = 0.0;
        let mut prev = self.from;

        for i in 1..=subdivisions {
            let t = i as f32 / subdivisions as f32;
            let point = self.eval(t);
            length += prev.distance(point);
            prev = point;
        }

        length
    }
}

impl From<[Vec3; 4]> for CubicBezier {
    fn from([from, control1, control2, to]: [Vec3; 4]) -> Self {
        Self::new(from, control1, control2, to)
    }
}
