//!
//! # Geometry Module
//!
//! Defines the core geometric types including [Point], [Ring], [Polygon], and [Transform],
//! and their core operations.
//!
//! All coordinates are [Int]-valued database units.
//! Doubled signed areas are computed exactly in 128-bit arithmetic,
//! so area bookkeeping across the heal and fracture stages is drift-free.
//!

// Crates.io
use derive_more::{Add, AddAssign, Sub, SubAssign};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

// Local imports
use crate::Int;

/// # Point in two-dimensional layout-space
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Hash,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
pub struct Point {
    pub x: Int,
    pub y: Int,
}
impl Point {
    /// Create a new [Point] from (x,y) coordinates
    pub fn new(x: Int, y: Int) -> Self {
        Self { x, y }
    }
    /// Create a new [Point] which serves as an offset in direction `dir`
    pub fn offset(val: Int, dir: Dir) -> Self {
        match dir {
            Dir::Horiz => Self { x: val, y: 0 },
            Dir::Vert => Self { x: 0, y: val },
        }
    }
    /// Create a new point shifted by `x` in the x-dimension and by `y` in the y-dimension
    pub fn shift(&self, p: &Point) -> Point {
        Point {
            x: p.x + self.x,
            y: p.y + self.y,
        }
    }
    /// Get the coordinate associated with direction `dir`
    pub fn coord(&self, dir: Dir) -> Int {
        match dir {
            Dir::Horiz => self.x,
            Dir::Vert => self.y,
        }
    }
    /// Create a new [Point] with swapped (x,y) coordinates
    pub fn transposed(&self) -> Point {
        Point {
            x: self.y,
            y: self.x,
        }
    }
    /// Create a new [Point], transformed from our original location by `transform`
    /// Coordinate transforms are applied in floating-point format,
    /// largely for rotations, and then rounded to the nearest integer.
    pub fn transform(&self, trans: &Transform) -> Point {
        let xf = self.x as f64;
        let yf = self.y as f64;
        let x = trans.a[0][0] * xf + trans.a[0][1] * yf + trans.b[0];
        let y = trans.a[1][0] * xf + trans.a[1][1] * yf + trans.b[1];
        Self {
            x: x.round() as Int,
            y: y.round() as Int,
        }
    }
}
/// Direction Enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Dir {
    Horiz,
    Vert,
}
impl Dir {
    /// Whichever direction we are, return the other one.
    pub fn other(self) -> Self {
        match self {
            Self::Horiz => Self::Vert,
            Self::Vert => Self::Horiz,
        }
    }
}
impl std::ops::Not for Dir {
    type Output = Self;
    /// Exclamation Operator returns the opposite direction
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// Twice the signed area of triangle (a, b, c), exactly.
/// Positive for counter-clockwise (a, b, c).
pub(crate) fn cross3(a: Point, b: Point, c: Point) -> i128 {
    (b.x - a.x) as i128 * (c.y - a.y) as i128 - (b.y - a.y) as i128 * (c.x - a.x) as i128
}
/// Boolean indication of whether `p` lies on segment (a, b), endpoints included
pub(crate) fn on_segment(a: Point, b: Point, p: Point) -> bool {
    cross3(a, b, p) == 0
        && a.x.min(b.x) <= p.x
        && a.x.max(b.x) >= p.x
        && a.y.min(b.y) <= p.y
        && a.y.max(b.y) >= p.y
}

/// # Ring
///
/// Closed loop of ≥3 [Point]s, the building block of [Polygon]s.
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Ring {
    pub points: Vec<Point>,
}
impl Ring {
    /// Create a new [Ring] from vertex-vector `points`
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }
    /// Boolean indication of an empty (vertex-free) ring
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Twice the signed area, exactly.
    /// Positive for counter-clockwise vertex order.
    pub fn area2(&self) -> i128 {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }
        let mut sum: i128 = 0;
        for idx in 0..n {
            let a = self.points[idx];
            let b = self.points[(idx + 1) % n];
            sum += a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128;
        }
        sum
    }
    /// Boolean indication of counter-clockwise vertex order
    pub fn is_ccw(&self) -> bool {
        self.area2() > 0
    }
    /// Create a new [Ring] with reversed vertex order (and hence negated signed area)
    pub fn reversed(&self) -> Ring {
        let mut points = self.points.clone();
        points.reverse();
        Ring::new(points)
    }
    /// Total edge length
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        let mut sum = 0.0;
        for idx in 0..n {
            let a = self.points[idx];
            let b = self.points[(idx + 1) % n];
            sum += ((b.x - a.x) as f64).hypot((b.y - a.y) as f64);
        }
        sum
    }
    /// Degeneracy removal: strip consecutive duplicate vertices,
    /// including the wrap-around duplicate of the initial point.
    /// Returns [None] if fewer than three distinct vertices,
    /// or zero area, remain.
    pub fn cleaned(&self) -> Option<Ring> {
        let mut pts: Vec<Point> = Vec::with_capacity(self.points.len());
        for p in self.points.iter().copied() {
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        while pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        if pts.len() < 3 {
            return None;
        }
        let ring = Ring::new(pts);
        if ring.area2() == 0 {
            return None;
        }
        Some(ring)
    }
    /// Create a new [Ring] with collinear intermediate vertices removed
    pub fn dedup_collinear(&self) -> Ring {
        let mut pts = self.points.clone();
        loop {
            let n = pts.len();
            if n < 3 {
                break;
            }
            let mut out = Vec::with_capacity(n);
            for idx in 0..n {
                let prev = pts[(idx + n - 1) % n];
                let here = pts[idx];
                let next = pts[(idx + 1) % n];
                if here == prev {
                    continue;
                }
                if cross3(prev, here, next) != 0 {
                    out.push(here);
                }
            }
            let done = out.len() == pts.len();
            pts = out;
            if done {
                break;
            }
        }
        Ring::new(pts)
    }
    /// Boolean indication of convexity.
    /// All turns must share one sense; collinear vertices are tolerated,
    /// but a fully-collinear (zero-area) ring is not convex.
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let (mut pos, mut neg) = (false, false);
        for idx in 0..n {
            let a = self.points[idx];
            let b = self.points[(idx + 1) % n];
            let c = self.points[(idx + 2) % n];
            let turn = cross3(a, b, c);
            if turn > 0 {
                pos = true;
            } else if turn < 0 {
                neg = true;
            }
            if pos && neg {
                return false;
            }
        }
        pos || neg
    }
    /// Boolean indication of whether the [Ring] contains [Point] `pt`.
    /// Containment is *inclusive*: points on the boundary,
    /// which include all points specifying the ring itself,
    /// are regarded throughout as "inside".
    pub fn contains(&self, pt: &Point) -> bool {
        // Uses the "winding number" algorithm, in exact integer arithmetic,
        // which works for all (realistically useful) layout-polygons.
        let n = self.points.len();
        let mut winding: isize = 0;
        for idx in 0..n {
            // Grab the segment's start and end points.
            // Note these accesses go one past `points.len`, closing the ring back at its first point.
            let a = self.points[idx];
            let b = self.points[(idx + 1) % n];
            if on_segment(a, b, *pt) {
                // This segment runs straight through the point. No need to check further.
                return true;
            }
            if a.y <= pt.y {
                // Upward crossing of the scan-height, strictly left of the edge
                if b.y > pt.y && cross3(a, b, *pt) > 0 {
                    winding += 1;
                }
            } else if b.y <= pt.y && cross3(a, b, *pt) < 0 {
                // Downward crossing, strictly right of the edge
                winding -= 1;
            }
        }
        // Trick is: if the winding number is non-zero, we're inside the ring. And if it's zero, we're outside.
        winding != 0
    }
    /// Boolean indication of whether `pt` lies on the ring's boundary
    pub fn on_boundary(&self, pt: &Point) -> bool {
        let n = self.points.len();
        (0..n).any(|idx| on_segment(self.points[idx], self.points[(idx + 1) % n], *pt))
    }
    /// Lexicographically smallest vertex, for deterministic ordering
    pub fn min_point(&self) -> Option<Point> {
        self.points.iter().copied().min()
    }
    /// Create a new [Ring] with swapped (x,y) coordinates
    pub fn transposed(&self) -> Ring {
        Ring::new(self.points.iter().map(|p| p.transposed()).collect())
    }
}

/// # Polygon
///
/// Simple closed polygon: one outer boundary [Ring]
/// plus zero or more hole [Ring]s.
/// Invariant: rings are simple (non-self-intersecting),
/// and holes lie strictly inside the outer ring without intersecting each other.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polygon {
    /// Outer boundary
    pub outer: Ring,
    /// Hole boundaries
    pub holes: Vec<Ring>,
}
impl Polygon {
    /// Create a new hole-free [Polygon] bounded by `outer`
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }
    /// Create a new [Polygon] bounded by `outer`, with holes `holes`
    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }
    /// Twice the enclosed area: the outer ring's, less each hole's
    pub fn area2(&self) -> i128 {
        let mut sum = self.outer.area2().abs();
        for hole in self.holes.iter() {
            sum -= hole.area2().abs();
        }
        sum
    }
    /// Boolean indication of whether the [Polygon] contains [Point] `pt`.
    /// Boundary points, on the outer ring or on hole rings, are regarded as "inside".
    pub fn contains(&self, pt: &Point) -> bool {
        if !self.outer.contains(pt) {
            return false;
        }
        for hole in self.holes.iter() {
            if hole.contains(pt) && !hole.on_boundary(pt) {
                return false;
            }
        }
        true
    }
}

/// # Rectangle
///
/// Axis-aligned rectangle, specified by two opposite corners.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub p0: Point,
    pub p1: Point,
}
impl Rect {
    /// Calculate our center-point
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2, (self.p0.y + self.p1.y) / 2)
    }
}

/// # Shape
///
/// The primary geometric primitive comprising raw source geometry.
/// Variants include [Rect] and the general [Polygon].
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[enum_dispatch(ShapeTrait)]
pub enum Shape {
    Rect(Rect),
    Poly(Polygon),
}

impl Default for Shape {
    fn default() -> Self {
        Self::Rect(Rect::default())
    }
}

/// # ShapeTrait
///
/// Common shape operations, dispatched from the [Shape] enum to its variants by [enum_dispatch].
///
#[enum_dispatch]
pub trait ShapeTrait {
    /// Shift coordinates by the (x,y) values specified in `pt`
    fn shift(&mut self, pt: &Point);
    /// Boolean indication of whether the [Shape] contains [Point] `pt`.
    /// Containment is *inclusive* for all [Shape] types.
    fn contains(&self, pt: &Point) -> bool;
    /// Convert to a [Polygon], our most general of shapes
    fn to_poly(&self) -> Polygon;
}

impl ShapeTrait for Rect {
    /// Shift coordinates by the (x,y) values specified in `pt`
    fn shift(&mut self, pt: &Point) {
        self.p0.x += pt.x;
        self.p0.y += pt.y;
        self.p1.x += pt.x;
        self.p1.y += pt.y;
    }
    /// Boolean indication of whether the [Shape] contains [Point] `pt`.
    fn contains(&self, pt: &Point) -> bool {
        let (p0, p1) = (&self.p0, &self.p1);
        p0.x.min(p1.x) <= pt.x
            && p0.x.max(p1.x) >= pt.x
            && p0.y.min(p1.y) <= pt.y
            && p0.y.max(p1.y) >= pt.y
    }
    fn to_poly(&self) -> Polygon {
        // Create a four-sided, counter-clockwise polygon from our corners
        let (lo, hi) = (
            Point::new(self.p0.x.min(self.p1.x), self.p0.y.min(self.p1.y)),
            Point::new(self.p0.x.max(self.p1.x), self.p0.y.max(self.p1.y)),
        );
        Polygon::new(Ring::new(vec![
            lo,
            Point::new(hi.x, lo.y),
            hi,
            Point::new(lo.x, hi.y),
        ]))
    }
}
impl ShapeTrait for Polygon {
    /// Shift coordinates by the (x,y) values specified in `pt`
    fn shift(&mut self, pt: &Point) {
        for p in self.outer.points.iter_mut() {
            p.x += pt.x;
            p.y += pt.y;
        }
        for hole in self.holes.iter_mut() {
            for p in hole.points.iter_mut() {
                p.x += pt.x;
                p.y += pt.y;
            }
        }
    }
    /// Boolean indication of whether the [Shape] contains [Point] `pt`.
    fn contains(&self, pt: &Point) -> bool {
        Polygon::contains(self, pt)
    }
    fn to_poly(&self) -> Polygon {
        self.clone()
    }
}

/// # Matrix-Vector Transformation
///
/// 2x2 rotation-matrix and two-entry translation vector,
/// used for relative movement of [Point]s and [Shape]s.
///
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation / Transformation Matrix
    /// Represented in row-major order
    pub a: [[f64; 2]; 2],
    /// X-Y Translation
    pub b: [f64; 2],
}
impl Transform {
    /// The identity transform, leaving any transformed object unmodified
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }
    /// Translation by (x,y)
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }
    /// A transform to rotate by `angle` degrees
    pub fn rotate(angle: f64) -> Self {
        let sin = angle.to_radians().sin();
        let cos = angle.to_radians().cos();
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0., 0.],
        }
    }
    /// A transform to reflect about the x-axis
    pub fn reflect_vert() -> Self {
        Self {
            a: [[1., 0.], [0., -1.]],
            b: [0., 0.],
        }
    }
    /// Create a transform from instance fields: location, rotation, and reflection
    pub fn from_instance(loc: &Point, reflect_vert: bool, angle: Option<f64>) -> Self {
        let b = [loc.x as f64, loc.y as f64];
        let (mut sin, mut cos) = (0., 1.);
        if let Some(angle) = angle {
            sin = angle.to_radians().sin();
            cos = angle.to_radians().cos();
        }
        let cos_refl = if reflect_vert { -cos } else { cos };
        let a = [[cos, -sin], [sin, cos_refl]];
        Self { a, b }
    }
    /// Create a new [Transform] that is the cascade of `parent` and `child`.
    ///
    /// "Parents" and "children" refer to typical layout-instance hierarchies,
    /// in which each layer of instance has a nested set of transformations relative to its top-level parent.
    ///
    /// Note this operation *is not* commutative.
    pub fn cascade(parent: &Transform, child: &Transform) -> Transform {
        // The result-transform's origin is the parent's origin,
        // plus the parent-transformed child's origin
        let mut b = matvec(&parent.a, &child.b);
        b[0] += parent.b[0];
        b[1] += parent.b[1];
        // And the cascade-matrix is the product of the parent's and child's
        let a = matmul(&parent.a, &child.a);
        Self { a, b }
    }
}
/// Multiply 2x2 matrices, returning a new 2x2 matrix
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}
/// Multiply a 2x2 matrix by a 2-entry vector, returning a new 2-entry vector
fn matvec(a: &[[f64; 2]; 2], b: &[f64; 2]) -> [f64; 2] {
    [
        a[0][0] * b[0] + a[0][1] * b[1],
        a[1][0] * b[0] + a[1][1] * b[1],
    ]
}
pub trait TransformTrait {
    /// Apply matrix-vector [Transform] `trans`.
    /// Creates a new shape at a location equal to the transformation of our own.
    fn transform(&self, trans: &Transform) -> Self;
}
impl TransformTrait for Point {
    fn transform(&self, trans: &Transform) -> Self {
        Point::transform(self, trans)
    }
}
impl TransformTrait for Ring {
    fn transform(&self, trans: &Transform) -> Self {
        Ring::new(self.points.iter().map(|p| p.transform(trans)).collect())
    }
}
impl TransformTrait for Rect {
    fn transform(&self, trans: &Transform) -> Self {
        Rect {
            p0: self.p0.transform(trans),
            p1: self.p1.transform(trans),
        }
    }
}
impl TransformTrait for Polygon {
    fn transform(&self, trans: &Transform) -> Self {
        Polygon {
            outer: self.outer.transform(trans),
            holes: self.holes.iter().map(|h| h.transform(trans)).collect(),
        }
    }
}
impl TransformTrait for Shape {
    fn transform(&self, trans: &Transform) -> Self {
        match self {
            Shape::Rect(r) => Shape::Rect(r.transform(trans)),
            Shape::Poly(p) => Shape::Poly(p.transform(trans)),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    #[test]
    fn transform_identity() {
        let shape1 = Shape::Rect(Rect {
            p0: Point::new(0, 0),
            p1: Point::new(1, 1),
        });
        let trans = Transform::identity();
        let shape2 = shape1.transform(&trans);
        assert_eq!(shape2, shape1);
    }
    #[test]
    fn transform_rotate() {
        let shape1 = Shape::Rect(Rect {
            p0: Point::new(0, 0),
            p1: Point::new(1, 1),
        });
        let trans = Transform::rotate(90.);
        let shape2 = shape1.transform(&trans);
        assert_eq!(
            shape2,
            Shape::Rect(Rect {
                p0: Point::new(0, 0),
                p1: Point::new(-1, 1),
            })
        );
    }
    #[test]
    fn test_cascade() {
        let trans1 = Transform::reflect_vert();
        let trans2 = Transform::translate(1., 1.);

        let p = Point::new(1, 1);
        let cascade1 = Transform::cascade(&trans1, &trans2);
        let pc1 = p.transform(&cascade1);
        assert_eq!(pc1, Point::new(2, -2));

        let cascade2 = Transform::cascade(&trans2, &trans1);
        let pc1 = p.transform(&cascade2);
        assert_eq!(pc1, Point::new(2, 0));
    }
    #[test]
    fn test_ring_area_and_orientation() {
        // A unit-ish square, counter-clockwise
        let square = Ring::new(vec![
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ]);
        assert_eq!(square.area2(), 8);
        assert!(square.is_ccw());
        assert_eq!(square.reversed().area2(), -8);

        // A right triangle
        let triangle = Ring::new(vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)]);
        assert_eq!(triangle.area2(), 4);
    }
    #[test]
    fn test_ring_convexity() {
        let square = Ring::new(vec![
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ]);
        assert!(square.is_convex());

        // A square with a collinear midpoint on its bottom edge remains convex
        let square5 = Ring::new(vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ]);
        assert!(square5.is_convex());

        // A dart-shaped (non-convex) quad is not,
        // despite having only four vertices
        let dart = Ring::new(vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(1, 1),
            Point::new(0, 4),
        ]);
        assert!(!dart.is_convex());
    }
    #[test]
    fn test_ring_cleanup() {
        // Consecutive duplicates and the trailing closure point are stripped
        let noisy = Ring::new(vec![
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(2, 2),
            Point::new(0, 2),
            Point::new(0, 0),
        ]);
        let clean = noisy.cleaned().unwrap();
        assert_eq!(clean.len(), 4);
        assert_eq!(clean.area2(), 8);

        // Zero-area rings clean away entirely
        let flat = Ring::new(vec![Point::new(0, 0), Point::new(4, 0), Point::new(2, 0)]);
        assert!(flat.cleaned().is_none());
    }
    #[test]
    fn test_ring_contains() {
        // Test ring-point containment of several flavors

        // Create a right triangle at the origin
        let triangle = Ring::new(vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)]);
        assert!(triangle.contains(&Point::new(0, 0)));
        assert!(triangle.contains(&Point::new(1, 0)));
        assert!(triangle.contains(&Point::new(2, 0)));
        assert!(triangle.contains(&Point::new(0, 1)));
        assert!(triangle.contains(&Point::new(1, 1)));
        assert!(!triangle.contains(&Point::new(2, 2)));

        // Create a 2:1 tall-ish diamond-shape
        let diamond = Ring::new(vec![
            Point::new(1, 0),
            Point::new(2, 2),
            Point::new(1, 4),
            Point::new(0, 2),
        ]);
        assert!(!diamond.contains(&Point::new(0, 0)));
        assert!(!diamond.contains(&Point::new(100, 100)));
        // Check a few points through its vertical center
        assert!(diamond.contains(&Point::new(1, 0)));
        assert!(diamond.contains(&Point::new(1, 1)));
        assert!(diamond.contains(&Point::new(1, 2)));
        assert!(diamond.contains(&Point::new(1, 3)));
        assert!(diamond.contains(&Point::new(1, 4)));

        // More fun: create a U-shaped ring, inside a 10x10 square
        let u = Ring::new(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(2, 10),
            Point::new(2, 2),
            Point::new(8, 2),
            Point::new(8, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        for pt in &u.points {
            assert!(u.contains(pt));
        }
        assert!(u.contains(&Point::new(1, 1)));
        assert!(u.contains(&Point::new(9, 9)));
        // Points "inside" the u-part, i.e. "outside" the ring
        assert!(!u.contains(&Point::new(3, 3)));
        assert!(!u.contains(&Point::new(7, 9)));
    }
    #[test]
    fn test_polygon_with_hole_contains() {
        // A 10x10 square with a 4x4 hole at its center
        let poly = Polygon::with_holes(
            Ring::new(vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10),
            ]),
            vec![Ring::new(vec![
                Point::new(3, 3),
                Point::new(3, 7),
                Point::new(7, 7),
                Point::new(7, 3),
            ])],
        );
        assert_eq!(poly.area2(), 2 * (100 - 16));
        assert!(poly.contains(&Point::new(1, 1)));
        // The hole boundary remains part of the polygon; its interior does not
        assert!(poly.contains(&Point::new(3, 5)));
        assert!(!poly.contains(&Point::new(5, 5)));
    }
}
