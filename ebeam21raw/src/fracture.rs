//!
//! # Fracturing: Convex Decomposition
//!
//! Decomposes one simple polygon, holes included, into convex pieces of
//! at most four vertices, the only shapes the exposure hardware can
//! pattern. A single band sweep removes holes and non-convexity at once:
//! every covered band-span is a trapezoid or triangle. Both sweep axes
//! are evaluated and the more compact decomposition kept.
//!

// Crates.io
use tracing::debug;

// Local imports
use crate::error::{ExportError, ExportResult};
use crate::geom::{Dir, Polygon, Ring};
use crate::heal::collect_polygon_edges;
use crate::sweep::{sweep, SweepEdge, WindingMode};

/// Fracture `poly` into convex pieces of 3 or 4 vertices which exactly
/// tile its area. Deterministic for a given input: pieces come back in
/// band order along the chosen sweep axis.
///
/// A polygon that is already convex, hole-free, and within the vertex
/// bound is emitted unchanged, up to orientation.
///
/// Fails with a fatal geometry error if the input slips past validation
/// with a self-intersecting ring, or if any verified piece comes out
/// non-convex.
pub fn fracture_polygon(poly: &Polygon) -> ExportResult<Vec<Ring>> {
    // The already-exposable fast path: convex, within the vertex bound, hole-free
    if poly.holes.is_empty() {
        let ring = poly.outer.cleaned().unwrap_or_else(|| poly.outer.clone());
        if ring.len() <= 4 && ring.is_convex() {
            let ring = if ring.is_ccw() { ring } else { ring.reversed() };
            return Ok(vec![ring]);
        }
    }

    // Trapezoidalize along both axes; prefer fewer pieces,
    // then smaller total perimeter, then the horizontal sweep
    let horiz = sweep_axis(poly, Dir::Horiz)?;
    let vert = sweep_axis(poly, Dir::Vert)?;
    let pick_vert = vert.len() < horiz.len()
        || (vert.len() == horiz.len() && total_perimeter(&vert) + 1e-9 < total_perimeter(&horiz));
    let pieces = if pick_vert { vert } else { horiz };
    debug!(
        pieces = pieces.len(),
        axis = if pick_vert { "vertical" } else { "horizontal" },
        "fractured polygon"
    );

    // The vertex bound alone is necessary but not sufficient;
    // convexity is verified on every emitted piece
    for ring in pieces.iter() {
        if !(3..=4).contains(&ring.len()) || !ring.is_convex() {
            return Err(ExportError::geometry(format!(
                "fracture produced an invalid piece of {} vertices",
                ring.len()
            )));
        }
    }
    Ok(pieces)
}

/// Trapezoidalize `poly` with bands along `dir`
fn sweep_axis(poly: &Polygon, dir: Dir) -> ExportResult<Vec<Ring>> {
    let transposed;
    let poly = match dir {
        Dir::Horiz => poly,
        Dir::Vert => {
            transposed = transpose(poly);
            &transposed
        }
    };
    let mut edges: Vec<SweepEdge> = Vec::new();
    collect_polygon_edges(poly, &mut edges);
    if edges.is_empty() {
        return Ok(Vec::new());
    }
    let spans = sweep(&edges, WindingMode::Simple).map_err(ExportError::geometry)?;
    let mut rings: Vec<Ring> = spans.iter().filter_map(|s| s.to_ring()).collect();
    if dir == Dir::Vert {
        // Undo the transposition; re-normalize the orientation it mirrored
        rings = rings
            .iter()
            .map(|r| {
                let t = r.transposed();
                if t.is_ccw() {
                    t
                } else {
                    t.reversed()
                }
            })
            .collect();
    }
    Ok(rings)
}

/// Swap the (x,y) coordinates of every ring of `poly`
fn transpose(poly: &Polygon) -> Polygon {
    Polygon {
        outer: poly.outer.transposed(),
        holes: poly.holes.iter().map(|h| h.transposed()).collect(),
    }
}

/// Summed perimeter of `rings`
fn total_perimeter(rings: &[Ring]) -> f64 {
    rings.iter().map(|r| r.perimeter()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::Int;

    fn ring(pts: &[(Int, Int)]) -> Ring {
        Ring::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn convex_quads_pass_through() {
        // An axis-aligned rectangle is emitted unchanged
        let rect = Polygon::new(ring(&[(0, 0), (2000, 0), (2000, 1000), (0, 1000)]));
        let pieces = fracture_polygon(&rect).unwrap();
        assert_eq!(pieces, vec![rect.outer.clone()]);

        // So is a triangle
        let tri = Polygon::new(ring(&[(0, 0), (10, 0), (0, 10)]));
        let pieces = fracture_polygon(&tri).unwrap();
        assert_eq!(pieces, vec![tri.outer.clone()]);
    }
    #[test]
    fn l_shape_splits_into_convex_pieces() {
        // An L-shaped hexagon cannot be patterned in one piece
        let l = Polygon::new(ring(&[(0, 0), (20, 0), (20, 10), (10, 10), (10, 20), (0, 20)]));
        let pieces = fracture_polygon(&l).unwrap();
        assert!(pieces.len() >= 2);
        let total: i128 = pieces.iter().map(|r| r.area2()).sum();
        assert_eq!(total, l.outer.area2());
        for piece in pieces.iter() {
            assert!(piece.len() <= 4);
            assert!(piece.is_convex());
        }
    }
    #[test]
    fn nonconvex_quad_is_still_split() {
        // Four vertices, but dart-shaped: the vertex bound alone is not enough
        let dart = Polygon::new(ring(&[(0, 0), (4, 0), (1, 1), (0, 4)]));
        let pieces = fracture_polygon(&dart).unwrap();
        assert!(pieces.len() >= 2);
        let total: i128 = pieces.iter().map(|r| r.area2()).sum();
        assert_eq!(total, dart.outer.area2());
        for piece in pieces.iter() {
            assert!(piece.is_convex());
        }
    }
    #[test]
    fn holes_are_cut_out() {
        // A 10x10 square with a 4x4 hole fractures to the ring area
        let poly = Polygon::with_holes(
            ring(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
            vec![ring(&[(3, 3), (7, 3), (7, 7), (3, 7)])],
        );
        let pieces = fracture_polygon(&poly).unwrap();
        let total: i128 = pieces.iter().map(|r| r.area2()).sum();
        assert_eq!(total, 2 * (100 - 16));
        // No piece reaches into the hole
        let hole_center = Point::new(5, 5);
        for piece in pieces.iter() {
            assert!(!piece.contains(&hole_center));
        }
    }
    #[test]
    fn axis_choice_minimizes_cut_length() {
        // A notched rectangle whose vertical decomposition has the same
        // piece count but strictly shorter internal cuts
        let notched = Polygon::new(ring(&[
            (0, 0),
            (2, 0),
            (2, 8),
            (4, 8),
            (4, 0),
            (6, 0),
            (6, 9),
            (0, 9),
        ]));
        let pieces = fracture_polygon(&notched).unwrap();
        assert_eq!(pieces.len(), 3);
        let total: i128 = pieces.iter().map(|r| r.area2()).sum();
        assert_eq!(total, 2 * 38);
        // The vertical sweep leaves the shallow bridge as its own piece
        let bridge = pieces.iter().find(|p| p.area2() == 2 * 2).unwrap();
        let mut pts = bridge.points.clone();
        pts.sort();
        assert_eq!(
            pts,
            vec![
                Point::new(2, 8),
                Point::new(2, 9),
                Point::new(4, 8),
                Point::new(4, 9),
            ]
        );
    }
    #[test]
    fn self_intersection_aborts() {
        let bowtie = Polygon::new(ring(&[(0, 0), (10, 10), (10, 0), (0, 10)]));
        match fracture_polygon(&bowtie) {
            Err(ExportError::Geometry { .. }) => (),
            other => panic!("expected a geometry error, got {:?}", other),
        }
    }
    #[test]
    fn fracture_is_deterministic() {
        let l = Polygon::new(ring(&[(0, 0), (20, 0), (20, 10), (10, 10), (10, 20), (0, 20)]));
        assert_eq!(fracture_polygon(&l).unwrap(), fracture_polygon(&l).unwrap());
    }
}
