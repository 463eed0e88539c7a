//!
//! # Healing: Boolean-Union Merge
//!
//! Replaces a layer's possibly-overlapping polygon set with a minimal
//! disjoint set covering exactly the same area.
//! Runs the shared band sweep under union winding, then stitches the
//! covered slabs back into maximal polygons: interior boundary segments
//! cancel, the remainder links into rings, and rings classify into
//! outer boundaries and holes by traversal sense.
//!

// Std-Lib
use std::collections::{BTreeMap, HashMap};

// Crates.io
use tracing::{debug, warn};

// Local imports
use crate::error::{ExportError, ExportResult};
use crate::geom::{Point, Polygon, Ring};
use crate::sweep::{collect_edges, sweep, Slab, SweepEdge, WindingMode};
use crate::Int;

/// Heal `polys`: compute their boolean union as a new polygon set.
/// Disjoint inputs come back as distinct polygons; overlapping and
/// touching inputs merge; fully-covered holes disappear.
/// The input is never mutated.
pub fn heal_layer(polys: &[Polygon]) -> ExportResult<Vec<Polygon>> {
    // Zero or one shapes have nothing to merge with each other,
    // but a lone polygon still passes through for uniformity of output order.
    if polys.is_empty() {
        return Ok(Vec::new());
    }
    let mut edges: Vec<SweepEdge> = Vec::new();
    for poly in polys.iter() {
        collect_polygon_edges(poly, &mut edges);
    }
    if edges.is_empty() {
        return Ok(Vec::new());
    }
    let spans = sweep(&edges, WindingMode::Union).map_err(ExportError::geometry)?;
    let slabs: Vec<Slab> = spans.iter().filter_map(|s| s.to_slab()).collect();
    debug!(
        polygons = polys.len(),
        slabs = slabs.len(),
        "healed layer geometry"
    );
    let segments = boundary_segments(&slabs);
    let rings = link_rings(segments)?;
    Ok(build_polygons(rings))
}

/// Append `poly`'s edges with normalized traversal sense:
/// outer ring counter-clockwise, holes clockwise.
pub(crate) fn collect_polygon_edges(poly: &Polygon, edges: &mut Vec<SweepEdge>) {
    let outer = if poly.outer.is_ccw() {
        poly.outer.clone()
    } else {
        poly.outer.reversed()
    };
    collect_edges(&outer, edges);
    for hole in poly.holes.iter() {
        let hole = if hole.is_ccw() {
            hole.reversed()
        } else {
            hole.clone()
        };
        collect_edges(&hole, edges);
    }
}

/// Directed boundary segment, interior on its left
type Segment = (Point, Point);

/// Derive the union's boundary segments from its covered slabs.
///
/// Each slab contributes its counter-clockwise boundary; horizontal
/// pieces shared between vertically-adjacent slabs are interior and
/// cancel, including partial overlaps. Side edges never cancel: slabs
/// within a band are disjoint, and bands only meet along horizontals.
fn boundary_segments(slabs: &[Slab]) -> Vec<Segment> {
    let mut segs: Vec<Segment> = Vec::new();
    // Horizontal candidates, keyed by their y ordinate:
    // (x_start, x_end, +1) for slab bottoms, (x_start, x_end, -1) for tops
    let mut horiz: BTreeMap<Int, Vec<(Int, Int, i8)>> = BTreeMap::new();
    for s in slabs.iter() {
        if s.xl0 != s.xr0 {
            horiz.entry(s.y0).or_default().push((s.xl0, s.xr0, 1));
        }
        if s.xl1 != s.xr1 {
            horiz.entry(s.y1).or_default().push((s.xl1, s.xr1, -1));
        }
        // Right side, upward; left side, downward
        if (s.xr0, s.y0) != (s.xr1, s.y1) {
            segs.push((Point::new(s.xr0, s.y0), Point::new(s.xr1, s.y1)));
        }
        if (s.xl1, s.y1) != (s.xl0, s.y0) {
            segs.push((Point::new(s.xl1, s.y1), Point::new(s.xl0, s.y0)));
        }
    }
    // Cancel bottom/top overlaps along each horizontal line
    for (y, intervals) in horiz {
        let mut marks: Vec<(Int, i8, i8)> = Vec::with_capacity(2 * intervals.len());
        for (x0, x1, kind) in intervals {
            if kind > 0 {
                marks.push((x0, 1, 0));
                marks.push((x1, -1, 0));
            } else {
                marks.push((x0, 0, 1));
                marks.push((x1, 0, -1));
            }
        }
        marks.sort();
        let (mut bots, mut tops) = (0i32, 0i32);
        let mut prev_x: Option<Int> = None;
        // Pending same-sense runs merge into single segments
        let mut bot_run: Option<(Int, Int)> = None;
        let mut top_run: Option<(Int, Int)> = None;
        for (x, db, dt) in marks {
            if let Some(px) = prev_x {
                if px < x {
                    if bots > 0 && tops == 0 {
                        bot_run = match bot_run {
                            Some((s, e)) if e == px => Some((s, x)),
                            Some(run) => {
                                segs.push((Point::new(run.0, y), Point::new(run.1, y)));
                                Some((px, x))
                            }
                            None => Some((px, x)),
                        };
                    } else if tops > 0 && bots == 0 {
                        top_run = match top_run {
                            Some((s, e)) if e == px => Some((s, x)),
                            Some(run) => {
                                segs.push((Point::new(run.1, y), Point::new(run.0, y)));
                                Some((px, x))
                            }
                            None => Some((px, x)),
                        };
                    }
                }
            }
            bots += db as i32;
            tops += dt as i32;
            prev_x = Some(x);
        }
        if let Some(run) = bot_run {
            segs.push((Point::new(run.0, y), Point::new(run.1, y)));
        }
        if let Some(run) = top_run {
            segs.push((Point::new(run.1, y), Point::new(run.0, y)));
        }
    }
    segs
}

/// The counter-clockwise turn from incoming direction `din` to outgoing
/// `dout`, in radians. Exact reversals score worst rather than best,
/// so a walk only backtracks when nothing else leaves a vertex.
fn turn_angle(din: (Int, Int), dout: (Int, Int)) -> f64 {
    let cross = (din.0 as i128 * dout.1 as i128 - din.1 as i128 * dout.0 as i128) as f64;
    let dot = (din.0 as i128 * dout.0 as i128 + din.1 as i128 * dout.1 as i128) as f64;
    if cross == 0.0 && dot < 0.0 {
        return -std::f64::consts::PI;
    }
    cross.atan2(dot)
}

/// Link boundary segments into closed rings.
/// At junction vertices the walk takes the sharpest counter-clockwise
/// turn, which keeps every traced ring simple and its interior on the
/// left: outer boundaries come back counter-clockwise, holes clockwise.
fn link_rings(mut segments: Vec<Segment>) -> ExportResult<Vec<Ring>> {
    segments.sort();
    segments.dedup();
    let mut by_start: HashMap<Point, Vec<usize>> = HashMap::new();
    for (idx, seg) in segments.iter().enumerate() {
        by_start.entry(seg.0).or_default().push(idx);
    }
    let mut used = vec![false; segments.len()];
    let mut rings = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        let origin = segments[start].0;
        let mut pts: Vec<Point> = Vec::new();
        let mut cur = start;
        loop {
            used[cur] = true;
            let (a, b) = segments[cur];
            pts.push(a);
            if b == origin {
                break;
            }
            let din = (b.x - a.x, b.y - a.y);
            let mut best: Option<(f64, usize)> = None;
            for &cand in by_start.get(&b).into_iter().flatten() {
                if used[cand] {
                    continue;
                }
                let (c0, c1) = segments[cand];
                let angle = turn_angle(din, (c1.x - c0.x, c1.y - c0.y));
                if best.map_or(true, |(prev, _)| angle > prev) {
                    best = Some((angle, cand));
                }
            }
            match best {
                Some((_, next)) => cur = next,
                None => {
                    return Err(ExportError::geometry(format!(
                        "dangling boundary segment at ({}, {})",
                        b.x, b.y
                    )))
                }
            }
        }
        // Collinear band-boundary vertices are artifacts of the sweep; strip them
        let ring = Ring::new(pts).dedup_collinear();
        if ring.len() >= 3 && ring.area2() != 0 {
            rings.push(ring);
        }
    }
    Ok(rings)
}

/// Classify linked rings into polygons: positive-area rings are outer
/// boundaries, negative-area rings are holes, each assigned to the
/// smallest outer boundary containing it.
fn build_polygons(rings: Vec<Ring>) -> Vec<Polygon> {
    let mut polys: Vec<Polygon> = Vec::new();
    let mut holes: Vec<Ring> = Vec::new();
    for ring in rings {
        if ring.area2() > 0 {
            polys.push(Polygon::new(ring));
        } else {
            holes.push(ring);
        }
    }
    for hole in holes {
        let pt = hole.points[0];
        let mut best: Option<(i128, usize)> = None;
        for (idx, poly) in polys.iter().enumerate() {
            if poly.outer.contains(&pt) {
                let area = poly.outer.area2();
                if best.map_or(true, |(prev, _)| area < prev) {
                    best = Some((area, idx));
                }
            }
        }
        match best {
            Some((_, idx)) => polys[idx].holes.push(hole),
            // A hole with no surrounding boundary cannot come out of a
            // valid union; drop it rather than corrupt the output
            None => warn!("dropping orphan hole ring from healed layer"),
        }
    }
    for poly in polys.iter_mut() {
        poly.holes.sort_by_key(|h| h.min_point());
    }
    polys.sort_by_key(|p| p.outer.min_point());
    polys
}
