//!
//! # Band-Sweep Core
//!
//! Shared scanline machinery for the heal and fracture stages.
//! Decomposes a set of directed ring-edges into horizontal bands between
//! event ordinates, and each band into covered x-spans under the nonzero
//! winding rule. Healing unions the spans back into maximal polygons;
//! fracturing emits them directly as trapezoids and triangles.
//!

// Local imports
use crate::geom::{Point, Ring};
use crate::Int;

/// Coordinate tolerance for event deduplication and span stitching.
/// Input coordinates are integers, so anything below one half database
/// unit distinguishes genuinely distinct ordinates.
const EPS: f64 = 1e-6;

/// Round a sweep ordinate back onto the database grid
fn rint(v: f64) -> Int {
    v.round() as Int
}

/// A directed non-horizontal edge, normalized so `y0 < y1`.
/// `winding` carries the traversal sense: +1 for edges traversed downward
/// (left boundaries of counter-clockwise rings), -1 for upward.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepEdge {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub winding: i32,
}
impl SweepEdge {
    /// The edge's x-ordinate at height `y`, clamped to its endpoints
    pub fn x_at(&self, y: f64) -> f64 {
        if y <= self.y0 {
            self.x0
        } else if y >= self.y1 {
            self.x1
        } else {
            self.x0 + (self.x1 - self.x0) * (y - self.y0) / (self.y1 - self.y0)
        }
    }
}

/// Append `ring`'s non-horizontal edges onto `edges`
pub(crate) fn collect_edges(ring: &Ring, edges: &mut Vec<SweepEdge>) {
    let n = ring.points.len();
    for idx in 0..n {
        let a = ring.points[idx];
        let b = ring.points[(idx + 1) % n];
        if a.y == b.y {
            continue; // horizontal edges carry no winding
        }
        let (lo, hi, winding) = if a.y > b.y {
            (b, a, 1) // traversed downward
        } else {
            (a, b, -1) // traversed upward
        };
        edges.push(SweepEdge {
            x0: lo.x as f64,
            y0: lo.y as f64,
            x1: hi.x as f64,
            y1: hi.y as f64,
            winding,
        });
    }
}

/// Collect the sweep's event ordinates: every edge endpoint,
/// plus (when `with_crossings`) every proper pairwise edge crossing.
/// Crossings only arise between distinct source polygons,
/// so the fracture stage skips them.
pub(crate) fn events(edges: &[SweepEdge], with_crossings: bool) -> Vec<f64> {
    let mut ys = Vec::with_capacity(2 * edges.len());
    for e in edges.iter() {
        ys.push(e.y0);
        ys.push(e.y1);
    }
    if with_crossings {
        for (idx, a) in edges.iter().enumerate() {
            for b in edges.iter().skip(idx + 1) {
                if let Some(y) = crossing_y(a, b) {
                    ys.push(y);
                }
            }
        }
    }
    ys.sort_by(|a, b| a.total_cmp(b));
    ys.dedup_by(|a, b| (*a - *b).abs() <= EPS);
    ys
}

/// The y-ordinate at which edges `a` and `b` properly cross, if they do.
/// Shared endpoints and collinear overlaps are not crossings;
/// their ordinates are already endpoint events.
fn crossing_y(a: &SweepEdge, b: &SweepEdge) -> Option<f64> {
    let ylo = a.y0.max(b.y0);
    let yhi = a.y1.min(b.y1);
    if yhi - ylo <= EPS {
        return None;
    }
    let d_lo = a.x_at(ylo) - b.x_at(ylo);
    let d_hi = a.x_at(yhi) - b.x_at(yhi);
    if (d_lo < -EPS && d_hi > EPS) || (d_lo > EPS && d_hi < -EPS) {
        let t = d_lo / (d_lo - d_hi);
        Some(ylo + t * (yhi - ylo))
    } else {
        None
    }
}

/// Winding-count interpretation for a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindingMode {
    /// A single simple polygon with holes: counts must stay within {0, 1}.
    /// Anything else is evidence of a self-intersecting ring.
    Simple,
    /// Boolean union over many polygons: counts may rise arbitrarily,
    /// but may never go negative.
    Union,
}

/// One covered x-span within a horizontal band:
/// left and right edge ordinates at the band's bottom (`y0`) and top (`y1`)
#[derive(Debug, Clone, Copy)]
pub(crate) struct BandSpan {
    pub y0: f64,
    pub y1: f64,
    pub xl0: f64,
    pub xr0: f64,
    pub xl1: f64,
    pub xr1: f64,
}
impl BandSpan {
    /// Round onto the database grid as a counter-clockwise ring of
    /// 3 or 4 vertices. Returns [None] for spans which collapse to
    /// zero area on the grid.
    pub fn to_ring(&self) -> Option<Ring> {
        let (y0, y1) = (rint(self.y0), rint(self.y1));
        if y0 == y1 {
            return None;
        }
        Ring::new(vec![
            Point::new(rint(self.xl0), y0),
            Point::new(rint(self.xr0), y0),
            Point::new(rint(self.xr1), y1),
            Point::new(rint(self.xl1), y1),
        ])
        .cleaned()
    }
    /// Round onto the database grid as a [Slab].
    /// Returns [None] for spans which collapse to zero area on the grid.
    pub fn to_slab(&self) -> Option<Slab> {
        let slab = Slab {
            y0: rint(self.y0),
            y1: rint(self.y1),
            xl0: rint(self.xl0),
            xr0: rint(self.xr0),
            xl1: rint(self.xl1),
            xr1: rint(self.xr1),
        };
        if slab.y0 == slab.y1 || (slab.xl0 == slab.xr0 && slab.xl1 == slab.xr1) {
            return None;
        }
        Some(slab)
    }
}

/// A [BandSpan] rounded onto the database grid, for boundary reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slab {
    pub y0: Int,
    pub y1: Int,
    pub xl0: Int,
    pub xr0: Int,
    pub xl1: Int,
    pub xr1: Int,
}

/// Run the band sweep over `edges`, returning each band's covered spans
/// in bottom-to-top, left-to-right order.
/// Spans touching along a full shared side-edge are merged.
/// Fails on winding counts invalid for `mode`, the fingerprint of
/// self-intersecting or mis-nested input rings.
pub(crate) fn sweep(edges: &[SweepEdge], mode: WindingMode) -> Result<Vec<BandSpan>, String> {
    let with_crossings = mode == WindingMode::Union;
    let ys = events(edges, with_crossings);
    let mut spans = Vec::new();
    for w in ys.windows(2) {
        let (y0, y1) = (w[0], w[1]);
        if y1 - y0 <= EPS {
            continue;
        }
        let ym = 0.5 * (y0 + y1);
        let mut active: Vec<&SweepEdge> = edges
            .iter()
            .filter(|e| e.y0 <= ym && e.y1 >= ym)
            .collect();
        // Within a band no active edges cross, so mid-band order is total.
        // Tie-break collinear overlapping edges by winding for determinism.
        active.sort_by(|a, b| {
            a.x_at(ym)
                .total_cmp(&b.x_at(ym))
                .then(a.winding.cmp(&b.winding))
                .then(a.x_at(y0).total_cmp(&b.x_at(y0)))
        });

        let mut winding = 0i32;
        let mut open: Option<&SweepEdge> = None;
        let mut band: Vec<BandSpan> = Vec::new();
        for e in active {
            let prev = winding;
            winding += e.winding;
            match mode {
                WindingMode::Simple if !(0..=1).contains(&winding) => {
                    return Err(format!(
                        "invalid winding count {} in band [{}, {}]: self-intersecting ring",
                        winding, y0, y1
                    ));
                }
                WindingMode::Union if winding < 0 => {
                    return Err(format!(
                        "negative winding count in band [{}, {}]: mis-oriented ring",
                        y0, y1
                    ));
                }
                _ => (),
            }
            if prev == 0 && winding != 0 {
                open = Some(e);
            } else if prev != 0 && winding == 0 {
                let l = match open.take() {
                    Some(l) => l,
                    None => {
                        return Err(format!(
                            "span closed without a left edge in band [{}, {}]",
                            y0, y1
                        ))
                    }
                };
                band.push(BandSpan {
                    y0,
                    y1,
                    xl0: l.x_at(y0),
                    xl1: l.x_at(y1),
                    xr0: e.x_at(y0),
                    xr1: e.x_at(y1),
                });
            }
        }
        if winding != 0 {
            return Err(format!(
                "unbalanced winding at band [{}, {}]: open ring",
                y0, y1
            ));
        }
        // Merge spans sharing their full common side-edge; the pair tiles
        // a single trapezoid and splitting it would be needless
        let mut merged: Vec<BandSpan> = Vec::with_capacity(band.len());
        for s in band {
            if let Some(last) = merged.last_mut() {
                if (s.xl0 - last.xr0).abs() <= EPS && (s.xl1 - last.xr1).abs() <= EPS {
                    last.xr0 = s.xr0;
                    last.xr1 = s.xr1;
                    continue;
                }
            }
            merged.push(s);
        }
        spans.extend(merged);
    }
    Ok(spans)
}
