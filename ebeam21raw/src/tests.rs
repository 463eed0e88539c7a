// Std-Lib Imports
use std::path::PathBuf;

// Crates.io
use chrono::NaiveDate;
use tempfile::tempdir;

// Local Imports
use crate::data::*;
use crate::error::*;
use crate::export::{assemble, decode_snapshot, export};
use crate::geom::*;

/// Specified export timestamp for test cases, for byte-stable output
fn test_header() -> ExportHeader {
    ExportHeader::new("TOP", 1e-3).at(
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap(),
    )
}
fn ring(pts: &[(Int, Int)]) -> Ring {
    Ring::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect())
}
/// A 2000x1000 rectangle on layer 1, dose 1.0, heal off
fn rect_layer() -> Layer {
    let mut layer = Layer::new(1, 0);
    layer
        .polys
        .push(Polygon::new(ring(&[(0, 0), (2000, 0), (2000, 1000), (0, 1000)])));
    layer
}

#[test]
fn scenario_single_rectangle() -> ExportResult<()> {
    // One axis-aligned rectangle: exactly one fragment, identical to the input
    let layer = rect_layer();
    let dir = tempdir().map_err(|e| ExportError::msg(e.to_string()))?;
    let dest = dir.path().join("rect.gpf");
    let report = export(&[layer.clone()], &test_header(), &dest)?;
    assert!(report.warnings.is_empty());
    assert_eq!(report.stats.layers, 1);
    assert_eq!(report.stats.polys, 1);

    let doc = gpf21::GpfDocument::open(&dest).map_err(ExportError::from)?;
    assert_eq!(doc.layers.len(), 1);
    let block = &doc.layers[0];
    assert_eq!(block.index, 1);
    assert_eq!((block.layernum, block.datatype), (1, 0));
    assert_eq!(block.dose, 1.0);
    assert_eq!(block.polys.len(), 1);
    // Database units scale to micrometers through the header's dbu
    let um: Vec<(f64, f64)> = block.polys[0].points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(um, vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
    Ok(())
}
#[test]
fn scenario_l_shaped_hexagon() -> ExportResult<()> {
    // An L-shaped hexagon fractures into at least two convex pieces
    let mut layer = Layer::new(2, 0);
    let l = Polygon::new(ring(&[(0, 0), (20, 0), (20, 10), (10, 10), (10, 20), (0, 20)]));
    layer.polys.push(l.clone());

    let (doc, _) = assemble(&[layer], &test_header())?;
    assert_eq!(doc.layers.len(), 1);
    let frags = &doc.layers[0].fragments;
    assert!(frags.len() >= 2);
    let total: i128 = frags.iter().map(|f| f.area2()).sum();
    assert_eq!(total, l.area2());
    for frag in frags.iter() {
        assert!(frag.ring.len() >= 3 && frag.ring.len() <= 4);
        assert!(frag.ring.is_convex());
    }
    Ok(())
}
#[test]
fn scenario_healed_overlapping_squares() -> ExportResult<()> {
    // Two overlapping 10x10 squares on a healed layer: the union is tiled exactly
    let mut layer = Layer::new(3, 0);
    layer.heal = true;
    layer
        .polys
        .push(Polygon::new(ring(&[(0, 0), (10, 0), (10, 10), (0, 10)])));
    layer
        .polys
        .push(Polygon::new(ring(&[(5, 0), (15, 0), (15, 10), (5, 10)])));

    let (doc, _) = assemble(&[layer], &test_header())?;
    let frags = &doc.layers[0].fragments;
    let union_area2 = 2 * (100 + 100 - 50);
    let total: i128 = frags.iter().map(|f| f.area2()).sum();
    assert_eq!(total, union_area2);

    // Pairwise fragment interiors are disjoint: probe every interior
    // database-grid point and count its covering fragments
    for x in 0..15 {
        for y in 0..10 {
            let probe = Point::new(x, y);
            let covers = frags
                .iter()
                .filter(|f| f.ring.contains(&probe) && !f.ring.on_boundary(&probe))
                .count();
            assert!(covers <= 1);
        }
    }
    Ok(())
}
#[test]
fn scenario_polygon_with_hole() -> ExportResult<()> {
    // Fractured area equals outer minus hole; nothing reaches into the hole
    let mut layer = Layer::new(4, 0);
    layer.polys.push(Polygon::with_holes(
        ring(&[(0, 0), (100, 0), (100, 100), (0, 100)]),
        vec![ring(&[(20, 20), (80, 20), (80, 80), (20, 80)])],
    ));
    let (doc, _) = assemble(&[layer], &test_header())?;
    let frags = &doc.layers[0].fragments;
    let total: i128 = frags.iter().map(|f| f.area2()).sum();
    assert_eq!(total, 2 * (10_000 - 3_600));
    let hole_center = Point::new(50, 50);
    for frag in frags.iter() {
        assert!(!frag.ring.contains(&hole_center));
    }
    Ok(())
}
#[test]
fn scenario_excluded_layer_is_absent() -> ExportResult<()> {
    // `included = false` contributes nothing downstream, geometry notwithstanding
    let mut excluded = rect_layer();
    excluded.layernum = 9;
    excluded.included = false;
    let included = rect_layer();

    let dir = tempdir().map_err(|e| ExportError::msg(e.to_string()))?;
    let dest = dir.path().join("filtered.gpf");
    export(&[included, excluded], &test_header(), &dest)?;

    let doc = gpf21::GpfDocument::open(&dest).map_err(ExportError::from)?;
    assert_eq!(doc.layers.len(), 1);
    assert_eq!(doc.layers[0].layernum, 1);
    // Nor does the excluded layer reach the provenance snapshot
    let snapshot = decode_snapshot(&doc.payload)?;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].layernum, 1);
    Ok(())
}
#[test]
fn scenario_degenerate_ring_recovers() -> ExportResult<()> {
    // A zero-area ring is dropped with a recorded warning; the export succeeds
    let mut layer = rect_layer();
    layer
        .polys
        .push(Polygon::new(ring(&[(0, 0), (500, 0), (250, 0)])));

    let dir = tempdir().map_err(|e| ExportError::msg(e.to_string()))?;
    let dest = dir.path().join("degenerate.gpf");
    let report = export(&[layer], &test_header(), &dest)?;
    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        ExportWarning::DegenerateRing { layer, .. } => assert_eq!(layer, "1/0"),
    }
    // Only the valid rectangle's geometry appears
    let doc = gpf21::GpfDocument::open(&dest).map_err(ExportError::from)?;
    assert_eq!(doc.stats().polys, 1);
    Ok(())
}
#[test]
fn layer_of_only_degenerate_rings_is_omitted() -> ExportResult<()> {
    // A layer left with no valid geometry is silently omitted, not an error
    let mut empty = Layer::new(5, 0);
    empty
        .polys
        .push(Polygon::new(ring(&[(0, 0), (500, 0), (250, 0)])));
    let (doc, warnings) = assemble(&[empty, rect_layer()], &test_header())?;
    assert_eq!(warnings.len(), 1);
    assert_eq!(doc.layers.len(), 1);
    assert_eq!(doc.layers[0].layernum, 1);
    Ok(())
}
#[test]
fn dose_validation_rejects_bad_configs() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let mut layer = rect_layer();
        layer.dose = bad;
        match assemble(&[layer], &test_header()) {
            Err(ExportError::Validation { .. }) => (),
            other => panic!("expected a validation error for dose {}, got {:?}", bad, other),
        }
    }
    // And the chainable constructor rejects them up front
    assert!(Layer::new(1, 0).with_dose(0.0).is_err());
    assert!(Layer::new(1, 0).with_dose(2.5).is_ok());
}
#[test]
fn dose_propagates_per_layer() -> ExportResult<()> {
    // Every fragment carries its own layer's dose; doses do not cross layers
    let mut a = rect_layer();
    a.dose = 1.5;
    let mut b = Layer::new(2, 0);
    b.dose = 0.5;
    b.polys
        .push(Polygon::new(ring(&[(0, 0), (20, 0), (20, 10), (10, 10), (10, 20), (0, 20)])));

    let (doc, _) = assemble(&[a.clone(), b.clone()], &test_header())?;
    for block in doc.layers.iter() {
        for frag in block.fragments.iter() {
            assert_eq!(frag.dose, block.dose);
        }
    }

    // Changing one layer's dose leaves the other layer's fragments untouched
    let b_frags = doc.layers[1].fragments.clone();
    let a2 = a.with_dose(3.0)?;
    let (doc2, _) = assemble(&[a2, b], &test_header())?;
    assert_eq!(doc2.layers[0].fragments[0].dose, 3.0);
    assert_eq!(doc2.layers[1].fragments, b_frags);
    Ok(())
}
#[test]
fn serialization_is_deterministic() -> ExportResult<()> {
    // Same document, same bytes, byte-for-byte
    let mut healed = Layer::new(3, 0);
    healed.heal = true;
    healed
        .polys
        .push(Polygon::new(ring(&[(0, 0), (10, 0), (10, 10), (0, 10)])));
    healed
        .polys
        .push(Polygon::new(ring(&[(5, 5), (15, 5), (15, 15), (5, 15)])));
    let layers = vec![rect_layer(), healed];

    let (doc, _) = assemble(&layers, &test_header())?;
    let bytes1 = doc.to_gpf()?.to_bytes().map_err(ExportError::from)?;
    let (doc2, _) = assemble(&layers, &test_header())?;
    let bytes2 = doc2.to_gpf()?.to_bytes().map_err(ExportError::from)?;
    assert_eq!(bytes1, bytes2);
    Ok(())
}
#[test]
fn snapshot_round_trips_pristine_geometry() -> ExportResult<()> {
    // The trailer payload reconstructs the pre-heal, pre-fracture input exactly
    let mut healed = Layer::new(3, 0);
    healed.heal = true;
    healed
        .polys
        .push(Polygon::new(ring(&[(0, 0), (10, 0), (10, 10), (0, 10)])));
    healed
        .polys
        .push(Polygon::new(ring(&[(5, 0), (15, 0), (15, 10), (5, 10)])));
    let layers = vec![rect_layer(), healed];

    let dir = tempdir().map_err(|e| ExportError::msg(e.to_string()))?;
    let dest = dir.path().join("prov.gpf");
    export(&layers, &test_header(), &dest)?;

    let doc = gpf21::GpfDocument::open(&dest).map_err(ExportError::from)?;
    let snapshot = decode_snapshot(&doc.payload)?;
    // Vertex-for-vertex equality with the pristine input, overlaps and all
    assert_eq!(snapshot, layers);
    Ok(())
}
#[test]
fn write_failures_surface_the_path() {
    let missing = PathBuf::from("/nonexistent-ebeam21-dir/out.gpf");
    match export(&[rect_layer()], &test_header(), &missing) {
        Err(ExportError::Write { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a write error, got {:?}", other),
    }
    assert!(!missing.exists());
}
#[test]
fn labels_default_to_layer_and_datatype() {
    let anon = Layer::new(12, 5);
    assert_eq!(anon.label(), "12/5");
    let mut named = Layer::new(12, 5);
    named.name = Some("METAL1".into());
    assert_eq!(named.label(), "METAL1");
}
#[test]
fn heal_off_leaves_overlaps_in_place() -> ExportResult<()> {
    // Without healing, overlapping inputs fracture independently,
    // double-covering the overlap region
    let mut layer = Layer::new(3, 0);
    layer
        .polys
        .push(Polygon::new(ring(&[(0, 0), (10, 0), (10, 10), (0, 10)])));
    layer
        .polys
        .push(Polygon::new(ring(&[(5, 0), (15, 0), (15, 10), (5, 10)])));
    let (doc, _) = assemble(&[layer], &test_header())?;
    let total: i128 = doc.layers[0].fragments.iter().map(|f| f.area2()).sum();
    assert_eq!(total, 2 * 200);
    Ok(())
}
