//!
//! # Geometry Extraction
//!
//! Flattens a hierarchical geometry [Source] into per-layer polygon sets.
//! Sources consist of [Cell]s holding geometric [Element]s and placed
//! [Instance]s of other cells; flattening cascades each instance's
//! matrix-vector transform down the hierarchy and buckets the resulting
//! polygons by their `(layernum, datatype)` pair.
//!

// Std-Lib
use std::collections::BTreeMap;

// Crates.io
use serde::{Deserialize, Serialize};
use tracing::debug;

// Local Imports
use crate::data::Layer;
use crate::error::{ExportError, ExportResult};
use crate::geom::{Point, Polygon, Shape, ShapeTrait, Transform, TransformTrait};

/// Maximum supported instance-hierarchy depth.
/// Recursion past this bound indicates a reference cycle.
const MAX_DEPTH: usize = 64;

/// Instance of another Cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Instance Name
    pub inst_name: String,
    /// Name of the referenced [Cell]
    pub cell_name: String,
    /// Location of the cell origin,
    /// regardless of rotation or reflection
    pub loc: Point,
    /// Vertical reflection,
    /// applied *before* rotation
    pub reflect_vert: bool,
    /// Angle of rotation (degrees),
    /// counter-clockwise and applied *after* reflection
    pub angle: Option<f64>,
}

/// # Primitive Geometric Element
///
/// Combines a geometric [Shape] with its `(layernum, datatype)` pair.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// Layer Number
    pub layernum: i16,
    /// Datatype Number
    pub datatype: i16,
    /// Shape
    pub inner: Shape,
}

/// # Source Cell
///
/// A named collection of geometric [Element]s and [Instance]s of other cells.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    /// Cell Name
    pub name: String,
    /// Primitive/ Geometric Elements
    pub elems: Vec<Element>,
    /// Instances of other cells
    pub insts: Vec<Instance>,
}
impl Cell {
    /// Create a new and empty Cell named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// # Geometry Source
///
/// A hierarchical collection of cell definitions,
/// the input side of the extraction stage.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Source {
    /// Source Name
    pub name: String,
    /// Cell Definitions
    pub cells: Vec<Cell>,
}
impl Source {
    /// Create a new and empty Source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }
    /// Get a reference to the [Cell] named `name`, if defined
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name == name)
    }
}

/// Flatten `src`, rooted at cell `top`, into per-layer [Layer]s.
///
/// Layers come back ordered by `(layernum, datatype)`, each with default
/// flags: included, not healed, unit dose. Callers adjust the flags and
/// doses before export.
pub fn extract(src: &Source, top: &str) -> ExportResult<Vec<Layer>> {
    let top = match src.cell(top) {
        Some(cell) => cell,
        None => {
            return ExportError::fail(format!("extraction top cell `{}` is not defined", top))
        }
    };
    let mut buckets: BTreeMap<(i16, i16), Vec<Polygon>> = BTreeMap::new();
    // Kick off recursive calls, with the identity-transform applied for the top-level cell
    flatten_helper(src, top, &Transform::identity(), 0, &mut buckets)?;
    debug!(
        cell = top.name.as_str(),
        layers = buckets.len(),
        "extracted source geometry"
    );
    let layers = buckets
        .into_iter()
        .map(|((layernum, datatype), polys)| Layer {
            polys,
            ..Layer::new(layernum, datatype)
        })
        .collect();
    Ok(layers)
}

/// Internal helper and core logic for [extract].
fn flatten_helper(
    src: &Source,
    cell: &Cell,
    trans: &Transform,
    depth: usize,
    buckets: &mut BTreeMap<(i16, i16), Vec<Polygon>>,
) -> ExportResult<()> {
    if depth > MAX_DEPTH {
        return ExportError::fail(format!(
            "instance hierarchy exceeds depth {} at cell `{}`: reference cycle?",
            MAX_DEPTH, cell.name
        ));
    }
    // Translate each geometric element into layer-bucketed polygons
    for elem in cell.elems.iter() {
        let poly = elem.inner.to_poly().transform(trans);
        buckets
            .entry((elem.layernum, elem.datatype))
            .or_default()
            .push(poly);
    }
    // Visit all of the cell's instances, recursively getting their elements
    for inst in cell.insts.iter() {
        let child = match src.cell(&inst.cell_name) {
            Some(cell) => cell,
            None => {
                return ExportError::fail(format!(
                    "instance `{}` references undefined cell `{}`",
                    inst.inst_name, inst.cell_name
                ))
            }
        };
        // Create a new [Transform], cascading the parent's and instance's
        let inst_trans = Transform::from_instance(&inst.loc, inst.reflect_vert, inst.angle);
        let trans = Transform::cascade(trans, &inst_trans);
        flatten_helper(src, child, &trans, depth + 1, buckets)?;
    }
    Ok(())
}
