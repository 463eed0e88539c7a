//!
//! # Raw Export Data Model
//!
//! Defines the primary structures for representation of per-layer export
//! geometry, including [Layer], [Fragment], and [ExportDocument].
//!

// Crates.io
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{ExportError, ExportResult};
use crate::geom::{Point, Ring};

/// # Location Integer Type-Alias
///
/// Used for all layout spatial coordinates.
/// Designed for quickly swapping to other integer types, if we so desire.
///
pub type Int = isize;

/// Default generator-name written into export headers
pub const GENERATOR: &str = "ebeam21";

/// # Export Layer
///
/// One selected source layer: its `(layernum, datatype)` identity,
/// optional display name, selection and healing flags,
/// relative dose multiplier, and polygon geometry in database units.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    /// Layer Number
    pub layernum: i16,
    /// Datatype Number
    pub datatype: i16,
    /// Layer Name
    pub name: Option<String>,
    /// Selection flag. Excluded layers contribute nothing downstream.
    pub included: bool,
    /// Healing flag. Healed layers are boolean-union merged before fracturing.
    pub heal: bool,
    /// Relative dose multiplier. Must be finite and positive.
    pub dose: f64,
    /// Geometry, in database units
    pub polys: Vec<crate::geom::Polygon>,
}
impl Layer {
    /// Create a new, empty, included [Layer] with unit dose and healing disabled
    pub fn new(layernum: i16, datatype: i16) -> Self {
        Self {
            layernum,
            datatype,
            name: None,
            included: true,
            heal: false,
            dose: 1.0,
            polys: Vec::new(),
        }
    }
    /// Set the dose multiplier. Consumes and returns `self` for chainability.
    /// Rejects non-finite or non-positive values.
    pub fn with_dose(mut self, dose: f64) -> ExportResult<Self> {
        if !dose.is_finite() || dose <= 0.0 {
            return Err(ExportError::validation(format!(
                "invalid dose {} for layer {}",
                dose,
                self.label()
            )));
        }
        self.dose = dose;
        Ok(self)
    }
    /// Validate the layer's configuration
    pub fn validate(&self) -> ExportResult<()> {
        if !self.dose.is_finite() || self.dose <= 0.0 {
            return Err(ExportError::validation(format!(
                "invalid dose {} for layer {}",
                self.dose,
                self.label()
            )));
        }
        Ok(())
    }
    /// Get the display label: the layer name if assigned,
    /// or the `"{layernum}/{datatype}"` form if not
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}/{}", self.layernum, self.datatype),
        }
    }
}

/// # Fragment
///
/// One convex output piece of three or four vertices,
/// tagged with its owning layer's identity and relative dose.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fragment {
    /// Owning Layer Number
    pub layernum: i16,
    /// Owning Datatype Number
    pub datatype: i16,
    /// Owning layer's relative dose multiplier
    pub dose: f64,
    /// Vertex ring, in database units
    pub ring: Ring,
}
impl Fragment {
    /// Twice the enclosed area
    pub fn area2(&self) -> i128 {
        self.ring.area2()
    }
    /// Vertex access shorthand
    pub fn points(&self) -> &[Point] {
        &self.ring.points
    }
}

/// # Export Header
///
/// Document-level metadata: generator name, export timestamp,
/// source cell name, and the database unit scale in micrometers.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportHeader {
    /// Generating-tool name
    pub generator: String,
    /// Export timestamp, UTC
    pub exported_at: NaiveDateTime,
    /// Source cell name
    pub cell: String,
    /// Database unit, in micrometers
    pub dbu_um: f64,
}
impl ExportHeader {
    /// Create a new [ExportHeader] for cell `cell`, timestamped now
    pub fn new(cell: impl Into<String>, dbu_um: f64) -> Self {
        Self {
            generator: GENERATOR.to_string(),
            exported_at: Utc::now().naive_utc(),
            cell: cell.into(),
            dbu_um,
        }
    }
    /// Set the export timestamp. Consumes and returns `self` for chainability.
    /// Primarily for reproducible (byte-stable) exports.
    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.exported_at = timestamp;
        self
    }
}

/// # Per-Document Layer Block
///
/// An included layer's post-pipeline content:
/// its one-based document position, identity, label, dose,
/// and ordered [Fragment]s.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocLayer {
    /// One-based document position
    pub index: usize,
    /// Layer Number
    pub layernum: i16,
    /// Datatype Number
    pub datatype: i16,
    /// Display label
    pub label: String,
    /// Relative dose multiplier
    pub dose: f64,
    /// Ordered convex output pieces
    pub fragments: Vec<Fragment>,
}

/// # Export Document
///
/// The assembled, immutable result of the geometry pipeline:
/// header metadata, ordered per-layer fragment blocks,
/// and the pristine pre-heal snapshot destined for the file trailer.
/// Assembled once by [crate::export::assemble] and serialized once.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDocument {
    /// Header metadata
    pub header: ExportHeader,
    /// Ordered layer blocks
    pub layers: Vec<DocLayer>,
    /// Pristine pre-heal, pre-fracture geometry of the included layers
    pub snapshot: Vec<Layer>,
}

/// # Export Warning
///
/// Recoverable conditions recorded during an export.
/// Warnings never abort the export; fatal conditions are [ExportError]s.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ExportWarning {
    /// A degenerate ring was dropped from a layer's geometry
    DegenerateRing { layer: String, detail: String },
}

/// # Export Report
///
/// Returned by a successful [crate::export::export] call:
/// the document's aggregate statistics plus any recorded warnings.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Recorded warnings
    pub warnings: Vec<ExportWarning>,
    /// Document statistics
    pub stats: gpf21::GpfStats,
}
