//!
//! # Ebeam21 Raw Geometry & Export Pipeline
//!
//! The geometric core of the ebeam21 workspace.
//! Consists of integer-coordinate geometric primitives, a flattener for
//! hierarchical geometry sources, and the heal / fracture / dose pipeline
//! which turns per-layer polygon sets into a [gpf21] exposure document.
//!
//! The pipeline is a pure function of an explicit [Layer] list plus a
//! destination path, with no hidden session state:
//!
//! * [heal] merges a layer's possibly-overlapping shapes into a minimal
//!   disjoint polygon set (boolean union),
//! * [fracture] decomposes each polygon, holes included, into convex pieces
//!   of at most four vertices,
//! * [export::annotate] tags every piece with its layer's relative dose, and
//! * [export::export] assembles, serializes, and atomically writes the
//!   resulting document, embedding a snapshot of the pristine source
//!   geometry in the file trailer for provenance verification.
//!

// Internal modules & re-exports
pub use ebeam21utils as utils;

pub mod geom;
pub use geom::*;

pub mod data;
pub use data::*;

pub mod error;
pub use error::*;

pub mod extract;
pub use extract::*;

mod sweep;

pub mod heal;
pub use heal::heal_layer;

pub mod fracture;
pub use fracture::fracture_polygon;

pub mod export;
pub use export::{annotate, assemble, decode_snapshot, export};

#[cfg(test)]
mod tests;
