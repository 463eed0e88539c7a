//!
//! # Gpf21 Exposure-Format Writer & Reader
//!
//! GPF is a Raith-style ASCII description of electron-beam exposure patterns.
//! Gpf21 is a library for creating and reading a simplified subset of that format,
//! sufficient for geometry and dose round-tripping.
//! It plays the role for GPF data that a GDSII interface layer plays for layout data:
//! reading and generating format-valid content are its primary goals,
//! and it stores documents on the format's own terms.
//!
//! A [GpfDocument] is a short tree:
//!
//! * The root holds a [GpfHeader] of export metadata (generator, timestamp,
//!   source cell name, and the database-unit scale of the originating layout),
//! * an ordered set of [GpfLayer] blocks, each carrying a layer/datatype pair,
//!   a display label, a relative dose multiplier, and an ordered sequence of
//!   [GpfPoly] records of three or four vertices each, in micrometers, and
//! * a trailing [GpfPayload]: an opaque byte blob, base64-encoded on disk,
//!   which conventionally embeds a snapshot of the source geometry for
//!   provenance verification.
//!
//! On-disk documents are line-oriented ASCII:
//!
//! ```text
//! # Raith Generic Pattern Format (GPF)
//! # Generated by ebeam21
//! # Exported at 1970-01-01T00:00:01Z
//! # Source: TOP
//! # Original database unit: 0.001um
//! VERSION 1.0
//! UNITS 1.0um
//! LAYER 1 1 0 LABEL "1/0"
//! DOSE 1.000
//! POLY 4 0.000000 0.000000 2.000000 0.000000 2.000000 1.000000 0.000000 1.000000
//! ENDLAYER
//! END
//! # GEOMETRY payload base64
//! W10=
//! ```
//!
//! Serialization is deterministic: the same document always renders to
//! identical bytes. Coordinates are written with exactly six decimal places,
//! doses with exactly three; sub-precision noise in the in-memory values
//! cannot reach the output.
//!
//! ## Usage
//!
//! Creating a new and empty [GpfDocument]:
//!
//! ```
//! use gpf21::{GpfDocument, GpfHeader};
//! let doc = GpfDocument::new(GpfHeader::new("ebeam21", "TOP", 0.001));
//! ```
//!
//! Saving a [GpfDocument] to disk (via a temporary sibling file and an
//! atomic rename, so no partially written file is ever observable):
//!
//! ```skip
//! doc.save("out.gpf")?;
//! ```
//!
//! Loading a [GpfDocument] from disk:
//!
//! ```skip
//! let doc = GpfDocument::open("out.gpf")?;
//! ```
//!
//! Each element of the [GpfDocument] tree is also [serde]-serializable,
//! enabling alternate serializations to and from JSON and friends.
//!

pub mod data;
pub use data::*;

pub mod read;
pub use read::GpfParser;

pub mod write;
pub use write::GpfWriter;
